use versync::{ValidationReport, verify_resources};

use crate::validation::ProjectContext;

/// Output style for the `verify` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Run the resource check. Findings are part of the report, not errors.
pub fn run_verify_command(project: &ProjectContext) -> Result<ValidationReport, String> {
    verify_resources(&project.layout, &project.config).map_err(|e| e.to_string())
}

pub fn render_report(report: &ValidationReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => report
            .to_json()
            .map_err(|e| format!("Failed to serialize report: {}", e)),
    }
}
