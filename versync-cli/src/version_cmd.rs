use chrono::NaiveDate;
use tracing::info;
use versync::{VersionMode, current_version, propagate_version};

use crate::validation::ProjectContext;

/// Run the `version` command and return the text to print on stdout.
///
/// `Propagate` rewrites every artifact that disagrees with the canonical
/// version and yields the full version. `Component(n)` yields the n-th dotted
/// component and modifies nothing.
pub fn run_version_command(
    project: &ProjectContext,
    mode: VersionMode,
    today: NaiveDate,
) -> Result<String, String> {
    match mode {
        VersionMode::Propagate => {
            let summary = propagate_version(&project.layout, &project.config, today)
                .map_err(|e| e.to_string())?;
            if summary.changed.is_empty() {
                info!("All artifacts already carry version {}", summary.version);
            } else {
                info!("Rewrote {} artifact(s)", summary.changed.len());
            }
            Ok(summary.version.to_string())
        }
        VersionMode::Component(index) => {
            let version = current_version(&project.layout, &project.config)
                .map_err(|e| e.to_string())?;
            Ok(version.component(index).to_string())
        }
    }
}
