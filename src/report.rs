//! Aggregation of validation findings into a pass/fail result.

use std::fmt::Display;

use serde::Serialize;

use crate::types::Finding;

/// Counters describing what a validation run looked at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub source_files: usize,
    pub references: usize,
    pub bundles: Vec<String>,
}

/// Findings of the missing-key and duplicate-key checks.
///
/// The run succeeds exactly when both finding sets are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub missing_keys: Vec<Finding>,
    pub duplicate_keys: Vec<Finding>,
    pub stats: ScanStats,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a finding under the matching set.
    pub fn record(&mut self, finding: Finding) {
        match finding {
            Finding::MissingKey { .. } => self.missing_keys.push(finding),
            Finding::DuplicateKey { .. } => self.duplicate_keys.push(finding),
        }
    }

    pub fn extend<I: IntoIterator<Item = Finding>>(&mut self, findings: I) {
        for finding in findings {
            self.record(finding);
        }
    }

    pub fn is_success(&self) -> bool {
        self.missing_keys.is_empty() && self.duplicate_keys.is_empty()
    }

    /// Process exit status for this report: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.missing_keys.iter().chain(self.duplicate_keys.iter())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&serde_json::json!({
            "success": self.is_success(),
            "missing_keys": self.missing_keys,
            "duplicate_keys": self.duplicate_keys,
            "stats": self.stats,
        }))
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "::Verify Source::")?;
        writeln!(
            f,
            "Scanned {} source files, {} references",
            self.stats.source_files, self.stats.references
        )?;
        for finding in &self.missing_keys {
            writeln!(f, "{}\n", finding)?;
        }
        if self.missing_keys.is_empty() {
            writeln!(f, "::NO MISSING RESOURCES::")?;
        }
        writeln!(f)?;

        writeln!(f, "::Verify Resource Bundle::")?;
        writeln!(f, "Bundles found: {}", self.stats.bundles.join(", "))?;
        for finding in &self.duplicate_keys {
            writeln!(f, "{}\n", finding)?;
        }
        if self.duplicate_keys.is_empty() {
            writeln!(f, "::NO DUPLICATE KEYS::")?;
        }
        Ok(())
    }
}
