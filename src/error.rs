//! All error types for the versync crate.
//!
//! Validation findings (missing or duplicate keys) are never errors; they are
//! collected into a [`ValidationReport`](crate::report::ValidationReport).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing prerequisite: {}", .paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    MissingPrerequisite { paths: Vec<PathBuf> },

    #[error("no version declaration found in {}", .0.display())]
    VersionNotFound(PathBuf),

    #[error("`{0}` is not a valid selection: expected 0, 1, 2 or 3")]
    InvalidMode(String),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("directory walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("invalid accessor pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt release manifest: {0}")]
    CorruptManifest(String),
}

impl Error {
    /// Creates a missing-prerequisite error for a single path.
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Error::MissingPrerequisite {
            paths: vec![path.into()],
        }
    }
}
