//! Inno Setup style installer scripts (`Windows.iss`).
//!
//! Two keys carry the version:
//!
//! ```text
//! AppVersion=1.2.3
//! AppVerName=Get Organized 1.2.3
//! ```

use tracing::{info, warn};

use crate::{
    traits::{LineEdit, LineRecognizer},
    types::VersionString,
};

const APP_VERSION: &str = "AppVersion=";
const APP_VER_NAME: &str = "AppVerName=";

/// Line-local recognizer for installer scripts.
#[derive(Debug, Clone)]
pub struct InstallerRecognizer {
    version: VersionString,
    /// Number of space-separated tokens the product name occupies in `AppVerName`.
    name_tokens: usize,
}

impl InstallerRecognizer {
    pub fn new(version: VersionString, product_name: &str) -> Self {
        InstallerRecognizer {
            version,
            name_tokens: product_name.split_whitespace().count(),
        }
    }

    fn app_version(&self, line: &str, value_start: usize) -> LineEdit {
        let old = line[value_start..].trim_end();
        if old == self.version.as_str() {
            return LineEdit::Keep;
        }
        info!(
            "Updated Windows setup script AppVersion from {} to {}",
            old, self.version
        );
        LineEdit::from_candidate(line, format!("{}{}", &line[..value_start], self.version))
    }

    fn app_ver_name(&self, line: &str, value_start: usize) -> LineEdit {
        let value = &line[value_start..];
        let Some(tail_offset) = nth_token_offset(value, self.name_tokens) else {
            warn!("AppVerName line has no version after the product name: {}", line);
            return LineEdit::Keep;
        };
        let tail_start = value_start + tail_offset;
        let old = line[tail_start..].trim_end();
        if old == self.version.as_str() {
            return LineEdit::Keep;
        }
        info!(
            "Updated Windows setup script AppVerName from {} to {}",
            old, self.version
        );
        LineEdit::from_candidate(line, format!("{}{}", &line[..tail_start], self.version))
    }
}

/// Byte offset of the `n`-th (0-based) single-space separated token.
fn nth_token_offset(value: &str, n: usize) -> Option<usize> {
    let mut offset = 0;
    for _ in 0..n {
        offset += value[offset..].find(' ')? + 1;
    }
    if value[offset..].trim().is_empty() {
        None
    } else {
        Some(offset)
    }
}

impl LineRecognizer for InstallerRecognizer {
    fn recognize(&mut self, line: &str) -> LineEdit {
        if let Some(index) = line.find(APP_VERSION) {
            self.app_version(line, index + APP_VERSION.len())
        } else if let Some(index) = line.find(APP_VER_NAME) {
            self.app_ver_name(line, index + APP_VER_NAME.len())
        } else {
            LineEdit::Keep
        }
    }
}
