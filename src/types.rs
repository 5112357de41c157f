//! Core types shared by the version-propagation and resource-consistency paths.

use std::{
    cmp::Ordering,
    fmt::Display,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// The canonical product version, kept as raw dotted text (e.g. `"1.2.3"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VersionString(String);

impl VersionString {
    pub fn new(text: impl Into<String>) -> Self {
        VersionString(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the 1-based dotted component, or an empty string when the
    /// version has fewer components.
    ///
    /// ```
    /// use versync::VersionString;
    ///
    /// let version = VersionString::new("3.1.4");
    /// assert_eq!(version.component(2), "1");
    /// assert_eq!(version.component(4), "");
    /// ```
    pub fn component(&self, index: usize) -> &str {
        if index == 0 {
            return "";
        }
        self.0.split('.').nth(index - 1).unwrap_or("")
    }

    /// Numeric, component-wise comparison.
    ///
    /// Components that both parse as integers compare numerically, anything
    /// else compares as text. Missing trailing components count as `0`, so
    /// `1.2` and `1.2.0` are equal.
    pub fn compare(&self, other: &VersionString) -> Ordering {
        let left: Vec<&str> = self.0.split('.').collect();
        let right: Vec<&str> = other.0.split('.').collect();
        let len = left.len().max(right.len());

        for i in 0..len {
            let a = left.get(i).copied().unwrap_or("0");
            let b = right.get(i).copied().unwrap_or("0");
            let ordering = match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => a.cmp(b),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl Display for VersionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionString {
    fn from(value: &str) -> Self {
        VersionString::new(value)
    }
}

/// The artifact formats whose embedded version text is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    InstallerScript,
    BundleDescriptor,
    ReleaseNotes,
}

impl Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FormatKind::InstallerScript => "installer script",
            FormatKind::BundleDescriptor => "bundle descriptor",
            FormatKind::ReleaseNotes => "release notes",
        };
        f.write_str(name)
    }
}

/// One artifact to rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub path: PathBuf,
    pub kind: FormatKind,
}

impl FileTarget {
    pub fn new(path: impl Into<PathBuf>, kind: FormatKind) -> Self {
        FileTarget {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One localization lookup found in source code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceKeyReference {
    pub source_file: PathBuf,
    /// 1-based line number.
    pub line_number: usize,
    pub key: String,
}

/// One `key=value` definition inside a locale bundle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BundleEntry {
    pub bundle_name: String,
    pub key: String,
    /// 1-based line number.
    pub line_number: usize,
}

/// A single reported inconsistency.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    MissingKey {
        reference: ResourceKeyReference,
        bundle: String,
    },
    DuplicateKey {
        bundle: String,
        key: String,
        /// Line of the definition that is shadowed.
        line: usize,
        /// Line of the next definition of the same key.
        duplicate_line: usize,
    },
}

impl Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::MissingKey { reference, bundle } => write!(
                f,
                "::MISSING KEY::\nSource file: {}\nLine: {}\nBundle: {}\nKey: {}",
                reference.source_file.display(),
                reference.line_number,
                bundle,
                reference.key
            ),
            Finding::DuplicateKey {
                bundle,
                key,
                line,
                duplicate_line,
            } => write!(
                f,
                "::DUPLICATE KEY::\nBundle: {}\nKey: {}\nLines: {} and {}",
                bundle, key, line, duplicate_line
            ),
        }
    }
}
