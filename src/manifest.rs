//! The release manifest (`version.txt`) published next to the installers.
//!
//! ```text
//! version=1.2.3
//! portable=1048576
//! win=2097152
//! mac=3145728
//! ```
//!
//! Only the text format and the version comparison live here; moving the
//! file to and from the update server is the uploader's business.

use std::{cmp::Ordering, fs, path::Path};

use serde::Serialize;

use crate::{error::Error, types::VersionString};

/// Installed artifact sizes in bytes, plus the version they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseManifest {
    pub version: VersionString,
    pub portable: Option<u64>,
    pub win: Option<u64>,
    pub mac: Option<u64>,
}

/// How a local version relates to the one currently published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadVerdict {
    /// The published version is older: a normal upgrade.
    Older,
    /// The published version is the one being pushed.
    Same,
    /// The published version is newer than the one being pushed.
    Newer,
}

impl UploadVerdict {
    /// Classifies the published version relative to the local one.
    pub fn classify(published: &VersionString, local: &VersionString) -> Self {
        match published.compare(local) {
            Ordering::Less => UploadVerdict::Older,
            Ordering::Equal => UploadVerdict::Same,
            Ordering::Greater => UploadVerdict::Newer,
        }
    }

    pub fn describe(&self, published: &VersionString) -> String {
        match self {
            UploadVerdict::Older => format!(
                "The version on the server is {}, which is older than the version being pushed.",
                published
            ),
            UploadVerdict::Same => format!(
                "The version on the server is {}, which is the same as the version being pushed.",
                published
            ),
            UploadVerdict::Newer => format!(
                "The version on the server is {}, which is newer than the version being pushed. It is not recommended to continue.",
                published
            ),
        }
    }
}

impl ReleaseManifest {
    /// Parses manifest text. The `version` line is mandatory; size lines are
    /// optional but must be numeric when present.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let mut version = None;
        let mut sizes = [None; 3];

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            let slot = match key.trim() {
                "version" => {
                    if value.is_empty() {
                        return Err(Error::CorruptManifest("empty version".to_string()));
                    }
                    version = Some(VersionString::new(value));
                    continue;
                }
                "portable" => 0,
                "win" => 1,
                "mac" => 2,
                _ => continue,
            };
            let size = value.parse::<u64>().map_err(|_| {
                Error::CorruptManifest(format!("size `{}` for `{}` is not a number", value, key.trim()))
            })?;
            sizes[slot] = Some(size);
        }

        let version = version.ok_or_else(|| Error::CorruptManifest("no version line".to_string()))?;
        Ok(ReleaseManifest {
            version,
            portable: sizes[0],
            win: sizes[1],
            mac: sizes[2],
        })
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Builds the manifest for a release from the artifacts on disk.
    pub fn from_artifacts(
        version: VersionString,
        portable: &Path,
        win: &Path,
        mac: &Path,
    ) -> Result<Self, Error> {
        Ok(ReleaseManifest {
            version,
            portable: Some(fs::metadata(portable)?.len()),
            win: Some(fs::metadata(win)?.len()),
            mac: Some(fs::metadata(mac)?.len()),
        })
    }

    /// Renders the manifest text, omitting unknown sizes.
    pub fn render(&self) -> String {
        let mut out = format!("version={}\n", self.version);
        for (key, size) in [("portable", self.portable), ("win", self.win), ("mac", self.mac)] {
            if let Some(size) = size {
                out.push_str(&format!("{}={}\n", key, size));
            }
        }
        out
    }
}
