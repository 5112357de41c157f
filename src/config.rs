//! Project configuration.
//!
//! An optional `versync.toml` at the project root overrides the default
//! layout. Every field has a default, so an empty file (or no file) describes
//! the stock project layout.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::Error;

/// The config file name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "versync.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Product name as it appears in installer and release-notes text.
    pub product_name: String,
    pub version: VersionConfig,
    pub artifacts: ArtifactsConfig,
    pub resources: ResourcesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            product_name: "Get Organized".to_string(),
            version: VersionConfig::default(),
            artifacts: ArtifactsConfig::default(),
            resources: ResourcesConfig::default(),
        }
    }
}

/// Where the canonical version is declared.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// Path of the declaring source file, relative to the project root.
    pub source: PathBuf,
    /// Text that identifies the declaration line.
    pub marker: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            source: ["src", "adl", "go", "gui", "Domain.java"].iter().collect(),
            marker: "final String VERSION =".to_string(),
        }
    }
}

/// Downstream artifacts, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub launcher: PathBuf,
    pub installer_script: PathBuf,
    pub bundle_descriptor: PathBuf,
    pub release_notes: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        ArtifactsConfig {
            launcher: ["installer", "launcher.xml"].iter().collect(),
            installer_script: ["installer", "Windows.iss"].iter().collect(),
            bundle_descriptor: ["installer", "OSX.packproj"].iter().collect(),
            release_notes: ["installer", "releasenotes.html"].iter().collect(),
        }
    }
}

/// Source tree and locale bundles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    pub source_dir: PathBuf,
    pub bundle_dir: PathBuf,
    /// Extension (without the dot) of the files to scan.
    pub source_extension: String,
    /// Directory names skipped at any depth, also ignored in the bundle directory.
    pub excluded_dirs: Vec<String>,
    /// Call-site prefixes whose first quoted argument is a bundle key.
    pub accessors: Vec<String>,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        ResourcesConfig {
            source_dir: PathBuf::from("src"),
            bundle_dir: ["src", "adl", "go", "resource", "languages"].iter().collect(),
            source_extension: "java".to_string(),
            excluded_dirs: vec![
                ".svn".to_string(),
                ".git".to_string(),
                ".hg".to_string(),
                "images".to_string(),
            ],
            accessors: vec![
                "language.getString(".to_string(),
                "getLanguage().getString(".to_string(),
            ],
        }
    }
}

impl Config {
    /// Parse a config file from a string.
    pub fn parse(contents: &str) -> Result<Self, Error> {
        Ok(toml::from_str(contents)?)
    }

    /// Load `versync.toml` from the project root, or the defaults when absent.
    pub fn load_or_default(project_root: &Path) -> Result<Self, Error> {
        let path = project_root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            debug!("loading config from {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            Self::parse(&contents)
        } else {
            debug!("no config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }
}
