use std::path::Path;

use tracing::warn;
use versync::{ReleaseManifest, UploadVerdict, current_version};

use crate::validation::{ProjectContext, validate_artifact};

/// Installer artifacts whose sizes go into the release manifest.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub portable: String,
    pub win: String,
    pub mac: String,
}

/// Build the manifest for the current version and, when `against` names a
/// published manifest, append the verdict of comparing the two.
pub fn run_manifest_command(
    project: &ProjectContext,
    artifacts: &ArtifactPaths,
    against: Option<&str>,
) -> Result<String, String> {
    for path in [&artifacts.portable, &artifacts.win, &artifacts.mac] {
        validate_artifact(path)?;
    }

    let version =
        current_version(&project.layout, &project.config).map_err(|e| e.to_string())?;
    let manifest = ReleaseManifest::from_artifacts(
        version,
        Path::new(&artifacts.portable),
        Path::new(&artifacts.win),
        Path::new(&artifacts.mac),
    )
    .map_err(|e| e.to_string())?;

    let mut output = manifest.render();
    if let Some(against) = against {
        let published = ReleaseManifest::read_from(against)
            .map_err(|e| format!("Cannot read {}: {}", against, e))?;
        let verdict = UploadVerdict::classify(&published.version, &manifest.version);
        if verdict == UploadVerdict::Newer {
            warn!("Published version {} is newer than {}", published.version, manifest.version);
        }
        output.push_str(&verdict.describe(&published.version));
        output.push('\n');
    }

    Ok(output)
}
