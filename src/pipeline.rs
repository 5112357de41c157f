//! End-to-end runs of the two paths over a project on disk.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    bundle::{load_bundles, missing_key_findings},
    config::Config,
    error::Error,
    formats::{RecognizerParams, recognizer_for},
    report::ValidationReport,
    rewrite::rewrite_file,
    scanner::{ScanOptions, scan_files, source_files},
    types::{FileTarget, FormatKind, VersionString},
    version::read_version,
};

/// Absolute locations of everything a run touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub version_source: PathBuf,
    pub launcher: PathBuf,
    pub installer_script: PathBuf,
    pub bundle_descriptor: PathBuf,
    pub release_notes: PathBuf,
    pub source_dir: PathBuf,
    pub bundle_dir: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Self {
        let root = root.into();
        ProjectLayout {
            version_source: root.join(&config.version.source),
            launcher: root.join(&config.artifacts.launcher),
            installer_script: root.join(&config.artifacts.installer_script),
            bundle_descriptor: root.join(&config.artifacts.bundle_descriptor),
            release_notes: root.join(&config.artifacts.release_notes),
            source_dir: root.join(&config.resources.source_dir),
            bundle_dir: root.join(&config.resources.bundle_dir),
            root,
        }
    }

    /// Project root for an anchor path inside the project's scripts directory:
    /// the parent of the directory holding the anchor.
    pub fn root_from_anchor(anchor: &Path) -> Result<PathBuf, Error> {
        let anchor = std::path::absolute(anchor)?;
        let scripts_dir = anchor.parent().ok_or_else(|| Error::missing(&anchor))?;
        let root = scripts_dir
            .parent()
            .ok_or_else(|| Error::missing(scripts_dir))?;
        Ok(root.to_path_buf())
    }

    /// The artifacts whose version text is rewritten, in rewrite order.
    pub fn targets(&self) -> Vec<FileTarget> {
        vec![
            FileTarget::new(&self.installer_script, FormatKind::InstallerScript),
            FileTarget::new(&self.bundle_descriptor, FormatKind::BundleDescriptor),
            FileTarget::new(&self.release_notes, FormatKind::ReleaseNotes),
        ]
    }

    /// Every file the version path requires before it may modify anything.
    pub fn version_prerequisites(&self) -> Vec<&Path> {
        vec![
            self.version_source.as_path(),
            self.launcher.as_path(),
            self.installer_script.as_path(),
            self.bundle_descriptor.as_path(),
            self.release_notes.as_path(),
        ]
    }

    /// Every directory the resource path requires.
    pub fn resource_prerequisites(&self) -> Vec<&Path> {
        vec![
            self.root.as_path(),
            self.source_dir.as_path(),
            self.bundle_dir.as_path(),
        ]
    }
}

/// Fails with every missing path at once, or succeeds when all exist.
pub fn check_prerequisites(paths: &[&Path]) -> Result<(), Error> {
    let missing: Vec<PathBuf> = paths
        .iter()
        .filter(|path| !path.exists())
        .map(|path| path.to_path_buf())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingPrerequisite { paths: missing })
    }
}

/// What a version propagation run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationSummary {
    pub version: VersionString,
    /// Targets that were rewritten, in rewrite order.
    pub changed: Vec<FileTarget>,
}

/// Reads the canonical version and rewrites every target that disagrees.
///
/// Nothing is modified unless every prerequisite exists. Each target gets its
/// own fresh recognizer.
pub fn propagate_version(
    layout: &ProjectLayout,
    config: &Config,
    today: NaiveDate,
) -> Result<PropagationSummary, Error> {
    check_prerequisites(&layout.version_prerequisites())?;
    info!("::VALIDATE VERSION::");

    let version = read_version(&layout.version_source, &config.version.marker)?;
    let params = RecognizerParams {
        version: version.clone(),
        product_name: config.product_name.clone(),
        today,
    };

    let mut changed = Vec::new();
    for target in layout.targets() {
        let mut recognizer = recognizer_for(target.kind, &params);
        if rewrite_file(target.path(), recognizer.as_mut())? {
            info!("Rewrote {} {}", target.kind, target.path().display());
            changed.push(target);
        } else {
            debug!("{} {} already at {}", target.kind, target.path().display(), version);
        }
    }

    Ok(PropagationSummary { version, changed })
}

/// Reads the canonical version without rewriting anything.
pub fn current_version(layout: &ProjectLayout, config: &Config) -> Result<VersionString, Error> {
    check_prerequisites(&layout.version_prerequisites())?;
    read_version(&layout.version_source, &config.version.marker)
}

/// Runs the missing-key and duplicate-key checks over the whole project.
pub fn verify_resources(layout: &ProjectLayout, config: &Config) -> Result<ValidationReport, Error> {
    check_prerequisites(&layout.resource_prerequisites())?;

    let options = ScanOptions::from_config(&config.resources)?;
    let bundles = load_bundles(&layout.bundle_dir, &config.resources.excluded_dirs)?;

    let mut report = ValidationReport::new();
    report.stats.bundles = bundles.iter().map(|b| b.name.clone()).collect();
    let files = source_files(&layout.source_dir, &options)?;
    report.stats.source_files = files.len();

    info!("Source root: {}", layout.source_dir.display());
    for reference in scan_files(files, &options) {
        let reference = reference?;
        report.stats.references += 1;
        report.extend(missing_key_findings(&reference, &bundles));
    }

    info!("Bundle root: {}", layout.bundle_dir.display());
    for bundle in &bundles {
        report.extend(bundle.duplicate_findings());
    }

    Ok(report)
}
