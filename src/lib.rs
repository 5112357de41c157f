#![forbid(unsafe_code)]
//! Release consistency toolkit.
//!
//! Two independent paths:
//!
//! - **Version propagation**: read the canonical version from its declaration
//!   line and rewrite the installer script, the macOS bundle descriptor and
//!   the release notes so they all carry it.
//! - **Resource consistency**: find every localization lookup in the source
//!   tree, check each key against every locale bundle, and flag keys defined
//!   twice in the same bundle.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use versync::{Config, ProjectLayout, propagate_version, verify_resources};
//!
//! let config = Config::default();
//! let layout = ProjectLayout::new("/path/to/project", &config);
//!
//! let summary = propagate_version(&layout, &config, chrono::Local::now().date_naive())?;
//! println!("version {}", summary.version);
//!
//! let report = verify_resources(&layout, &config)?;
//! std::process::exit(report.exit_code());
//! # Ok::<(), versync::Error>(())
//! ```

pub mod bundle;
pub mod config;
pub mod error;
pub mod formats;
pub mod manifest;
pub mod pipeline;
pub mod report;
pub mod rewrite;
pub mod scanner;
pub mod traits;
pub mod types;
pub mod version;

// Re-export most used types for easy consumption
pub use crate::{
    config::Config,
    error::Error,
    manifest::{ReleaseManifest, UploadVerdict},
    pipeline::{
        ProjectLayout, PropagationSummary, check_prerequisites, current_version,
        propagate_version, verify_resources,
    },
    report::ValidationReport,
    rewrite::{rewrite_file, rewrite_lines},
    traits::{LineEdit, LineRecognizer},
    types::{FileTarget, Finding, FormatKind, ResourceKeyReference, VersionString},
    version::VersionMode,
};
