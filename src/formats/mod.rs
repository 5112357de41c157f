pub mod bundle_descriptor;
pub mod installer;
pub mod release_notes;

use chrono::NaiveDate;

// Reexporting the recognizers for easier access
pub use bundle_descriptor::{BundleDescriptorRecognizer, DescriptorState};
pub use installer::InstallerRecognizer;
pub use release_notes::{ReleaseNotesRecognizer, format_release_date};

use crate::{traits::LineRecognizer, types::{FormatKind, VersionString}};

/// Everything a recognizer may be parameterized by.
#[derive(Debug, Clone)]
pub struct RecognizerParams {
    pub version: VersionString,
    pub product_name: String,
    /// The release date written into release notes.
    pub today: NaiveDate,
}

/// Builds a fresh recognizer for one file of the given kind.
pub fn recognizer_for(kind: FormatKind, params: &RecognizerParams) -> Box<dyn LineRecognizer> {
    match kind {
        FormatKind::InstallerScript => Box::new(InstallerRecognizer::new(
            params.version.clone(),
            &params.product_name,
        )),
        FormatKind::BundleDescriptor => {
            Box::new(BundleDescriptorRecognizer::new(params.version.clone()))
        }
        FormatKind::ReleaseNotes => Box::new(ReleaseNotesRecognizer::new(
            params.version.clone(),
            &params.product_name,
            params.today,
        )),
    }
}
