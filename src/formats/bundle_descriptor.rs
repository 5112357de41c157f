//! macOS package descriptors (`OSX.packproj`).
//!
//! Version-bearing values sit on the line after their marker key:
//!
//! ```text
//!   <key>CFBundleShortVersionString</key>
//!   <string>1.2.3</string>
//! ```

use tracing::{info, warn};

use crate::{
    traits::{LineEdit, LineRecognizer},
    types::VersionString,
};

const DESCRIPTION_VERSION: &str = "IFPkgDescriptionVersion";
const BUNDLE_IDENTIFIER: &str = "CFBundleIdentifier";
const SHORT_VERSION: &str = "CFBundleShortVersionString";

const OPEN_TAG: &str = "<string>";
const CLOSE_TAG: &str = "</string>";

/// Which value line, if any, the recognizer expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptorState {
    #[default]
    Idle,
    AwaitingDescriptionVersion,
    AwaitingBundleIdentifier,
    AwaitingShortVersion,
}

impl DescriptorState {
    /// The state a marker line moves to, if `line` is a marker line.
    fn for_marker(line: &str) -> Option<Self> {
        if line.contains(DESCRIPTION_VERSION) {
            Some(DescriptorState::AwaitingDescriptionVersion)
        } else if line.contains(BUNDLE_IDENTIFIER) {
            Some(DescriptorState::AwaitingBundleIdentifier)
        } else if line.contains(SHORT_VERSION) {
            Some(DescriptorState::AwaitingShortVersion)
        } else {
            None
        }
    }

    fn field_name(self) -> &'static str {
        match self {
            DescriptorState::Idle => "",
            DescriptorState::AwaitingDescriptionVersion => DESCRIPTION_VERSION,
            DescriptorState::AwaitingBundleIdentifier => BUNDLE_IDENTIFIER,
            DescriptorState::AwaitingShortVersion => SHORT_VERSION,
        }
    }
}

/// Byte range of the body of the first `<string>…</string>` tag in `line`.
pub fn tag_body(line: &str) -> Option<(usize, usize)> {
    let start = line.find(OPEN_TAG)? + OPEN_TAG.len();
    let end = start + line[start..].find(CLOSE_TAG)?;
    Some((start, end))
}

/// Byte offset, inside an identifier body, where its version tail begins.
///
/// The tail starts at the first ASCII digit (`name.alexlaird.GetOrganized 1.2`
/// yields `1.2`).
pub fn identifier_version_offset(body: &str) -> Option<usize> {
    body.find(|c: char| c.is_ascii_digit())
}

/// Pure transition function of the descriptor state machine.
///
/// Marker lines always win: they pass through unchanged and arm the matching
/// awaiting state. Any other line consumes a pending awaiting state, whether
/// or not it parses, and returns the machine to `Idle`.
pub fn transition(
    state: DescriptorState,
    line: &str,
    version: &VersionString,
) -> (DescriptorState, LineEdit) {
    if let Some(next) = DescriptorState::for_marker(line) {
        return (next, LineEdit::Keep);
    }

    let edit = match state {
        DescriptorState::Idle => LineEdit::Keep,
        DescriptorState::AwaitingDescriptionVersion | DescriptorState::AwaitingShortVersion => {
            rewrite_plain_value(state, line, version)
        }
        DescriptorState::AwaitingBundleIdentifier => rewrite_identifier(line, version),
    };
    (DescriptorState::Idle, edit)
}

fn rewrite_plain_value(state: DescriptorState, line: &str, version: &VersionString) -> LineEdit {
    let Some((start, end)) = tag_body(line) else {
        warn!("{} value line is not a string tag: {}", state.field_name(), line.trim());
        return LineEdit::Keep;
    };
    let old = &line[start..end];
    if old == version.as_str() {
        return LineEdit::Keep;
    }
    info!(
        "Updated OS X setup script {} from {} to {}",
        state.field_name(),
        old,
        version
    );
    LineEdit::from_candidate(line, format!("{}{}{}", &line[..start], version, &line[end..]))
}

fn rewrite_identifier(line: &str, version: &VersionString) -> LineEdit {
    let Some((start, end)) = tag_body(line) else {
        warn!("{} value line is not a string tag: {}", BUNDLE_IDENTIFIER, line.trim());
        return LineEdit::Keep;
    };
    let Some(offset) = identifier_version_offset(&line[start..end]) else {
        warn!("{} carries no version: {}", BUNDLE_IDENTIFIER, line.trim());
        return LineEdit::Keep;
    };
    let tail_start = start + offset;
    let old = line[tail_start..end].replace(' ', "");
    let new = version.as_str().replace(' ', "");
    if old == new {
        return LineEdit::Keep;
    }
    info!(
        "Updated OS X setup script {} from {} to {}",
        BUNDLE_IDENTIFIER, old, new
    );
    LineEdit::from_candidate(line, format!("{}{}{}", &line[..tail_start], new, &line[end..]))
}

/// Stateful recognizer driving [`transition`] over one descriptor file.
#[derive(Debug, Clone)]
pub struct BundleDescriptorRecognizer {
    version: VersionString,
    state: DescriptorState,
}

impl BundleDescriptorRecognizer {
    pub fn new(version: VersionString) -> Self {
        BundleDescriptorRecognizer {
            version,
            state: DescriptorState::Idle,
        }
    }

    pub fn state(&self) -> DescriptorState {
        self.state
    }
}

impl LineRecognizer for BundleDescriptorRecognizer {
    fn recognize(&mut self, line: &str) -> LineEdit {
        let (next, edit) = transition(self.state, line, &self.version);
        self.state = next;
        edit
    }
}
