//! HTML release notes (`releasenotes.html`).
//!
//! ```text
//! <title>Get Organized 1.2.3 - Release Notes</title>
//! <span style='font-size:14pt;'>Get Organized 1.2.3 - March 4, 2012</span>
//! ```
//!
//! The title carries the version; the heading carries the version and the
//! release date, which is refreshed to today's date on every run.

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::{
    traits::{LineEdit, LineRecognizer},
    types::VersionString,
};

/// Month names indexed by zero-based month number.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const TITLE_MARKER: &str = "<title>";
const HEADING_STYLE: &str = "'font-size:14pt;'>";
const SPAN_CLOSE: &str = "</span>";

/// Renders a date the way release notes print it: `March 4, 2012`.
pub fn format_release_date(date: NaiveDate) -> String {
    format!("{} {}, {}", MONTHS[date.month0() as usize], date.day(), date.year())
}

/// Byte range of the version token that follows the first occurrence of
/// `anchor` in `line`, searching from `from`.
///
/// The token starts after any spaces, must begin with an ASCII digit, and
/// stops at whitespace or `<`.
fn version_token_after(line: &str, from: usize, anchor: &str) -> Option<(usize, usize)> {
    let after_anchor = from + line[from..].find(anchor)? + anchor.len();
    let rest = &line[after_anchor..];
    let start = after_anchor + (rest.len() - rest.trim_start().len());
    if !line[start..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let len = line[start..]
        .find(|c: char| c.is_whitespace() || c == '<')
        .unwrap_or(line.len() - start);
    Some((start, start + len))
}

/// Byte range of the date text between the last `-` and the last `</span>`.
fn date_range(line: &str, not_before: usize) -> Option<(usize, usize)> {
    let dash = line.rfind('-')?;
    if dash < not_before {
        return None;
    }
    let after_dash = &line[dash + 1..];
    let start = dash + 1 + (after_dash.len() - after_dash.trim_start().len());
    let end = match line.rfind(SPAN_CLOSE) {
        Some(close) if close >= start => close,
        _ => start + line[start..].trim_end().len(),
    };
    Some((start, end))
}

/// Line-local recognizer for release notes.
#[derive(Debug, Clone)]
pub struct ReleaseNotesRecognizer {
    version: VersionString,
    product_name: String,
    heading_marker: String,
    date: String,
}

impl ReleaseNotesRecognizer {
    pub fn new(version: VersionString, product_name: &str, today: NaiveDate) -> Self {
        ReleaseNotesRecognizer {
            version,
            product_name: product_name.to_string(),
            heading_marker: format!("{}{}", HEADING_STYLE, product_name),
            date: format_release_date(today),
        }
    }

    fn title(&self, line: &str, title_at: usize) -> LineEdit {
        let Some((start, end)) = version_token_after(line, title_at, &self.product_name) else {
            warn!("release notes title carries no version: {}", line.trim());
            return LineEdit::Keep;
        };
        let old = &line[start..end];
        if old == self.version.as_str() {
            return LineEdit::Keep;
        }
        info!("Updated release notes version from {} to {}", old, self.version);
        LineEdit::from_candidate(line, splice(line, &[(start, end, self.version.as_str())]))
    }

    fn heading(&self, line: &str, heading_at: usize) -> LineEdit {
        let Some((v_start, v_end)) = version_token_after(line, heading_at, &self.heading_marker)
        else {
            warn!("release notes heading carries no version: {}", line.trim());
            return LineEdit::Keep;
        };

        let mut edits = Vec::new();
        let old_version = &line[v_start..v_end];
        if old_version != self.version.as_str() {
            info!(
                "Updated release notes version from {} to {}",
                old_version, self.version
            );
            edits.push((v_start, v_end, self.version.as_str()));
        }

        match date_range(line, v_end) {
            Some((d_start, d_end)) => {
                let old_date = &line[d_start..d_end];
                if old_date != self.date {
                    info!("Updated release notes date from {} to {}", old_date, self.date);
                    edits.push((d_start, d_end, self.date.as_str()));
                }
            }
            None => warn!("release notes heading carries no date: {}", line.trim()),
        }

        if edits.is_empty() {
            LineEdit::Keep
        } else {
            LineEdit::from_candidate(line, splice(line, &edits))
        }
    }
}

/// Applies non-overlapping, ascending `(start, end, replacement)` edits.
fn splice(line: &str, edits: &[(usize, usize, &str)]) -> String {
    let mut out = String::with_capacity(line.len());
    let mut cursor = 0;
    for (start, end, replacement) in edits {
        out.push_str(&line[cursor..*start]);
        out.push_str(replacement);
        cursor = *end;
    }
    out.push_str(&line[cursor..]);
    out
}

impl LineRecognizer for ReleaseNotesRecognizer {
    fn recognize(&mut self, line: &str) -> LineEdit {
        if let Some(title_at) = line.find(TITLE_MARKER) {
            if line[title_at..].contains(&self.product_name) {
                return self.title(line, title_at);
            }
        }
        if let Some(heading_at) = line.find(&self.heading_marker) {
            return self.heading(line, heading_at);
        }
        LineEdit::Keep
    }
}
