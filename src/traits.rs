/// Outcome of feeding one line to a [`LineRecognizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    /// Write the line back as it was read.
    Keep,
    /// Write this text instead. The line terminator is not part of it.
    Replace(String),
}

impl LineEdit {
    /// Builds an edit from a candidate replacement, collapsing a no-op into `Keep`.
    pub fn from_candidate(original: &str, candidate: String) -> Self {
        if candidate == original {
            LineEdit::Keep
        } else {
            LineEdit::Replace(candidate)
        }
    }

    pub fn is_change(&self) -> bool {
        matches!(self, LineEdit::Replace(_))
    }

    /// Resolves the edit against the line it was produced for.
    pub fn apply<'a>(&'a self, original: &'a str) -> &'a str {
        match self {
            LineEdit::Keep => original,
            LineEdit::Replace(line) => line,
        }
    }
}

/// A per-file, possibly stateful, line rewriter.
///
/// Implementations see every line of one file in order, without its line
/// terminator. A recognizer must not be reused for a second file.
pub trait LineRecognizer {
    fn recognize(&mut self, line: &str) -> LineEdit;
}

impl<F> LineRecognizer for F
where
    F: FnMut(&str) -> LineEdit,
{
    fn recognize(&mut self, line: &str) -> LineEdit {
        self(line)
    }
}
