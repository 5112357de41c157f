//! Scoped, line-oriented file rewriting.
//!
//! A rewrite streams a file through a [`LineRecognizer`] into a scratch file
//! next to it. The scratch file replaces the original only when at least one
//! line changed; otherwise it is discarded and the original is never opened
//! for writing.

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{error::Error, traits::LineRecognizer};

/// Result of rewriting an in-memory line sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub lines: Vec<String>,
    pub changed: bool,
}

/// Runs every line through `recognizer` without touching any storage.
pub fn rewrite_lines<I, S, R>(lines: I, recognizer: &mut R) -> Rewrite
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: LineRecognizer + ?Sized,
{
    let mut changed = false;
    let lines = lines
        .into_iter()
        .map(|line| {
            let line = line.as_ref();
            let edit = recognizer.recognize(line);
            changed |= edit.is_change();
            edit.apply(line).to_string()
        })
        .collect();

    Rewrite { lines, changed }
}

/// Splits a raw line into its content and its terminator (`\n`, `\r\n` or empty).
fn split_terminator(raw: &str) -> (&str, &str) {
    if let Some(content) = raw.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = raw.strip_suffix('\n') {
        (content, "\n")
    } else {
        (raw, "")
    }
}

/// Streams `reader` through `recognizer` into `writer`, one line at a time.
///
/// Every line is written, changed or not, with its original terminator.
/// Returns whether any line changed.
pub fn rewrite_stream<R, W, L>(mut reader: R, mut writer: W, recognizer: &mut L) -> Result<bool, Error>
where
    R: BufRead,
    W: Write,
    L: LineRecognizer + ?Sized,
{
    let mut changed = false;
    let mut raw = String::new();

    loop {
        raw.clear();
        if reader.read_line(&mut raw)? == 0 {
            break;
        }
        let (content, terminator) = split_terminator(&raw);
        let edit = recognizer.recognize(content);
        changed |= edit.is_change();
        writer.write_all(edit.apply(content).as_bytes())?;
        writer.write_all(terminator.as_bytes())?;
    }

    writer.flush()?;
    Ok(changed)
}

/// Replaces `target` with `scratch` when `changed`, otherwise drops `scratch`.
///
/// The scratch file must live on the same filesystem as `target` for the
/// rename to be atomic. The target's permissions carry over to the
/// replacement. Returns `changed`.
pub fn commit_if_changed(scratch: NamedTempFile, target: &Path, changed: bool) -> Result<bool, Error> {
    if changed {
        fs::set_permissions(scratch.path(), fs::metadata(target)?.permissions())?;
        scratch.persist(target).map_err(|e| Error::Io(e.error))?;
        debug!("replaced {}", target.display());
    } else {
        scratch.close()?;
        debug!("{} unchanged, scratch discarded", target.display());
    }
    Ok(changed)
}

/// Rewrites the file at `path` in place through `recognizer`.
///
/// Returns whether the file was replaced.
pub fn rewrite_file<P, L>(path: P, recognizer: &mut L) -> Result<bool, Error>
where
    P: AsRef<Path>,
    L: LineRecognizer + ?Sized,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let reader = BufReader::new(File::open(path)?);
    let mut scratch = NamedTempFile::new_in(dir)?;
    let changed = {
        let writer = BufWriter::new(scratch.as_file_mut());
        rewrite_stream(reader, writer, recognizer)?
    };

    commit_if_changed(scratch, path, changed)
}
