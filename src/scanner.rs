//! Discovery of localization-key references in a source tree.

use std::{
    fs,
    path::{Path, PathBuf},
};

use ignore::WalkBuilder;
use regex::Regex;
use tracing::debug;

use crate::{config::ResourcesConfig, error::Error, types::ResourceKeyReference};

/// Which files to scan and how to recognize a lookup.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extension: String,
    pub excluded_dirs: Vec<String>,
    matchers: Vec<Regex>,
}

impl ScanOptions {
    /// Builds options from accessor call-site prefixes such as `language.getString(`.
    ///
    /// Prefixes are matched literally against whitespace-free lines, so they
    /// must not contain whitespace themselves.
    pub fn new<S: AsRef<str>>(
        extension: impl Into<String>,
        excluded_dirs: Vec<String>,
        accessors: &[S],
    ) -> Result<Self, Error> {
        let matchers = accessors
            .iter()
            .map(|accessor| {
                let prefix: String = accessor.as_ref().split_whitespace().collect();
                Regex::new(&format!(r#"{}"([^"]*)""#, regex::escape(&prefix)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScanOptions {
            extension: extension.into(),
            excluded_dirs,
            matchers,
        })
    }

    pub fn from_config(config: &ResourcesConfig) -> Result<Self, Error> {
        Self::new(
            config.source_extension.clone(),
            config.excluded_dirs.clone(),
            config.accessors.as_slice(),
        )
    }

    /// Extracts the key referenced on `line`, if any.
    ///
    /// All whitespace is removed before matching. Accessors are tried in
    /// order and only the first match counts; a call whose first argument is
    /// not a string literal yields nothing.
    pub fn key_in_line(&self, line: &str) -> Option<String> {
        let compact: String = line.split_whitespace().collect();
        self.matchers.iter().find_map(|matcher| {
            matcher
                .captures(&compact)
                .and_then(|captures| captures.get(1))
                .map(|key| key.as_str().to_string())
        })
    }

    /// Whether `name` is an excluded directory or file name.
    pub fn excludes(&self, name: &str) -> bool {
        is_excluded(&self.excluded_dirs, name)
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

/// Exact, case-sensitive name match against an exclusion set.
pub fn is_excluded(excluded: &[String], name: &str) -> bool {
    excluded.iter().any(|ex| ex == name)
}

/// Lists every source file under `root`, in file-name order.
///
/// Directories named in the exclusion set are pruned at any depth; symlinks
/// are not followed.
pub fn source_files(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>, Error> {
    let filter = options.clone();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir
                && entry.depth() > 0
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| filter.excludes(name)))
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if options.has_source_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    debug!("found {} source files under {}", files.len(), root.display());
    Ok(files)
}

/// Extracts every reference from one source file.
///
/// Bytes that are not valid UTF-8 are replaced, so legacy-encoded sources
/// still scan; keys are expected to be ASCII.
pub fn references_in_file(
    path: &Path,
    options: &ScanOptions,
) -> Result<Vec<ResourceKeyReference>, Error> {
    let content = fs::read(path)?;
    let mut references = Vec::new();
    for (index, line) in String::from_utf8_lossy(&content).lines().enumerate() {
        if let Some(key) = options.key_in_line(line) {
            references.push(ResourceKeyReference {
                source_file: path.to_path_buf(),
                line_number: index + 1,
                key,
            });
        }
    }
    Ok(references)
}

/// Lazily yields every reference in `files`, file by file.
pub fn scan_files<'a>(
    files: Vec<PathBuf>,
    options: &'a ScanOptions,
) -> impl Iterator<Item = Result<ResourceKeyReference, Error>> + 'a {
    files.into_iter().flat_map(move |path| {
        let batch: Vec<Result<ResourceKeyReference, Error>> =
            match references_in_file(&path, options) {
                Ok(references) => references.into_iter().map(Ok).collect(),
                Err(e) => vec![Err(e)],
            };
        batch
    })
}

/// Lazily yields every reference found under `root`.
pub fn scan_tree<'a>(
    root: &Path,
    options: &'a ScanOptions,
) -> Result<impl Iterator<Item = Result<ResourceKeyReference, Error>> + 'a, Error> {
    Ok(scan_files(source_files(root, options)?, options))
}
