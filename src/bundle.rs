//! Locale resource bundles and the two consistency checks run against them.

use std::{collections::HashMap, fs, path::Path};

use tracing::debug;

use crate::{
    error::Error,
    scanner::is_excluded,
    types::{BundleEntry, Finding, ResourceKeyReference},
};

/// One locale bundle file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    /// File name of the bundle, e.g. `LanguageBundle_fr.properties`.
    pub name: String,
    pub lines: Vec<String>,
}

impl Bundle {
    pub fn new(name: impl Into<String>, content: &str) -> Self {
        Bundle {
            name: name.into(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content = fs::read(path)?;
        Ok(Bundle::new(name, &String::from_utf8_lossy(&content)))
    }

    /// Whether any line starts with `key`.
    ///
    /// This is a prefix test on the raw line, not an exact key comparison.
    pub fn defines(&self, key: &str) -> bool {
        self.lines.iter().any(|line| line.starts_with(key))
    }

    /// Every `key=value` definition, in file order. The key is the text
    /// before the first `=`.
    pub fn entries(&self) -> impl Iterator<Item = BundleEntry> + '_ {
        self.lines.iter().enumerate().filter_map(|(index, line)| {
            line.split_once('=').map(|(key, _)| BundleEntry {
                bundle_name: self.name.clone(),
                key: key.to_string(),
                line_number: index + 1,
            })
        })
    }

    /// Definitions that are shadowed by a later definition of the same key.
    ///
    /// A key defined `n` times yields `n - 1` findings, one for each
    /// definition that has another one below it.
    pub fn duplicate_findings(&self) -> Vec<Finding> {
        let entries: Vec<BundleEntry> = self.entries().collect();

        let mut next_line: HashMap<&str, usize> = HashMap::new();
        let mut shadowed_by = vec![None; entries.len()];
        for (index, entry) in entries.iter().enumerate().rev() {
            shadowed_by[index] = next_line.get(entry.key.as_str()).copied();
            next_line.insert(entry.key.as_str(), entry.line_number);
        }

        entries
            .iter()
            .zip(shadowed_by)
            .filter_map(|(entry, duplicate_line)| {
                duplicate_line.map(|duplicate_line| Finding::DuplicateKey {
                    bundle: self.name.clone(),
                    key: entry.key.clone(),
                    line: entry.line_number,
                    duplicate_line,
                })
            })
            .collect()
    }
}

/// Loads every regular file in `dir` as a bundle, in name order, skipping
/// names listed in `excluded`.
pub fn load_bundles(dir: &Path, excluded: &[String]) -> Result<Vec<Bundle>, Error> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_excluded(excluded, &name) || !entry.file_type()?.is_file() {
            continue;
        }
        paths.push(entry.path());
    }
    paths.sort();

    let bundles = paths
        .iter()
        .map(Bundle::read_from)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        "loaded bundles: {:?}",
        bundles.iter().map(|b| b.name.as_str()).collect::<Vec<_>>()
    );
    Ok(bundles)
}

/// Checks one reference against every bundle, reporting each bundle that lacks it.
pub fn missing_key_findings(reference: &ResourceKeyReference, bundles: &[Bundle]) -> Vec<Finding> {
    bundles
        .iter()
        .filter(|bundle| !bundle.defines(&reference.key))
        .map(|bundle| Finding::MissingKey {
            reference: reference.clone(),
            bundle: bundle.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::path::PathBuf;

    fn reference(key: &str) -> ResourceKeyReference {
        ResourceKeyReference {
            source_file: PathBuf::from("MainFrame.java"),
            line_number: 42,
            key: key.to_string(),
        }
    }

    #[test]
    fn test_defines_is_prefix_match() {
        let bundle = Bundle::new("en", "menu.title=Title\n");
        assert!(bundle.defines("menu.title"));
        assert!(bundle.defines("menu"));
        assert!(!bundle.defines("title"));
    }

    #[test]
    fn test_entries_split_on_first_equals() {
        let bundle = Bundle::new("en", "# comment\nformula=a=b\n\nname=\n");
        let entries: Vec<_> = bundle.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "formula");
        assert_eq!(entries[0].line_number, 2);
        assert_eq!(entries[1].key, "name");
        assert_eq!(entries[1].line_number, 4);
    }

    #[test]
    fn test_single_duplicate() {
        let bundle = Bundle::new("LanguageBundle_en.properties", "greeting=Hello\ngreeting=Hi\n");
        assert_eq!(
            bundle.duplicate_findings(),
            vec![Finding::DuplicateKey {
                bundle: "LanguageBundle_en.properties".to_string(),
                key: "greeting".to_string(),
                line: 1,
                duplicate_line: 2,
            }]
        );
    }

    #[test]
    fn test_triple_definition_yields_two_findings() {
        let bundle = Bundle::new(
            "en",
            indoc! {"
                a=1
                b=2
                a=3
                a=4
            "},
        );
        let lines: Vec<(usize, usize)> = bundle
            .duplicate_findings()
            .into_iter()
            .map(|f| match f {
                Finding::DuplicateKey { line, duplicate_line, .. } => (line, duplicate_line),
                other => panic!("unexpected finding {:?}", other),
            })
            .collect();
        assert_eq!(lines, vec![(1, 3), (3, 4)]);
    }

    #[test]
    fn test_keys_are_compared_exactly() {
        let bundle = Bundle::new("en", "title=A\ntitle =B\nsubtitle=C\n");
        assert!(bundle.duplicate_findings().is_empty());
    }

    #[test]
    fn test_missing_key_per_bundle() {
        let bundles = vec![
            Bundle::new("LanguageBundle_en.properties", "menu.title=Menu\n"),
            Bundle::new("LanguageBundle_fr.properties", "other=Autre\n"),
            Bundle::new("LanguageBundle_de.properties", ""),
        ];
        let findings = missing_key_findings(&reference("menu.title"), &bundles);
        let missing_in: Vec<_> = findings
            .iter()
            .map(|f| match f {
                Finding::MissingKey { bundle, reference } => {
                    assert_eq!(reference.line_number, 42);
                    bundle.as_str()
                }
                other => panic!("unexpected finding {:?}", other),
            })
            .collect();
        assert_eq!(
            missing_in,
            vec!["LanguageBundle_fr.properties", "LanguageBundle_de.properties"]
        );
    }

    #[test]
    fn test_load_bundles_skips_excluded_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("LanguageBundle_fr.properties"), "a=1\n").unwrap();
        fs::write(dir.path().join("LanguageBundle_en.properties"), "a=1\n").unwrap();
        fs::create_dir(dir.path().join(".svn")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let bundles = load_bundles(dir.path(), &[".svn".to_string()]).unwrap();
        let names: Vec<_> = bundles.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["LanguageBundle_en.properties", "LanguageBundle_fr.properties"]
        );
    }

    #[test]
    fn test_load_bundles_missing_dir() {
        let result = load_bundles(Path::new("/nonexistent/languages"), &[]);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
