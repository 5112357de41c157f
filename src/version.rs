//! Extraction of the canonical version from its declaration line.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use tracing::info;

use crate::{error::Error, types::VersionString};

/// Extracts the value of a declaration line such as
/// `public static final String VERSION = "1.2.3";`.
///
/// Returns `None` when the line has no `=` or the value is empty.
pub fn parse_declaration(line: &str) -> Option<VersionString> {
    let (_, value) = line.split_once('=')?;
    let value = value.trim().trim_end_matches(';').trim().trim_matches('"');
    if value.is_empty() {
        None
    } else {
        Some(VersionString::new(value))
    }
}

/// Scans `lines` for the first one containing `marker` and parses it.
pub fn find_version<I, S>(lines: I, marker: &str) -> Option<VersionString>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .find(|line| line.as_ref().contains(marker))
        .and_then(|line| parse_declaration(line.as_ref()))
}

/// Reads the canonical version from `path`.
///
/// A file without a usable declaration is an error rather than an empty
/// version, so nothing downstream is rewritten with blank text.
pub fn read_version<P: AsRef<Path>>(path: P, marker: &str) -> Result<VersionString, Error> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    for line in reader.lines() {
        let line = line?;
        if line.contains(marker) {
            return match parse_declaration(&line) {
                Some(version) => {
                    info!("Retrieved version from {}: {}", path.display(), version);
                    Ok(version)
                }
                None => Err(Error::VersionNotFound(path.to_path_buf())),
            };
        }
    }

    Err(Error::VersionNotFound(path.to_path_buf()))
}

/// What a `version` invocation should do with the canonical version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionMode {
    /// Rewrite every artifact and report the full version.
    Propagate,
    /// Report one dotted component (1, 2 or 3) without rewriting.
    Component(usize),
}

impl FromStr for VersionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(VersionMode::Propagate),
            "1" => Ok(VersionMode::Component(1)),
            "2" => Ok(VersionMode::Component(2)),
            "3" => Ok(VersionMode::Component(3)),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const MARKER: &str = "final String VERSION =";

    #[test]
    fn test_parse_declaration() {
        let version = parse_declaration(r#"    public static final String VERSION = "1.2.3";"#);
        assert_eq!(version, Some(VersionString::new("1.2.3")));
    }

    #[test]
    fn test_parse_declaration_without_semicolon_or_spaces() {
        let version = parse_declaration(r#"final String VERSION="2.0""#);
        assert_eq!(version, Some(VersionString::new("2.0")));
    }

    #[test]
    fn test_parse_declaration_empty_value() {
        assert_eq!(parse_declaration(r#"final String VERSION = "";"#), None);
        assert_eq!(parse_declaration("no assignment here"), None);
    }

    #[test]
    fn test_find_version_takes_first_match() {
        let source = indoc! {r#"
            package adl.go.gui;

            public class Domain {
                public static final String VERSION = "1.4.2";
                // final String VERSION = "0.0.1";
            }
        "#};
        assert_eq!(
            find_version(source.lines(), MARKER),
            Some(VersionString::new("1.4.2"))
        );
    }

    #[test]
    fn test_find_version_no_match() {
        assert_eq!(find_version(["class A {}", "}"], MARKER), None);
    }

    #[test]
    fn test_read_version_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Domain.java");
        std::fs::write(&path, "class Domain {\n  final String VERSION = \"3.0.1\";\n}\n").unwrap();

        assert_eq!(read_version(&path, MARKER).unwrap().as_str(), "3.0.1");
    }

    #[test]
    fn test_read_version_missing_declaration_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Domain.java");
        std::fs::write(&path, "class Domain {}\n").unwrap();

        let result = read_version(&path, MARKER);
        assert!(matches!(result, Err(Error::VersionNotFound(p)) if p == path));
    }

    #[test]
    fn test_read_version_missing_file_is_io_error() {
        let result = read_version("/nonexistent/Domain.java", MARKER);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_version_mode_parse() {
        assert_eq!("0".parse::<VersionMode>().unwrap(), VersionMode::Propagate);
        assert_eq!(" 2".parse::<VersionMode>().unwrap(), VersionMode::Component(2));
        assert!(matches!("4".parse::<VersionMode>(), Err(Error::InvalidMode(m)) if m == "4"));
        assert!(matches!("".parse::<VersionMode>(), Err(Error::InvalidMode(_))));
    }
}
