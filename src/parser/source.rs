//! Source directory resolution
//!
//! The text after `from` names the directory to scan. A leading `~` expands
//! to the home directory; the result must be an existing directory.

use std::env;
use std::path::{Path, PathBuf};

use super::errors::{ParserError, ParserResult};

/// Directory a query scans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Path as written in the query
    raw: String,
    /// Traversal root, home-expanded but otherwise as written
    root: String,
}

fn home_directory() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

fn expand_home(raw: &str) -> Option<String> {
    if raw == "~" {
        return home_directory().map(|home| home.to_string_lossy().into_owned());
    }
    match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        Some(rest) => home_directory().map(|home| home.join(rest).to_string_lossy().into_owned()),
        None => Some(raw.to_string()),
    }
}

impl Source {
    /// Expands and validates a source path
    pub fn resolve(raw: &str) -> ParserResult<Self> {
        let root = expand_home(raw).ok_or_else(|| ParserError::inaccessible_source(raw))?;
        if !Path::new(&root).is_dir() {
            return Err(ParserError::inaccessible_source(raw));
        }
        Ok(Self {
            raw: raw.to_string(),
            root,
        })
    }

    /// Path as written in the query
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Traversal root
    pub fn root(&self) -> &str {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParserErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_resolves_existing_directory() {
        let dir = TempDir::new().unwrap();
        let raw = dir.path().to_string_lossy().into_owned();

        let source = Source::resolve(&raw).unwrap();
        assert_eq!(source.raw(), raw);
        assert_eq!(source.root(), raw);
    }

    #[test]
    fn test_keeps_trailing_separator() {
        let dir = TempDir::new().unwrap();
        let raw = format!("{}/", dir.path().to_string_lossy());

        let source = Source::resolve(&raw).unwrap();
        assert!(source.root().ends_with('/'));
    }

    #[test]
    fn test_rejects_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope").to_string_lossy().into_owned();

        let err = Source::resolve(&missing).unwrap_err();
        assert_eq!(err.code(), ParserErrorCode::FsqSourceInaccessible);
    }

    #[test]
    fn test_rejects_regular_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, b"x").unwrap();

        let err = Source::resolve(&file.to_string_lossy()).unwrap_err();
        assert_eq!(err.code(), ParserErrorCode::FsqSourceInaccessible);
    }

    #[test]
    fn test_plain_path_is_not_expanded() {
        assert_eq!(expand_home("./x~"), Some("./x~".to_string()));
    }
}
