//! Sources of content for new entries.

use std::fs;
use std::path::PathBuf;

use crate::{Error, Result};

/// Where the bytes of a new file entry come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Inline text.
    Literal(String),
    /// The contents of a file on disk, read as raw bytes.
    File(PathBuf),
}

impl Default for ContentSource {
    fn default() -> Self {
        ContentSource::Literal(String::new())
    }
}

impl ContentSource {
    /// Picks a source from command-line style arguments; a file wins over a literal.
    pub fn from_args(literal: Option<String>, file: Option<PathBuf>) -> Self {
        match (file, literal) {
            (Some(path), _) => ContentSource::File(path),
            (None, Some(text)) => ContentSource::Literal(text),
            (None, None) => ContentSource::default(),
        }
    }

    /// Loads the content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContentUnreadable`] if a source file cannot be read.
    pub fn load(&self) -> Result<Vec<u8>> {
        match self {
            ContentSource::Literal(text) => Ok(text.clone().into_bytes()),
            ContentSource::File(path) => {
                fs::read(path).map_err(|source| Error::ContentUnreadable {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        let source = ContentSource::Literal("Hello World".into());
        assert_eq!(source.load().unwrap(), b"Hello World");
        assert!(ContentSource::default().load().unwrap().is_empty());
    }

    #[test]
    fn test_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.bin");
        fs::write(&path, [0u8, 159, 146, 150]).unwrap();

        assert_eq!(
            ContentSource::File(path).load().unwrap(),
            vec![0u8, 159, 146, 150]
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        match ContentSource::File(path.clone()).load().unwrap_err() {
            Error::ContentUnreadable { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            e => panic!("Expected ContentUnreadable, got {:?}", e),
        }
    }

    #[test]
    fn test_from_args_prefers_file() {
        let source = ContentSource::from_args(Some("text".into()), Some("f.txt".into()));
        assert_eq!(source, ContentSource::File("f.txt".into()));
        assert_eq!(
            ContentSource::from_args(Some("text".into()), None),
            ContentSource::Literal("text".into())
        );
        assert_eq!(ContentSource::from_args(None, None), ContentSource::default());
    }
}
