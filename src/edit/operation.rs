//! Archive modification operations.

use std::fmt;

use crate::ArchivePath;
use crate::Result;

/// Content for a new or replacement entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A regular file with the given bytes.
    Regular(Vec<u8>),
    /// A symbolic link pointing at the given target path.
    ///
    /// The target is stored as the entry's content, UTF-8 encoded, without a
    /// terminator.
    Symlink(String),
}

impl Payload {
    /// Creates a regular file payload.
    pub fn regular(data: impl Into<Vec<u8>>) -> Self {
        Payload::Regular(data.into())
    }

    /// Creates a symbolic link payload.
    pub fn symlink(target: impl Into<String>) -> Self {
        Payload::Symlink(target.into())
    }

    /// Returns the payload kind.
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Regular(_) => PayloadKind::Regular,
            Payload::Symlink(_) => PayloadKind::Symlink,
        }
    }

    /// Returns the bytes stored as the entry's content.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Regular(data) => data,
            Payload::Symlink(target) => target.as_bytes(),
        }
    }

    /// Returns the content length in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns true if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// The kind of entry a [`Payload`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// Regular file.
    Regular,
    /// Symbolic link.
    Symlink,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadKind::Regular => write!(f, "file"),
            PayloadKind::Symlink => write!(f, "symlink"),
        }
    }
}

/// A single add-or-replace request.
#[derive(Debug, Clone)]
pub struct Upsert {
    /// Path of the entry to create.
    pub target: ArchivePath,
    /// Content of the entry.
    pub payload: Payload,
    /// Whether existing entries with the same path may be replaced.
    pub overwrite: bool,
}

impl Upsert {
    /// Creates a request, normalizing and validating the target path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArchivePath`](crate::Error::InvalidArchivePath)
    /// if the target cannot name a content entry.
    pub fn new(target: &str, payload: Payload, overwrite: bool) -> Result<Self> {
        Ok(Self {
            target: ArchivePath::new(target)?,
            payload,
            overwrite,
        })
    }

    /// Returns true if an existing entry at `path` collides with the target.
    pub fn targets(&self, path: &str) -> bool {
        path == self.target.as_str()
    }
}
