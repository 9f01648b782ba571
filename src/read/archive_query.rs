//! Archive query methods.
//!
//! This module provides methods for querying archive entries and metadata
//! without reading entry data.

use super::{Archive, Entry, normalize_lookup};

impl<R> Archive<R> {
    /// Returns all entries in central directory order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the number of entries in the archive.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the first entry with the given path.
    ///
    /// `\` separators in `path` are treated as `/`.
    pub fn entry(&self, path: &str) -> Option<&Entry> {
        let path = normalize_lookup(path);
        self.entries.iter().find(|e| e.path == path)
    }

    /// Returns true if any entry has the given path.
    pub fn contains(&self, path: &str) -> bool {
        self.entry(path).is_some()
    }

    /// Returns the raw archive comment.
    pub fn comment(&self) -> &[u8] {
        &self.eocd.comment
    }

    /// Returns the position of the central directory in the file.
    pub fn directory_offset(&self) -> u64 {
        self.archive_offset + u64::from(self.eocd.directory_offset)
    }

    /// Returns the number of bytes prepended to the archive without its
    /// offsets being adjusted, as `cat stub zip > sfx` produces.
    ///
    /// Zero for ordinary archives and for self-extractors whose offsets
    /// already count the stub.
    pub fn archive_offset(&self) -> u64 {
        self.archive_offset
    }

    /// Returns the number of bytes that precede the first local header.
    ///
    /// Self-extracting archives carry their executable stub here. For an
    /// archive without entries this is everything before the central
    /// directory.
    pub fn preamble_len(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| e.header_offset)
            .min()
            .unwrap_or_else(|| self.directory_offset())
    }

    /// Consumes the archive and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
