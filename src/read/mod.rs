//! Archive reading API for ZIP archives.
//!
//! This module provides the read side of the crate: locating the central
//! directory, listing entries, and reading entry content (stored or
//! deflated, CRC-checked). The rewrite engine in [`crate::edit`] uses the
//! same [`Archive`] to copy unchanged entries byte-for-byte.
//!
//! # Example
//!
//! ```rust,no_run
//! use zipmend::read::Archive;
//!
//! let mut archive = Archive::open_path("bundle.zip")?;
//!
//! for entry in archive.entries() {
//!     println!("{}: {} bytes", entry.path, entry.size);
//! }
//!
//! let readme = archive.read_text("docs/readme.txt")?;
//! println!("{}", readme);
//! # Ok::<(), zipmend::Error>(())
//! ```

mod archive_open;
mod archive_query;
mod decompression;
mod entry;

pub use entry::Entry;

use crate::format::{CentralRecord, EndOfCentralDirectory};

/// A ZIP archive reader.
///
/// Entries are kept in central directory order. Duplicate paths are legal in
/// the format; lookups by path return the first occurrence.
pub struct Archive<R> {
    pub(crate) reader: R,
    pub(crate) eocd: EndOfCentralDirectory,
    /// Bytes prepended after the archive's offsets were written.
    pub(crate) archive_offset: u64,
    pub(crate) records: Vec<CentralRecord>,
    pub(crate) entries: Vec<Entry>,
}

impl<R> std::fmt::Debug for Archive<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("entries", &self.entries.len())
            .field("directory_offset", &self.eocd.directory_offset)
            .field("archive_offset", &self.archive_offset)
            .finish_non_exhaustive()
    }
}

/// Normalizes a lookup path to the `/`-separated form stored in archives.
pub(crate) fn normalize_lookup(path: &str) -> String {
    path.replace('\\', "/")
}
