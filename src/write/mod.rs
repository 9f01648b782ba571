//! Archive writing API for ZIP archives.
//!
//! [`ZipWriter`] produces a single-disk, non-ZIP64 archive. It accepts two
//! kinds of input:
//!
//! - entries copied verbatim from an existing [`Archive`](crate::read::Archive)
//!   (local header, data and data descriptor untouched; the central record is
//!   relocated)
//! - new entries encoded from a [`Payload`](crate::Payload)
//!
//! # Example
//!
//! ```rust
//! use zipmend::Payload;
//! use zipmend::write::{WriteOptions, ZipWriter};
//!
//! let mut writer = ZipWriter::new(Vec::new());
//! writer.add_entry("hello.txt", &Payload::regular("Hello, World!"), &WriteOptions::default())?;
//! writer.add_entry("link", &Payload::symlink("hello.txt"), &WriteOptions::default())?;
//! let bytes = writer.finish(b"")?;
//! assert!(bytes.starts_with(b"PK\x03\x04"));
//! # Ok::<(), zipmend::Error>(())
//! ```

mod append;
mod header_encode;
pub(crate) mod options;

pub use options::{DEFAULT_FILE_MODE, DEFAULT_SYMLINK_MODE, WriteOptions};

use std::io::Write;

use crate::format::{CentralRecord, EndOfCentralDirectory};
use crate::{Error, Result};

/// A ZIP archive writer.
pub struct ZipWriter<W> {
    sink: W,
    /// Bytes written so far.
    position: u64,
    /// Central records of every entry written, in order.
    records: Vec<CentralRecord>,
}

impl<W> std::fmt::Debug for ZipWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipWriter")
            .field("position", &self.position)
            .field("entries", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl<W: Write> ZipWriter<W> {
    /// Creates a writer that emits an archive into `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            position: 0,
            records: Vec::new(),
        }
    }

    /// Returns the number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the number of entries written so far.
    pub fn entry_count(&self) -> usize {
        self.records.len()
    }

    /// Writes the central directory and end record, and returns the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFeature`] if the archive would need ZIP64
    /// (65535 or more entries, or offsets beyond 4 GiB).
    pub fn finish(mut self, comment: &[u8]) -> Result<W> {
        let directory_offset = self.position;
        let total_entries = u16::try_from(self.records.len())
            .ok()
            .filter(|&n| n != u16::MAX)
            .ok_or(Error::UnsupportedFeature {
                feature: "ZIP64 archives",
            })?;

        for record in &self.records {
            self.sink.write_all(record.raw())?;
            self.position += record.raw().len() as u64;
        }
        let directory_size = self.position - directory_offset;

        let eocd = EndOfCentralDirectory::new(
            total_entries,
            checked_u32(directory_size)?,
            checked_u32(directory_offset)?,
            comment.to_vec(),
        );
        eocd.write(&mut self.sink)?;
        self.sink.flush()?;

        log::debug!(
            "finished archive: {} entries, central directory {} bytes at {:#x}",
            total_entries,
            directory_size,
            directory_offset
        );

        Ok(self.sink)
    }

    /// Writes raw bytes and advances the position.
    fn emit(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }
}

/// Narrows a size or offset to the 32-bit field of a non-ZIP64 archive.
pub(crate) fn checked_u32(value: u64) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|&v| v != u32::MAX)
        .ok_or(Error::UnsupportedFeature {
            feature: "ZIP64 archives",
        })
}
