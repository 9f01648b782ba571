//! Verbatim copying of entries from an existing archive.
//!
//! Copied entries are never decompressed. The local header, the compressed
//! data and any data descriptor are written byte-for-byte; the central record
//! is re-emitted from its raw bytes with only the local header offset
//! patched.

use std::io::{Read, Seek, Write};

use crate::read::Archive;
use crate::Result;

use super::{ZipWriter, checked_u32};

impl<W: Write> ZipWriter<W> {
    /// Copies the bytes that precede the first entry of `source`.
    ///
    /// Must be called before any entry is written; a later call copies
    /// nothing.
    pub fn copy_preamble<R: Read + Seek>(&mut self, source: &mut Archive<R>) -> Result<u64> {
        debug_assert_eq!(self.position, 0, "preamble must precede every entry");
        if self.position != 0 {
            log::warn!(
                "preamble not copied: {} bytes already written",
                self.position
            );
            return Ok(0);
        }

        let len = source.preamble_len();
        if len > 0 {
            let copied = source.copy_range(0..len, &mut self.sink)?;
            self.position += copied;
            log::debug!("copied {} preamble bytes", copied);
        }
        Ok(len)
    }

    /// Copies the entry at `index` of `source` without decoding it.
    ///
    /// Returns the number of bytes written.
    pub fn copy_entry<R: Read + Seek>(
        &mut self,
        source: &mut Archive<R>,
        index: usize,
    ) -> Result<u64> {
        let span = source.span(index)?;
        let new_offset = checked_u32(self.position)?;

        let copied = source.copy_range(span.whole.clone(), &mut self.sink)?;
        self.position += copied;
        self.records
            .push(source.records[index].relocated(new_offset));

        log::debug!(
            "copied entry '{}' ({} bytes, {:#x} -> {:#x})",
            source.entries[index].path,
            copied,
            span.whole.start,
            new_offset
        );
        Ok(copied)
    }
}
