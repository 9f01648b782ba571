//! Entry content reading and raw span access.

use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::ops::Range;

use crate::codec;
use crate::format::local::{self, EntrySpan};
use crate::{Error, Result};

use super::{Archive, normalize_lookup};

/// Upper bound on the up-front allocation for an entry's content.
const MAX_PREALLOCATION: u64 = 16 * 1024 * 1024;

impl<R: Read + Seek> Archive<R> {
    /// Reads the content of the first entry named `path`.
    ///
    /// A symbolic link entry yields its target.
    ///
    /// # Errors
    ///
    /// - [`Error::EntryNotFound`] if no entry has this path, or it names a
    ///   directory marker
    /// - [`Error::UnsupportedFeature`] if the entry is encrypted
    /// - [`Error::UnsupportedMethod`] if its compression method is not supported
    /// - [`Error::CrcMismatch`] if the data does not match its checksum or size
    pub fn read(&mut self, path: &str) -> Result<Vec<u8>> {
        let index = self.content_index(path)?;
        self.read_index(index)
    }

    /// Reads the content of the first entry named `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// As [`read`](Self::read), plus [`Error::NotText`] if the content is not
    /// valid UTF-8.
    pub fn read_text(&mut self, path: &str) -> Result<String> {
        let index = self.content_index(path)?;
        let data = self.read_index(index)?;
        String::from_utf8(data).map_err(|_| Error::NotText {
            path: self.entries[index].path.clone(),
        })
    }

    /// Reads the content of the entry at `index` in central directory order.
    pub fn read_index(&mut self, index: usize) -> Result<Vec<u8>> {
        let entry = self
            .entries
            .get(index)
            .cloned()
            .ok_or_else(|| Error::EntryNotFound {
                path: format!("#{}", index),
            })?;

        if entry.is_directory() {
            return Err(Error::EntryNotFound { path: entry.path });
        }
        if entry.is_encrypted() {
            return Err(Error::UnsupportedFeature {
                feature: "encrypted entries",
            });
        }
        if !codec::is_supported(entry.method) {
            return Err(Error::UnsupportedMethod {
                method: entry.method.id(),
            });
        }

        let span = self.span(index)?;
        self.reader.seek(SeekFrom::Start(span.data.start))?;

        let mut data = Vec::with_capacity(entry.size.min(MAX_PREALLOCATION) as usize);
        {
            let input = BufReader::new(&mut self.reader);
            let decoder = codec::build_decoder(entry.method, input, entry.compressed_size)?;
            // One byte past the declared size is enough to detect a lying header.
            decoder
                .take(entry.size + 1)
                .read_to_end(&mut data)
                .map_err(|e| match e.kind() {
                    io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => {
                        Error::corrupt_header(
                            span.data.start,
                            format!("'{}' has a damaged data stream: {}", entry.path, e),
                        )
                    }
                    _ => Error::Io(e),
                })?;
        }

        let actual = crc32fast::hash(&data);
        if data.len() as u64 != entry.size || actual != entry.crc32 {
            return Err(Error::CrcMismatch {
                path: entry.path,
                expected: entry.crc32,
                actual,
            });
        }

        Ok(data)
    }

    /// Reads the bytes preceding the first local header.
    pub fn read_preamble(&mut self) -> Result<Vec<u8>> {
        let len = self.preamble_len();
        let mut preamble = Vec::with_capacity(len.min(MAX_PREALLOCATION) as usize);
        self.copy_range(0..len, &mut preamble)?;
        Ok(preamble)
    }

    /// Computes the byte span of the entry at `index`.
    pub(crate) fn span(&mut self, index: usize) -> Result<EntrySpan> {
        let limit = self.directory_offset();
        local::entry_span(
            &mut self.reader,
            &self.records[index],
            self.archive_offset,
            limit,
        )
    }

    /// Copies a raw byte range of the archive into `out`.
    pub(crate) fn copy_range<W: Write>(&mut self, range: Range<u64>, out: &mut W) -> Result<u64> {
        let len = range.end - range.start;
        self.reader.seek(SeekFrom::Start(range.start))?;
        let copied = io::copy(&mut (&mut self.reader).take(len), out)?;
        if copied != len {
            return Err(Error::corrupt_header(
                range.start,
                format!("expected {} bytes, file ended after {}", len, copied),
            ));
        }
        Ok(copied)
    }

    /// Resolves `path` to the index of a content-bearing entry.
    fn content_index(&self, path: &str) -> Result<usize> {
        let wanted = normalize_lookup(path);
        match self.entries.iter().find(|e| e.path == wanted) {
            Some(entry) if !entry.is_directory() => Ok(entry.index),
            _ => Err(Error::EntryNotFound { path: wanted }),
        }
    }
}
