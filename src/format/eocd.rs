//! End of central directory record.

use std::io::{self, Read, Seek, SeekFrom, Write};

use super::{
    EOCD_SIGNATURE, EOCD_SIZE, MAX_COMMENT_LEN, ZIP64_LOCATOR_SIGNATURE, ZIP64_LOCATOR_SIZE,
    le_u16, le_u32,
};
use crate::{Error, Result};

/// The end of central directory record.
///
/// Layout (22 bytes + comment):
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0 | 4 | signature |
/// | 4 | 2 | number of this disk |
/// | 6 | 2 | disk where central directory starts |
/// | 8 | 2 | central directory records on this disk |
/// | 10 | 2 | total central directory records |
/// | 12 | 4 | central directory size |
/// | 16 | 4 | central directory offset |
/// | 20 | 2 | comment length |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndOfCentralDirectory {
    /// Position of the record's signature in the file.
    pub position: u64,
    /// Number of this disk.
    pub disk_number: u16,
    /// Disk holding the start of the central directory.
    pub directory_disk: u16,
    /// Central directory records on this disk.
    pub entries_on_disk: u16,
    /// Total central directory records.
    pub total_entries: u16,
    /// Size of the central directory in bytes.
    pub directory_size: u32,
    /// Offset of the central directory from the start of the file.
    pub directory_offset: u32,
    /// Archive comment.
    pub comment: Vec<u8>,
}

impl EndOfCentralDirectory {
    /// Builds a single-disk record for a freshly written archive.
    pub fn new(
        total_entries: u16,
        directory_size: u32,
        directory_offset: u32,
        comment: Vec<u8>,
    ) -> Self {
        Self {
            position: 0,
            disk_number: 0,
            directory_disk: 0,
            entries_on_disk: total_entries,
            total_entries,
            directory_size,
            directory_offset,
            comment,
        }
    }

    /// Locates and parses the record by scanning backwards from the end of the input.
    ///
    /// The record sits in the last `22 + 65535` bytes; the last signature whose
    /// comment length fits inside the file wins.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFormat`] if the input is too small or no record is found
    /// - [`Error::UnsupportedFeature`] for ZIP64 or multi-disk archives
    pub fn locate<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let file_len = reader.seek(SeekFrom::End(0))?;
        if file_len < EOCD_SIZE as u64 {
            return Err(Error::InvalidFormat(format!(
                "file is {} bytes, smaller than an end of central directory record",
                file_len
            )));
        }

        let tail_len = file_len.min((EOCD_SIZE + MAX_COMMENT_LEN) as u64);
        let tail_start = file_len - tail_len;
        reader.seek(SeekFrom::Start(tail_start))?;
        let mut tail = vec![0u8; tail_len as usize];
        reader.read_exact(&mut tail)?;

        let found = (0..=tail.len() - EOCD_SIZE).rev().find(|&pos| {
            le_u32(&tail, pos) == EOCD_SIGNATURE
                && pos + EOCD_SIZE + le_u16(&tail, pos + 20) as usize <= tail.len()
        });
        let pos = found.ok_or_else(|| {
            Error::InvalidFormat("end of central directory record not found".into())
        })?;

        let record = Self::parse(&tail[pos..], tail_start + pos as u64)?;

        if pos >= ZIP64_LOCATOR_SIZE
            && le_u32(&tail, pos - ZIP64_LOCATOR_SIZE) == ZIP64_LOCATOR_SIGNATURE
        {
            return Err(Error::UnsupportedFeature {
                feature: "ZIP64 archives",
            });
        }
        record.check_supported()?;

        Ok(record)
    }

    /// Parses a record from a buffer starting at its signature.
    ///
    /// `position` is the file offset of `buf[0]`, used for error reporting.
    pub fn parse(buf: &[u8], position: u64) -> Result<Self> {
        if buf.len() < EOCD_SIZE || le_u32(buf, 0) != EOCD_SIGNATURE {
            return Err(Error::corrupt_header(
                position,
                "bad end of central directory signature",
            ));
        }

        let comment_len = le_u16(buf, 20) as usize;
        let comment = buf
            .get(EOCD_SIZE..EOCD_SIZE + comment_len)
            .ok_or_else(|| Error::corrupt_header(position + 20, "archive comment truncated"))?
            .to_vec();

        Ok(Self {
            position,
            disk_number: le_u16(buf, 4),
            directory_disk: le_u16(buf, 6),
            entries_on_disk: le_u16(buf, 8),
            total_entries: le_u16(buf, 10),
            directory_size: le_u32(buf, 12),
            directory_offset: le_u32(buf, 16),
            comment,
        })
    }

    /// Rejects records describing archives outside the supported subset.
    fn check_supported(&self) -> Result<()> {
        if self.total_entries == u16::MAX
            || self.directory_size == u32::MAX
            || self.directory_offset == u32::MAX
        {
            return Err(Error::UnsupportedFeature {
                feature: "ZIP64 archives",
            });
        }

        if self.disk_number != 0
            || self.directory_disk != 0
            || self.entries_on_disk != self.total_entries
        {
            return Err(Error::UnsupportedFeature {
                feature: "multi-disk archives",
            });
        }

        let directory_end = u64::from(self.directory_offset) + u64::from(self.directory_size);
        if directory_end > self.position {
            return Err(Error::corrupt_header(
                self.position + 12,
                format!(
                    "central directory ({} bytes at {:#x}) overlaps the end record",
                    self.directory_size, self.directory_offset
                ),
            ));
        }

        Ok(())
    }

    /// Writes the record, including the comment.
    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.comment.len() > MAX_COMMENT_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "archive comment exceeds 65535 bytes",
            ));
        }

        let mut buf = Vec::with_capacity(EOCD_SIZE + self.comment.len());
        buf.extend_from_slice(&EOCD_SIGNATURE.to_le_bytes());
        buf.extend_from_slice(&self.disk_number.to_le_bytes());
        buf.extend_from_slice(&self.directory_disk.to_le_bytes());
        buf.extend_from_slice(&self.entries_on_disk.to_le_bytes());
        buf.extend_from_slice(&self.total_entries.to_le_bytes());
        buf.extend_from_slice(&self.directory_size.to_le_bytes());
        buf.extend_from_slice(&self.directory_offset.to_le_bytes());
        buf.extend_from_slice(&(self.comment.len() as u16).to_le_bytes());
        buf.extend_from_slice(&self.comment);
        out.write_all(&buf)
    }
}
