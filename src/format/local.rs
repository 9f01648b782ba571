//! Local file headers, data descriptors and entry spans.

use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;

use super::{
    CentralRecord, DATA_DESCRIPTOR_SIGNATURE, LOCAL_HEADER_SIGNATURE, LOCAL_HEADER_SIZE,
    flags, le_u16, le_u32,
};
use crate::timestamp::DosDateTime;
use crate::{Error, Result};

/// Data descriptor length without the optional signature (crc + two sizes).
const DESCRIPTOR_LEN: u64 = 12;

/// A local file header.
///
/// Sizes and CRC may be zero when the entry uses a data descriptor; the
/// central directory is authoritative for those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalHeader {
    /// Minimum version needed to extract.
    pub version_needed: u16,
    /// General purpose flags.
    pub flags: u16,
    /// Raw compression method.
    pub method: u16,
    /// Modification time.
    pub modified: DosDateTime,
    /// CRC-32 of the uncompressed data.
    pub crc32: u32,
    /// Compressed size.
    pub compressed_size: u32,
    /// Uncompressed size.
    pub uncompressed_size: u32,
    /// Name length.
    pub name_len: u16,
    /// Extra field length.
    pub extra_len: u16,
}

impl LocalHeader {
    /// Parses the fixed 30-byte portion of a header.
    pub fn parse(buf: &[u8], position: u64) -> Result<Self> {
        if buf.len() < LOCAL_HEADER_SIZE {
            return Err(Error::corrupt_header(position, "local file header truncated"));
        }
        if le_u32(buf, 0) != LOCAL_HEADER_SIGNATURE {
            return Err(Error::corrupt_header(
                position,
                "bad local file header signature",
            ));
        }

        Ok(Self {
            version_needed: le_u16(buf, 4),
            flags: le_u16(buf, 6),
            method: le_u16(buf, 8),
            modified: DosDateTime::from_raw(le_u16(buf, 10), le_u16(buf, 12)),
            crc32: le_u32(buf, 14),
            compressed_size: le_u32(buf, 18),
            uncompressed_size: le_u32(buf, 22),
            name_len: le_u16(buf, 26),
            extra_len: le_u16(buf, 28),
        })
    }

    /// Reads and parses the header at `offset`.
    pub fn read_at<R: Read + Seek>(reader: &mut R, offset: u64) -> Result<Self> {
        reader.seek(SeekFrom::Start(offset))?;
        let mut buf = [0u8; LOCAL_HEADER_SIZE];
        reader.read_exact(&mut buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                Error::corrupt_header(offset, "local file header runs past end of file")
            } else {
                Error::Io(e)
            }
        })?;
        Self::parse(&buf, offset)
    }

    /// Returns the length of the header including name and extra field.
    pub fn total_len(&self) -> u64 {
        LOCAL_HEADER_SIZE as u64 + u64::from(self.name_len) + u64::from(self.extra_len)
    }

    /// Returns true if a data descriptor follows the entry data.
    pub fn has_data_descriptor(&self) -> bool {
        self.flags & flags::DATA_DESCRIPTOR != 0
    }

    /// Encodes a header for a new entry with the given name and no extra field.
    pub fn encode(&self, name: &[u8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(LOCAL_HEADER_SIZE + name.len());
        buf.extend_from_slice(&LOCAL_HEADER_SIGNATURE.to_le_bytes());
        buf.extend_from_slice(&self.version_needed.to_le_bytes());
        buf.extend_from_slice(&self.flags.to_le_bytes());
        buf.extend_from_slice(&self.method.to_le_bytes());
        buf.extend_from_slice(&self.modified.time.to_le_bytes());
        buf.extend_from_slice(&self.modified.date.to_le_bytes());
        buf.extend_from_slice(&self.crc32.to_le_bytes());
        buf.extend_from_slice(&self.compressed_size.to_le_bytes());
        buf.extend_from_slice(&self.uncompressed_size.to_le_bytes());
        buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(name);
        buf
    }
}

/// The byte ranges an entry occupies in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySpan {
    /// Local header, name, extra field, data and data descriptor.
    pub whole: Range<u64>,
    /// Compressed data only.
    pub data: Range<u64>,
}

impl EntrySpan {
    /// Returns the total length of the span.
    pub fn len(&self) -> u64 {
        self.whole.end - self.whole.start
    }

    /// Returns true if the span is empty (never the case for a parsed entry).
    pub fn is_empty(&self) -> bool {
        self.whole.is_empty()
    }
}

/// Computes the span of the entry described by `record`.
///
/// `base` is the number of bytes prepended to the archive after its offsets
/// were written; the record's offset is taken relative to it. The span must
/// end at or before `limit`, normally the start of the central directory.
pub fn entry_span<R: Read + Seek>(
    reader: &mut R,
    record: &CentralRecord,
    base: u64,
    limit: u64,
) -> Result<EntrySpan> {
    let start = base + u64::from(record.local_header_offset);
    if start + LOCAL_HEADER_SIZE as u64 > limit {
        return Err(Error::corrupt_header(
            start,
            format!(
                "local header of '{}' lies outside the entry area",
                record.name()
            ),
        ));
    }

    let header = LocalHeader::read_at(reader, start)?;
    let data_start = start + header.total_len();
    let data_end = data_start + u64::from(record.compressed_size);
    if data_end > limit {
        return Err(Error::corrupt_header(
            start,
            format!("data of '{}' runs into the central directory", record.name()),
        ));
    }

    let mut end = data_end;
    if header.has_data_descriptor() || record.flags & flags::DATA_DESCRIPTOR != 0 {
        end += descriptor_len(reader, data_end, limit)?;
    }

    Ok(EntrySpan {
        whole: start..end,
        data: data_start..data_end,
    })
}

/// Returns the length of the data descriptor at `position`, 12 or 16 bytes
/// depending on whether the optional signature is present.
fn descriptor_len<R: Read + Seek>(reader: &mut R, position: u64, limit: u64) -> Result<u64> {
    if position + DESCRIPTOR_LEN > limit {
        return Err(Error::corrupt_header(position, "data descriptor truncated"));
    }

    reader.seek(SeekFrom::Start(position))?;
    let mut sig = [0u8; 4];
    reader.read_exact(&mut sig)?;

    if u32::from_le_bytes(sig) == DATA_DESCRIPTOR_SIGNATURE && position + DESCRIPTOR_LEN + 4 <= limit
    {
        Ok(DESCRIPTOR_LEN + 4)
    } else {
        Ok(DESCRIPTOR_LEN)
    }
}
