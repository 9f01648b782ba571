//! Central directory file headers.

use super::{
    CENTRAL_HEADER_SIGNATURE, CENTRAL_HEADER_SIZE, CompressionMethod, VERSION_MADE_BY,
    decode_name, flags, le_u16, le_u32,
};
use crate::attributes::HostSystem;
use crate::timestamp::DosDateTime;
use crate::{Error, Result};

/// Byte offset of the local header offset field within a central record.
const LOCAL_OFFSET_FIELD: usize = 42;

/// A central directory file header.
///
/// The decoded fields are read-only views; the authoritative representation
/// is the raw record (fixed part, name, extra field and comment), which is
/// what gets written back when an entry is copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CentralRecord {
    raw: Vec<u8>,
    /// "Version made by": origin tag in the upper byte, APPNOTE version in the lower.
    pub version_made_by: u16,
    /// Minimum version needed to extract.
    pub version_needed: u16,
    /// General purpose flags.
    pub flags: u16,
    /// Raw compression method.
    pub method: u16,
    /// Last modification time.
    pub modified: DosDateTime,
    /// CRC-32 of the uncompressed data.
    pub crc32: u32,
    /// Compressed data size.
    pub compressed_size: u32,
    /// Uncompressed data size.
    pub uncompressed_size: u32,
    /// Disk number where the entry starts.
    pub disk_start: u16,
    /// Internal file attributes.
    pub internal_attributes: u16,
    /// External file attributes.
    pub external_attributes: u32,
    /// Offset of the local file header.
    pub local_header_offset: u32,
    name_len: usize,
}

/// Field values for a new central record.
#[derive(Debug, Clone)]
pub struct CentralFields<'a> {
    /// Origin host of the entry.
    pub host: HostSystem,
    /// General purpose flags.
    pub flags: u16,
    /// Compression method.
    pub method: CompressionMethod,
    /// Modification time.
    pub modified: DosDateTime,
    /// CRC-32 of the uncompressed data.
    pub crc32: u32,
    /// Compressed size.
    pub compressed_size: u32,
    /// Uncompressed size.
    pub uncompressed_size: u32,
    /// External attributes.
    pub external_attributes: u32,
    /// Offset of the local file header.
    pub local_header_offset: u32,
    /// Entry name bytes.
    pub name: &'a [u8],
}

impl CentralRecord {
    /// Parses one record from the start of `buf`.
    ///
    /// Returns the record and the number of bytes it occupies. `position` is
    /// the file offset of `buf[0]`, used for error reporting.
    pub fn parse(buf: &[u8], position: u64) -> Result<(Self, usize)> {
        if buf.len() < CENTRAL_HEADER_SIZE {
            return Err(Error::corrupt_header(
                position,
                "central directory record truncated",
            ));
        }
        if le_u32(buf, 0) != CENTRAL_HEADER_SIGNATURE {
            return Err(Error::corrupt_header(
                position,
                "bad central directory signature",
            ));
        }

        let name_len = le_u16(buf, 28) as usize;
        let extra_len = le_u16(buf, 30) as usize;
        let comment_len = le_u16(buf, 32) as usize;
        let total = CENTRAL_HEADER_SIZE + name_len + extra_len + comment_len;
        if buf.len() < total {
            return Err(Error::corrupt_header(
                position,
                "central directory record runs past the directory end",
            ));
        }

        let record = Self {
            raw: buf[..total].to_vec(),
            version_made_by: le_u16(buf, 4),
            version_needed: le_u16(buf, 6),
            flags: le_u16(buf, 8),
            method: le_u16(buf, 10),
            modified: DosDateTime::from_raw(le_u16(buf, 12), le_u16(buf, 14)),
            crc32: le_u32(buf, 16),
            compressed_size: le_u32(buf, 20),
            uncompressed_size: le_u32(buf, 24),
            disk_start: le_u16(buf, 34),
            internal_attributes: le_u16(buf, 36),
            external_attributes: le_u32(buf, 38),
            local_header_offset: le_u32(buf, LOCAL_OFFSET_FIELD),
            name_len,
        };
        Ok((record, total))
    }

    /// Encodes a record for a newly written entry (no extra field, no comment).
    pub fn build(fields: &CentralFields<'_>) -> Self {
        let version_made_by = (u16::from(fields.host.tag()) << 8) | VERSION_MADE_BY;
        let version_needed = fields.method.version_needed();

        let mut raw = Vec::with_capacity(CENTRAL_HEADER_SIZE + fields.name.len());
        raw.extend_from_slice(&CENTRAL_HEADER_SIGNATURE.to_le_bytes());
        raw.extend_from_slice(&version_made_by.to_le_bytes());
        raw.extend_from_slice(&version_needed.to_le_bytes());
        raw.extend_from_slice(&fields.flags.to_le_bytes());
        raw.extend_from_slice(&fields.method.id().to_le_bytes());
        raw.extend_from_slice(&fields.modified.time.to_le_bytes());
        raw.extend_from_slice(&fields.modified.date.to_le_bytes());
        raw.extend_from_slice(&fields.crc32.to_le_bytes());
        raw.extend_from_slice(&fields.compressed_size.to_le_bytes());
        raw.extend_from_slice(&fields.uncompressed_size.to_le_bytes());
        raw.extend_from_slice(&(fields.name.len() as u16).to_le_bytes());
        raw.extend_from_slice(&0u16.to_le_bytes()); // extra field length
        raw.extend_from_slice(&0u16.to_le_bytes()); // comment length
        raw.extend_from_slice(&0u16.to_le_bytes()); // disk number start
        raw.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
        raw.extend_from_slice(&fields.external_attributes.to_le_bytes());
        raw.extend_from_slice(&fields.local_header_offset.to_le_bytes());
        raw.extend_from_slice(fields.name);

        Self {
            raw,
            version_made_by,
            version_needed,
            flags: fields.flags,
            method: fields.method.id(),
            modified: fields.modified,
            crc32: fields.crc32,
            compressed_size: fields.compressed_size,
            uncompressed_size: fields.uncompressed_size,
            disk_start: 0,
            internal_attributes: 0,
            external_attributes: fields.external_attributes,
            local_header_offset: fields.local_header_offset,
            name_len: fields.name.len(),
        }
    }

    /// Returns the complete raw record.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Returns a copy of this record pointing at a new local header offset.
    ///
    /// Every other byte of the raw record is left untouched.
    pub fn relocated(&self, local_header_offset: u32) -> Self {
        let mut record = self.clone();
        record.raw[LOCAL_OFFSET_FIELD..LOCAL_OFFSET_FIELD + 4]
            .copy_from_slice(&local_header_offset.to_le_bytes());
        record.local_header_offset = local_header_offset;
        record
    }

    /// Returns the raw name bytes.
    pub fn name_bytes(&self) -> &[u8] {
        &self.raw[CENTRAL_HEADER_SIZE..CENTRAL_HEADER_SIZE + self.name_len]
    }

    /// Returns the decoded entry name.
    pub fn name(&self) -> String {
        decode_name(self.name_bytes())
    }

    /// Returns the host that produced the entry.
    pub fn host_system(&self) -> HostSystem {
        HostSystem::from_tag((self.version_made_by >> 8) as u8)
    }

    /// Returns the compression method.
    pub fn compression_method(&self) -> CompressionMethod {
        CompressionMethod::from_id(self.method)
    }

    /// Returns true if the entry data is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.flags & (flags::ENCRYPTED | flags::STRONG_ENCRYPTION) != 0
    }
}

/// Parses every record of a central directory buffer.
///
/// `base` is the file offset of `buf[0]`. The number of records must match
/// `expected`, the count declared by the end record.
pub fn parse_directory(buf: &[u8], base: u64, expected: usize) -> Result<Vec<CentralRecord>> {
    let mut records = Vec::with_capacity(expected);
    let mut pos = 0usize;

    while records.len() < expected {
        let (record, consumed) = CentralRecord::parse(&buf[pos..], base + pos as u64)?;
        records.push(record);
        pos += consumed;
    }

    if pos != buf.len() {
        return Err(Error::corrupt_header(
            base + pos as u64,
            format!(
                "central directory holds {} trailing bytes after {} records",
                buf.len() - pos,
                expected
            ),
        ));
    }

    Ok(records)
}
