//! Archive entry type.

use chrono::NaiveDateTime;

use crate::attributes::{self, HostSystem};
use crate::format::{CentralRecord, CompressionMethod, flags};
use crate::timestamp::DosDateTime;

/// An entry in a ZIP archive, as described by its central directory record.
///
/// This struct is marked `#[non_exhaustive]` to allow adding new fields
/// in future versions without breaking downstream code. Pattern matching
/// on `Entry` requires a `..` wildcard.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Entry {
    /// The path within the archive, `/`-separated.
    ///
    /// Directory markers end in `/`. Names that are not valid UTF-8 are
    /// decoded lossily.
    pub path: String,
    /// Position of the entry in central directory order.
    pub index: usize,
    /// Compression method.
    pub method: CompressionMethod,
    /// CRC-32 of the uncompressed data.
    pub crc32: u32,
    /// Compressed size in bytes.
    pub compressed_size: u64,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: DosDateTime,
    /// Raw "version made by" field.
    pub version_made_by: u16,
    /// Producing host (upper byte of `version_made_by`).
    pub host_system: HostSystem,
    /// General purpose flags.
    pub flags: u16,
    /// External file attributes.
    pub external_attributes: u32,
    /// Internal file attributes.
    pub internal_attributes: u16,
    /// Position of the local file header in the file.
    pub header_offset: u64,
}

impl Entry {
    pub(crate) fn from_record(
        index: usize,
        record: &CentralRecord,
        archive_offset: u64,
    ) -> Self {
        Self {
            path: record.name(),
            index,
            method: record.compression_method(),
            crc32: record.crc32,
            compressed_size: u64::from(record.compressed_size),
            size: u64::from(record.uncompressed_size),
            modified: record.modified,
            version_made_by: record.version_made_by,
            host_system: record.host_system(),
            flags: record.flags,
            external_attributes: record.external_attributes,
            internal_attributes: record.internal_attributes,
            header_offset: archive_offset + u64::from(record.local_header_offset),
        }
    }

    /// Returns the file name (last component of the path).
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    /// Returns true if this is a directory marker.
    pub fn is_directory(&self) -> bool {
        self.path.ends_with('/')
    }

    /// Returns true if this is neither a directory marker nor a symlink.
    pub fn is_file(&self) -> bool {
        !self.is_directory() && !self.is_symlink()
    }

    /// Returns true if this entry encodes a symbolic link.
    pub fn is_symlink(&self) -> bool {
        attributes::is_symlink(self.external_attributes, self.host_system)
    }

    /// Returns the Unix mode, if the producer recorded one.
    pub fn unix_mode(&self) -> Option<u32> {
        attributes::unix_mode(self.external_attributes, self.host_system)
    }

    /// Returns true if the entry data is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.flags & (flags::ENCRYPTED | flags::STRONG_ENCRYPTION) != 0
    }

    /// Returns the modification time, if the stored fields form a valid date.
    pub fn modified_time(&self) -> Option<NaiveDateTime> {
        self.modified.to_naive()
    }
}
