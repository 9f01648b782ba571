//! ZIP container constants, definitions, and low-level record parsing.
//!
//! This module contains the signatures, fixed record sizes and flag bits
//! defined by the PKWARE application note, plus parsers for the three record
//! types the rewrite engine touches:
//!
//! - [`eocd`]: the end-of-central-directory record
//! - [`central`]: central directory file headers
//! - [`local`]: local file headers and data descriptors
//!
//! Parsers never interpret more than they must. Central records keep their
//! complete raw bytes so unchanged entries can be re-emitted verbatim.

pub mod central;
pub mod eocd;
pub mod local;

pub use central::CentralRecord;
pub use eocd::EndOfCentralDirectory;
pub use local::LocalHeader;

/// Local file header signature (`PK\x03\x04`).
pub const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;

/// Central directory file header signature (`PK\x01\x02`).
pub const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;

/// End of central directory signature (`PK\x05\x06`).
pub const EOCD_SIGNATURE: u32 = 0x0605_4b50;

/// ZIP64 end of central directory locator signature (`PK\x06\x07`).
pub const ZIP64_LOCATOR_SIGNATURE: u32 = 0x0706_4b50;

/// Optional data descriptor signature (`PK\x07\x08`).
pub const DATA_DESCRIPTOR_SIGNATURE: u32 = 0x0807_4b50;

/// Fixed portion of a local file header.
pub const LOCAL_HEADER_SIZE: usize = 30;

/// Fixed portion of a central directory file header.
pub const CENTRAL_HEADER_SIZE: usize = 46;

/// Fixed portion of the end of central directory record.
pub const EOCD_SIZE: usize = 22;

/// Size of the ZIP64 end of central directory locator.
pub const ZIP64_LOCATOR_SIZE: usize = 20;

/// Largest archive comment the EOCD length field can describe.
pub const MAX_COMMENT_LEN: usize = u16::MAX as usize;

/// Version needed to extract: 1.0 (stored entries).
pub const VERSION_STORED: u16 = 10;

/// Version needed to extract: 2.0 (deflate).
pub const VERSION_DEFLATE: u16 = 20;

/// APPNOTE version written in "version made by" (2.0).
pub const VERSION_MADE_BY: u16 = 20;

/// General purpose flag bits.
pub mod flags {
    /// Entry data is encrypted.
    pub const ENCRYPTED: u16 = 0x0001;
    /// Sizes and CRC follow the data in a data descriptor.
    pub const DATA_DESCRIPTOR: u16 = 0x0008;
    /// Strong encryption.
    pub const STRONG_ENCRYPTION: u16 = 0x0040;
    /// File name and comment are UTF-8.
    pub const UTF8: u16 = 0x0800;
}

/// ZIP compression method identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    /// No compression (method 0).
    Stored,
    /// Raw deflate (method 8).
    Deflate,
    /// Any other method; entries using it can be copied but not read.
    Other(u16),
}

impl CompressionMethod {
    /// Decodes the raw method field.
    pub fn from_id(id: u16) -> Self {
        match id {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            other => CompressionMethod::Other(other),
        }
    }

    /// Returns the raw method field.
    pub fn id(self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::Other(id) => id,
        }
    }

    /// Returns the method name as shown in listings.
    pub fn name(self) -> &'static str {
        match self {
            CompressionMethod::Stored => "Stored",
            CompressionMethod::Deflate => "Deflate",
            CompressionMethod::Other(9) => "Deflate64",
            CompressionMethod::Other(12) => "BZip2",
            CompressionMethod::Other(14) => "LZMA",
            CompressionMethod::Other(93) => "Zstandard",
            CompressionMethod::Other(95) => "XZ",
            CompressionMethod::Other(99) => "AES",
            CompressionMethod::Other(_) => "Unknown",
        }
    }

    /// Returns the minimum "version needed to extract" for this method.
    pub fn version_needed(self) -> u16 {
        match self {
            CompressionMethod::Stored => VERSION_STORED,
            _ => VERSION_DEFLATE,
        }
    }
}

/// Reads a little-endian u16 at `at`. Callers check bounds beforehand.
#[inline]
pub(crate) fn le_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

/// Reads a little-endian u32 at `at`. Callers check bounds beforehand.
#[inline]
pub(crate) fn le_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

/// Decodes a stored entry name.
///
/// Names flagged as UTF-8, and legacy names that happen to be valid UTF-8,
/// decode exactly. Anything else is decoded lossily.
pub(crate) fn decode_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}
