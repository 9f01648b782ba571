//! Encoding of new entries.

use std::io::Write;

use crate::attributes::{HostSystem, encode_file_attributes, encode_symlink_attributes};
use crate::codec;
use crate::edit::Payload;
use crate::format::central::CentralFields;
use crate::format::{CentralRecord, CompressionMethod, LocalHeader, flags};
use crate::timestamp::DosDateTime;
use crate::{ArchivePath, Error, Result};

use super::{WriteOptions, ZipWriter, checked_u32};

/// Fully prepared data for one new entry.
struct NewEntry<'a> {
    name: &'a str,
    data: &'a [u8],
    method: CompressionMethod,
    external_attributes: u32,
    modified: DosDateTime,
}

impl<W: Write> ZipWriter<W> {
    /// Appends a new entry built from `payload`.
    ///
    /// Regular files are compressed with `options.method` and get mode
    /// `S_IFREG | options.file_mode`. Symbolic links are stored uncompressed
    /// with mode `S_IFLNK | options.symlink_mode`. Both are tagged as
    /// produced by a Unix host.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArchivePath`] for unusable names or an empty link target
    /// - [`Error::UnsupportedMethod`] if `options.method` cannot be encoded
    /// - [`Error::UnsupportedFeature`] if the entry would need ZIP64
    pub fn add_entry(&mut self, name: &str, payload: &Payload, options: &WriteOptions) -> Result<()> {
        let path = ArchivePath::new(name)?;

        let (method, external_attributes) = match payload {
            Payload::Regular(_) => (options.method, encode_file_attributes(options.file_mode)),
            Payload::Symlink(target) => {
                if target.is_empty() {
                    return Err(Error::InvalidArchivePath(format!(
                        "symlink '{}' has an empty target",
                        path
                    )));
                }
                (
                    CompressionMethod::Stored,
                    encode_symlink_attributes(options.symlink_mode),
                )
            }
        };

        self.write_new_entry(
            &NewEntry {
                name: path.as_str(),
                data: payload.as_bytes(),
                method,
                external_attributes,
                modified: options.timestamp(),
            },
            options.level,
        )
    }

    fn write_new_entry(&mut self, entry: &NewEntry<'_>, level: u32) -> Result<()> {
        let crc32 = crc32fast::hash(entry.data);
        let compressed = codec::compress(entry.method, level, entry.data)?;

        let compressed_size = checked_u32(compressed.len() as u64)?;
        let uncompressed_size = checked_u32(entry.data.len() as u64)?;
        let local_header_offset = checked_u32(self.position)?;

        let name = entry.name.as_bytes();
        let flags = if entry.name.is_ascii() { 0 } else { flags::UTF8 };

        let header = LocalHeader {
            version_needed: entry.method.version_needed(),
            flags,
            method: entry.method.id(),
            modified: entry.modified,
            crc32,
            compressed_size,
            uncompressed_size,
            name_len: name.len() as u16,
            extra_len: 0,
        };
        self.emit(&header.encode(name))?;
        self.emit(&compressed)?;

        self.records.push(CentralRecord::build(&CentralFields {
            host: HostSystem::Unix,
            flags,
            method: entry.method,
            modified: entry.modified,
            crc32,
            compressed_size,
            uncompressed_size,
            external_attributes: entry.external_attributes,
            local_header_offset,
            name,
        }));

        log::debug!(
            "wrote new entry '{}' ({} -> {} bytes, {})",
            entry.name,
            uncompressed_size,
            compressed_size,
            entry.method.name()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{S_IFLNK, S_IFMT};
    use crate::read::Archive;
    use std::io::Cursor;

    fn fixed_options() -> WriteOptions {
        WriteOptions::new().modified(DosDateTime::from_fields(2024, 6, 1, 8, 0, 0))
    }

    #[test]
    fn test_symlink_entry_encoding() {
        let mut writer = ZipWriter::new(Vec::new());
        writer
            .add_entry("current", &Payload::symlink("releases/v2"), &fixed_options())
            .unwrap();
        let archive = Archive::open(Cursor::new(writer.finish(&[]).unwrap())).unwrap();

        let entry = &archive.entries()[0];
        assert_eq!(entry.external_attributes, 0xA1ED_0000);
        assert_eq!(entry.host_system, HostSystem::Unix);
        assert_eq!(entry.version_made_by >> 8, 3);
        assert_eq!(entry.method, CompressionMethod::Stored);
        assert_eq!(entry.size, "releases/v2".len() as u64);
        assert_eq!(entry.unix_mode().unwrap() & S_IFMT, S_IFLNK);
        assert!(entry.is_symlink());
    }

    #[test]
    fn test_regular_entry_encoding() {
        let mut writer = ZipWriter::new(Vec::new());
        writer
            .add_entry("a.txt", &Payload::regular("aaaa".repeat(64)), &fixed_options())
            .unwrap();
        let archive = Archive::open(Cursor::new(writer.finish(&[]).unwrap())).unwrap();

        let entry = &archive.entries()[0];
        assert_eq!(entry.external_attributes, 0x81A4_0000);
        assert_eq!(entry.unix_mode(), Some(0o100644));
        assert!(!entry.is_symlink());
        assert_eq!(entry.modified.to_string(), "2024-06-01 08:00:00");
        #[cfg(feature = "deflate")]
        assert!(entry.compressed_size < entry.size);
    }

    #[test]
    fn test_non_ascii_name_sets_utf8_flag() {
        let mut writer = ZipWriter::new(Vec::new());
        writer
            .add_entry("документ.txt", &Payload::regular("x"), &fixed_options())
            .unwrap();
        writer
            .add_entry("plain.txt", &Payload::regular("x"), &fixed_options())
            .unwrap();
        let archive = Archive::open(Cursor::new(writer.finish(&[]).unwrap())).unwrap();

        assert_ne!(archive.entries()[0].flags & flags::UTF8, 0);
        assert_eq!(archive.entries()[0].path, "документ.txt");
        assert_eq!(archive.entries()[1].flags & flags::UTF8, 0);
    }

    #[test]
    fn test_empty_symlink_target_rejected() {
        let mut writer = ZipWriter::new(Vec::new());
        let err = writer
            .add_entry("link", &Payload::symlink(""), &fixed_options())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArchivePath(_)));
        assert_eq!(writer.position(), 0);
    }

    #[test]
    fn test_directory_name_rejected() {
        let mut writer = ZipWriter::new(Vec::new());
        assert!(
            writer
                .add_entry("dir/", &Payload::regular(""), &fixed_options())
                .is_err()
        );
    }
}
