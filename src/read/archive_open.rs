//! Archive opening methods.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::format::{CentralRecord, EndOfCentralDirectory, LOCAL_HEADER_SIZE, central};
use crate::{Error, Result};

use super::{Archive, Entry};

impl Archive<BufReader<File>> {
    /// Opens an archive from a file path.
    ///
    /// # Errors
    ///
    /// - [`Error::ArchiveNotFound`] if the file does not exist
    /// - [`Error::InvalidFormat`] / [`Error::CorruptHeader`] if it is not a
    ///   readable ZIP archive
    /// - [`Error::UnsupportedFeature`] for ZIP64 or multi-disk archives
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ArchiveNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;
        Self::open(BufReader::new(file))
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Opens an archive from a seekable reader.
    ///
    /// Reads the end record and the complete central directory. Entry data is
    /// not touched until it is read or copied.
    pub fn open(mut reader: R) -> Result<Self> {
        let eocd = EndOfCentralDirectory::locate(&mut reader)?;

        // The directory normally ends right at the end record. A gap means
        // bytes were prepended without fixing up the stored offsets.
        let declared_end = u64::from(eocd.directory_offset) + u64::from(eocd.directory_size);
        let archive_offset = eocd.position - declared_end;
        if archive_offset > 0 {
            log::debug!(
                "archive offsets are relative to {:#x}; treating prefix as preamble",
                archive_offset
            );
        }

        let directory_offset = archive_offset + u64::from(eocd.directory_offset);
        reader.seek(SeekFrom::Start(directory_offset))?;
        let mut directory = vec![0u8; eocd.directory_size as usize];
        reader.read_exact(&mut directory)?;

        let records = central::parse_directory(
            &directory,
            directory_offset,
            usize::from(eocd.total_entries),
        )?;
        for record in &records {
            check_record(record, archive_offset, directory_offset)?;
        }

        let entries = records
            .iter()
            .enumerate()
            .map(|(index, record)| Entry::from_record(index, record, archive_offset))
            .collect::<Vec<_>>();

        log::debug!(
            "opened archive: {} entries, central directory at {:#x} ({} bytes)",
            entries.len(),
            directory_offset,
            eocd.directory_size
        );

        Ok(Self {
            reader,
            eocd,
            archive_offset,
            records,
            entries,
        })
    }
}

/// Rejects records that need ZIP64 or point outside the entry area.
fn check_record(
    record: &CentralRecord,
    archive_offset: u64,
    directory_offset: u64,
) -> Result<()> {
    if record.compressed_size == u32::MAX
        || record.uncompressed_size == u32::MAX
        || record.local_header_offset == u32::MAX
    {
        return Err(Error::UnsupportedFeature {
            feature: "ZIP64 archives",
        });
    }

    if record.disk_start != 0 {
        return Err(Error::UnsupportedFeature {
            feature: "multi-disk archives",
        });
    }

    let header_start = archive_offset + u64::from(record.local_header_offset);
    if header_start + LOCAL_HEADER_SIZE as u64 > directory_offset {
        return Err(Error::corrupt_header(
            directory_offset,
            format!(
                "entry '{}' points at {:#x}, past the start of the central directory",
                record.name(),
                record.local_header_offset
            ),
        ));
    }

    Ok(())
}
