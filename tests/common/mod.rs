//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zipmend::format::CompressionMethod;
use zipmend::{Archive, DosDateTime, Payload, WriteOptions, ZipWriter};

/// Fixed timestamp so archives built twice are byte-identical.
pub fn fixed_options() -> WriteOptions {
    WriteOptions::new().modified(DosDateTime::from_fields(2021, 6, 15, 12, 30, 0))
}

/// Creates an in-memory archive of regular files with this crate's writer.
pub fn create_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    create_archive_with(&fixed_options(), entries, b"")
}

/// Creates an in-memory archive with explicit options and comment.
pub fn create_archive_with(
    options: &WriteOptions,
    entries: &[(&str, &[u8])],
    comment: &[u8],
) -> Vec<u8> {
    let mut writer = ZipWriter::new(Vec::new());
    for (name, data) in entries {
        writer
            .add_entry(name, &Payload::regular(*data), options)
            .expect("failed to add entry");
    }
    writer.finish(comment).expect("failed to finish archive")
}

/// Creates an in-memory archive with the `zip` crate.
pub fn create_zip_crate_archive(
    entries: &[(&str, &[u8])],
    method: zip::CompressionMethod,
    comment: &str,
) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default()
        .compression_method(method)
        .unix_permissions(0o640);
    for (name, data) in entries {
        writer.start_file(*name, options).expect("start_file");
        writer.write_all(data).expect("write entry");
    }
    writer.set_comment(comment);
    writer.finish().expect("finish").into_inner()
}

/// A stored entry written by [`build_raw_archive`].
pub struct RawEntry<'a> {
    pub name: &'a str,
    pub data: &'a [u8],
    /// `None`: sizes in the local header; `Some(sig)`: trailing data
    /// descriptor, with or without its optional signature.
    pub descriptor: Option<bool>,
}

impl<'a> RawEntry<'a> {
    pub fn plain(name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            data,
            descriptor: None,
        }
    }

    pub fn with_descriptor(name: &'a str, data: &'a [u8], signature: bool) -> Self {
        Self {
            name,
            data,
            descriptor: Some(signature),
        }
    }
}

/// Builds an MS-DOS style archive by hand: stored entries, no attributes.
///
/// `preamble` is written before the first local header; central directory
/// offsets are absolute, as in a self-extracting archive.
pub fn build_raw_archive(preamble: &[u8], entries: &[RawEntry<'_>], comment: &[u8]) -> Vec<u8> {
    let mut out = preamble.to_vec();
    let mut central = Vec::new();

    for entry in entries {
        let offset = out.len() as u32;
        let crc = crc32fast::hash(entry.data);
        let size = entry.data.len() as u32;
        let flags: u16 = if entry.descriptor.is_some() { 0x0008 } else { 0 };
        let (local_crc, local_size) = if entry.descriptor.is_some() {
            (0, 0)
        } else {
            (crc, size)
        };

        out.extend_from_slice(&0x04034b50u32.to_le_bytes());
        out.extend_from_slice(&20u16.to_le_bytes());
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // stored
        out.extend_from_slice(&0u16.to_le_bytes()); // time
        out.extend_from_slice(&0x21u16.to_le_bytes()); // 1980-01-01
        out.extend_from_slice(&local_crc.to_le_bytes());
        out.extend_from_slice(&local_size.to_le_bytes());
        out.extend_from_slice(&local_size.to_le_bytes());
        out.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(entry.name.as_bytes());
        out.extend_from_slice(entry.data);
        if let Some(signature) = entry.descriptor {
            if signature {
                out.extend_from_slice(&0x08074b50u32.to_le_bytes());
            }
            out.extend_from_slice(&crc.to_le_bytes());
            out.extend_from_slice(&size.to_le_bytes());
            out.extend_from_slice(&size.to_le_bytes());
        }

        central.extend_from_slice(&0x02014b50u32.to_le_bytes());
        central.extend_from_slice(&20u16.to_le_bytes()); // made by MS-DOS
        central.extend_from_slice(&20u16.to_le_bytes());
        central.extend_from_slice(&flags.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0x21u16.to_le_bytes());
        central.extend_from_slice(&crc.to_le_bytes());
        central.extend_from_slice(&size.to_le_bytes());
        central.extend_from_slice(&size.to_le_bytes());
        central.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes()); // extra
        central.extend_from_slice(&0u16.to_le_bytes()); // comment
        central.extend_from_slice(&0u16.to_le_bytes()); // disk
        central.extend_from_slice(&0u16.to_le_bytes()); // internal
        central.extend_from_slice(&0u32.to_le_bytes()); // external
        central.extend_from_slice(&offset.to_le_bytes());
        central.extend_from_slice(entry.name.as_bytes());
    }

    let directory_offset = out.len() as u32;
    out.extend_from_slice(&central);
    out.extend_from_slice(&0x06054b50u32.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(central.len() as u32).to_le_bytes());
    out.extend_from_slice(&directory_offset.to_le_bytes());
    out.extend_from_slice(&(comment.len() as u16).to_le_bytes());
    out.extend_from_slice(comment);
    out
}

/// Writes `bytes` to `dir/name` and returns the path.
pub fn write_archive(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).expect("failed to write archive");
    path
}

/// Opens an archive from memory.
pub fn open(bytes: Vec<u8>) -> Archive<Cursor<Vec<u8>>> {
    Archive::open(Cursor::new(bytes)).expect("failed to open archive")
}

/// Returns `(path, content)` for every non-directory entry.
pub fn read_all(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = Archive::open_path(path).expect("failed to open archive");
    let names: Vec<_> = archive
        .entries()
        .iter()
        .filter(|e| !e.is_directory())
        .map(|e| (e.index, e.path.clone()))
        .collect();
    names
        .into_iter()
        .map(|(index, name)| (name, archive.read_index(index).expect("read entry")))
        .collect()
}

/// Returns the entry names of the archive at `path`, in directory order.
pub fn entry_names(path: &Path) -> Vec<String> {
    Archive::open_path(path)
        .expect("failed to open archive")
        .entries()
        .iter()
        .map(|e| e.path.clone())
        .collect()
}

/// Returns the local header, data and descriptor bytes of the named entry.
///
/// Only valid for entries without a data descriptor, whose extent can be
/// derived from the central directory alone.
pub fn local_record<'a>(bytes: &'a [u8], name: &str) -> &'a [u8] {
    let archive = open(bytes.to_vec());
    let entry = archive.entry(name).expect("entry not found");
    let start = entry.header_offset as usize;
    let name_len = u16::from_le_bytes([bytes[start + 26], bytes[start + 27]]) as usize;
    let extra_len = u16::from_le_bytes([bytes[start + 28], bytes[start + 29]]) as usize;
    let end = start + 30 + name_len + extra_len + entry.compressed_size as usize;
    &bytes[start..end]
}

/// Returns the raw central directory record of the named entry, without
/// its local header offset field.
pub fn central_record_without_offset(bytes: &[u8], name: &str) -> Vec<u8> {
    let archive = open(bytes.to_vec());
    let mut pos = archive.directory_offset() as usize;
    loop {
        let name_len = u16::from_le_bytes([bytes[pos + 28], bytes[pos + 29]]) as usize;
        let extra_len = u16::from_le_bytes([bytes[pos + 30], bytes[pos + 31]]) as usize;
        let comment_len = u16::from_le_bytes([bytes[pos + 32], bytes[pos + 33]]) as usize;
        let end = pos + 46 + name_len + extra_len + comment_len;
        if &bytes[pos + 46..pos + 46 + name_len] == name.as_bytes() {
            let mut record = bytes[pos..end].to_vec();
            record.splice(42..46, []);
            return record;
        }
        pos = end;
    }
}

/// True if the build can decode deflated entries.
pub fn deflate_enabled() -> bool {
    zipmend::codec::is_supported(CompressionMethod::Deflate)
}
