//! Archive editor for adding and replacing entries in existing archives.

use std::io::{BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};

use crate::read::Archive;
use crate::write::{WriteOptions, ZipWriter};
use crate::{Error, Result};

use super::operation::{Payload, PayloadKind, Upsert};
use super::staging::StagingFile;

/// Result of an edit operation.
#[must_use = "edit result should be checked to verify operation completed as expected"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// Number of entries copied unchanged (raw) from the source archive.
    pub entries_kept: usize,
    /// Number of source entries dropped because they had the target path.
    pub entries_replaced: usize,
    /// Path of the entry that was written.
    pub added_path: String,
    /// Kind of the entry that was written.
    pub kind: PayloadKind,
    /// Size of the resulting archive in bytes.
    ///
    /// [`rewrite`] reports the bytes written before the central directory;
    /// [`ArchiveEditor`] reports the size of the committed file.
    pub archive_size: u64,
}

impl EditResult {
    /// Returns the total number of entries in the resulting archive.
    pub fn total_entries(&self) -> usize {
        self.entries_kept + 1
    }

    /// Returns true if an existing entry was replaced.
    pub fn replaced(&self) -> bool {
        self.entries_replaced > 0
    }
}

/// Copies `source` into `writer`, substituting the entry named by `op`.
///
/// Every entry whose path differs from the target is copied byte-for-byte,
/// in order, followed by the new entry. Bytes preceding the first entry are
/// copied too. The caller finishes the writer, normally with
/// `source.comment()`.
///
/// # Errors
///
/// - [`Error::EntryExists`] if the target exists and `op.overwrite` is false;
///   nothing has been written to `writer` in that case
/// - [`Error::CorruptHeader`] if an entry to be copied is damaged
/// - any error from [`ZipWriter::add_entry`]
pub fn rewrite<R: Read + Seek, W: Write>(
    source: &mut Archive<R>,
    writer: &mut ZipWriter<W>,
    op: &Upsert,
    options: &WriteOptions,
) -> Result<EditResult> {
    let target = op.target.as_str();

    if !op.overwrite && source.entries().iter().any(|e| op.targets(&e.path)) {
        return Err(Error::EntryExists {
            path: target.to_string(),
        });
    }
    if op.target.has_traversal() || op.target.is_absolute() {
        log::warn!("entry path '{}' escapes the extraction root", target);
    }

    writer.copy_preamble(source)?;

    let mut entries_kept = 0;
    let mut entries_replaced = 0;
    for index in 0..source.len() {
        if op.targets(&source.entries()[index].path) {
            log::debug!("dropping '{}' at index {}", target, index);
            entries_replaced += 1;
            continue;
        }
        writer.copy_entry(source, index)?;
        entries_kept += 1;
    }

    writer.add_entry(target, &op.payload, options)?;

    Ok(EditResult {
        entries_kept,
        entries_replaced,
        added_path: target.to_string(),
        kind: op.payload.kind(),
        archive_size: writer.position(),
    })
}

/// An editor that applies changes to an archive file in place.
///
/// Each change is a complete transaction: the archive is rewritten into a
/// staging file beside it, which then atomically replaces the original. If
/// anything fails, the original is left untouched and the staging file is
/// removed.
///
/// # Example
///
/// ```rust,no_run
/// use zipmend::edit::ArchiveEditor;
///
/// let editor = ArchiveEditor::new("bundle.zip");
/// editor.add_file("docs/readme.txt", "Hello", false)?;
/// editor.add_symlink("media/link", "../docs/readme.txt", true)?;
/// # Ok::<(), zipmend::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveEditor {
    path: PathBuf,
    options: WriteOptions,
}

impl ArchiveEditor {
    /// Creates an editor for the archive at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options: WriteOptions::default(),
        }
    }

    /// Sets the write options for new entries.
    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the archive path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Adds or replaces the entry at `target`.
    pub fn upsert(&self, target: &str, payload: Payload, overwrite: bool) -> Result<EditResult> {
        let op = Upsert::new(target, payload, overwrite)?;
        self.apply(&op)
    }

    /// Adds or replaces a regular file.
    pub fn add_file(
        &self,
        target: &str,
        data: impl Into<Vec<u8>>,
        overwrite: bool,
    ) -> Result<EditResult> {
        self.upsert(target, Payload::regular(data), overwrite)
    }

    /// Adds or replaces a symbolic link at `target` pointing to `link_target`.
    pub fn add_symlink(
        &self,
        target: &str,
        link_target: impl Into<String>,
        overwrite: bool,
    ) -> Result<EditResult> {
        self.upsert(target, Payload::symlink(link_target), overwrite)
    }

    /// Reads an entry as text.
    pub fn read_text(&self, target: &str) -> Result<String> {
        Archive::open_path(&self.path)?.read_text(target)
    }

    /// Rewrites a text entry through `edit`.
    ///
    /// `edit` receives the current content and returns the replacement, or
    /// `None` to cancel. The replacement is written with overwrite enabled.
    ///
    /// # Errors
    ///
    /// - [`Error::EntryNotFound`] / [`Error::NotText`] from reading the entry
    /// - [`Error::EditCancelled`] if `edit` returns `None`
    /// - any error returned by `edit` itself
    pub fn edit_text<F>(&self, target: &str, edit: F) -> Result<EditResult>
    where
        F: FnOnce(&str) -> Result<Option<String>>,
    {
        let current = self.read_text(target)?;
        let updated = edit(&current)?.ok_or(Error::EditCancelled { status: None })?;
        self.upsert(target, Payload::regular(updated), true)
    }

    /// Applies a single request as an atomic transaction.
    pub fn apply(&self, op: &Upsert) -> Result<EditResult> {
        self.apply_to(op, &self.path)
    }

    /// Applies a single request, writing the edited archive to `destination`.
    ///
    /// `destination` is replaced atomically and receives the permission bits
    /// of the source archive. The source is only modified when `destination`
    /// is the source itself. On failure `destination` is left as it was and
    /// the staging file is removed.
    pub fn apply_to(&self, op: &Upsert, destination: &Path) -> Result<EditResult> {
        let mut source = Archive::open_path(&self.path)?;
        let mut staging = StagingFile::beside(destination)?;

        match self.write_staged(&mut source, &mut staging, op) {
            Ok(mut result) => {
                drop(source);
                result.archive_size = staging.commit(destination, &self.path)?;
                log::info!(
                    "{} '{}' in {} ({} kept, {} replaced)",
                    if result.replaced() { "replaced" } else { "added" },
                    result.added_path,
                    destination.display(),
                    result.entries_kept,
                    result.entries_replaced
                );
                Ok(result)
            }
            Err(e) => {
                staging.discard();
                Err(e)
            }
        }
    }

    fn write_staged<R: Read + Seek>(
        &self,
        source: &mut Archive<R>,
        staging: &mut StagingFile,
        op: &Upsert,
    ) -> Result<EditResult> {
        let mut writer = ZipWriter::new(BufWriter::new(staging.as_file_mut()));
        let result = rewrite(source, &mut writer, op, &self.options)?;
        let comment = source.comment().to_vec();
        writer
            .finish(&comment)?
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;
        Ok(result)
    }
}

/// Adds or replaces one entry of the archive at `archive_path`.
///
/// This is the one-call form of [`ArchiveEditor::upsert`] with default
/// [`WriteOptions`].
///
/// # Example
///
/// ```rust,no_run
/// use zipmend::{Payload, edit::upsert_entry};
///
/// let result = upsert_entry("a.zip", "media/link", Payload::symlink("../docs/readme.txt"), false)?;
/// assert_eq!(result.added_path, "media/link");
/// # Ok::<(), zipmend::Error>(())
/// ```
pub fn upsert_entry(
    archive_path: impl AsRef<Path>,
    target: &str,
    payload: Payload,
    overwrite: bool,
) -> Result<EditResult> {
    ArchiveEditor::new(archive_path).upsert(target, payload, overwrite)
}
