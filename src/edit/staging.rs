//! Staging files for atomic archive replacement.
//!
//! A [`StagingFile`] lives next to the archive it will replace so the final
//! rename stays on one filesystem. Until [`commit`](StagingFile::commit)
//! succeeds the original archive is never touched, and the staging file is
//! deleted on every exit path (explicitly by [`discard`](StagingFile::discard)
//! or by drop).

use std::fs::{self, File};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::{Error, Result};

/// A scoped temporary file that can atomically replace a target path.
#[derive(Debug)]
pub struct StagingFile {
    file: NamedTempFile,
}

impl StagingFile {
    /// Creates a staging file in the same directory as `target`.
    pub fn beside(target: &Path) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let file = tempfile::Builder::new()
            .prefix(".zipmend-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        log::debug!("staging archive at {}", file.path().display());

        Ok(Self { file })
    }

    /// Returns the staging file's path.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Returns the open staging file for writing.
    pub fn as_file_mut(&mut self) -> &mut File {
        self.file.as_file_mut()
    }

    /// Flushes the staging file to disk and renames it over `target`.
    ///
    /// The permission bits of `permissions_from`, if it exists, are carried
    /// over. Returns the size of the committed file. On failure the staging
    /// file is removed and `target` is left as it was.
    pub fn commit(self, target: &Path, permissions_from: &Path) -> Result<u64> {
        let file = self.file.as_file();
        file.sync_all()?;

        if let Ok(metadata) = fs::metadata(permissions_from) {
            file.set_permissions(metadata.permissions())?;
        }
        let size = file.metadata()?.len();

        self.file.persist(target).map_err(|e| Error::Io(e.error))?;
        log::info!("replaced {} ({} bytes)", target.display(), size);

        Ok(size)
    }

    /// Deletes the staging file, logging any failure to do so.
    pub fn discard(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            log::warn!(
                "failed to remove staging file {}: {}",
                path.display(),
                e
            );
        }
    }
}
