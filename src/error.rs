//! Error types for ZIP archive editing.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when reading or rewriting ZIP archives, along with a
//! convenient [`Result<T>`] type alias.
//!
//! # Error Handling
//!
//! All fallible operations in this crate return `Result<T, Error>`. The
//! rewrite engine guarantees that the original archive is untouched whenever
//! an error is returned, so callers can report the error and move on.
//!
//! ```rust,no_run
//! use zipmend::{Error, Payload, edit::upsert_entry};
//!
//! fn add_readme(path: &str) -> zipmend::Result<()> {
//!     match upsert_entry(path, "docs/readme.txt", Payload::regular("hello"), false) {
//!         Ok(_) => Ok(()),
//!         Err(Error::EntryExists { path }) => {
//!             eprintln!("{} already exists, pass overwrite to replace it", path);
//!             Ok(())
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use std::io;
use std::path::PathBuf;

/// Helper struct for formatting CrcMismatch error messages.
struct CrcMismatchDisplay<'a> {
    path: &'a str,
    expected: u32,
    actual: u32,
}

impl std::fmt::Display for CrcMismatchDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CRC mismatch for entry '{}': expected {:#010x}, got {:#010x}",
            self.path, self.expected, self.actual
        )
    }
}

/// Helper struct for formatting EditCancelled error messages.
struct EditCancelledDisplay {
    status: Option<i32>,
}

impl std::fmt::Display for EditCancelledDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(code) => write!(f, "Edit cancelled: editor exited with code {}", code),
            None => write!(f, "Edit cancelled"),
        }
    }
}

/// The main error type for archive operations.
///
/// # Error Categories
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | Not found | [`ArchiveNotFound`][Self::ArchiveNotFound], [`EntryNotFound`][Self::EntryNotFound] | Missing archive or entry |
/// | Format | [`InvalidFormat`][Self::InvalidFormat], [`CorruptHeader`][Self::CorruptHeader] | Not a ZIP file, damaged records |
/// | Conflict | [`EntryExists`][Self::EntryExists] | Target present and overwrite not requested |
/// | Decode | [`NotText`][Self::NotText] | Binary entry requested as text |
/// | I/O | [`Io`][Self::Io], [`ContentUnreadable`][Self::ContentUnreadable] | Staging, replace or source failures |
/// | Compatibility | [`UnsupportedMethod`][Self::UnsupportedMethod], [`UnsupportedFeature`][Self::UnsupportedFeature] | ZIP64, encryption, exotic codecs |
/// | Editing | [`EditorUnavailable`][Self::EditorUnavailable], [`EditCancelled`][Self::EditCancelled] | External editor cycle |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred while reading the source or writing the staging archive.
    ///
    /// Check the underlying [`std::io::ErrorKind`] for specific handling:
    ///
    /// ```rust
    /// use zipmend::Error;
    /// use std::io::ErrorKind;
    ///
    /// fn handle_io_error(error: &Error) {
    ///     if let Error::Io(e) = error {
    ///         match e.kind() {
    ///             ErrorKind::PermissionDenied => println!("Access denied"),
    ///             _ => println!("I/O error: {}", e),
    ///         }
    ///     }
    /// }
    /// ```
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive file does not exist.
    #[error("ZIP file '{}' does not exist", path.display())]
    ArchiveNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The input is not a ZIP archive.
    ///
    /// Returned when no end-of-central-directory record can be located.
    #[error("Invalid ZIP format: {0}")]
    InvalidFormat(String),

    /// A ZIP record is damaged or points outside the file.
    #[error("Corrupt header at offset {offset:#x}: {reason}")]
    CorruptHeader {
        /// The byte offset where corruption was detected.
        offset: u64,
        /// A description of the corruption.
        reason: String,
    },

    /// An entry uses a compression method this build cannot decode.
    ///
    /// Only reading is affected: unchanged entries are always copied
    /// verbatim regardless of their method.
    #[error("Unsupported compression method: {method}")]
    UnsupportedMethod {
        /// The raw ZIP method identifier.
        method: u16,
    },

    /// The archive uses a ZIP feature outside the supported subset.
    #[error("Unsupported feature: {feature}")]
    UnsupportedFeature {
        /// The name of the unsupported feature.
        feature: &'static str,
    },

    /// Decompressed data does not match the stored checksum.
    #[error("{}", CrcMismatchDisplay { path, expected: *expected, actual: *actual })]
    CrcMismatch {
        /// The entry path.
        path: String,
        /// The CRC-32 recorded in the central directory.
        expected: u32,
        /// The CRC-32 of the data actually read.
        actual: u32,
    },

    /// The requested entry is not present in the archive.
    #[error("File '{path}' not found in ZIP archive")]
    EntryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The target path already exists and overwrite was not requested.
    #[error("File '{path}' already exists. Use --overwrite to replace it.")]
    EntryExists {
        /// The path that already exists.
        path: String,
    },

    /// The entry content is not valid UTF-8 text.
    #[error("File '{path}' contains binary data and cannot be displayed as text")]
    NotText {
        /// The entry path.
        path: String,
    },

    /// The in-archive path is not usable as an entry name.
    #[error("Invalid archive path: {0}")]
    InvalidArchivePath(String),

    /// A content source file could not be read.
    #[error("Error reading file '{}': {source}", path.display())]
    ContentUnreadable {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The compression level is out of range.
    #[error("invalid compression level {level}: must be 0-9")]
    InvalidCompressionLevel {
        /// The invalid level that was provided.
        level: u32,
    },

    /// None of the configured editor candidates could be found.
    #[error("No suitable text editor found")]
    EditorUnavailable,

    /// The edit cycle was abandoned.
    ///
    /// `status` carries the editor's exit code when the editor process
    /// reported failure; `None` means the caller cancelled.
    #[error("{}", EditCancelledDisplay { status: *status })]
    EditCancelled {
        /// Exit code of the editor process, if any.
        status: Option<i32>,
    },
}

impl Error {
    /// Returns true if the archive or the requested entry does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::ArchiveNotFound { .. } | Error::EntryNotFound { .. }
        )
    }

    /// Returns true if the error is a target-path collision.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::EntryExists { .. })
    }

    /// Returns true if the error indicates damaged or non-ZIP input.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::InvalidFormat(_) | Error::CorruptHeader { .. } | Error::CrcMismatch { .. }
        )
    }

    /// Returns true if the error is caused by a feature this crate does not implement.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedMethod { .. } | Error::UnsupportedFeature { .. }
        )
    }

    /// Returns the in-archive path associated with this error, if any.
    pub fn entry_name(&self) -> Option<&str> {
        match self {
            Error::EntryNotFound { path }
            | Error::EntryExists { path }
            | Error::NotText { path }
            | Error::CrcMismatch { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Creates a [`CorruptHeader`](Error::CorruptHeader) error.
    pub fn corrupt_header(offset: u64, reason: impl Into<String>) -> Self {
        Error::CorruptHeader {
            offset,
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for archive operations.
pub type Result<T> = std::result::Result<T, Error>;
