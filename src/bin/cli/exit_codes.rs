//! Exit codes for the CLI tool.

use zipmend::Error;

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Operation failed for a reason not covered below
pub const FATAL_ERROR: i32 = 1;
/// Archive or entry does not exist
pub const NOT_FOUND: i32 = 2;
/// Archive format error or unsupported archive feature
pub const BAD_ARCHIVE: i32 = 3;
/// Target entry already exists
pub const CONFLICT: i32 = 4;
/// I/O error
pub const IO_ERROR: i32 = 5;
/// Entry is not text
pub const NOT_TEXT: i32 = 6;
/// Ctrl+C (128 + SIGINT)
pub const USER_INTERRUPT: i32 = 130;
/// Invalid command line arguments
pub const BAD_ARGS: i32 = 255;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    FatalError,
    NotFound,
    BadArchive,
    Conflict,
    IoError,
    NotText,
    BadArgs,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::FatalError => FATAL_ERROR,
            Self::NotFound => NOT_FOUND,
            Self::BadArchive => BAD_ARCHIVE,
            Self::Conflict => CONFLICT,
            Self::IoError => IO_ERROR,
            Self::NotText => NOT_TEXT,
            Self::BadArgs => BAD_ARGS,
        }
    }
}

/// Converts a zipmend error to an exit code
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    match error {
        Error::Io(_) | Error::ContentUnreadable { .. } => ExitCode::IoError,
        Error::ArchiveNotFound { .. } | Error::EntryNotFound { .. } => ExitCode::NotFound,
        Error::InvalidFormat(_) | Error::CorruptHeader { .. } => ExitCode::BadArchive,
        Error::CrcMismatch { .. } => ExitCode::BadArchive,
        Error::UnsupportedMethod { .. } | Error::UnsupportedFeature { .. } => {
            ExitCode::BadArchive
        }
        Error::EntryExists { .. } => ExitCode::Conflict,
        Error::NotText { .. } => ExitCode::NotText,
        Error::InvalidArchivePath(_) | Error::InvalidCompressionLevel { .. } => ExitCode::BadArgs,
        Error::EditorUnavailable | Error::EditCancelled { .. } => ExitCode::FatalError,
        // Future error variants - required by #[non_exhaustive]
        _ => ExitCode::FatalError,
    }
}
