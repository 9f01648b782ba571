//! Write options for new entries.

use crate::codec::DEFAULT_LEVEL;
use crate::format::CompressionMethod;
use crate::timestamp::DosDateTime;

/// Permission bits given to new regular files.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Permission bits given to new symbolic links.
pub const DEFAULT_SYMLINK_MODE: u32 = 0o755;

/// Options controlling how new entries are encoded.
///
/// Symbolic links are always stored uncompressed; the method and level only
/// apply to regular files.
///
/// # Example
///
/// ```rust
/// use zipmend::format::CompressionMethod;
/// use zipmend::write::WriteOptions;
///
/// let options = WriteOptions::new()
///     .method(CompressionMethod::Stored)
///     .file_mode(0o600);
/// assert_eq!(options.method, CompressionMethod::Stored);
/// ```
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Compression method for regular files.
    pub method: CompressionMethod,
    /// Compression level (0-9).
    pub level: u32,
    /// Permission bits for regular files.
    pub file_mode: u32,
    /// Permission bits for symbolic links.
    pub symlink_mode: u32,
    /// Fixed modification time; `None` stamps entries with the current local time.
    pub modified: Option<DosDateTime>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            method: if cfg!(feature = "deflate") {
                CompressionMethod::Deflate
            } else {
                CompressionMethod::Stored
            },
            level: DEFAULT_LEVEL,
            file_mode: DEFAULT_FILE_MODE,
            symlink_mode: DEFAULT_SYMLINK_MODE,
            modified: None,
        }
    }
}

impl WriteOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression method for regular files.
    pub fn method(mut self, method: CompressionMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the compression level (strict validation).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCompressionLevel`] if level is greater than 9.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zipmend::write::WriteOptions;
    ///
    /// let opts = WriteOptions::new().level(9)?;
    /// assert_eq!(opts.level, 9);
    ///
    /// assert!(WriteOptions::new().level(15).is_err());
    /// # Ok::<(), zipmend::Error>(())
    /// ```
    ///
    /// [`Error::InvalidCompressionLevel`]: crate::Error::InvalidCompressionLevel
    pub fn level(mut self, level: u32) -> crate::Result<Self> {
        if level > 9 {
            return Err(crate::Error::InvalidCompressionLevel { level });
        }
        self.level = level;
        Ok(self)
    }

    /// Sets the permission bits for regular files.
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    /// Sets the permission bits for symbolic links.
    pub fn symlink_mode(mut self, mode: u32) -> Self {
        self.symlink_mode = mode;
        self
    }

    /// Stamps new entries with a fixed time instead of the current time.
    pub fn modified(mut self, modified: DosDateTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Returns the time to record for a new entry.
    pub(crate) fn timestamp(&self) -> DosDateTime {
        self.modified.unwrap_or_else(DosDateTime::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = WriteOptions::default();
        assert_eq!(opts.level, 6);
        assert_eq!(opts.file_mode, 0o644);
        assert_eq!(opts.symlink_mode, 0o755);
        assert!(opts.modified.is_none());
        #[cfg(feature = "deflate")]
        assert_eq!(opts.method, CompressionMethod::Deflate);
    }

    #[test]
    fn test_level_validation() {
        assert_eq!(WriteOptions::new().level(0).unwrap().level, 0);
        match WriteOptions::new().level(10) {
            Err(crate::Error::InvalidCompressionLevel { level }) => assert_eq!(level, 10),
            other => panic!("Expected InvalidCompressionLevel, got {:?}", other),
        }
    }

    #[test]
    fn test_fixed_timestamp() {
        let ts = DosDateTime::from_fields(2001, 2, 3, 4, 5, 6);
        assert_eq!(WriteOptions::new().modified(ts).timestamp(), ts);
    }
}
