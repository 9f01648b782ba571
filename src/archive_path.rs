//! Archive path type with normalization for in-archive entry names.

use crate::{Error, Result};
use std::fmt;

/// Maximum length for archive paths (in bytes).
///
/// The ZIP local and central headers store the name length in a 16-bit field.
const MAX_PATH_LENGTH: usize = u16::MAX as usize;

/// A normalized in-archive path naming a file or symlink entry.
///
/// `ArchivePath` converts every `\` separator into the `/` form used by the
/// ZIP format and rejects names that cannot address a content entry:
/// - Empty names
/// - Names containing NUL bytes
/// - Names longer than 65535 bytes
/// - Names ending in `/` (those are directory markers)
///
/// Absolute names and `..` segments are accepted: archives built to exercise
/// extraction tools legitimately carry them. Use [`is_absolute`] and
/// [`has_traversal`] to detect such names.
///
/// [`is_absolute`]: ArchivePath::is_absolute
/// [`has_traversal`]: ArchivePath::has_traversal
///
/// # Examples
///
/// ```
/// use zipmend::ArchivePath;
///
/// let path = ArchivePath::new(r"docs\readme.txt").unwrap();
/// assert_eq!(path.as_str(), "docs/readme.txt");
///
/// assert!(ArchivePath::new("docs/").is_err());
/// assert!(ArchivePath::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchivePath(String);

impl ArchivePath {
    /// Creates a new `ArchivePath` from a string, normalizing separators.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArchivePath`] if the path:
    /// - Is empty
    /// - Contains NUL bytes
    /// - Exceeds 65535 bytes
    /// - Ends with a separator
    pub fn new(s: &str) -> Result<Self> {
        let normalized = normalize(s);
        Self::validate(&normalized)?;
        Ok(Self(normalized))
    }

    /// Validates a normalized archive path string.
    fn validate(s: &str) -> Result<()> {
        if s.is_empty() {
            return Err(Error::InvalidArchivePath("empty path".into()));
        }

        if s.contains('\0') {
            return Err(Error::InvalidArchivePath("contains NUL byte".into()));
        }

        if s.len() > MAX_PATH_LENGTH {
            return Err(Error::InvalidArchivePath(format!(
                "path exceeds maximum length of {} bytes",
                MAX_PATH_LENGTH
            )));
        }

        if s.ends_with('/') {
            return Err(Error::InvalidArchivePath(format!(
                "'{}' names a directory marker, not a file",
                s
            )));
        }

        Ok(())
    }

    /// Returns the path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the parent directory of this path, if any.
    pub fn parent(&self) -> Option<&str> {
        self.0.rfind('/').map(|idx| &self.0[..idx])
    }

    /// Returns the file name (last segment) of this path.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Returns an iterator over the path components (segments).
    ///
    /// # Examples
    ///
    /// ```
    /// use zipmend::ArchivePath;
    ///
    /// let path = ArchivePath::new("a/b/c.txt").unwrap();
    /// let components: Vec<_> = path.components().collect();
    /// assert_eq!(components, vec!["a", "b", "c.txt"]);
    /// ```
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Returns true if the path starts at the archive root (`/name`).
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Returns true if any segment is `..`.
    ///
    /// Extracting such an entry without sanitization writes outside the
    /// destination directory.
    pub fn has_traversal(&self) -> bool {
        self.components().any(|segment| segment == "..")
    }
}

/// Converts Windows-style separators into the ZIP form.
fn normalize(s: &str) -> String {
    s.replace('\\', "/")
}

impl AsRef<str> for ArchivePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for ArchivePath {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ArchivePath {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}
