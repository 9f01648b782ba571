//! External attribute encoding for ZIP entries.
//!
//! ZIP central directory records carry a 32-bit "external attributes" field
//! whose meaning depends on the producing host, recorded in the upper byte of
//! the "version made by" field. Unix producers (host 3) store the POSIX
//! `st_mode` in the upper 16 bits, which is how symbolic links are marked:
//! the entry data holds the link target and the file-type nibble is
//! `S_IFLNK`.
//!
//! Only tools that understand this convention (Info-ZIP `unzip`, Python's
//! `zipfile` with custom extraction, most Unix archivers) materialize real
//! links on extraction; everything else extracts a small text file.
//!
//! # Example
//!
//! ```rust
//! use zipmend::attributes::{HostSystem, encode_symlink_attributes, is_symlink};
//!
//! let attrs = encode_symlink_attributes(0o755);
//! assert_eq!(attrs, 0xA1ED_0000);
//! assert!(is_symlink(attrs, HostSystem::Unix));
//! assert!(!is_symlink(attrs, HostSystem::Dos));
//! ```

/// Bit mask for the file-type portion of a POSIX mode.
pub const S_IFMT: u32 = 0o170000;
/// File type: symbolic link.
pub const S_IFLNK: u32 = 0o120000;
/// File type: regular file.
pub const S_IFREG: u32 = 0o100000;
/// File type: directory.
pub const S_IFDIR: u32 = 0o040000;

/// Permission and special bits (setuid, setgid, sticky, rwx).
const PERMISSION_MASK: u32 = 0o7777;

/// The host system that produced an entry (upper byte of "version made by").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostSystem {
    /// MS-DOS and OS/2 (FAT / VFAT / FAT32).
    Dos,
    /// Unix.
    Unix,
    /// Windows NTFS.
    Ntfs,
    /// Darwin / macOS.
    Osx,
    /// Any other host code.
    Other(u8),
}

impl HostSystem {
    /// Decodes the host from the raw origin tag.
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            0 => HostSystem::Dos,
            3 => HostSystem::Unix,
            10 => HostSystem::Ntfs,
            19 => HostSystem::Osx,
            other => HostSystem::Other(other),
        }
    }

    /// Returns the raw origin tag.
    pub fn tag(self) -> u8 {
        match self {
            HostSystem::Dos => 0,
            HostSystem::Unix => 3,
            HostSystem::Ntfs => 10,
            HostSystem::Osx => 19,
            HostSystem::Other(tag) => tag,
        }
    }

    /// Returns a short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            HostSystem::Dos => "MS-DOS",
            HostSystem::Unix => "Unix",
            HostSystem::Ntfs => "NTFS",
            HostSystem::Osx => "OS X",
            HostSystem::Other(_) => "other",
        }
    }
}

/// Encodes external attributes for a symbolic link with the given permissions.
///
/// The result places `S_IFLNK | (mode & 0o7777)` in the upper 16 bits and
/// leaves the MS-DOS byte clear. Pair it with [`HostSystem::Unix`] as the
/// entry's origin tag.
pub fn encode_symlink_attributes(mode: u32) -> u32 {
    (S_IFLNK | (mode & PERMISSION_MASK)) << 16
}

/// Encodes external attributes for a regular file with the given permissions.
pub fn encode_file_attributes(mode: u32) -> u32 {
    (S_IFREG | (mode & PERMISSION_MASK)) << 16
}

/// Returns true if the attributes mark a symbolic link.
///
/// An entry is a symlink only when it was produced by a Unix host and the
/// file-type bits of the mode in the upper 16 bits equal `S_IFLNK`.
pub fn is_symlink(external_attributes: u32, host: HostSystem) -> bool {
    host == HostSystem::Unix && (external_attributes >> 16) & S_IFMT == S_IFLNK
}

/// Returns the POSIX mode stored by a Unix producer, if any.
///
/// Returns `None` for other hosts or when the upper 16 bits are zero.
pub fn unix_mode(external_attributes: u32, host: HostSystem) -> Option<u32> {
    let mode = external_attributes >> 16;
    (host == HostSystem::Unix && mode != 0).then_some(mode)
}

/// Renders a mode in `ls -l` style, e.g. `lrwxr-xr-x`.
pub fn mode_string(mode: u32) -> String {
    let kind = match mode & S_IFMT {
        S_IFLNK => 'l',
        S_IFDIR => 'd',
        _ => '-',
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}
