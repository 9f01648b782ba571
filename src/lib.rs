//! # zipmend
//!
//! Add, replace, inspect and symlink entries inside existing ZIP archives.
//!
//! ZIP archives cannot be edited in place, so every change made by this
//! crate is a staged rewrite: unchanged entries are copied byte-for-byte
//! (headers, compressed data, data descriptors, attributes), the new entry
//! is appended, and the result atomically replaces the original file. The
//! original is never modified if anything goes wrong.
//!
//! ## Quick Start
//!
//! ### Adding or Replacing a File
//!
//! ```rust,no_run
//! use zipmend::{Payload, Result, edit::upsert_entry};
//!
//! fn main() -> Result<()> {
//!     let result = upsert_entry("a.zip", "docs/readme.txt", Payload::regular("Hello"), false)?;
//!     println!("kept {} entries", result.entries_kept);
//!     Ok(())
//! }
//! ```
//!
//! ### Creating a Symbolic Link
//!
//! Symlinks are ordinary entries whose content is the link target and whose
//! external attributes carry a Unix `S_IFLNK` mode:
//!
//! ```rust,no_run
//! use zipmend::{ArchiveEditor, Result};
//!
//! fn main() -> Result<()> {
//!     let editor = ArchiveEditor::new("a.zip");
//!     editor.add_symlink("media/link", "../docs/readme.txt", false)?;
//!
//!     let mut archive = zipmend::Archive::open_path("a.zip")?;
//!     assert!(archive.entry("media/link").unwrap().is_symlink());
//!     assert_eq!(archive.read_text("media/link")?, "../docs/readme.txt");
//!     Ok(())
//! }
//! ```
//!
//! ### Listing and Reading
//!
//! ```rust,no_run
//! use zipmend::{Archive, Result};
//!
//! fn main() -> Result<()> {
//!     let mut archive = Archive::open_path("a.zip")?;
//!     for entry in archive.entries() {
//!         println!("{} ({} bytes)", entry.path, entry.size);
//!     }
//!     println!("{}", archive.read_text("docs/readme.txt")?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`], with errors described by [`Error`]:
//!
//! ```rust
//! use zipmend::{Error, Payload, Result, edit::upsert_entry};
//!
//! fn add_once(path: &str) -> Result<bool> {
//!     match upsert_entry(path, "marker", Payload::regular(""), false) {
//!         Ok(_) => Ok(true),
//!         Err(Error::EntryExists { .. }) => Ok(false),
//!         Err(e) => Err(e),
//!     }
//! }
//! # fn main() {}
//! ```
//!
//! ## Supported Archives
//!
//! Single-disk, non-ZIP64 archives. Entries in any compression method are
//! preserved; stored and deflated (`deflate` feature, on by default) entries
//! can also be read. Encrypted entries are preserved but cannot be read.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod archive_path;
pub mod attributes;
pub mod codec;
pub mod content;
pub mod edit;
pub mod error;
pub mod external_editor;
pub mod format;
pub mod read;
pub mod timestamp;
pub mod write;

pub use archive_path::ArchivePath;
pub use error::{Error, Result};
pub use timestamp::DosDateTime;

pub use read::{Archive, Entry};

pub use write::{WriteOptions, ZipWriter};

pub use edit::{ArchiveEditor, EditResult, Payload, PayloadKind, Upsert, upsert_entry};

pub use content::ContentSource;
pub use external_editor::EditorConfig;
