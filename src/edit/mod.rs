//! Archive editing: add, replace and symlink entries in existing archives.
//!
//! ZIP archives cannot be patched in place without rewriting the central
//! directory, so every change here is a full, staged rewrite:
//!
//! 1. The source archive is opened and its central directory parsed.
//! 2. A staging file is created beside it.
//! 3. Every entry not named by the request is copied verbatim (no
//!    recompression, every header byte preserved except the relocated local
//!    header offset), together with any preamble and the archive comment.
//! 4. The new entry is appended.
//! 5. The staging file is synced and atomically renamed over the original.
//!
//! Any failure leaves the original archive untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! use zipmend::edit::ArchiveEditor;
//! use zipmend::Error;
//!
//! let editor = ArchiveEditor::new("a.zip");
//!
//! match editor.add_file("docs/readme.txt", "Hello", false) {
//!     Ok(result) => println!("kept {} entries", result.entries_kept),
//!     Err(Error::EntryExists { path }) => println!("{} is already there", path),
//!     Err(e) => return Err(e),
//! }
//!
//! // Replace it with a symbolic link.
//! editor.add_symlink("docs/readme.txt", "../README.md", true)?;
//! # Ok::<(), zipmend::Error>(())
//! ```
//!
//! # Duplicate paths
//!
//! The ZIP format allows several entries with the same name. With
//! `overwrite` set, every entry with the target path is dropped and exactly
//! one new entry is appended; without it, any such entry is a conflict.

mod editor;
mod operation;
pub mod staging;

pub use editor::{ArchiveEditor, EditResult, rewrite, upsert_entry};
pub use operation::{Payload, PayloadKind, Upsert};
