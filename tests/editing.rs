//! Integration tests for archive editing operations.
//!
//! These tests verify that the editing API correctly:
//! - Adds entries to existing archives and replaces them on request
//! - Leaves every other entry byte-identical
//! - Refuses conflicting writes without touching the archive
//! - Encodes symbolic links that read back as links
//! - Leaves the original file untouched when anything fails

mod common;

use std::fs;

use zipmend::edit::ArchiveEditor;
use zipmend::{Archive, Error, Payload, PayloadKind, Upsert, upsert_entry};

use common::{
    RawEntry, build_raw_archive, central_record_without_offset, create_archive, entry_names,
    fixed_options, local_record, read_all, write_archive,
};

fn sample_archive() -> Vec<u8> {
    create_archive(&[
        ("docs/readme.txt", b"hello"),
        ("docs/guide.md", b"# Guide\n\nSome text that compresses well well well well.\n"),
        ("media/image.bin", &[0u8, 159, 146, 150, 255, 0, 1]),
    ])
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_conflict_leaves_archive_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), "a.zip", &sample_archive());
    let before = fs::read(&path).unwrap();

    let err = upsert_entry(&path, "docs/readme.txt", Payload::regular("bye"), false).unwrap_err();
    match err {
        Error::EntryExists { path } => assert_eq!(path, "docs/readme.txt"),
        e => panic!("Expected EntryExists, got {:?}", e),
    }

    assert_eq!(fs::read(&path).unwrap(), before);
    let mut archive = Archive::open_path(&path).unwrap();
    assert_eq!(archive.read_text("docs/readme.txt").unwrap(), "hello");
}

#[test]
fn test_overwrite_replaces_and_preserves_others() {
    let dir = tempfile::tempdir().unwrap();
    let original = sample_archive();
    let path = write_archive(dir.path(), "a.zip", &original);

    let result = upsert_entry(&path, "docs/readme.txt", Payload::regular("bye"), true).unwrap();
    assert_eq!(result.entries_kept, 2);
    assert_eq!(result.entries_replaced, 1);
    assert!(result.replaced());
    assert_eq!(result.archive_size, fs::metadata(&path).unwrap().len());

    let mut archive = Archive::open_path(&path).unwrap();
    assert_eq!(archive.read_text("docs/readme.txt").unwrap(), "bye");
    assert_eq!(archive.len(), 3);

    let updated = fs::read(&path).unwrap();
    for name in ["docs/guide.md", "media/image.bin"] {
        assert_eq!(local_record(&updated, name), local_record(&original, name));
        assert_eq!(
            central_record_without_offset(&updated, name),
            central_record_without_offset(&original, name)
        );
    }
}

#[test]
fn test_symlink_on_fresh_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), "a.zip", &sample_archive());

    let result = upsert_entry(&path, "link1", Payload::symlink("/etc/passwd"), false).unwrap();
    assert_eq!(result.kind, PayloadKind::Symlink);
    assert_eq!(result.total_entries(), 4);

    let mut archive = Archive::open_path(&path).unwrap();
    let entry = archive.entry("link1").unwrap();
    assert!(entry.is_symlink());
    assert_eq!(entry.unix_mode(), Some(0o120755));
    assert_eq!(archive.read_text("link1").unwrap(), "/etc/passwd");

    for entry in archive.entries().iter().filter(|e| e.path != "link1") {
        assert!(!entry.is_symlink(), "{} misclassified", entry.path);
    }
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_idempotent_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), "a.zip", &sample_archive());
    let editor = ArchiveEditor::new(&path).with_options(fixed_options());

    editor.add_file("notes.txt", "same", true).unwrap();
    let first = fs::read(&path).unwrap();
    editor.add_file("notes.txt", "same", true).unwrap();

    let names = entry_names(&path);
    assert_eq!(names.iter().filter(|n| *n == "notes.txt").count(), 1);
    assert_eq!(fs::read(&path).unwrap(), first);
}

#[test]
fn test_entry_order_kept_new_entry_last() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), "a.zip", &sample_archive());

    upsert_entry(&path, "docs/guide.md", Payload::regular("v2"), true).unwrap();
    assert_eq!(
        entry_names(&path),
        ["docs/readme.txt", "media/image.bin", "docs/guide.md"]
    );
}

#[test]
fn test_backslash_target_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), "a.zip", &sample_archive());

    let err = upsert_entry(&path, r"docs\readme.txt", Payload::regular("x"), false).unwrap_err();
    assert!(err.is_conflict());

    let result = upsert_entry(&path, r"config\settings.json", Payload::regular("{}"), false)
        .unwrap();
    assert_eq!(result.added_path, "config/settings.json");
    assert!(entry_names(&path).contains(&"config/settings.json".to_string()));
}

#[test]
fn test_duplicates_all_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = build_raw_archive(
        b"",
        &[
            RawEntry::plain("dup.txt", b"first"),
            RawEntry::plain("other.txt", b"other"),
            RawEntry::plain("dup.txt", b"second"),
        ],
        b"",
    );
    let path = write_archive(dir.path(), "dups.zip", &bytes);

    assert!(
        upsert_entry(&path, "dup.txt", Payload::regular("x"), false)
            .unwrap_err()
            .is_conflict()
    );

    let result = upsert_entry(&path, "dup.txt", Payload::regular("third"), true).unwrap();
    assert_eq!(result.entries_replaced, 2);
    assert_eq!(entry_names(&path), ["other.txt", "dup.txt"]);
    assert_eq!(
        read_all(&path),
        [
            ("other.txt".to_string(), b"other".to_vec()),
            ("dup.txt".to_string(), b"third".to_vec())
        ]
    );
}

// ============================================================================
// Preservation of structure the writer never produces itself
// ============================================================================

#[test]
fn test_data_descriptors_survive() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = build_raw_archive(
        b"",
        &[
            RawEntry::with_descriptor("signed.txt", b"with signature", true),
            RawEntry::with_descriptor("bare.txt", b"without signature", false),
            RawEntry::plain("plain.txt", b"no descriptor"),
        ],
        b"",
    );
    let path = write_archive(dir.path(), "dd.zip", &bytes);

    upsert_entry(&path, "new.txt", Payload::regular("added"), false).unwrap();

    let updated = fs::read(&path).unwrap();
    // Entries are copied verbatim and in order, so the original entry area
    // is a prefix of the new file.
    let original_area = Archive::open(std::io::Cursor::new(bytes.clone()))
        .unwrap()
        .directory_offset() as usize;
    assert_eq!(&updated[..original_area], &bytes[..original_area]);

    let contents = read_all(&path);
    assert_eq!(contents[0], ("signed.txt".into(), b"with signature".to_vec()));
    assert_eq!(contents[1], ("bare.txt".into(), b"without signature".to_vec()));
    assert_eq!(contents[2], ("plain.txt".into(), b"no descriptor".to_vec()));
    assert_eq!(contents[3], ("new.txt".into(), b"added".to_vec()));
}

#[test]
fn test_preamble_and_comment_survive() {
    let dir = tempfile::tempdir().unwrap();
    let stub = b"#!/bin/sh\nexec unzip \"$0\"\n";
    let bytes = build_raw_archive(
        stub,
        &[RawEntry::plain("payload.txt", b"data")],
        b"archive comment",
    );
    let path = write_archive(dir.path(), "sfx.zip", &bytes);

    upsert_entry(&path, "payload.txt", Payload::regular("new data"), true).unwrap();

    let updated = fs::read(&path).unwrap();
    assert!(updated.starts_with(stub));

    let mut archive = Archive::open_path(&path).unwrap();
    assert_eq!(archive.comment(), b"archive comment");
    assert_eq!(archive.preamble_len(), stub.len() as u64);
    assert_eq!(archive.read_preamble().unwrap(), stub);
    assert_eq!(archive.read_text("payload.txt").unwrap(), "new data");
}

#[test]
fn test_concatenated_stub_is_preamble() {
    let dir = tempfile::tempdir().unwrap();
    let stub = b"#!/bin/sh\nexec unzip \"$0\"\n";
    let zip = sample_archive();
    let mut bytes = stub.to_vec();
    bytes.extend_from_slice(&zip);
    let path = write_archive(dir.path(), "cat.zip", &bytes);

    let mut archive = Archive::open_path(&path).unwrap();
    assert_eq!(archive.archive_offset(), stub.len() as u64);
    assert_eq!(archive.preamble_len(), stub.len() as u64);
    assert_eq!(archive.read_preamble().unwrap(), stub);
    assert_eq!(archive.read_text("docs/readme.txt").unwrap(), "hello");
    drop(archive);

    upsert_entry(&path, "new.txt", Payload::regular("added"), false).unwrap();

    let updated = fs::read(&path).unwrap();
    assert!(updated.starts_with(stub));
    for name in ["docs/readme.txt", "docs/guide.md", "media/image.bin"] {
        assert_eq!(local_record(&updated, name), local_record(&zip, name));
        assert_eq!(
            central_record_without_offset(&updated, name),
            central_record_without_offset(&zip, name)
        );
    }

    // Offsets are written relative to the start of the file from now on.
    let mut archive = Archive::open_path(&path).unwrap();
    assert_eq!(archive.archive_offset(), 0);
    assert_eq!(archive.entries()[0].header_offset, stub.len() as u64);
    assert_eq!(archive.read_preamble().unwrap(), stub);
    assert_eq!(archive.read_text("new.txt").unwrap(), "added");
    assert_eq!(archive.read("media/image.bin").unwrap(), [0u8, 159, 146, 150, 255, 0, 1]);
}

#[test]
fn test_empty_archive_gains_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), "empty.zip", &create_archive(&[]));

    let result = upsert_entry(&path, "first.txt", Payload::regular("1"), false).unwrap();
    assert_eq!(result.entries_kept, 0);
    assert_eq!(entry_names(&path), ["first.txt"]);
}

// ============================================================================
// Failures and atomicity
// ============================================================================

fn staging_leftovers(dir: &std::path::Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(".zipmend-"))
        .collect()
}

#[test]
fn test_missing_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.zip");

    let err = upsert_entry(&path, "x", Payload::regular("x"), false).unwrap_err();
    assert!(matches!(err, Error::ArchiveNotFound { .. }));
    assert!(!path.exists());
    assert!(staging_leftovers(dir.path()).is_empty());
}

#[test]
fn test_not_a_zip_is_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), "fake.zip", b"this is plain text, not an archive");

    let err = upsert_entry(&path, "x", Payload::regular("x"), true).unwrap_err();
    assert!(err.is_corruption());
    assert_eq!(fs::read(&path).unwrap(), b"this is plain text, not an archive");
}

#[test]
fn test_failed_copy_keeps_original_and_cleans_staging() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = sample_archive();
    // Break the local header signature of the second entry; the central
    // directory still parses, so the failure happens mid-rewrite.
    let offset = common::open(bytes.clone()).entries()[1].header_offset as usize;
    bytes[offset] = b'X';
    let path = write_archive(dir.path(), "broken.zip", &bytes);

    let err = upsert_entry(&path, "new.txt", Payload::regular("x"), false).unwrap_err();
    assert!(err.is_corruption(), "unexpected error {:?}", err);
    assert_eq!(fs::read(&path).unwrap(), bytes);
    assert!(staging_leftovers(dir.path()).is_empty());
}

#[test]
fn test_failed_commit_keeps_destination_and_cleans_staging() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = sample_archive();
    let path = write_archive(dir.path(), "a.zip", &bytes);
    let occupied = dir.path().join("occupied");
    fs::create_dir(&occupied).unwrap();
    fs::write(occupied.join("inside.txt"), b"keep").unwrap();

    let op = Upsert::new("new.txt", Payload::regular("x"), false).unwrap();
    let err = ArchiveEditor::new(&path).apply_to(&op, &occupied).unwrap_err();

    assert!(matches!(err, Error::Io(_)), "unexpected error {:?}", err);
    assert_eq!(fs::read(&path).unwrap(), bytes);
    assert_eq!(fs::read(occupied.join("inside.txt")).unwrap(), b"keep");
    assert!(staging_leftovers(dir.path()).is_empty());
}

#[test]
fn test_apply_to_other_destination() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = sample_archive();
    let path = write_archive(dir.path(), "a.zip", &bytes);
    let out = dir.path().join("b.zip");

    let op = Upsert::new("docs/readme.txt", Payload::regular("changed"), true).unwrap();
    let result = ArchiveEditor::new(&path).apply_to(&op, &out).unwrap();

    assert!(result.replaced());
    assert_eq!(result.archive_size, fs::metadata(&out).unwrap().len());
    assert_eq!(fs::read(&path).unwrap(), bytes);
    let mut archive = Archive::open_path(&out).unwrap();
    assert_eq!(archive.read_text("docs/readme.txt").unwrap(), "changed");
    assert!(staging_leftovers(dir.path()).is_empty());
}

#[test]
fn test_invalid_targets_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), "a.zip", &sample_archive());
    let before = fs::read(&path).unwrap();

    for target in ["", "docs/", "a\0b"] {
        let err = upsert_entry(&path, target, Payload::regular("x"), true).unwrap_err();
        assert!(matches!(err, Error::InvalidArchivePath(_)), "{:?}", target);
    }
    let err = upsert_entry(&path, "link", Payload::symlink(""), true).unwrap_err();
    assert!(matches!(err, Error::InvalidArchivePath(_)));

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[cfg(unix)]
#[test]
fn test_permissions_carried_over() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), "a.zip", &sample_archive());
    fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

    upsert_entry(&path, "new.txt", Payload::regular("x"), false).unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

// ============================================================================
// Text editing
// ============================================================================

#[test]
fn test_edit_text_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), "a.zip", &sample_archive());
    let editor = ArchiveEditor::new(&path);

    let result = editor
        .edit_text("docs/readme.txt", |current| {
            assert_eq!(current, "hello");
            Ok(Some(format!("{} world", current)))
        })
        .unwrap();
    assert!(result.replaced());
    assert_eq!(editor.read_text("docs/readme.txt").unwrap(), "hello world");
}

#[test]
fn test_edit_text_cancel_and_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), "a.zip", &sample_archive());
    let before = fs::read(&path).unwrap();
    let editor = ArchiveEditor::new(&path);

    let err = editor.edit_text("docs/readme.txt", |_| Ok(None)).unwrap_err();
    assert!(matches!(err, Error::EditCancelled { status: None }));

    let err = editor.edit_text("missing.txt", |_| Ok(Some(String::new()))).unwrap_err();
    assert!(matches!(err, Error::EntryNotFound { .. }));

    let err = editor.edit_text("media/image.bin", |_| Ok(Some(String::new()))).unwrap_err();
    assert!(matches!(err, Error::NotText { .. }));

    assert_eq!(fs::read(&path).unwrap(), before);
}
