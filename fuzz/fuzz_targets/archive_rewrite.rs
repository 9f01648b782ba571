//! Fuzz target for the rewrite engine.
//!
//! Any archive that opens must either rewrite cleanly or fail with an error;
//! a reopened result always ends with the new entry.
//!
//! Run with: cargo +nightly fuzz run archive_rewrite

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use zipmend::{Archive, Payload, Upsert, WriteOptions, ZipWriter, edit::rewrite};

fuzz_target!(|data: &[u8]| {
    let Ok(mut source) = Archive::open(Cursor::new(data)) else {
        return;
    };

    let op = match Upsert::new("fuzz/new.txt", Payload::regular("fuzz"), true) {
        Ok(op) => op,
        Err(_) => return,
    };
    let mut writer = ZipWriter::new(Vec::new());
    if rewrite(&mut source, &mut writer, &op, &WriteOptions::default()).is_err() {
        return;
    }
    let Ok(bytes) = writer.finish(source.comment()) else {
        return;
    };

    // A comment may embed a stray end record signature, so reopening can fail
    // where the source layout happened to validate.
    let Ok(mut output) = Archive::open(Cursor::new(bytes)) else {
        return;
    };
    let last = output.len() - 1;
    assert_eq!(output.entries()[last].path, "fuzz/new.txt");
    assert_eq!(output.read_index(last).expect("new entry must read"), b"fuzz");
});
