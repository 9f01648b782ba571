//! Fuzz target for Archive::open with arbitrary byte input.
//!
//! Exercises end record location, central directory parsing and entry
//! decoding with malformed or adversarial input, looking for panics, hangs
//! or unbounded allocations.
//!
//! Run with: cargo +nightly fuzz run archive_open

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let Ok(mut archive) = zipmend::Archive::open(Cursor::new(data)) else {
        return;
    };

    let count = archive.len();
    for index in 0..count {
        let entry = &archive.entries()[index];
        let _ = entry.is_symlink();
        let _ = entry.modified_time();
        let _ = archive.read_index(index);
    }
    let _ = archive.read_preamble();
});
