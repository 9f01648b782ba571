//! Fuzz target for ArchivePath::new with arbitrary string input.
//!
//! Run with: cargo +nightly fuzz run archive_path
//!
//! Properties checked for every accepted path:
//! - No `\` survives normalization
//! - No NUL bytes, no trailing `/`, never empty
//! - Normalizing again is a no-op

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(path_str) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(path) = zipmend::ArchivePath::new(path_str) {
        let normalized = path.as_str();

        assert!(!normalized.is_empty());
        assert!(!normalized.contains('\\'), "separator kept: {:?}", normalized);
        assert!(!normalized.contains('\0'), "NUL byte kept: {:?}", normalized);
        assert!(!normalized.ends_with('/'), "directory accepted: {:?}", normalized);
        assert_eq!(
            zipmend::ArchivePath::new(normalized).expect("normalized path must validate"),
            path
        );
        let _ = path.has_traversal();
        let _ = path.file_name();
    }
});
