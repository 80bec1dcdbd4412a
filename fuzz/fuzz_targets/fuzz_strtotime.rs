#![no_main]
//! Fuzz target for the free-form date parser.
//!
//! Feeds arbitrary strings to strtotime. The parser must never panic or loop
//! forever — it either resolves a timestamp or returns None.
//!
//! Run: cargo +nightly fuzz run fuzz_strtotime

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = phpdate_rs::strtotime(input, Some(1_705_276_800));
    }
});
