#![no_main]
//! Fuzz target for the format-string parser.
//!
//! Splits the input into a value and a format and runs the strict parse plus
//! the round-trip check. Neither may panic, whatever the format tokens.
//!
//! Run: cargo +nightly fuzz run fuzz_formatter

use libfuzzer_sys::fuzz_target;
use phpdate_rs::DateFormatter;

fuzz_target!(|data: &[u8]| {
    let (value, format) = data.split_at(data.len() / 2);
    if let (Ok(value), Ok(format)) = (std::str::from_utf8(value), std::str::from_utf8(format)) {
        if format.is_empty() {
            return;
        }
        let formatter = DateFormatter::default();
        let _ = formatter.parse_date(value, format);
        let _ = formatter.matches_format(value, format);
    }
});
