//! phpdate-rs - PHP-compatible date/time engine implemented in Rust
//!
//! This is the root integration package that ties together the components of
//! the engine: civil calendar arithmetic and locale tables, the free-form
//! `strtotime()` parser, the format-string formatter/parser pair, and the
//! validation comparison surface.

pub use phpdate_rs_core::{CivilDateTime, DateError, DateSettings};
pub use phpdate_rs_formatter::DateFormatter;
pub use phpdate_rs_strtotime::strtotime;
pub use phpdate_rs_validate::{after, before, compare_dates, compare_with, date_format, CompareOp};
