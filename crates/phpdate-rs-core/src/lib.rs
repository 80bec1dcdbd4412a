//! Shared foundations for the PHP-compatible date engine.
//!
//! Civil (proleptic Gregorian) calendar arithmetic, locale tables and the
//! common error type used by the strtotime and format-string parsers.
//!
//! Reference: php-src/ext/date/lib/

pub mod civil;
pub mod error;
pub mod settings;

pub use civil::CivilDateTime;
pub use error::DateError;
pub use settings::DateSettings;
