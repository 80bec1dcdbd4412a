//! Error type shared by the parsers and the validation surface.
//!
//! Only configuration mistakes are errors. Data-level failures (unparseable
//! input, contradictory input, round-trip mismatches) are reported as `None`
//! so callers can treat them as ordinary validation failures.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The format string contains no recognized tokens. This is a programmer
    /// error in the rule configuration, not bad end-user input.
    #[error("invalid date format definition: {0:?}")]
    InvalidFormat(String),

    /// A comparison operator outside `<`, `<=`, `==`, `===`, `>`, `>=`.
    #[error("unsupported comparison operator: {0:?}")]
    UnsupportedOperator(String),
}
