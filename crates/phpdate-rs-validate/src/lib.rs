//! Date comparison surface for validation rules.
//!
//! Rules compare two epoch-second integers obtained from either parser. An
//! operand that fails to parse makes the rule inapplicable (`None`) rather
//! than an error; only an unsupported operator fails loudly.

use std::str::FromStr;

use log::debug;
use phpdate_rs_core::DateError;
use phpdate_rs_formatter::DateFormatter;
use phpdate_rs_strtotime::strtotime;

/// Supported comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Eq,
    /// PHP's `===`; coincides with `==` on epoch integers.
    Identical,
    Gt,
    Ge,
}

impl FromStr for CompareOp {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Le),
            "==" => Ok(CompareOp::Eq),
            "===" => Ok(CompareOp::Identical),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Ge),
            other => Err(DateError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// Compare two epoch-second timestamps.
pub fn compare_dates(a: i64, b: i64, op: CompareOp) -> bool {
    match op {
        CompareOp::Lt => a < b,
        CompareOp::Le => a <= b,
        CompareOp::Eq | CompareOp::Identical => a == b,
        CompareOp::Gt => a > b,
        CompareOp::Ge => a >= b,
    }
}

/// Compare a value against a bound. With a format both operands go through
/// the strict format parser; without one both go through `strtotime`.
/// `Ok(None)` means an operand did not parse and the rule is inapplicable.
pub fn compare_with(
    formatter: &DateFormatter,
    value: &str,
    bound: &str,
    format: Option<&str>,
    op: CompareOp,
    now: Option<i64>,
) -> Result<Option<bool>, DateError> {
    let pair = match format {
        Some(format) => {
            let value = formatter.parse_date(value, format)?;
            let bound = formatter.parse_date(bound, format)?;
            match (value, bound) {
                (Some(v), Some(b)) => Some((v.to_epoch_seconds(), b.to_epoch_seconds())),
                _ => None,
            }
        }
        None => match (strtotime(value, now), strtotime(bound, now)) {
            (Some(v), Some(b)) => Some((v, b)),
            _ => None,
        },
    };
    match pair {
        Some((a, b)) => Ok(Some(compare_dates(a, b, op))),
        None => {
            debug!("date comparison inapplicable: {:?} vs {:?}", value, bound);
            Ok(None)
        }
    }
}

/// The `Before` rule: value strictly earlier than the bound.
pub fn before(
    formatter: &DateFormatter,
    value: &str,
    bound: &str,
    format: Option<&str>,
    now: Option<i64>,
) -> Result<Option<bool>, DateError> {
    compare_with(formatter, value, bound, format, CompareOp::Lt, now)
}

/// The `After` rule: value strictly later than the bound.
pub fn after(
    formatter: &DateFormatter,
    value: &str,
    bound: &str,
    format: Option<&str>,
    now: Option<i64>,
) -> Result<Option<bool>, DateError> {
    compare_with(formatter, value, bound, format, CompareOp::Gt, now)
}

/// The `DateFormat` rule: the exact parse-then-re-render round trip.
pub fn date_format(
    formatter: &DateFormatter,
    value: &str,
    format: &str,
) -> Result<bool, DateError> {
    formatter.matches_format(value, format)
}
