//! Locale tables for day names, month names, meridiem labels and ordinal
//! suffixes.
//!
//! A `DateSettings` is built once (default English), optionally deserialized
//! from configuration, and injected into the formatter. There is no global
//! mutable locale state.

use serde::{Deserialize, Serialize};

/// Produces the ordinal suffix for a day number ("st", "nd", "rd", "th").
pub type OrdinalFn = fn(i64) -> &'static str;

fn english_ordinal() -> OrdinalFn {
    |n: i64| {
        let n = n.abs();
        match (n % 100 / 10, n % 10) {
            (1, _) => "th",
            (_, 1) => "st",
            (_, 2) => "nd",
            (_, 3) => "rd",
            _ => "th",
        }
    }
}

/// Locale configuration: ordered day and month name tables, meridiem labels
/// and the ordinal-suffix function. Index 0 of `days` is Sunday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateSettings {
    pub days: [String; 7],
    pub days_short: [String; 7],
    pub months: [String; 12],
    pub months_short: [String; 12],
    pub meridiem: [String; 2],
    #[serde(skip_serializing, skip_deserializing, default = "english_ordinal")]
    pub ordinal: OrdinalFn,
}

impl Default for DateSettings {
    fn default() -> Self {
        let s = |v: &str| v.to_string();
        Self {
            days: [
                s("Sunday"),
                s("Monday"),
                s("Tuesday"),
                s("Wednesday"),
                s("Thursday"),
                s("Friday"),
                s("Saturday"),
            ],
            days_short: [
                s("Sun"),
                s("Mon"),
                s("Tue"),
                s("Wed"),
                s("Thu"),
                s("Fri"),
                s("Sat"),
            ],
            months: [
                s("January"),
                s("February"),
                s("March"),
                s("April"),
                s("May"),
                s("June"),
                s("July"),
                s("August"),
                s("September"),
                s("October"),
                s("November"),
                s("December"),
            ],
            months_short: [
                s("Jan"),
                s("Feb"),
                s("Mar"),
                s("Apr"),
                s("May"),
                s("Jun"),
                s("Jul"),
                s("Aug"),
                s("Sep"),
                s("Oct"),
                s("Nov"),
                s("Dec"),
            ],
            meridiem: [s("AM"), s("PM")],
            ordinal: english_ordinal(),
        }
    }
}

impl DateSettings {
    /// 1-based month number for a full or abbreviated name, case-insensitive.
    /// The abbreviation and the full name always agree.
    pub fn month_number(&self, name: &str) -> Option<u32> {
        let find = |table: &[String; 12]| {
            table
                .iter()
                .position(|m| m.eq_ignore_ascii_case(name))
                .map(|i| i as u32 + 1)
        };
        find(&self.months_short).or_else(|| find(&self.months))
    }

    /// Day-of-week number (0 = Sunday) for a full or abbreviated name.
    pub fn weekday_number(&self, name: &str) -> Option<u32> {
        let find = |table: &[String; 7]| {
            table
                .iter()
                .position(|d| d.eq_ignore_ascii_case(name))
                .map(|i| i as u32)
        };
        find(&self.days_short).or_else(|| find(&self.days))
    }

    /// Meridiem label: `pm` selects AM/PM, `lower` asks for the lowercased
    /// variant used by the `a` format token.
    pub fn meridiem_label(&self, pm: bool, lower: bool) -> String {
        let label = &self.meridiem[pm as usize];
        if lower {
            label.to_lowercase()
        } else {
            label.clone()
        }
    }
}
