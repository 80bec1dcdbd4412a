//! PHP format-string driven date parsing and rendering.
//!
//! A [`DateFormatter`] holds a locale table and implements the `date()`-style
//! token set in both directions: `format_date` renders a wall-clock date
//! through a format string, `parse_date` reads a literal string positionally
//! against the same format, and `matches_format` enforces the exact
//! round-trip contract the validation rules rely on.
//!
//! Reference: php-src/ext/date/php_date.c (date, date_create_from_format)

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use phpdate_rs_core::{CivilDateTime, DateError, DateSettings};

/// Characters that separate the positional parts of a literal date string.
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \-+/.T:@]").expect("separator pattern"));

/// Every recognized format token.
const VALID_TOKENS: &str = "dDjlNSwzWFmMntLoYyaABgGhHisueTIOPZcrU";

/// Tokens that render a bare integer and may take an `S` ordinal suffix.
const INT_TOKENS: &str = "djwNzmnyY";

fn current_epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Leading integer of a string, ignoring trailing junk ("15th" reads as 15).
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, rest) = match text.strip_prefix('-') {
        Some(r) => (-1, r),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse::<i64>().ok().map(|v| sign * v)
    }
}

/// Format-string driven date formatter and parser.
#[derive(Debug, Clone, Default)]
pub struct DateFormatter {
    settings: DateSettings,
}

impl DateFormatter {
    /// Build a formatter around an injected locale table.
    pub fn new(settings: DateSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DateSettings {
        &self.settings
    }

    /// Parse a literal string positionally against a format string.
    ///
    /// Empty input is `Ok(None)`. A format with zero recognized tokens is a
    /// configuration error. Out-of-range values, unknown month names and a
    /// second token of an already-filled field are all `Ok(None)`: the input
    /// does not match the format. A date without a time gets midnight; a time
    /// without a date anchors on the fixed zero date so time-only values stay
    /// comparable to each other.
    pub fn parse_date(
        &self,
        input: &str,
        format: &str,
    ) -> Result<Option<CivilDateTime>, DateError> {
        if input.is_empty() {
            return Ok(None);
        }
        if format == "U" {
            return Ok(leading_int(input.trim()).map(CivilDateTime::from_epoch_seconds));
        }

        let tokens: Vec<char> = format
            .chars()
            .filter(|c| VALID_TOKENS.contains(*c))
            .collect();
        if tokens.is_empty() {
            return Err(DateError::InvalidFormat(format.to_string()));
        }
        // Ordinal suffixes attach to the preceding token and consume no input.
        let tokens: Vec<char> = tokens.into_iter().filter(|&c| c != 'S').collect();

        let parts: Vec<&str> = SEPARATORS.split(input).collect();

        let meridiem_index = tokens
            .iter()
            .position(|&c| c == 'a')
            .or_else(|| tokens.iter().position(|&c| c == 'A'));

        let mut year: Option<i64> = None;
        let mut month: Option<i64> = None;
        let mut day: Option<i64> = None;
        let mut hour: Option<i64> = None;
        let mut minute: Option<i64> = None;
        let mut second: Option<i64> = None;
        let mut date_flag = false;
        let mut time_flag = false;

        for (i, part) in parts.iter().enumerate() {
            let Some(&token) = tokens.get(i) else {
                continue;
            };
            let number = leading_int(part);
            match token {
                'y' | 'Y' => {
                    let value = match number {
                        Some(v) if v != 0 => {
                            if part.len() == 2 {
                                v + if v < 70 { 2000 } else { 1900 }
                            } else {
                                v
                            }
                        }
                        _ => return Ok(None),
                    };
                    if year.replace(value).is_some() {
                        return Ok(None);
                    }
                    date_flag = true;
                }
                'm' | 'n' | 'M' | 'F' => {
                    let value = match number {
                        Some(v) => {
                            if (1..=12).contains(&v) {
                                v
                            } else {
                                return Ok(None);
                            }
                        }
                        None => match self.settings.month_number(part) {
                            Some(m) => m as i64,
                            None => return Ok(None),
                        },
                    };
                    if month.replace(value).is_some() {
                        return Ok(None);
                    }
                    date_flag = true;
                }
                'd' | 'j' => {
                    let value = match number {
                        Some(v) if (1..=31).contains(&v) => v,
                        _ => return Ok(None),
                    };
                    if day.replace(value).is_some() {
                        return Ok(None);
                    }
                    date_flag = true;
                }
                'g' | 'h' => {
                    time_flag = true;
                    let Some(v) = number else {
                        continue;
                    };
                    let meridiem_offset = meridiem_index
                        .and_then(|mi| parts.get(mi))
                        .and_then(|mer| {
                            if mer.eq_ignore_ascii_case(&self.settings.meridiem[0]) {
                                Some(0)
                            } else if mer.eq_ignore_ascii_case(&self.settings.meridiem[1]) {
                                Some(12)
                            } else {
                                None
                            }
                        });
                    let value = match meridiem_offset {
                        Some(offset) if (1..=12).contains(&v) => {
                            if v % 12 == 0 {
                                offset
                            } else {
                                v + offset
                            }
                        }
                        _ if (0..=23).contains(&v) => v,
                        _ => continue,
                    };
                    if hour.replace(value).is_some() {
                        return Ok(None);
                    }
                }
                'G' | 'H' => {
                    let value = match number {
                        Some(v) if (0..=23).contains(&v) => v,
                        _ => return Ok(None),
                    };
                    if hour.replace(value).is_some() {
                        return Ok(None);
                    }
                    time_flag = true;
                }
                'i' => {
                    let value = match number {
                        Some(v) if (0..=59).contains(&v) => v,
                        _ => return Ok(None),
                    };
                    if minute.replace(value).is_some() {
                        return Ok(None);
                    }
                    time_flag = true;
                }
                's' => {
                    let value = match number {
                        Some(v) if (0..=59).contains(&v) => v,
                        _ => return Ok(None),
                    };
                    if second.replace(value).is_some() {
                        return Ok(None);
                    }
                    time_flag = true;
                }
                _ => {}
            }
        }

        if date_flag {
            Ok(Some(CivilDateTime::from_raw(
                year.unwrap_or(0),
                month.unwrap_or(1),
                day.unwrap_or(1),
                hour.unwrap_or(0),
                minute.unwrap_or(0),
                second.unwrap_or(0),
                0,
            )))
        } else if time_flag {
            // Fixed zero date for time-only values.
            Ok(Some(CivilDateTime::from_raw(
                0,
                1,
                1,
                hour.unwrap_or(0),
                minute.unwrap_or(0),
                second.unwrap_or(0),
                0,
            )))
        } else {
            Ok(None)
        }
    }

    /// Render a wall-clock date through a format string.
    ///
    /// A backslash escapes the following character; `S` appends the locale's
    /// ordinal suffix to the preceding integer token; unrecognized characters
    /// pass through unchanged.
    pub fn format_date(&self, date: &CivilDateTime, format: &str) -> String {
        let chars: Vec<char> = format.chars().collect();
        let mut out = String::new();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c == '\\' {
                if let Some(&next) = chars.get(i + 1) {
                    out.push(next);
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }
            if c == 'S' {
                i += 1;
                continue;
            }
            let rendered = self.format_token(c, date);
            if INT_TOKENS.contains(c) && chars.get(i + 1) == Some(&'S') {
                if let Ok(n) = rendered.parse::<i64>() {
                    out.push_str(&rendered);
                    out.push_str((self.settings.ordinal)(n));
                    i += 1;
                    continue;
                }
            }
            out.push_str(&rendered);
            i += 1;
        }
        out
    }

    /// The exact round-trip contract: the value must parse under the format
    /// and re-render byte-for-byte identical.
    pub fn matches_format(&self, value: &str, format: &str) -> Result<bool, DateError> {
        match self.parse_date(value, format)? {
            Some(date) => {
                let rendered = self.format_date(&date, format);
                if rendered != value {
                    debug!(
                        "round-trip mismatch: {:?} parsed but re-rendered as {:?}",
                        value, rendered
                    );
                }
                Ok(rendered == value)
            }
            None => Ok(false),
        }
    }

    /// Permissive positional guess for formats leading with a day or month
    /// token. Walks the separator-split parts over a running date (month/day
    /// order follows the format's first token; short year parts merge with
    /// the current century) and carries digit-run remainders into the next
    /// position. Returns `Ok(None)` for non-numeric parts or formats this
    /// heuristic does not apply to.
    pub fn guess_date(
        &self,
        text: &str,
        format: &str,
        now: Option<i64>,
    ) -> Result<Option<CivilDateTime>, DateError> {
        let tokens: Vec<char> = format
            .chars()
            .filter(|c| VALID_TOKENS.contains(*c))
            .collect();
        if tokens.is_empty() {
            return Err(DateError::InvalidFormat(format.to_string()));
        }
        if !matches!(tokens[0], 'd' | 'j' | 'm' | 'n') {
            return Ok(None);
        }
        let month_first = matches!(tokens[0], 'm' | 'n');

        let base = CivilDateTime::from_epoch_seconds(now.unwrap_or_else(current_epoch_seconds));
        let mut fields = [
            base.year,
            base.month as i64,
            base.day as i64,
            base.hour as i64,
            base.minute as i64,
            base.second as i64,
        ];

        let mut parts: Vec<String> = SEPARATORS.split(text).map(|s| s.to_string()).collect();
        let mut i = 0;
        while i < parts.len() {
            let part = parts[i].clone();
            let mut consumed = part.len().min(2);
            let head: String = part.chars().take(2).collect();
            let Some(value) = leading_int(&head) else {
                return Ok(None);
            };
            match i {
                0 => {
                    if month_first {
                        fields[1] = value;
                    } else {
                        fields[2] = value;
                    }
                }
                1 => {
                    if month_first {
                        fields[2] = value;
                    } else {
                        fields[1] = value;
                    }
                }
                2 => {
                    let len = part.len();
                    consumed = len.min(4);
                    let merged: String = if len < 4 {
                        let century: String = fields[0].to_string().chars().take(4 - len).collect();
                        [century, part.clone()].concat()
                    } else {
                        part.chars().take(4).collect()
                    };
                    match leading_int(&merged) {
                        Some(y) if y != 0 => fields[0] = y,
                        _ => return Ok(None),
                    }
                }
                3 => fields[3] = value,
                4 => fields[4] = value,
                5 => fields[5] = value,
                _ => {}
            }
            // Normalize after every assignment, like a running date object.
            let c = CivilDateTime::from_raw(
                fields[0], fields[1], fields[2], fields[3], fields[4], fields[5], 0,
            );
            fields = [
                c.year,
                c.month as i64,
                c.day as i64,
                c.hour as i64,
                c.minute as i64,
                c.second as i64,
            ];
            let rest: String = part.chars().skip(consumed).collect();
            if !rest.is_empty() {
                parts.insert(i + 1, rest);
            }
            i += 1;
        }

        Ok(Some(CivilDateTime::from_raw(
            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5], 0,
        )))
    }

    fn format_token(&self, token: char, d: &CivilDateTime) -> String {
        let s = &self.settings;
        match token {
            // Day family.
            'd' => format!("{:02}", d.day),
            'D' => s.days_short[d.day_of_week() as usize].clone(),
            'j' => d.day.to_string(),
            'l' => s.days[d.day_of_week() as usize].clone(),
            'N' => d.iso_day_of_week().to_string(),
            'w' => d.day_of_week().to_string(),
            'z' => d.day_of_year().to_string(),
            // Week.
            'W' => format!("{:02}", d.iso_week()),
            // Month family.
            'F' => s.months[(d.month - 1) as usize].clone(),
            'm' => format!("{:02}", d.month),
            'M' => s.months_short[(d.month - 1) as usize].clone(),
            'n' => d.month.to_string(),
            't' => d.days_in_month().to_string(),
            // Year family.
            'L' => (d.is_leap_year() as u8).to_string(),
            'o' => d.iso_year().to_string(),
            'Y' => d.year.to_string(),
            'y' => format!("{:02}", d.year.rem_euclid(100)),
            // Time family.
            'a' => s.meridiem_label(d.hour >= 12, true),
            'A' => s.meridiem_label(d.hour >= 12, false),
            'B' => {
                // Swatch internet time runs on UTC+1.
                let beat_seconds =
                    d.hour as i64 * 3600 + d.minute as i64 * 60 + d.second as i64 + 3600;
                format!("{:03}", (beat_seconds * 1000 / 86_400).rem_euclid(1000))
            }
            'g' => {
                let h = d.hour % 12;
                (if h == 0 { 12 } else { h }).to_string()
            }
            'G' => d.hour.to_string(),
            'h' => {
                let h = d.hour % 12;
                format!("{:02}", if h == 0 { 12 } else { h })
            }
            'H' => format!("{:02}", d.hour),
            'i' => format!("{:02}", d.minute),
            's' => format!("{:02}", d.second),
            'u' => format!("{:06}", d.millis as u64 * 1000),
            // Timezone family: the engine's frame is UTC.
            'e' | 'T' => "UTC".to_string(),
            'I' => "0".to_string(),
            'O' => "+0000".to_string(),
            'P' => "+00:00".to_string(),
            'Z' => "0".to_string(),
            // Composites.
            'c' => self.format_date(d, "Y-m-d\\TH:i:sP"),
            'r' => self.format_date(d, "D, d M Y H:i:s O"),
            'U' => d.to_epoch_seconds().to_string(),
            other => other.to_string(),
        }
    }
}
