//! Free-form date/time parsing compatible with PHP's `strtotime()`.
//!
//! The parser repeatedly matches the grammar rule table against the remaining
//! input, always taking the longest match (ties go to the rule listed first),
//! and applies the winning rule's callback to a per-call accumulator. When the
//! input is consumed the accumulator is resolved against the reference
//! instant. Any unmatched text, and any rule that rejects, fails the whole
//! parse.
//!
//! The engine works in a fixed UTC frame; captured timezone offsets are
//! applied explicitly at the end.
//!
//! Reference: php-src/ext/date/php_date.c (strtotime)

mod rules;
mod state;
mod zones;

use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, trace};

pub use state::{FirstOrLastDay, ParseState, WeekdayBehavior};
pub use zones::abbreviation_offset;

fn current_epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Parse an English textual datetime description into a Unix timestamp.
///
/// `now` is the reference instant for relative phrases and unset fields; it
/// defaults to the current system time. Returns `None` for empty, unmatched
/// or self-contradicting input.
pub fn strtotime(text: &str, now: Option<i64>) -> Option<i64> {
    let reference = now.unwrap_or_else(current_epoch_seconds);

    if text.trim().is_empty() {
        return None;
    }

    let mut state = ParseState::default();
    let mut rest = text;

    while !rest.is_empty() {
        let mut winner: Option<(&rules::GrammarRule, regex::Captures)> = None;
        let mut winner_len = 0usize;

        for rule in rules::table() {
            if let Some(caps) = rule.pattern.captures(rest) {
                let len = caps.get(0).map(|m| m.len()).unwrap_or(0);
                // Strictly longer only: on equal lengths the earlier rule of
                // the table keeps the win.
                if len > winner_len {
                    winner_len = len;
                    winner = Some((rule, caps));
                }
            }
        }

        let Some((rule, caps)) = winner else {
            debug!("strtotime: no rule matches {:?}", rest);
            return None;
        };

        trace!("strtotime: rule {} consumed {:?}", rule.name, &rest[..winner_len]);
        if !(rule.apply)(&caps, &mut state) {
            debug!("strtotime: rule {} rejected {:?}", rule.name, &rest[..winner_len]);
            return None;
        }
        rest = &rest[winner_len..];
    }

    Some(state.to_epoch_seconds(reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use phpdate_rs_core::CivilDateTime;

    const BASE: i64 = 1_705_276_800; // 2024-01-15 00:00:00 UTC, a Monday

    fn ymd_hms(ts: i64) -> (i64, u32, u32, u32, u32, u32) {
        let c = CivilDateTime::from_epoch_seconds(ts);
        (c.year, c.month, c.day, c.hour, c.minute, c.second)
    }

    fn date_of(text: &str, now: i64) -> (i64, u32, u32, u32, u32, u32) {
        ymd_hms(strtotime(text, Some(now)).expect(text))
    }

    #[test]
    fn test_now_is_identity() {
        assert_eq!(strtotime("now", Some(BASE)), Some(BASE));
        assert_eq!(strtotime("now", Some(1_129_633_200)), Some(1_129_633_200));
    }

    #[test]
    fn test_keyword_instants() {
        assert_eq!(strtotime("tomorrow", Some(BASE)), Some(1_705_363_200));
        assert_eq!(strtotime("yesterday", Some(BASE)), Some(1_705_190_400));
        assert_eq!(strtotime("midnight", Some(BASE + 52_200)), Some(BASE));
        assert_eq!(strtotime("today", Some(BASE + 52_200)), Some(BASE));
        assert_eq!(strtotime("noon", Some(BASE)), Some(BASE + 43_200));
        assert_eq!(strtotime("TOMORROW", Some(BASE)), Some(1_705_363_200));
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert_eq!(strtotime("", Some(BASE)), None);
        assert_eq!(strtotime("   ", Some(BASE)), None);
        assert_eq!(strtotime(" \t\r\n000", Some(BASE)), None);
        assert_eq!(strtotime("not a date", Some(BASE)), None);
        assert_eq!(strtotime("mayy 2 2009", Some(BASE)), None);
    }

    #[test]
    fn test_relative_units() {
        assert_eq!(strtotime("+1 day", Some(BASE)), Some(BASE + 86_400));
        assert_eq!(strtotime("-1 week", Some(BASE)), Some(BASE - 7 * 86_400));
        assert_eq!(strtotime("+5 hours", Some(BASE)), Some(BASE + 5 * 3_600));
        assert_eq!(strtotime("+30 minutes", Some(BASE)), Some(BASE + 1_800));
        assert_eq!(strtotime("+45 seconds", Some(BASE)), Some(BASE + 45));
        assert_eq!(strtotime("+1 fortnight", Some(BASE)), Some(BASE + 14 * 86_400));
        assert_eq!(strtotime("2 weeks ago", Some(BASE)), Some(BASE - 14 * 86_400));
        assert_eq!(strtotime("-5 days", Some(BASE)), Some(BASE - 5 * 86_400));
        assert_eq!(strtotime("+86400 seconds", Some(BASE)), Some(BASE + 86_400));
    }

    #[test]
    fn test_relative_month_and_year_arithmetic() {
        assert_eq!(date_of("+2 months", BASE), (2024, 3, 15, 0, 0, 0));
        assert_eq!(strtotime("-3 years", Some(BASE)), Some(1_610_668_800));
        // Jan 31 + 1 month spills over into March.
        assert_eq!(date_of("+1 month", 1_706_659_200), (2024, 3, 2, 0, 0, 0));
        // Feb 29 + 1 year lands on Mar 1 of the non-leap year.
        assert_eq!(date_of("+1 year", 1_709_164_800), (2025, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_composite_relative_phrase() {
        assert_eq!(
            strtotime("+1 week 2 days 4 hours 2 seconds", Some(1_129_633_200)),
            Some(1_130_425_202)
        );
    }

    #[test]
    fn test_last_month_keeps_time() {
        assert_eq!(strtotime("last month", Some(1_129_633_200)), Some(1_127_041_200));
    }

    #[test]
    fn test_weekday_phrases() {
        // The reference is a Monday; "next monday" never keeps today.
        assert_eq!(strtotime("next monday", Some(BASE)), Some(BASE + 7 * 86_400));
        assert_eq!(strtotime("this monday", Some(BASE)), Some(BASE));
        assert_eq!(strtotime("last friday", Some(BASE)), Some(BASE - 3 * 86_400));
        assert_eq!(strtotime("this wednesday", Some(BASE)), Some(BASE + 2 * 86_400));
        assert_eq!(strtotime("next fri", Some(BASE)), Some(BASE + 4 * 86_400));
        assert_eq!(strtotime("Next Monday", Some(BASE)), Some(BASE + 7 * 86_400));
        // A bare weekday counts today when it matches.
        assert_eq!(strtotime("monday", Some(BASE)), Some(BASE));
        assert_eq!(strtotime("tuesday", Some(BASE)), Some(BASE + 86_400));
    }

    #[test]
    fn test_weekday_phrases_reset_the_time() {
        assert_eq!(strtotime("next monday", Some(BASE + 52_200)), Some(BASE + 7 * 86_400));
        assert_eq!(strtotime("monday", Some(BASE + 1)), Some(BASE));
    }

    #[test]
    fn test_ordinal_weekday_counting() {
        // 2008-12-01 is a Monday. Numeric counts include it, ordinal words
        // start after the first occurrence.
        assert_eq!(date_of("1 Monday December 2008", 0), (2008, 12, 1, 0, 0, 0));
        assert_eq!(date_of("2 Monday December 2008", 0), (2008, 12, 8, 0, 0, 0));
        assert_eq!(date_of("3 Monday December 2008", 0), (2008, 12, 15, 0, 0, 0));
        assert_eq!(date_of("first Monday December 2008", 0), (2008, 12, 8, 0, 0, 0));
        assert_eq!(date_of("second Monday December 2008", 0), (2008, 12, 15, 0, 0, 0));
        assert_eq!(date_of("third Monday December 2008", 0), (2008, 12, 22, 0, 0, 0));
    }

    #[test]
    fn test_this_week_anchoring() {
        // Wednesday reference anchors back to Monday.
        let wednesday = BASE + 2 * 86_400;
        assert_eq!(strtotime("this week", Some(wednesday)), Some(BASE));
        assert_eq!(strtotime("next week", Some(wednesday)), Some(BASE + 7 * 86_400));
        assert_eq!(strtotime("last week", Some(wednesday)), Some(BASE - 7 * 86_400));
        assert_eq!(strtotime("previous week", Some(wednesday)), Some(BASE - 7 * 86_400));
        // A Sunday reference belongs to the week that started six days back.
        let sunday = BASE + 6 * 86_400;
        assert_eq!(strtotime("this week", Some(sunday)), Some(BASE));
        // "sunday this week" from a weekday walks forward to Sunday.
        assert_eq!(strtotime("sunday this week", Some(wednesday)), Some(sunday));
    }

    #[test]
    fn test_first_and_last_day_of() {
        assert_eq!(date_of("first day of next month", BASE), (2024, 2, 1, 0, 0, 0));
        assert_eq!(date_of("last day of this month", BASE), (2024, 1, 31, 0, 0, 0));
        assert_eq!(date_of("first day of last month", BASE), (2023, 12, 1, 0, 0, 0));
        assert_eq!(date_of("last day of next month", BASE), (2024, 2, 29, 0, 0, 0));
    }

    #[test]
    fn test_absolute_date_formats() {
        assert_eq!(strtotime("2024-01-15", Some(0)), Some(BASE));
        assert_eq!(strtotime("2024-01-15 14:30:00", Some(0)), Some(BASE + 52_200));
        assert_eq!(strtotime("2024-01-15T14:30:00Z", Some(0)), Some(BASE + 52_200));
        assert_eq!(strtotime("01/15/2024", Some(0)), Some(BASE));
        assert_eq!(strtotime("15 Jan 2024", Some(0)), Some(BASE));
        assert_eq!(strtotime("Jan 15 2024", Some(0)), Some(BASE));
        assert_eq!(strtotime("January 15, 2024", Some(0)), Some(BASE));
        assert_eq!(strtotime("15-Jan-2024", Some(0)), Some(BASE));
        assert_eq!(strtotime("2024/01/15", Some(0)), Some(BASE));
        assert_eq!(date_of("2-3-2004", 0), (2004, 3, 2, 0, 0, 0));
        assert_eq!(date_of("2.3.2004", 0), (2004, 3, 2, 0, 0, 0));
        assert_eq!(date_of("15.1.2006", 0), (2006, 1, 15, 0, 0, 0));
        assert_eq!(date_of("Jan-15-2006", 0), (2006, 1, 15, 0, 0, 0));
        assert_eq!(date_of("2006-Jan-15", 0), (2006, 1, 15, 0, 0, 0));
        assert_eq!(date_of("2006-06", 0), (2006, 6, 1, 0, 0, 0));
    }

    #[test]
    fn test_epoch_timestamp() {
        assert_eq!(strtotime("@1234567890", Some(BASE)), Some(1_234_567_890));
        assert_eq!(strtotime("@-1000", Some(BASE)), Some(-1000));
        // A trailing zone is accepted but cannot move an @-timestamp.
        assert_eq!(strtotime("@1121373041 CEST", Some(BASE)), Some(1_121_373_041));
    }

    #[test]
    fn test_compact_digit_forms() {
        let at = |text: &str| date_of(text, BASE);
        assert_eq!(at("1530"), (2024, 1, 15, 15, 30, 0));
        assert_eq!(at("t0222"), (2024, 1, 15, 2, 22, 0));
        assert_eq!(at("022233"), (2024, 1, 15, 2, 22, 33));
        assert_eq!(at("202613"), (2024, 1, 15, 20, 26, 13));
        assert_eq!(at("153045"), (2024, 1, 15, 15, 30, 45));
        assert_eq!(at("2026113"), (2026, 4, 23, 0, 0, 0));
        assert_eq!(at("2026-113"), (2026, 4, 23, 0, 0, 0));
        assert_eq!(at("2026.113"), (2026, 4, 23, 0, 0, 0));
        assert_eq!(at("2006167"), (2006, 6, 16, 0, 0, 0));
        assert_eq!(at("20260113"), (2026, 1, 13, 0, 0, 0));
        assert_eq!(at("19970523091528"), (1997, 5, 23, 9, 15, 28));
        assert_eq!(at("20001231185859"), (2000, 12, 31, 18, 58, 59));
        assert_eq!(strtotime("236099", Some(BASE)), None);
        assert_eq!(strtotime("2026000", Some(BASE)), None);
        assert_eq!(strtotime("2026367", Some(BASE)), None);
    }

    #[test]
    fn test_equal_length_tie_prefers_earlier_rule() {
        // "2024" is both a valid bare time (20:24) and a valid year; the time
        // rule sits earlier in the table and must win the equal-length tie.
        assert_eq!(date_of("2024", BASE), (2024, 1, 15, 20, 24, 0));
        // "1986" is not a valid time (86 minutes), so the year rule gets it
        // and the reference time of day survives.
        assert_eq!(date_of("1986", BASE + 52_200), (1986, 1, 15, 14, 30, 0));
    }

    #[test]
    fn test_second_bare_time_becomes_year() {
        // Once a time is set, another bare HHMM run reads as a year.
        assert_eq!(date_of("1530 1745", BASE), (1745, 1, 15, 15, 30, 0));
    }

    #[test]
    fn test_twelve_hour_clock() {
        let at = |text: &str| date_of(text, BASE);
        assert_eq!(at("5 pm"), (2024, 1, 15, 17, 0, 0));
        assert_eq!(at("5:30 pm"), (2024, 1, 15, 17, 30, 0));
        assert_eq!(at("12:15 am"), (2024, 1, 15, 0, 15, 0));
        assert_eq!(at("12:15 pm"), (2024, 1, 15, 12, 15, 0));
        assert_eq!(at("7:30:45 a.m."), (2024, 1, 15, 7, 30, 45));
    }

    #[test]
    fn test_scottish_back_and_front_of() {
        let at = |text: &str| date_of(text, BASE);
        assert_eq!(at("back of 7"), (2024, 1, 15, 7, 15, 0));
        assert_eq!(at("front of 7"), (2024, 1, 15, 6, 45, 0));
        assert_eq!(at("back of 19"), (2024, 1, 15, 19, 15, 0));
        assert_eq!(at("front of 19"), (2024, 1, 15, 18, 45, 0));
        assert_eq!(at("back of 7pm"), (2024, 1, 15, 19, 15, 0));
    }

    #[test]
    fn test_timezone_corrections() {
        assert_eq!(strtotime("2009-05-04 08:30:00+00", Some(0)), Some(1_241_425_800));
        assert_eq!(strtotime("2009-05-04 08:30:00+02:00", Some(0)), Some(1_241_418_600));
        assert_eq!(strtotime("2009-05-04 08:30:00 GMT", Some(0)), Some(1_241_425_800));
        assert_eq!(strtotime("2005-07-14 22:30:41 GMT", Some(0)), Some(1_121_380_241));
        // EST is five hours behind.
        assert_eq!(strtotime("2009-05-04 08:30:00 EST", Some(0)), Some(1_241_425_800 + 5 * 3_600));
    }

    #[test]
    fn test_bogus_timezone_abbreviation_fails() {
        assert_eq!(strtotime("22:49:12 bogusTZ", Some(BASE)), None);
        assert_eq!(strtotime("022233 bogusTZ", Some(BASE)), None);
    }

    #[test]
    fn test_month_only_forms() {
        // Month names keep the reference day, with the time reset.
        let june = 1_150_416_000; // 2006-06-16 00:00:00 UTC
        assert_eq!(date_of("JAN", june + 100), (2006, 1, 16, 0, 0, 0));
        assert_eq!(date_of("January", june + 100), (2006, 1, 16, 0, 0, 0));
        assert_eq!(date_of("March", june), (2006, 3, 16, 0, 0, 0));
        assert_eq!(date_of("June 2005", 0), (2005, 6, 1, 0, 0, 0));
        assert_eq!(date_of("2005 June", 0), (2005, 6, 1, 0, 0, 0));
    }

    #[test]
    fn test_iso_week_dates() {
        assert_eq!(date_of("2026W01", 0), (2025, 12, 29, 0, 0, 0));
        assert_eq!(date_of("2026-W01", 0), (2025, 12, 29, 0, 0, 0));
        assert_eq!(date_of("2027-W01-5", 0), (2027, 1, 8, 0, 0, 0));
        assert_eq!(date_of("2023W011", 0), (2023, 1, 2, 0, 0, 0));
    }

    #[test]
    fn test_composite_short_date_with_time() {
        assert_eq!(date_of("Jan 15 14:30", BASE), (2024, 1, 15, 14, 30, 0));
        assert_eq!(date_of("Dec 24 8:30pm", BASE), (2024, 12, 24, 20, 30, 0));
        assert_eq!(date_of("Jul 1 12:05:45", BASE), (2024, 7, 1, 12, 5, 45));
    }

    #[test]
    fn test_exotic_fixed_formats() {
        // SOAP with fraction and offset.
        assert_eq!(
            strtotime("2009-05-04T08:30:00.75+02:00", Some(0)),
            Some(1_241_418_600)
        );
        // EXIF.
        assert_eq!(date_of("2024:01:15 14:30:00", 0), (2024, 1, 15, 14, 30, 0));
        // XML-RPC.
        assert_eq!(date_of("20240115T14:30:00", 0), (2024, 1, 15, 14, 30, 0));
        assert_eq!(date_of("20240115t143000", 0), (2024, 1, 15, 14, 30, 0));
        // Apache common log format: 13:55:36 at UTC-7 is 20:55:36 UTC.
        assert_eq!(
            strtotime("10/Oct/2000:13:55:36 -0700", Some(0)),
            Some(971_211_336)
        );
        // Oracle date.
        assert_eq!(date_of("15-JAN-24", 0), (2024, 1, 15, 0, 0, 0));
        // MSSQL time with fraction.
        assert_eq!(date_of("10:15:30:500PM", BASE), (2024, 1, 15, 22, 15, 30));
    }

    #[test]
    fn test_signed_count_with_multiple_signs() {
        assert_eq!(strtotime("+-2 days", Some(BASE)), Some(BASE - 2 * 86_400));
        assert_eq!(strtotime("--2 days", Some(BASE)), Some(BASE + 2 * 86_400));
        assert_eq!(strtotime("3 days", Some(BASE)), Some(BASE + 3 * 86_400));
    }

    #[test]
    fn test_double_date_is_contradictory() {
        assert_eq!(strtotime("2024-01-15 2025-02-16", Some(0)), None);
    }

    #[test]
    fn test_double_time_is_contradictory() {
        assert_eq!(strtotime("14:30:00 15:30:00", Some(0)), None);
    }
}
