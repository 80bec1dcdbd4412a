//! The grammar rule table.
//!
//! Each rule is a start-anchored pattern plus a callback mutating the shared
//! [`ParseState`]. The table order matters only as a tie-break: when several
//! rules match prefixes of equal length, the rule listed first wins; a longer
//! match always beats a shorter one. A callback returning `false` aborts the
//! whole parse.
//!
//! Reference: php-src/ext/date/lib/parse_date.re

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::state::{FirstOrLastDay, ParseState, WeekdayBehavior};
use crate::zones;

pub struct GrammarRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub apply: fn(&Captures, &mut ParseState) -> bool,
}

// ── Pattern fragments ────────────────────────────────────────────────────────

const SPACE: &str = "[ \\t]+";
const SPACE_OPT: &str = "[ \\t]*";
const MERIDIAN: &str = "(?:([ap])\\.?m\\.?(?:[ \\t]|$))";
const HOUR24: &str = "(2[0-4]|[01]?[0-9])";
const HOUR24_LZ: &str = "([01][0-9]|2[0-4])";
const HOUR12: &str = "(0?[1-9]|1[0-2])";
const MINUTE: &str = "([0-5]?[0-9])";
const MINUTE_LZ: &str = "([0-5][0-9])";
const SECOND: &str = "(60|[0-5]?[0-9])";
const SECOND_LZ: &str = "(60|[0-5][0-9])";
const FRAC: &str = "(?:\\.([0-9]+))";
const YEAR: &str = "([0-9]{1,4})";
const YEAR2: &str = "([0-9]{2})";
const YEAR4: &str = "([0-9]{4})";
const YEAR4_SIGNED: &str = "([+-]?[0-9]{4})";
const MONTH_NUM: &str = "(1[0-2]|0?[0-9])";
const MONTH_LZ: &str = "(0[0-9]|1[0-2])";
const DAY_NUM: &str = "(?:(3[01]|[0-2]?[0-9])(?:st|nd|rd|th)?)";
const DAY_LZ: &str = "(0[0-9]|[1-2][0-9]|3[01])";
const DAY_OF_YEAR: &str = "(00[1-9]|0[1-9][0-9]|[12][0-9][0-9]|3[0-5][0-9]|36[0-6])";
const WEEK_OF_YEAR: &str = "(0[1-9]|[1-4][0-9]|5[0-3])";

const DAY_FULL: &str = "sunday|monday|tuesday|wednesday|thursday|friday|saturday";
const DAY_ABBR: &str = "sun|mon|tue|wed|thu|fri|sat";
const MONTH_FULL: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";
const MONTH_ABBR: &str = "jan|feb|mar|apr|may|jun|jul|aug|sept?|oct|nov|dec";
const MONTH_ROMAN: &str = "i[vx]|vi{0,3}|xi{0,2}|i{1,3}";
const RELTEXT_NUMBER: &str =
    "first|second|third|fourth|fifth|sixth|seventh|eighth?|ninth|tenth|eleventh|twelfth";
const RELTEXT_TEXT: &str = "next|last|previous|this";

// A 1-6 letter word, optionally parenthesized; resolved against the zone
// table, and unknown abbreviations abort the parse.
const TZ_ABBR: &str = "\\(?([A-Za-z]{1,6})\\)?";

fn day_text() -> String {
    [DAY_FULL, "|", DAY_ABBR, "|weekdays?"].concat()
}

fn month_text() -> String {
    ["(", MONTH_FULL, "|", MONTH_ABBR, "|", MONTH_ROMAN, ")"].concat()
}

fn reltext_unit() -> String {
    let day_text = day_text();
    [
        "(?:second|sec|minute|min|hour|day|fortnight|forthnight|month|year)s?|weeks|",
        day_text.as_str(),
    ]
    .concat()
}

// One capture group spanning the whole correction.
fn tz_correction() -> String {
    "((?:GMT)?[+-](?:2[0-4]|[01]?[0-9]):?(?:[0-5]?[0-9])?)".to_string()
}

// Month-plus-day with no year ("Jan 15th, "), as used by the composite
// date-with-time rules.
fn date_no_year() -> String {
    let month_text = month_text();
    [month_text.as_str(), "[ .\\t-]*", DAY_NUM, "[,.stndrh\\t ]*"].concat()
}

// ── Lookup helpers ───────────────────────────────────────────────────────────

fn group<'t>(caps: &'t Captures, i: usize) -> Option<&'t str> {
    caps.get(i).map(|m| m.as_str())
}

fn int(caps: &Captures, i: usize) -> i64 {
    group(caps, i)
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(0)
}

/// 1-based month number for a name: full, abbreviated or Roman numeral.
fn lookup_month(name: &str) -> Option<i64> {
    let n = match name.to_ascii_lowercase().as_str() {
        "january" | "jan" | "i" => 1,
        "february" | "feb" | "ii" => 2,
        "march" | "mar" | "iii" => 3,
        "april" | "apr" | "iv" => 4,
        "may" | "v" => 5,
        "june" | "jun" | "vi" => 6,
        "july" | "jul" | "vii" => 7,
        "august" | "aug" | "viii" => 8,
        "september" | "sep" | "sept" | "ix" => 9,
        "october" | "oct" | "x" => 10,
        "november" | "nov" | "xi" => 11,
        "december" | "dec" | "xii" => 12,
        _ => return None,
    };
    Some(n)
}

/// Day-of-week number, 0 = Sunday.
fn lookup_weekday(name: &str) -> Option<i64> {
    let n = match name.to_ascii_lowercase().as_str() {
        "sunday" | "sun" => 0,
        "monday" | "mon" => 1,
        "tuesday" | "tue" => 2,
        "wednesday" | "wed" => 3,
        "thursday" | "thu" => 4,
        "friday" | "fri" => 5,
        "saturday" | "sat" => 6,
        _ => return None,
    };
    Some(n)
}

/// Amount and same-day flag for a relative word. "this" is the only word that
/// lets the reference day itself satisfy a weekday target.
fn lookup_relative(word: &str) -> (i64, bool) {
    match word.to_ascii_lowercase().as_str() {
        "last" | "previous" => (-1, false),
        "this" => (0, true),
        "first" | "next" => (1, false),
        "second" => (2, false),
        "third" => (3, false),
        "fourth" => (4, false),
        "fifth" => (5, false),
        "sixth" => (6, false),
        "seventh" => (7, false),
        "eight" | "eighth" => (8, false),
        "ninth" => (9, false),
        "tenth" => (10, false),
        "eleventh" => (11, false),
        "twelfth" => (12, false),
        _ => (0, false),
    }
}

/// Apply a meridiem marker to a 12-hour value.
fn process_meridian(hour: i64, meridian: Option<&str>) -> i64 {
    match meridian.and_then(|m| m.chars().next()).map(|c| c.to_ascii_lowercase()) {
        Some('a') => {
            if hour == 12 {
                0
            } else {
                hour
            }
        }
        Some('p') => {
            if hour == 12 {
                12
            } else {
                hour + 12
            }
        }
        _ => hour,
    }
}

/// Two-digit years pivot at 70: 69 is 2069, 70 is 1970.
fn process_year(text: &str) -> i64 {
    let year: i64 = text.parse().unwrap_or(0);
    if text.len() < 4 && year < 100 {
        year + if year < 70 { 2000 } else { 1900 }
    } else {
        year
    }
}

/// Offset in minutes east of UTC for a `GMT+2`, `+02:00`, `+0200` correction.
fn process_tz_correction(text: &str) -> i64 {
    static LOOSE: Lazy<Regex> =
        Lazy::new(|| Regex::new("(?i)(?:GMT)?([+-])([0-9]+)(:?)([0-9]{0,2})").expect("tz pattern"));
    let Some(caps) = LOOSE.captures(text) else {
        return 0;
    };
    let sign = if &caps[1] == "-" { -1 } else { 1 };
    let digits = &caps[2];
    let value: i64 = digits.parse().unwrap_or(0);
    let (hours, minutes) = if !caps[3].is_empty() {
        (value, caps[4].parse::<i64>().unwrap_or(0))
    } else if digits.len() > 2 {
        (value / 100, value % 100)
    } else {
        (value, 0)
    };
    sign * (hours * 60 + minutes)
}

/// Milliseconds from a fractional-second digit run (first three digits).
fn frac_millis(text: &str) -> i64 {
    let digits: String = text.chars().take(3).collect();
    let value: i64 = digits.parse().unwrap_or(0);
    match digits.len() {
        1 => value * 100,
        2 => value * 10,
        _ => value,
    }
}

/// Shared handler for "<amount> <unit>" phrases, spelled or numeric.
fn apply_relative_unit(st: &mut ParseState, amount: i64, allow_today: bool, unit: &str) -> bool {
    match unit.to_ascii_lowercase().as_str() {
        "sec" | "secs" | "second" | "seconds" => st.rel_second += amount,
        "min" | "mins" | "minute" | "minutes" => st.rel_minute += amount,
        "hour" | "hours" => st.rel_hour += amount,
        "day" | "days" => st.rel_day += amount,
        "fortnight" | "fortnights" | "forthnight" | "forthnights" => st.rel_day += amount * 14,
        "week" | "weeks" => st.rel_day += amount * 7,
        "month" | "months" => st.rel_month += amount,
        "year" | "years" => st.rel_year += amount,
        "weekday" | "weekdays" => {}
        other => match lookup_weekday(other) {
            Some(day) => {
                st.reset_time();
                st.weekday = Some(day);
                st.weekday_behavior = WeekdayBehavior::NextOccurrence { allow_today };
                st.rel_day += (if amount > 0 { amount - 1 } else { amount }) * 7;
            }
            None => return false,
        },
    }
    true
}

// ── The table ────────────────────────────────────────────────────────────────

static RULES: Lazy<Vec<GrammarRule>> = Lazy::new(build_rules);

pub fn table() -> &'static [GrammarRule] {
    &RULES
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("grammar rule pattern")
}

fn build_rules() -> Vec<GrammarRule> {
    let month_text = month_text();
    let day_text = day_text();
    let reltext_unit = reltext_unit();
    let tz_correction = tz_correction();
    let date_no_year = date_no_year();
    vec![
        GrammarRule {
            name: "yesterday",
            pattern: re("(?i)^yesterday"),
            apply: |_, st| {
                st.rel_day -= 1;
                st.reset_time()
            },
        },
        GrammarRule {
            name: "now",
            pattern: re("(?i)^now"),
            apply: |_, _| true,
        },
        GrammarRule {
            name: "noon",
            pattern: re("(?i)^noon"),
            apply: |_, st| st.reset_time() && st.time(12, 0, 0, Some(0)),
        },
        GrammarRule {
            name: "midnight | today",
            pattern: re("(?i)^(midnight|today)"),
            apply: |_, st| st.reset_time(),
        },
        GrammarRule {
            name: "tomorrow",
            pattern: re("(?i)^tomorrow"),
            apply: |_, st| {
                st.rel_day += 1;
                st.reset_time()
            },
        },
        GrammarRule {
            name: "timestamp",
            pattern: re("^@(-?[0-9]+)"),
            apply: |caps, st| {
                st.rel_second += int(caps, 1);
                st.reset_time() && st.ymd(Some(1970), Some(1), Some(1)) && st.zone(0)
            },
        },
        GrammarRule {
            name: "firstdayof | lastdayof",
            pattern: re("(?i)^(first|last) day of"),
            apply: |caps, st| {
                st.first_or_last_day = if caps[1].eq_ignore_ascii_case("first") {
                    FirstOrLastDay::First
                } else {
                    FirstOrLastDay::Last
                };
                true
            },
        },
        GrammarRule {
            name: "backof | frontof",
            pattern: re(&[
                "(?i)^(back|front) of ",
                HOUR24,
                SPACE_OPT,
                MERIDIAN,
                "?",
            ]
            .concat()),
            apply: |caps, st| {
                let back = caps[1].eq_ignore_ascii_case("back");
                let (hour, minute) = if back {
                    (int(caps, 2), 15)
                } else {
                    (int(caps, 2) - 1, 45)
                };
                let hour = process_meridian(hour, group(caps, 3));
                st.reset_time() && st.time(hour, minute, 0, Some(0))
            },
        },
        GrammarRule {
            name: "timetiny12",
            pattern: re(&["(?i)^", HOUR12, SPACE_OPT, MERIDIAN].concat()),
            apply: |caps, st| {
                st.time(process_meridian(int(caps, 1), group(caps, 2)), 0, 0, Some(0))
            },
        },
        GrammarRule {
            name: "timeshort12",
            pattern: re(&["(?i)^", HOUR12, "[:.]", MINUTE_LZ, SPACE_OPT, MERIDIAN].concat()),
            apply: |caps, st| {
                st.time(
                    process_meridian(int(caps, 1), group(caps, 3)),
                    int(caps, 2),
                    0,
                    Some(0),
                )
            },
        },
        GrammarRule {
            name: "timelong12",
            pattern: re(&[
                "(?i)^",
                HOUR12,
                "[:.]",
                MINUTE,
                "[:.]",
                SECOND_LZ,
                SPACE_OPT,
                MERIDIAN,
            ]
            .concat()),
            apply: |caps, st| {
                st.time(
                    process_meridian(int(caps, 1), group(caps, 4)),
                    int(caps, 2),
                    int(caps, 3),
                    Some(0),
                )
            },
        },
        GrammarRule {
            name: "mssqltime",
            pattern: re(&[
                "(?i)^",
                HOUR12,
                ":",
                MINUTE_LZ,
                ":",
                SECOND_LZ,
                "[:.]([0-9]+)",
                MERIDIAN,
                "?",
            ]
            .concat()),
            apply: |caps, st| {
                st.time(
                    process_meridian(int(caps, 1), group(caps, 5)),
                    int(caps, 2),
                    int(caps, 3),
                    Some(frac_millis(group(caps, 4).unwrap_or("0"))),
                )
            },
        },
        GrammarRule {
            name: "oracledate",
            pattern: re("(?i)^([0-9]{2})-([A-Za-z]{3})-([0-9]{2})$"),
            apply: |caps, st| match lookup_month(&caps[2]) {
                Some(month) => st.ymd(Some(2000 + int(caps, 3)), Some(month), Some(int(caps, 1))),
                None => false,
            },
        },
        GrammarRule {
            name: "timeshort24",
            pattern: re(&["(?i)^t?", HOUR24, "[:.]", MINUTE].concat()),
            apply: |caps, st| st.time(int(caps, 1), int(caps, 2), 0, Some(0)),
        },
        GrammarRule {
            name: "timelong24",
            pattern: re(&["(?i)^t?", HOUR24, "[:.]", MINUTE, "[:.]", SECOND].concat()),
            apply: |caps, st| st.time(int(caps, 1), int(caps, 2), int(caps, 3), Some(0)),
        },
        GrammarRule {
            name: "iso8601long",
            pattern: re(&["(?i)^t?", HOUR24, "[:.]", MINUTE, "[:.]", SECOND, FRAC].concat()),
            apply: |caps, st| {
                st.time(
                    int(caps, 1),
                    int(caps, 2),
                    int(caps, 3),
                    Some(frac_millis(group(caps, 4).unwrap_or("0"))),
                )
            },
        },
        GrammarRule {
            // A second bare HHMM after a time was already captured turns into
            // a four-digit year instead.
            name: "gnunocolon",
            pattern: re(&["(?i)^t?", HOUR24_LZ, MINUTE_LZ].concat()),
            apply: |caps, st| match st.times {
                0 => st.time(int(caps, 1), int(caps, 2), 0, None),
                1 => {
                    st.year = Some(int(caps, 1) * 100 + int(caps, 2));
                    st.times += 1;
                    true
                }
                _ => false,
            },
        },
        GrammarRule {
            name: "iso8601nocolon",
            pattern: re(&["(?i)^t?", HOUR24_LZ, MINUTE_LZ, SECOND_LZ].concat()),
            apply: |caps, st| st.time(int(caps, 1), int(caps, 2), int(caps, 3), Some(0)),
        },
        GrammarRule {
            name: "americanshort",
            pattern: re(&["^", MONTH_NUM, "/", DAY_NUM].concat()),
            apply: |caps, st| {
                let year = st.year;
                st.ymd(year, Some(int(caps, 1)), Some(int(caps, 2)))
            },
        },
        GrammarRule {
            name: "american",
            pattern: re(&["^", MONTH_NUM, "/", DAY_NUM, "/", YEAR].concat()),
            apply: |caps, st| {
                st.ymd(
                    Some(process_year(&caps[3])),
                    Some(int(caps, 1)),
                    Some(int(caps, 2)),
                )
            },
        },
        GrammarRule {
            name: "iso8601date4",
            pattern: re(&["^", YEAR4_SIGNED, "-", MONTH_LZ, "-", DAY_LZ].concat()),
            apply: |caps, st| {
                st.ymd(Some(int(caps, 1)), Some(int(caps, 2)), Some(int(caps, 3)))
            },
        },
        GrammarRule {
            // The trailing slash is what keeps this from swallowing dateslash.
            name: "iso8601dateslash",
            pattern: re(&["^", YEAR4, "/", MONTH_LZ, "/", DAY_LZ, "/"].concat()),
            apply: |caps, st| {
                st.ymd(Some(int(caps, 1)), Some(int(caps, 2)), Some(int(caps, 3)))
            },
        },
        GrammarRule {
            name: "dateslash",
            pattern: re(&["^", YEAR4, "/", MONTH_NUM, "/", DAY_NUM].concat()),
            apply: |caps, st| {
                st.ymd(Some(int(caps, 1)), Some(int(caps, 2)), Some(int(caps, 3)))
            },
        },
        GrammarRule {
            name: "gnudateshort | iso8601date2",
            pattern: re(&["(?i)^", YEAR, "-", MONTH_NUM, "-", DAY_NUM].concat()),
            apply: |caps, st| {
                st.ymd(
                    Some(process_year(&caps[1])),
                    Some(int(caps, 2)),
                    Some(int(caps, 3)),
                )
            },
        },
        GrammarRule {
            name: "gnudateshorter",
            pattern: re(&["(?i)^", YEAR4, "-", MONTH_NUM].concat()),
            apply: |caps, st| st.ymd(Some(int(caps, 1)), Some(int(caps, 2)), Some(1)),
        },
        GrammarRule {
            name: "datefull",
            pattern: re(&[
                "(?i)^",
                DAY_NUM,
                "[ \\t.-]*",
                month_text.as_str(),
                "[ \\t.-]*",
                YEAR,
            ]
            .concat()),
            apply: |caps, st| match lookup_month(&caps[2]) {
                Some(month) => st.ymd(
                    Some(process_year(&caps[3])),
                    Some(month),
                    Some(int(caps, 1)),
                ),
                None => false,
            },
        },
        GrammarRule {
            name: "pointeddate4",
            pattern: re(&["^", DAY_NUM, "[.\\t-]", MONTH_NUM, "[.-]", YEAR4].concat()),
            apply: |caps, st| {
                st.ymd(Some(int(caps, 3)), Some(int(caps, 2)), Some(int(caps, 1)))
            },
        },
        GrammarRule {
            name: "pointeddate2",
            pattern: re(&["^", DAY_NUM, "[.\\t]", MONTH_NUM, "\\.", YEAR2].concat()),
            apply: |caps, st| {
                st.ymd(
                    Some(process_year(&caps[3])),
                    Some(int(caps, 2)),
                    Some(int(caps, 1)),
                )
            },
        },
        GrammarRule {
            name: "datenoday",
            pattern: re(&["(?i)^", month_text.as_str(), "[ .\\t-]*", YEAR4].concat()),
            apply: |caps, st| match lookup_month(&caps[1]) {
                Some(month) => st.ymd(Some(int(caps, 2)), Some(month), Some(1)),
                None => false,
            },
        },
        GrammarRule {
            name: "datenodayrev",
            pattern: re(&["(?i)^", YEAR4, "[ .\\t-]*", month_text.as_str()].concat()),
            apply: |caps, st| match lookup_month(&caps[2]) {
                Some(month) => st.ymd(Some(int(caps, 1)), Some(month), Some(1)),
                None => false,
            },
        },
        GrammarRule {
            name: "datetextual",
            pattern: re(&[
                "(?i)^",
                month_text.as_str(),
                "[ .\\t-]*",
                DAY_NUM,
                "[,.stndrh\\t ]+",
                YEAR,
            ]
            .concat()),
            apply: |caps, st| match lookup_month(&caps[1]) {
                Some(month) => st.ymd(
                    Some(process_year(&caps[3])),
                    Some(month),
                    Some(int(caps, 2)),
                ),
                None => false,
            },
        },
        GrammarRule {
            name: "datenoyear",
            pattern: re(&["(?i)^", date_no_year.as_str()].concat()),
            apply: |caps, st| match lookup_month(&caps[1]) {
                Some(month) => {
                    let year = st.year;
                    st.ymd(year, Some(month), Some(int(caps, 2)))
                }
                None => false,
            },
        },
        GrammarRule {
            name: "datenoyearrev",
            pattern: re(&["(?i)^", DAY_NUM, "[ .\\t-]*", month_text.as_str()].concat()),
            apply: |caps, st| match lookup_month(&caps[2]) {
                Some(month) => {
                    let year = st.year;
                    st.ymd(year, Some(month), Some(int(caps, 1)))
                }
                None => false,
            },
        },
        GrammarRule {
            name: "datenocolon",
            pattern: re(&["^", YEAR4, MONTH_LZ, DAY_LZ].concat()),
            apply: |caps, st| {
                st.ymd(Some(int(caps, 1)), Some(int(caps, 2)), Some(int(caps, 3)))
            },
        },
        GrammarRule {
            name: "xmlrpc",
            pattern: re(&[
                "^", YEAR4, MONTH_LZ, DAY_LZ, "T", HOUR24, ":", MINUTE_LZ, ":", SECOND_LZ,
            ]
            .concat()),
            apply: |caps, st| {
                st.ymd(Some(int(caps, 1)), Some(int(caps, 2)), Some(int(caps, 3)))
                    && st.time(int(caps, 4), int(caps, 5), int(caps, 6), Some(0))
            },
        },
        GrammarRule {
            name: "xmlrpcnocolon",
            pattern: re(&[
                "^", YEAR4, MONTH_LZ, DAY_LZ, "[Tt]", HOUR24, MINUTE_LZ, SECOND_LZ,
            ]
            .concat()),
            apply: |caps, st| {
                st.ymd(Some(int(caps, 1)), Some(int(caps, 2)), Some(int(caps, 3)))
                    && st.time(int(caps, 4), int(caps, 5), int(caps, 6), Some(0))
            },
        },
        GrammarRule {
            name: "soap",
            pattern: re(&[
                "(?i)^",
                YEAR4,
                "-",
                MONTH_LZ,
                "-",
                DAY_LZ,
                "T",
                HOUR24_LZ,
                ":",
                MINUTE_LZ,
                ":",
                SECOND_LZ,
                FRAC,
                tz_correction.as_str(),
                "?",
            ]
            .concat()),
            apply: |caps, st| {
                if !(st.ymd(Some(int(caps, 1)), Some(int(caps, 2)), Some(int(caps, 3)))
                    && st.time(
                        int(caps, 4),
                        int(caps, 5),
                        int(caps, 6),
                        Some(frac_millis(group(caps, 7).unwrap_or("0"))),
                    ))
                {
                    return false;
                }
                match group(caps, 8) {
                    Some(tz) => st.zone(process_tz_correction(tz)),
                    None => true,
                }
            },
        },
        GrammarRule {
            name: "wddx",
            pattern: re(&[
                "^", YEAR4, "-", MONTH_NUM, "-", DAY_NUM, "T", HOUR24, ":", MINUTE, ":", SECOND,
            ]
            .concat()),
            apply: |caps, st| {
                st.ymd(Some(int(caps, 1)), Some(int(caps, 2)), Some(int(caps, 3)))
                    && st.time(int(caps, 4), int(caps, 5), int(caps, 6), Some(0))
            },
        },
        GrammarRule {
            name: "exif",
            pattern: re(&[
                "(?i)^", YEAR4, ":", MONTH_LZ, ":", DAY_LZ, " ", HOUR24_LZ, ":", MINUTE_LZ, ":",
                SECOND_LZ,
            ]
            .concat()),
            apply: |caps, st| {
                st.ymd(Some(int(caps, 1)), Some(int(caps, 2)), Some(int(caps, 3)))
                    && st.time(int(caps, 4), int(caps, 5), int(caps, 6), Some(0))
            },
        },
        GrammarRule {
            name: "pgydotd",
            pattern: re(&["(?i)^", YEAR4, "[.-]?", DAY_OF_YEAR].concat()),
            apply: |caps, st| st.ymd(Some(int(caps, 1)), Some(1), Some(int(caps, 2))),
        },
        GrammarRule {
            name: "isoweekday | isoweek",
            pattern: re(&["(?i)^", YEAR4, "-?W", WEEK_OF_YEAR, "(?:-?([0-7]))?"].concat()),
            apply: |caps, st| {
                let year = int(caps, 1);
                let week = int(caps, 2);
                let day = group(caps, 3)
                    .map(|d| d.parse::<i64>().unwrap_or(1))
                    .unwrap_or(1);
                if !st.ymd(Some(year), Some(1), Some(1)) {
                    return false;
                }
                // Offset from Jan 1 to the Sunday before ISO week 1.
                let jan1 = phpdate_rs_core::CivilDateTime::from_raw(year, 1, 1, 0, 0, 0, 0);
                let dow = jan1.day_of_week() as i64;
                let to_week_start = -if dow > 4 { dow - 7 } else { dow };
                st.rel_day += to_week_start + (week - 1) * 7 + day;
                true
            },
        },
        GrammarRule {
            name: "pgtextshort",
            pattern: re(&["(?i)^(", MONTH_ABBR, ")-", DAY_LZ, "-", YEAR].concat()),
            apply: |caps, st| match lookup_month(&caps[1]) {
                Some(month) => st.ymd(
                    Some(process_year(&caps[3])),
                    Some(month),
                    Some(int(caps, 2)),
                ),
                None => false,
            },
        },
        GrammarRule {
            name: "pgtextreverse",
            pattern: re(&[
                "(?i)^([0-9]{3,4}|[4-9][0-9]|3[2-9])-(",
                MONTH_ABBR,
                ")-",
                DAY_LZ,
            ]
            .concat()),
            apply: |caps, st| match lookup_month(&caps[2]) {
                Some(month) => st.ymd(
                    Some(process_year(&caps[1])),
                    Some(month),
                    Some(int(caps, 3)),
                ),
                None => false,
            },
        },
        GrammarRule {
            name: "clf",
            pattern: re(&[
                "(?i)^",
                DAY_NUM,
                "/(",
                MONTH_ABBR,
                ")/",
                YEAR4,
                ":",
                HOUR24_LZ,
                ":",
                MINUTE_LZ,
                ":",
                SECOND_LZ,
                SPACE,
                tz_correction.as_str(),
            ]
            .concat()),
            apply: |caps, st| match lookup_month(&caps[2]) {
                Some(month) => {
                    st.ymd(Some(int(caps, 3)), Some(month), Some(int(caps, 1)))
                        && st.time(int(caps, 4), int(caps, 5), int(caps, 6), Some(0))
                        && st.zone(process_tz_correction(&caps[7]))
                }
                None => false,
            },
        },
        GrammarRule {
            // Lowest-priority absolute form: a bare year keeps the reference
            // month, day and time.
            name: "year4",
            pattern: re(&["^", YEAR4].concat()),
            apply: |caps, st| {
                st.year = Some(int(caps, 1));
                true
            },
        },
        GrammarRule {
            name: "ago",
            pattern: re("(?i)^ago"),
            apply: |_, st| {
                st.negate_relative();
                true
            },
        },
        GrammarRule {
            name: "daytext",
            pattern: re(&["(?i)^(", day_text.as_str(), ")"].concat()),
            apply: |caps, st| {
                st.reset_time();
                st.weekday = Some(lookup_weekday(&caps[1]).unwrap_or(0));
                if st.weekday_behavior != WeekdayBehavior::ThisWeekAnchor {
                    st.weekday_behavior = WeekdayBehavior::NextOccurrence { allow_today: true };
                }
                true
            },
        },
        GrammarRule {
            name: "relativetextweek",
            pattern: re(&["(?i)^(", RELTEXT_TEXT, ")", SPACE, "week"].concat()),
            apply: |caps, st| {
                st.reset_time();
                st.weekday_behavior = WeekdayBehavior::ThisWeekAnchor;
                match caps[1].to_ascii_lowercase().as_str() {
                    "next" => st.rel_day += 7,
                    "last" | "previous" => st.rel_day -= 7,
                    _ => {}
                }
                if st.weekday.is_none() {
                    st.weekday = Some(1);
                }
                true
            },
        },
        GrammarRule {
            name: "relativetext",
            pattern: re(&[
                "(?i)^(",
                RELTEXT_NUMBER,
                "|",
                RELTEXT_TEXT,
                ")",
                SPACE,
                "(",
                reltext_unit.as_str(),
                ")",
            ]
            .concat()),
            apply: |caps, st| {
                let (amount, allow_today) = lookup_relative(&caps[1]);
                apply_relative_unit(st, amount, allow_today, &caps[2])
            },
        },
        GrammarRule {
            name: "monthfull | monthabbr",
            pattern: re(&["(?i)^(", MONTH_FULL, "|", MONTH_ABBR, ")"].concat()),
            apply: |caps, st| match lookup_month(&caps[1]) {
                Some(month) => {
                    let (year, day) = (st.year, st.day);
                    st.ymd(year, Some(month), day)
                }
                None => false,
            },
        },
        GrammarRule {
            name: "tzcorrection",
            pattern: re(&["(?i)^", tz_correction.as_str()].concat()),
            apply: |caps, st| st.zone(process_tz_correction(&caps[1])),
        },
        GrammarRule {
            name: "tzabbr",
            pattern: re(&["^", TZ_ABBR].concat()),
            apply: |caps, st| {
                match zones::abbreviation_offset(&caps[1].to_ascii_lowercase()) {
                    Some(offset) => st.zone(offset),
                    None => false,
                }
            },
        },
        GrammarRule {
            name: "dateshortwithtimeshort12",
            pattern: re(&[
                "(?i)^",
                date_no_year.as_str(),
                HOUR12,
                "[:.]",
                MINUTE_LZ,
                SPACE_OPT,
                MERIDIAN,
            ]
            .concat()),
            apply: |caps, st| match lookup_month(&caps[1]) {
                Some(month) => {
                    let year = st.year;
                    st.ymd(year, Some(month), Some(int(caps, 2)))
                        && st.time(
                            process_meridian(int(caps, 3), group(caps, 5)),
                            int(caps, 4),
                            0,
                            Some(0),
                        )
                }
                None => false,
            },
        },
        GrammarRule {
            name: "dateshortwithtimelong12",
            pattern: re(&[
                "(?i)^",
                date_no_year.as_str(),
                HOUR12,
                "[:.]",
                MINUTE,
                "[:.]",
                SECOND_LZ,
                SPACE_OPT,
                MERIDIAN,
            ]
            .concat()),
            apply: |caps, st| match lookup_month(&caps[1]) {
                Some(month) => {
                    let year = st.year;
                    st.ymd(year, Some(month), Some(int(caps, 2)))
                        && st.time(
                            process_meridian(int(caps, 3), group(caps, 6)),
                            int(caps, 4),
                            int(caps, 5),
                            Some(0),
                        )
                }
                None => false,
            },
        },
        GrammarRule {
            name: "dateshortwithtimeshort",
            pattern: re(&["(?i)^", date_no_year.as_str(), "t?", HOUR24, "[:.]", MINUTE].concat()),
            apply: |caps, st| match lookup_month(&caps[1]) {
                Some(month) => {
                    let year = st.year;
                    st.ymd(year, Some(month), Some(int(caps, 2)))
                        && st.time(int(caps, 3), int(caps, 4), 0, Some(0))
                }
                None => false,
            },
        },
        GrammarRule {
            name: "dateshortwithtimelong",
            pattern: re(&[
                "(?i)^",
                date_no_year.as_str(),
                "t?",
                HOUR24,
                "[:.]",
                MINUTE,
                "[:.]",
                SECOND,
            ]
            .concat()),
            apply: |caps, st| match lookup_month(&caps[1]) {
                Some(month) => {
                    let year = st.year;
                    st.ymd(year, Some(month), Some(int(caps, 2)))
                        && st.time(int(caps, 3), int(caps, 4), int(caps, 5), Some(0))
                }
                None => false,
            },
        },
        GrammarRule {
            name: "relative",
            pattern: re(&[
                "(?i)^([+-]*)[ \\t]*([0-9]+)",
                SPACE_OPT,
                "(",
                reltext_unit.as_str(),
                "|week)",
            ]
            .concat()),
            apply: |caps, st| {
                let minuses = caps[1].matches('-').count();
                let amount = int(caps, 2) * if minuses % 2 == 1 { -1 } else { 1 };
                apply_relative_unit(st, amount, true, &caps[3])
            },
        },
        GrammarRule {
            name: "whitespace",
            pattern: re("^[ .,\\t]+"),
            apply: |_, _| true,
        },
    ]
}
