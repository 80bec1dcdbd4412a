//! Accumulator mutated by the grammar rule callbacks.
//!
//! One `ParseState` lives per parse. Rules fill the absolute date and time
//! triples (each settable at most once), pile deltas onto the relative slots,
//! and record weekday / first-or-last-day / timezone adjustments that are
//! resolved against the reference instant at the end.

use log::trace;
use phpdate_rs_core::CivilDateTime;

/// Pending "first day of" / "last day of" adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstOrLastDay {
    #[default]
    None,
    First,
    Last,
}

/// How a captured weekday is resolved against the reference date.
///
/// `NextOccurrence` walks forward (or backward for negative relative days) to
/// the target weekday; `allow_today` controls whether the reference day itself
/// counts as a hit ("this monday" and bare "monday" keep today, "next monday"
/// never does). `ThisWeekAnchor` re-anchors inside the current Monday-based
/// week ("this week", "last week").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekdayBehavior {
    #[default]
    None,
    NextOccurrence {
        allow_today: bool,
    },
    ThisWeekAnchor,
}

#[derive(Debug, Default)]
pub struct ParseState {
    // Absolute fields; `None` means "take it from the reference instant".
    pub(crate) year: Option<i64>,
    pub(crate) month: Option<i64>,
    pub(crate) day: Option<i64>,
    pub(crate) hour: Option<i64>,
    pub(crate) minute: Option<i64>,
    pub(crate) second: Option<i64>,
    pub(crate) millis: Option<i64>,

    // Relative deltas; several rules may contribute.
    pub(crate) rel_year: i64,
    pub(crate) rel_month: i64,
    pub(crate) rel_day: i64,
    pub(crate) rel_hour: i64,
    pub(crate) rel_minute: i64,
    pub(crate) rel_second: i64,
    pub(crate) rel_millis: i64,

    pub(crate) weekday: Option<i64>, // 0 = Sunday
    pub(crate) weekday_behavior: WeekdayBehavior,
    pub(crate) first_or_last_day: FirstOrLastDay,

    pub(crate) zone_offset_minutes: Option<i64>,

    // Assignment counters guarding the set-at-most-once invariants.
    pub(crate) dates: u32,
    pub(crate) times: u32,
    pub(crate) zones: u32,
}

impl ParseState {
    /// Set the date triple. Fails when a date was already captured.
    pub fn ymd(&mut self, year: Option<i64>, month: Option<i64>, day: Option<i64>) -> bool {
        if self.dates > 0 {
            trace!("date already set, rejecting second date");
            return false;
        }
        self.dates += 1;
        self.year = year;
        self.month = month;
        self.day = day;
        true
    }

    /// Set the time triple. Fails when a time was already captured.
    /// `millis: None` leaves the fraction slot untouched.
    pub fn time(&mut self, hour: i64, minute: i64, second: i64, millis: Option<i64>) -> bool {
        if self.times > 0 {
            trace!("time already set, rejecting second time");
            return false;
        }
        self.times += 1;
        self.hour = Some(hour);
        self.minute = Some(minute);
        self.second = Some(second);
        if millis.is_some() {
            self.millis = millis;
        }
        true
    }

    /// Reset the time of day to 00:00:00.000 and allow it to be set again.
    pub fn reset_time(&mut self) -> bool {
        self.hour = Some(0);
        self.minute = Some(0);
        self.second = Some(0);
        self.millis = Some(0);
        self.times = 0;
        true
    }

    /// Record a timezone offset in minutes east of UTC. The first offset wins:
    /// a second assignment is accepted but ignored (`@epoch CEST` keeps the
    /// zone pinned by the epoch rule), a third fails the parse.
    pub fn zone(&mut self, minutes: i64) -> bool {
        match self.zones {
            0 => {
                self.zones = 1;
                self.zone_offset_minutes = Some(minutes);
                true
            }
            1 => {
                self.zones = 2;
                true
            }
            _ => false,
        }
    }

    /// Flip the sign of every relative slot ("ago").
    pub fn negate_relative(&mut self) {
        self.rel_year = -self.rel_year;
        self.rel_month = -self.rel_month;
        self.rel_day = -self.rel_day;
        self.rel_hour = -self.rel_hour;
        self.rel_minute = -self.rel_minute;
        self.rel_second = -self.rel_second;
        self.rel_millis = -self.rel_millis;
    }

    /// Resolve the accumulated state against a reference instant.
    pub fn to_epoch_seconds(mut self, reference: i64) -> i64 {
        let now = CivilDateTime::from_epoch_seconds(reference);

        // A date without a time means midnight, not the reference time.
        if self.dates > 0 && self.times == 0 {
            self.hour = Some(0);
            self.minute = Some(0);
            self.second = Some(0);
            self.millis = Some(0);
        }

        let mut year = self.year.unwrap_or(now.year);
        let mut month = self.month.unwrap_or(now.month as i64);
        let mut day = self.day.unwrap_or(now.day as i64);
        let mut hour = self.hour.unwrap_or(now.hour as i64);
        let mut minute = self.minute.unwrap_or(now.minute as i64);
        let mut second = self.second.unwrap_or(now.second as i64);
        let mut millis = self.millis.unwrap_or(now.millis as i64);

        match self.first_or_last_day {
            FirstOrLastDay::First => day = 1,
            FirstOrLastDay::Last => {
                // Day 0 of the following month.
                day = 0;
                month += 1;
            }
            FirstOrLastDay::None => {}
        }

        if let Some(mut target) = self.weekday {
            let current = CivilDateTime::from_raw(year, month, day, hour, minute, second, millis);
            let dow = current.day_of_week() as i64;
            match self.weekday_behavior {
                WeekdayBehavior::ThisWeekAnchor => {
                    // Sunday counts as the end of the week here, so a Sunday
                    // reference anchors backward and a Sunday target forward.
                    if dow == 0 && target != 0 {
                        target = -6;
                    }
                    if target == 0 && dow != 0 {
                        target = 7;
                    }
                    day -= dow;
                    day += target;
                }
                _ => {
                    let allow_today = matches!(
                        self.weekday_behavior,
                        WeekdayBehavior::NextOccurrence { allow_today: true }
                    );
                    let mut diff = target - dow;
                    if (self.rel_day < 0 && diff < 0)
                        || (self.rel_day >= 0 && diff <= -(allow_today as i64))
                    {
                        diff += 7;
                    }
                    if target >= 0 {
                        day += diff;
                    } else {
                        day -= 7 - (target.abs() - dow);
                    }
                }
            }
        }

        year += self.rel_year;
        month += self.rel_month;
        day += self.rel_day;
        hour += self.rel_hour;
        minute += self.rel_minute;
        second += self.rel_second;
        millis += self.rel_millis;

        let mut result = CivilDateTime::from_raw(year, month, day, hour, minute, second, millis);

        // Applied a second time on the constructed date: relative months may
        // have moved the month after the first pass.
        match self.first_or_last_day {
            FirstOrLastDay::First => {
                result = CivilDateTime::from_raw(
                    result.year,
                    result.month as i64,
                    1,
                    result.hour as i64,
                    result.minute as i64,
                    result.second as i64,
                    result.millis as i64,
                );
            }
            FirstOrLastDay::Last => {
                result = CivilDateTime::from_raw(
                    result.year,
                    result.month as i64 + 1,
                    0,
                    result.hour as i64,
                    result.minute as i64,
                    result.second as i64,
                    result.millis as i64,
                );
            }
            FirstOrLastDay::None => {}
        }

        let mut epoch_ms = result.to_epoch_millis();
        if let Some(offset) = self.zone_offset_minutes {
            // The parsed wall clock belongs to the captured zone, not the
            // UTC frame the fields were constructed in.
            epoch_ms -= offset * 60_000;
        }
        epoch_ms.div_euclid(1000)
    }
}
