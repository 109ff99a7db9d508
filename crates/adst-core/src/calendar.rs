//! Calendar conversion -- elapsed-seconds counter to broken-down calendar fields and back.
//!
//! The clock counts seconds since 1970-01-01T00:00:00 in a `u32`, so the supported
//! range is 1970-01-01 through 2106-02-07T06:28:15. All arithmetic uses the
//! proleptic Gregorian calendar.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{AdstError, Result};

pub const SECS_PER_MIN: u32 = 60;
pub const SECS_PER_HOUR: u32 = 3600;
pub const SECS_PER_DAY: u32 = SECS_PER_HOUR * 24;

/// Year of elapsed second zero.
pub const EPOCH_YEAR: u16 = 1970;

/// Last year that is (partially) representable by the `u32` counter.
pub const MAX_YEAR: u16 = 2106;

/// Days in each month for a non-leap year.
const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Full four-digit year from a tm year (offset from 1970).
pub const fn tm_year_to_calendar(tm_year: u8) -> u16 {
    tm_year as u16 + EPOCH_YEAR
}

/// tm year (offset from 1970) from a full year. Saturates at both ends.
pub const fn calendar_year_to_tm(year: u16) -> u8 {
    let offset = year.saturating_sub(EPOCH_YEAR);
    if offset > u8::MAX as u16 {
        u8::MAX
    } else {
        offset as u8
    }
}

/// Years since 2000 from a tm year. Years before 2000 saturate to 0.
pub const fn tm_year_to_y2k(tm_year: u8) -> u8 {
    tm_year.saturating_sub(30)
}

/// tm year from years since 2000.
pub const fn y2k_year_to_tm(y2k_year: u8) -> u8 {
    y2k_year.saturating_add(30)
}

/// Gregorian leap-year rule: divisible by 4, not by 100 unless also by 400.
#[inline]
pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[inline]
pub const fn days_in_year(year: u16) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Number of days in `month` (1-12) of `year`.
///
/// Months outside 1-12 are clamped into range.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    let month = month.clamp(1, 12);
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[usize::from(month - 1)]
    }
}

/// Three-letter English name for a weekday number (0 = Sunday).
pub fn weekday_name(weekday: u8) -> &'static str {
    WEEKDAY_NAMES[usize::from(weekday % 7)]
}

/// A broken-down date and time.
///
/// `weekday` is 0-6 with 0 = Sunday. It is produced by [`break_time`] and
/// [`CalendarRecord::new`]; [`make_time`] ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarRecord {
    /// Full four-digit year.
    pub year: u16,
    /// Month, 1-12.
    pub month: u8,
    /// Day of the month, 1-31.
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Day of the week, 0-6 (Sunday = 0).
    pub weekday: u8,
}

impl CalendarRecord {
    /// Build a validated record and fill in its weekday.
    ///
    /// # Errors
    /// Returns `AdstError::InvalidRecord` if any field is outside its calendar range.
    /// Returns `AdstError::OutOfRange` if the instant is not representable by the
    /// 32-bit elapsed-seconds counter.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(AdstError::InvalidRecord(format!("month {} not in 1..=12", month)));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(AdstError::InvalidRecord(format!(
                "day {} not in {:04}-{:02}",
                day, year, month
            )));
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(AdstError::InvalidRecord(format!(
                "time {:02}:{:02}:{:02} out of range",
                hour, minute, second
            )));
        }

        let record = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday: dotw(year, month, day),
        };

        if year < EPOCH_YEAR || elapsed_seconds(&record) > u64::from(u32::MAX) {
            return Err(AdstError::OutOfRange(format!(
                "{} is outside 1970-01-01T00:00:00..=2106-02-07T06:28:15",
                record
            )));
        }

        Ok(record)
    }

    /// Midnight-based record at a whole hour, with the weekday filled in.
    ///
    /// No validation; used for resolved transition instants.
    pub(crate) fn at_hour(year: u16, month: u8, day: u8, hour: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute: 0,
            second: 0,
            weekday: dotw(year, month, day),
        }
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

impl fmt::Display for CalendarRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl TryFrom<NaiveDateTime> for CalendarRecord {
    type Error = AdstError;

    fn try_from(dt: NaiveDateTime) -> Result<Self> {
        let year = u16::try_from(dt.year())
            .map_err(|_| AdstError::OutOfRange(format!("year {} before 1970", dt.year())))?;
        // chrono stores leap seconds in the nanosecond field; second() stays <= 59.
        CalendarRecord::new(
            year,
            dt.month() as u8,
            dt.day() as u8,
            dt.hour() as u8,
            dt.minute() as u8,
            dt.second() as u8,
        )
    }
}

impl TryFrom<&CalendarRecord> for NaiveDateTime {
    type Error = AdstError;

    fn try_from(record: &CalendarRecord) -> Result<Self> {
        NaiveDate::from_ymd_opt(
            i32::from(record.year),
            u32::from(record.month),
            u32::from(record.day),
        )
        .and_then(|date| {
            date.and_hms_opt(
                u32::from(record.hour),
                u32::from(record.minute),
                u32::from(record.second),
            )
        })
        .ok_or_else(|| AdstError::InvalidRecord(record.to_string()))
    }
}

/// Decompose an elapsed-seconds counter into calendar fields.
pub fn break_time(elapsed: u32) -> CalendarRecord {
    let second = (elapsed % SECS_PER_MIN) as u8;
    let minutes = elapsed / SECS_PER_MIN;
    let minute = (minutes % 60) as u8;
    let hours = minutes / 60;
    let hour = (hours % 24) as u8;
    let mut days = hours / 24;

    // 1970-01-01 was a Thursday.
    let weekday = ((days + 4) % 7) as u8;

    let mut year = EPOCH_YEAR;
    while days >= days_in_year(year) {
        days -= days_in_year(year);
        year += 1;
    }

    let mut month = 1u8;
    while days >= u32::from(days_in_month(year, month)) {
        days -= u32::from(days_in_month(year, month));
        month += 1;
    }

    CalendarRecord {
        year,
        month,
        day: days as u8 + 1,
        hour,
        minute,
        second,
        weekday,
    }
}

/// Elapsed seconds for `record`, without truncation to the counter width.
///
/// Years before 1970 are treated as 1970; month and day are clamped to at least 1.
fn elapsed_seconds(record: &CalendarRecord) -> u64 {
    let year = record.year.max(EPOCH_YEAR);
    let month = record.month.clamp(1, 12);

    let mut days: u64 = (EPOCH_YEAR..year).map(|y| u64::from(days_in_year(y))).sum();
    days += (1..month)
        .map(|m| u64::from(days_in_month(year, m)))
        .sum::<u64>();
    days += u64::from(record.day.saturating_sub(1));

    days * u64::from(SECS_PER_DAY)
        + u64::from(record.hour) * u64::from(SECS_PER_HOUR)
        + u64::from(record.minute) * u64::from(SECS_PER_MIN)
        + u64::from(record.second)
}

/// Inverse of [`break_time`]. The `weekday` field is ignored.
///
/// Records past the end of the counter range saturate to `u32::MAX`.
pub fn make_time(record: &CalendarRecord) -> u32 {
    u32::try_from(elapsed_seconds(record)).unwrap_or(u32::MAX)
}

/// Day of the week (0 = Sunday) for a Gregorian date.
///
/// Agrees with the `weekday` that [`break_time`] reports for the same date.
pub fn dotw(year: u16, month: u8, day: u8) -> u8 {
    const MONTH_KEY: [u32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

    let month = month.clamp(1, 12);
    let mut y = u32::from(year);
    if month < 3 {
        y = y.saturating_sub(1);
    }

    ((y + y / 4 - y / 100 + y / 400 + MONTH_KEY[usize::from(month - 1)] + u32::from(day)) % 7)
        as u8
}
