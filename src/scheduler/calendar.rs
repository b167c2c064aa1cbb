//! Calendar-day arithmetic. Everything in the scheduler compares normalized
//! dates, so `NaiveDate` is the working type and times of day never leak in.

use crate::errors::{Error, Result};
use chrono::{Days, Duration, NaiveDate, NaiveDateTime};

/// Truncate a timestamp to its calendar day.
#[inline]
pub fn normalize(at: NaiveDateTime) -> NaiveDate {
    at.date()
}

/// Signed whole days from `a` to `b`.
#[inline]
pub fn day_diff(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// `date` moved by `days` (negative moves earlier).
///
/// Panics when the result leaves chrono's supported range.
#[inline]
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Like [`add_days`], but a result outside chrono's range is a validation error.
pub fn checked_add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    let step = Days::new(days.unsigned_abs());
    let moved = if days < 0 {
        date.checked_sub_days(step)
    } else {
        date.checked_add_days(step)
    };
    moved.ok_or_else(|| {
        Error::validation(format!("Moving {date} by {days} day(s) leaves the calendar."))
    })
}

/// Inclusive day count of `[start, end]`.
#[inline]
pub fn duration(start: NaiveDate, end: NaiveDate) -> i64 {
    day_diff(start, end) + 1
}
