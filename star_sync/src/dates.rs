//! Calendar dimension helpers.
//!
//! [`build_date_dim`] turns any date-like value into a [`DimDate`] row. The key
//! only depends on the calendar day, so every timestamp within one day maps to
//! the same `dim_date` row no matter which source table produced it.
//!
//! `build_date_dim` is the entry point for callers holding loosely typed
//! values (strings, offset timestamps). The transformers already hold
//! `NaiveDateTime`s, which cannot fail to parse, and call [`dim_date`] and
//! [`date_key_of`] directly.
//!
//! Conventions:
//! - `date_key = year * 10000 + month * 100 + day` (e.g., 2024-03-10 → 20240310)
//! - `quarter = (month - 1) / 3 + 1`
//! - `day_of_week`: Monday = 0 .. Sunday = 6; Saturday and Sunday are weekend days
//!
//! Accepted string forms: `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS[.fff]`,
//! `YYYY-MM-DDTHH:MM:SS[.fff]`, and RFC-3339 with offset (the calendar day in
//! that offset is used).

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::error::SyncError;
use crate::models::target::DimDate;

/// A value that can be reduced to a calendar day.
pub trait CalendarDay {
    /// The calendar day this value falls on.
    fn calendar_day(&self) -> Result<NaiveDate, SyncError>;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> Result<NaiveDate, SyncError> {
        Ok(*self)
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> Result<NaiveDate, SyncError> {
        Ok(self.date())
    }
}

impl CalendarDay for DateTime<Utc> {
    fn calendar_day(&self) -> Result<NaiveDate, SyncError> {
        Ok(self.date_naive())
    }
}

impl CalendarDay for str {
    fn calendar_day(&self) -> Result<NaiveDate, SyncError> {
        parse_calendar_day(self)
    }
}

impl CalendarDay for String {
    fn calendar_day(&self) -> Result<NaiveDate, SyncError> {
        parse_calendar_day(self)
    }
}

fn parse_calendar_day(raw: &str) -> Result<NaiveDate, SyncError> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| SyncError::InvalidDate(raw.to_string()))
}

/// `YYYYMMDD` key of a calendar day.
pub fn date_key(day: NaiveDate) -> i32 {
    day.year() * 10000 + day.month() as i32 * 100 + day.day() as i32
}

/// `YYYYMMDD` key of an optional timestamp (the time of day is ignored).
pub fn date_key_of(ts: Option<NaiveDateTime>) -> Option<i32> {
    ts.map(|t| date_key(t.date()))
}

/// Calendar dimension row for one day.
pub fn dim_date(day: NaiveDate) -> DimDate {
    let day_of_week = day.weekday().num_days_from_monday() as i32;
    DimDate {
        date_key: date_key(day),
        calendar_date: day,
        year: day.year(),
        quarter: (day.month() as i32 - 1) / 3 + 1,
        month: day.month() as i32,
        day_of_month: day.day() as i32,
        day_of_week,
        is_weekend: day_of_week >= 5,
    }
}

/// Build the calendar dimension row for a date-like value; `None` in, `None` out.
///
/// Errors only for a string that is not a recognizable date.
///
/// ```
/// use star_sync::dates::build_date_dim;
///
/// let row = build_date_dim(Some("2005-05-28T23:10:00-04:00")).unwrap().unwrap();
/// assert_eq!(row.date_key, 20050528);
/// assert_eq!((row.quarter, row.day_of_week, row.is_weekend), (2, 5, true));
/// assert!(build_date_dim(Some("not a date")).is_err());
/// ```
pub fn build_date_dim<T: CalendarDay + ?Sized>(
    value: Option<&T>,
) -> Result<Option<DimDate>, SyncError> {
    value
        .map(|v| v.calendar_day().map(dim_date))
        .transpose()
}
