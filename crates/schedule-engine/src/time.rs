//! Clock-time and calendar-date helpers.
//!
//! Dates are `NaiveDate`: a calendar day with no timezone attached, so
//! `"2026-03-02"` always means March 2nd no matter where the engine runs.
//! Times are `NaiveTime` truncated to minute granularity.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike, Weekday};

use crate::day;
use crate::error::{Result, ScheduleError};

/// Parse a clock time and return minutes since midnight.
///
/// Accepts `HH:MM` and the backend's `HH:MM:SS` (seconds are ignored).
///
/// # Errors
/// Returns `ScheduleError::InvalidTime` for anything else.
pub fn time_to_minutes(time: &str) -> Result<u32> {
    parse_clock_time(time).map(minutes_of)
}

/// Minutes since midnight of an already-parsed time.
pub fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Parse `HH:MM` or `HH:MM:SS` into a `NaiveTime` with seconds dropped.
pub fn parse_clock_time(time: &str) -> Result<NaiveTime> {
    let trimmed = time.trim();
    let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ScheduleError::InvalidTime(time.to_string()))?;
    Ok(truncate_seconds(parsed))
}

/// Format a time as zero-padded `HH:MM`.
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn truncate_seconds(time: NaiveTime) -> NaiveTime {
    // hour/minute come from a valid NaiveTime, so this cannot fail.
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Parse a `YYYY-MM-DD` string as a local calendar date.
///
/// The string is read component by component; no UTC conversion happens, so
/// the result never shifts by a timezone offset.
pub fn parse_local_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(value.to_string()))
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_local_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Pure calendar-day arithmetic. Negative `days` go backwards.
///
/// # Errors
/// Returns `ScheduleError::DateOutOfRange` when the result does not fit in a
/// `NaiveDate`.
pub fn checked_add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days < 0 {
        date.checked_sub_days(step)
    } else {
        date.checked_add_days(step)
    };
    shifted.ok_or(ScheduleError::DateOutOfRange {
        date: format_local_date(date),
        days,
    })
}

/// Like [`checked_add_days`], but clamps to the first or last representable
/// date instead of failing.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    checked_add_days(date, days).unwrap_or(if days < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

/// The Monday of the week containing `date`.
///
/// Sunday belongs to the week that started six days earlier.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let back = match date.weekday() {
        Weekday::Sun => 6,
        other => i64::from(day::to_sunday_index(other)) - 1,
    };
    add_days(date, -back)
}

/// The first date on or after `today` that falls on `weekday`.
///
/// Used to pre-fill a concrete date when editing an event that only has a
/// recurring weekday.
pub fn next_occurrence(weekday: Weekday, today: NaiveDate) -> NaiveDate {
    let target = i64::from(day::to_sunday_index(weekday));
    let current = i64::from(day::to_sunday_index(today.weekday()));
    add_days(today, (target - current + 7) % 7)
}

/// Serde adapter for `HH:MM` times (accepts `HH:MM:SS` on input).
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw).map_err(serde::de::Error::custom)
    }
}

