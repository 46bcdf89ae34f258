//! Day-of-week conventions.
//!
//! Inside the engine a day of the week is always a `chrono::Weekday`. Two
//! integer encodings exist at the edges and are only ever converted here:
//!
//! - the **wire index** stored on events: Sunday = 0 .. Saturday = 6
//! - the **column index** of the week view: Monday = 0 .. Sunday = 6

use chrono::Weekday;

use crate::error::{Result, ScheduleError};

/// Number of day columns in a week view.
pub const DAYS_PER_WEEK: usize = 7;

/// Wire index (Sunday = 0) of a weekday.
pub fn to_sunday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Weekday for a wire index (Sunday = 0).
///
/// # Errors
/// Returns `ScheduleError::InvalidWeekday` outside `0..=6`.
pub fn from_sunday_index(index: i64) -> Result<Weekday> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        other => Err(ScheduleError::InvalidWeekday(other)),
    }
}

/// Week-view column (Monday = 0) of a weekday.
pub fn column_of(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

/// Weekday shown in a week-view column. Columns wrap modulo 7.
pub fn weekday_of_column(column: usize) -> Weekday {
    const ORDER: [Weekday; DAYS_PER_WEEK] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    ORDER[column % DAYS_PER_WEEK]
}

/// Serde adapter storing a `Weekday` as its wire index (Sunday = 0).
pub mod sunday_index {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(super::to_sunday_index(*weekday))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        super::from_sunday_index(raw).map_err(serde::de::Error::custom)
    }
}
