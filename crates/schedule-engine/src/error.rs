//! Error types for schedule-engine operations.

use thiserror::Error;

/// Errors raised while parsing or validating schedule input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid time: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid weekday index: {0} (expected 0-6, Sunday = 0)")]
    InvalidWeekday(i64),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// The end time is not after the start time.
    #[error("Invalid time range: {start}-{end}")]
    InvalidRange { start: String, end: String },

    /// Calendar arithmetic left chrono's representable date range.
    #[error("Date out of range: {date} shifted by {days} days")]
    DateOutOfRange { date: String, days: i64 },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
