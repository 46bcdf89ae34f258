//! The displayed week and the assignment of events to its day columns.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::day::{self, DAYS_PER_WEEK};
use crate::error::{Result, ScheduleError};
use crate::event::ScheduledEvent;
use crate::time;

/// A Monday-to-Sunday window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    /// The week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: time::monday_of(date),
        }
    }

    /// Monday of the week.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Sunday of the week.
    pub fn end(&self) -> NaiveDate {
        time::add_days(self.start, DAYS_PER_WEEK as i64 - 1)
    }

    /// The week before. Stays put at the start of the calendar.
    pub fn previous(&self) -> Self {
        self.offset(-1).unwrap_or(*self)
    }

    /// The week after. Stays put at the end of the calendar.
    pub fn next(&self) -> Self {
        self.offset(1).unwrap_or(*self)
    }

    /// Shift by a whole number of weeks.
    ///
    /// # Errors
    /// Returns `ScheduleError::DateOutOfRange` when the target week lies
    /// outside the dates chrono can represent.
    pub fn offset(&self, weeks: i64) -> Result<Self> {
        let days = weeks
            .checked_mul(DAYS_PER_WEEK as i64)
            .ok_or(ScheduleError::DateOutOfRange {
                date: time::format_local_date(self.start),
                days: weeks.saturating_mul(DAYS_PER_WEEK as i64),
            })?;
        Ok(Self {
            start: time::checked_add_days(self.start, days)?,
        })
    }

    /// Column (Monday = 0) of `date`, or `None` when it is outside the week.
    pub fn column_of(&self, date: NaiveDate) -> Option<usize> {
        let diff = (date - self.start).num_days();
        (0..DAYS_PER_WEEK as i64).contains(&diff).then_some(diff as usize)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.column_of(date).is_some()
    }

    /// Date shown in `column`.
    pub fn date_of(&self, column: usize) -> NaiveDate {
        time::add_days(self.start, (column % DAYS_PER_WEEK) as i64)
    }

    /// The seven dates of the week, Monday first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..DAYS_PER_WEEK).map(|column| self.date_of(column))
    }

    /// Range label such as `"2 Mar - 8 Mar"`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%-d %b"),
            self.end().format("%-d %b")
        )
    }

    /// Column headers such as `"Monday 2 Mar"`.
    pub fn day_headers(&self) -> Vec<DayHeader> {
        self.days()
            .enumerate()
            .map(|(column, date)| DayHeader {
                column,
                date,
                label: date.format("%A %-d %b").to_string(),
            })
            .collect()
    }
}

/// Header of one day column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHeader {
    pub column: usize,
    pub date: NaiveDate,
    pub label: String,
}

/// Events of one week split into seven day columns (Monday = 0).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeekBuckets {
    columns: [Vec<ScheduledEvent>; DAYS_PER_WEEK],
}

impl WeekBuckets {
    /// Events in `column`. Out-of-range columns are empty.
    pub fn get(&self, column: usize) -> &[ScheduledEvent] {
        self.columns.get(column).map_or(&[], Vec::as_slice)
    }

    /// `(column, events)` pairs, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[ScheduledEvent])> {
        self.columns.iter().map(Vec::as_slice).enumerate()
    }

    /// Total number of placed events.
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }
}

/// Column an event occupies in `week`, if it is shown at all.
///
/// Dated events appear only in the week containing their date, in the column
/// of that date (their `weekday` field is not consulted). Recurring events
/// appear every week in the column of their weekday.
pub fn placement_column(event: &ScheduledEvent, week: &WeekWindow) -> Option<usize> {
    match event.date {
        Some(date) => week.column_of(date),
        None => Some(day::column_of(event.weekday)),
    }
}

/// Distribute `events` into the seven day columns of `week`.
///
/// Each event lands in at most one column. Within a column the input order
/// is kept, so callers sort beforehand when they want a stable listing.
pub fn bucketize(events: &[ScheduledEvent], week: &WeekWindow) -> WeekBuckets {
    let mut buckets = WeekBuckets::default();
    for event in events {
        if let Some(column) = placement_column(event, week) {
            buckets.columns[column].push(event.clone());
        }
    }
    buckets
}

/// Whether a dated event's recorded weekday disagrees with its date.
///
/// The backend normalizes this on write, so a mismatch points at hand-edited
/// or stale data.
pub fn has_weekday_mismatch(event: &ScheduledEvent) -> bool {
    event.date.is_some_and(|d| d.weekday() != event.weekday)
}
