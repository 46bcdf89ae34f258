//! Detect schedule clashes between a candidate slot and existing events.
//!
//! Two slots clash when they fall on the same day and their time ranges
//! overlap. Adjacent slots (one ends exactly when the other starts) are NOT
//! conflicts.

use chrono::{Datelike, Weekday};
use serde::Serialize;
use thiserror::Error;

use crate::event::{Candidate, EventId, ScheduledEvent};
use crate::time;

/// How the weekday of a dated event is read when it is compared against an
/// undated (recurring) one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayMatch {
    /// Compare the recorded `weekday` fields as stored.
    #[default]
    Recorded,
    /// Derive the weekday from the date whenever a date is present.
    Resolved,
}

impl DayMatch {
    fn weekday(self, recorded: Weekday, date: Option<chrono::NaiveDate>) -> Weekday {
        match (self, date) {
            (DayMatch::Resolved, Some(d)) => d.weekday(),
            _ => recorded,
        }
    }
}

/// A rejected slot: it overlaps an event already on the schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("schedule clash with event {conflicting_id} ({existing_start}-{existing_end}), overlapping {overlap_minutes} min")]
pub struct SchedulingConflict {
    pub conflicting_id: EventId,
    pub existing_start: String,
    pub existing_end: String,
    pub overlap_minutes: u32,
}

impl SchedulingConflict {
    fn between(candidate: &Candidate, existing: &ScheduledEvent) -> Self {
        Self {
            conflicting_id: existing.id,
            existing_start: time::format_clock_time(existing.start_time),
            existing_end: time::format_clock_time(existing.end_time),
            overlap_minutes: overlap_minutes(
                (candidate.start_minutes(), candidate.end_minutes()),
                (existing.start_minutes(), existing.end_minutes()),
            ),
        }
    }
}

/// Whether `candidate` and `existing` fall on the same day.
///
/// When both carry a date the dates decide. Otherwise the weekdays decide,
/// so a recurring event is on the same day as every date sharing its weekday.
pub fn same_day(candidate: &Candidate, existing: &ScheduledEvent, policy: DayMatch) -> bool {
    match (candidate.date, existing.date) {
        (Some(a), Some(b)) => a == b,
        _ => {
            policy.weekday(candidate.weekday, candidate.date)
                == policy.weekday(existing.weekday, existing.date)
        }
    }
}

/// Minutes shared by two half-open `(start, end)` ranges; 0 when disjoint.
pub fn overlap_minutes(a: (u32, u32), b: (u32, u32)) -> u32 {
    let start = a.0.max(b.0);
    let end = a.1.min(b.1);
    end.saturating_sub(start)
}

/// Find the first existing event that clashes with `candidate`.
///
/// The event whose id equals `ignore` is skipped, so an event being edited
/// is never reported as clashing with itself.
///
/// Ranges overlap iff `candidate.start < existing.end && candidate.end >
/// existing.start`.
pub fn find_conflict<'a>(
    candidate: &Candidate,
    existing: &'a [ScheduledEvent],
    ignore: Option<EventId>,
    policy: DayMatch,
) -> Option<&'a ScheduledEvent> {
    let start = candidate.start_minutes();
    let end = candidate.end_minutes();

    existing
        .iter()
        .filter(|e| Some(e.id) != ignore)
        .filter(|e| same_day(candidate, e, policy))
        .find(|e| start < e.end_minutes() && end > e.start_minutes())
}

/// Whether `candidate` clashes with any event in `existing`, using the
/// recorded weekday rule.
pub fn has_conflict(candidate: &Candidate, existing: &[ScheduledEvent], ignore: Option<EventId>) -> bool {
    find_conflict(candidate, existing, ignore, DayMatch::Recorded).is_some()
}

/// Check a candidate and describe the first clash, if any.
pub fn check(
    candidate: &Candidate,
    existing: &[ScheduledEvent],
    ignore: Option<EventId>,
    policy: DayMatch,
) -> Result<(), SchedulingConflict> {
    match find_conflict(candidate, existing, ignore, policy) {
        Some(clash) => Err(SchedulingConflict::between(candidate, clash)),
        None => Ok(()),
    }
}
