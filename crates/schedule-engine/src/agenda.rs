//! List-view helpers: stable ordering, team filtering and the per-day agenda
//! of a week.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::day;
use crate::event::{ScheduledEvent, TeamId};
use crate::week::WeekWindow;

/// Order used by the list view: dated events first (by date), then recurring
/// events by wire weekday (Sunday first). Ties keep their input order.
pub fn listing_order(a: &ScheduledEvent, b: &ScheduledEvent) -> Ordering {
    match (a.date, b.date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => day::to_sunday_index(a.weekday).cmp(&day::to_sunday_index(b.weekday)),
    }
}

/// Sort events in place with [`listing_order`].
pub fn sort_for_listing(events: &mut [ScheduledEvent]) {
    events.sort_by(listing_order);
}

/// Events belonging to `team`, or all events when `team` is `None`.
pub fn filter_by_team(events: &[ScheduledEvent], team: Option<TeamId>) -> Vec<ScheduledEvent> {
    events
        .iter()
        .filter(|e| team.is_none_or(|t| e.team_id == t))
        .cloned()
        .collect()
}

/// One day of the agenda.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub label: String,
    pub events: Vec<ScheduledEvent>,
}

/// Group the events occurring in `week` by day, Monday to Sunday.
///
/// A dated event shows on its date when that date lies in the week; a
/// recurring event shows on every matching weekday. Days without events are
/// left out.
pub fn agenda(events: &[ScheduledEvent], week: &WeekWindow) -> Vec<AgendaDay> {
    week.days()
        .filter_map(|date| {
            let todays: Vec<ScheduledEvent> = events
                .iter()
                .filter(|e| match e.date {
                    Some(d) => d == date,
                    None => e.weekday == date.weekday(),
                })
                .cloned()
                .collect();
            (!todays.is_empty()).then(|| AgendaDay {
                date,
                label: date.format("%A %-d %b").to_string(),
                events: todays,
            })
        })
        .collect()
}
