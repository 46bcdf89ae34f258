//! Scheduled events, create/update drafts and conflict-check candidates.
//!
//! JSON field names follow the club backend's REST payloads (`equipo`,
//! `dia_semana`, `hora_inicio`, ...), so API responses deserialize directly.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::day;
use crate::error::{Result, ScheduleError};
use crate::time;

/// Display colour given to events created without one.
pub const DEFAULT_COLOR: &str = "#FCD34D";

/// Unique identifier of a stored event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

/// Reference to a team owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u64);

/// Reference to a trainer (user) owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainerId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_active() -> bool {
    true
}

/// A training session on the team schedule.
///
/// An event with a `date` happens on that day only. An event without one
/// recurs every week on `weekday`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub id: EventId,
    #[serde(rename = "equipo")]
    pub team_id: TeamId,
    #[serde(rename = "equipo_nombre", default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(rename = "entrenador", default)]
    pub trainer_id: Option<TrainerId>,
    #[serde(rename = "entrenador_nombre", default, skip_serializing_if = "Option::is_none")]
    pub trainer_name: Option<String>,
    #[serde(rename = "lugar")]
    pub place: String,
    #[serde(rename = "dia_semana", with = "day::sunday_index")]
    pub weekday: Weekday,
    #[serde(rename = "fecha", default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "hora_inicio", with = "time::hhmm")]
    pub start_time: NaiveTime,
    #[serde(rename = "hora_termino", with = "time::hhmm")]
    pub end_time: NaiveTime,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

impl ScheduledEvent {
    /// Materialize a stored event from a draft and the id the store assigned.
    pub fn from_draft(id: EventId, draft: EventDraft) -> Self {
        Self {
            id,
            team_id: draft.team_id,
            team_name: None,
            trainer_id: draft.trainer_id,
            trainer_name: None,
            place: draft.place,
            weekday: draft.weekday,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            color: draft.color,
            active: draft.active,
        }
    }

    /// Whether the event recurs weekly (has no explicit date).
    pub fn is_recurring(&self) -> bool {
        self.date.is_none()
    }

    /// The weekday the event actually falls on: the date's weekday when
    /// dated, the recorded `weekday` otherwise.
    pub fn resolved_weekday(&self) -> Weekday {
        self.date.map_or(self.weekday, |d| d.weekday())
    }

    pub fn start_minutes(&self) -> u32 {
        time::minutes_of(self.start_time)
    }

    pub fn end_minutes(&self) -> u32 {
        time::minutes_of(self.end_time)
    }

    /// The slot this event occupies, for conflict checks.
    pub fn candidate(&self) -> Candidate {
        Candidate {
            weekday: self.weekday,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    /// The editable payload of this event.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            team_id: self.team_id,
            trainer_id: self.trainer_id,
            place: self.place.clone(),
            weekday: self.weekday,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            color: self.color.clone(),
            active: self.active,
        }
    }
}

/// Payload for creating or updating an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(rename = "equipo")]
    pub team_id: TeamId,
    #[serde(rename = "entrenador", default)]
    pub trainer_id: Option<TrainerId>,
    #[serde(rename = "lugar")]
    pub place: String,
    #[serde(rename = "dia_semana", with = "day::sunday_index")]
    pub weekday: Weekday,
    #[serde(rename = "fecha", default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "hora_inicio", with = "time::hhmm")]
    pub start_time: NaiveTime,
    #[serde(rename = "hora_termino", with = "time::hhmm")]
    pub end_time: NaiveTime,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

impl EventDraft {
    /// A recurring draft with default colour, no trainer and no date.
    pub fn new(
        team_id: TeamId,
        place: impl Into<String>,
        weekday: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            team_id,
            trainer_id: None,
            place: place.into(),
            weekday,
            date: None,
            start_time,
            end_time,
            color: default_color(),
            active: true,
        }
    }

    /// Pin the draft to a date. The weekday follows the date.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self.weekday = date.weekday();
        self
    }

    pub fn with_trainer(mut self, trainer: TrainerId) -> Self {
        self.trainer_id = Some(trainer);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Copy of the draft whose weekday agrees with its date, if any.
    pub fn normalized(mut self) -> Self {
        if let Some(date) = self.date {
            self.weekday = date.weekday();
        }
        self
    }

    /// Form-level checks: a non-blank place and `end > start`.
    pub fn validate(&self) -> Result<()> {
        if self.place.trim().is_empty() {
            return Err(ScheduleError::MissingField("place"));
        }
        if self.end_time <= self.start_time {
            return Err(ScheduleError::InvalidRange {
                start: time::format_clock_time(self.start_time),
                end: time::format_clock_time(self.end_time),
            });
        }
        Ok(())
    }

    pub fn candidate(&self) -> Candidate {
        Candidate {
            weekday: self.weekday,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// A time slot to test against the existing schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub weekday: Weekday,
    pub date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Candidate {
    /// A slot recurring on `weekday`.
    pub fn recurring(weekday: Weekday, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            weekday,
            date: None,
            start_time,
            end_time,
        }
    }

    /// A slot on a specific date; the weekday is taken from the date.
    pub fn dated(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            weekday: date.weekday(),
            date: Some(date),
            start_time,
            end_time,
        }
    }

    /// Build a candidate from raw form values.
    ///
    /// `weekday` is the wire index (Sunday = 0). When `date` is given it wins
    /// and the weekday is derived from it.
    pub fn parse(weekday: Option<i64>, date: Option<&str>, start: &str, end: &str) -> Result<Self> {
        let start_time = time::parse_clock_time(start)?;
        let end_time = time::parse_clock_time(end)?;
        match (date, weekday) {
            (Some(raw), _) => Ok(Self::dated(time::parse_local_date(raw)?, start_time, end_time)),
            (None, Some(index)) => Ok(Self::recurring(
                day::from_sunday_index(index)?,
                start_time,
                end_time,
            )),
            (None, None) => Err(ScheduleError::MissingField("weekday or date")),
        }
    }

    pub fn start_minutes(&self) -> u32 {
        time::minutes_of(self.start_time)
    }

    pub fn end_minutes(&self) -> u32 {
        time::minutes_of(self.end_time)
    }
}
