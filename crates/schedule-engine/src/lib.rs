//! # schedule-engine
//!
//! Weekly schedule engine for team training sessions.
//!
//! Sessions either recur every week on a weekday or happen on one explicit
//! date. The engine lays a set of sessions out over a Monday-to-Sunday week,
//! detects schedule clashes before a session is created or edited, and
//! computes where each session is drawn on an hour grid.
//!
//! ## Modules
//!
//! - [`time`] — clock times, local dates, Monday anchors
//! - [`day`] — weekday wire index (Sunday = 0) and column index (Monday = 0)
//! - [`event`] — `ScheduledEvent`, `EventDraft`, `Candidate`
//! - [`conflict`] — same-day overlap detection
//! - [`week`] — week window and day-column bucketing
//! - [`layout`] — hour-grid placement
//! - [`agenda`] — list ordering, team filter, per-day agenda
//! - [`store`] — event store contract and in-memory store
//! - [`controller`] — `ScheduleView`, the stateful week screen
//! - [`error`] — Error types

pub mod agenda;
pub mod conflict;
pub mod controller;
pub mod day;
pub mod error;
pub mod event;
pub mod layout;
pub mod store;
pub mod time;
pub mod week;

pub use conflict::{find_conflict, has_conflict, DayMatch, SchedulingConflict};
pub use controller::{ScheduleView, SubmitError};
pub use error::ScheduleError;
pub use event::{Candidate, EventDraft, EventId, ScheduledEvent, TeamId, TrainerId};
pub use layout::{layout, GridConfig, Placement};
pub use store::{EventStore, InMemoryEventStore, StoreError};
pub use time::{add_days, checked_add_days, monday_of, parse_local_date, time_to_minutes};
pub use week::{bucketize, WeekBuckets, WeekWindow};
