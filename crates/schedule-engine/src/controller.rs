//! The schedule view: week navigation, recomputed day columns and the
//! validated create/update/delete flow.
//!
//! `ScheduleView` owns all of its state and changes it only through `&mut
//! self` methods. Every transition recomputes the day columns from scratch,
//! and a failed transition leaves the previous state untouched.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::agenda::{self, AgendaDay};
use crate::conflict::{self, DayMatch, SchedulingConflict};
use crate::error::{Result, ScheduleError};
use crate::event::{Candidate, EventDraft, EventId, ScheduledEvent, TeamId};
use crate::layout::{self, GridConfig, Placement};
use crate::store::{EventStore, StoreError};
use crate::week::{self, DayHeader, WeekBuckets, WeekWindow};

/// Why a create or update was not carried out.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Invalid event: {0}")]
    Invalid(#[from] ScheduleError),

    #[error(transparent)]
    Conflict(#[from] SchedulingConflict),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// State behind the weekly schedule screen.
#[derive(Debug, Clone)]
pub struct ScheduleView {
    week: WeekWindow,
    events: Vec<ScheduledEvent>,
    team: Option<TeamId>,
    grid: GridConfig,
    day_match: DayMatch,
    buckets: WeekBuckets,
}

impl ScheduleView {
    /// An empty view showing the week that contains `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            week: WeekWindow::containing(today),
            events: Vec::new(),
            team: None,
            grid: GridConfig::default(),
            day_match: DayMatch::default(),
            buckets: WeekBuckets::default(),
        }
    }

    /// Use a different hour grid.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidGrid` when the grid does not validate.
    pub fn with_grid(mut self, grid: GridConfig) -> Result<Self> {
        grid.validate()?;
        self.grid = grid;
        Ok(self)
    }

    pub fn with_day_match(mut self, day_match: DayMatch) -> Self {
        self.day_match = day_match;
        self
    }

    pub fn week(&self) -> WeekWindow {
        self.week
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week.start()
    }

    pub fn week_label(&self) -> String {
        self.week.label()
    }

    pub fn day_headers(&self) -> Vec<DayHeader> {
        self.week.day_headers()
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn team_filter(&self) -> Option<TeamId> {
        self.team
    }

    /// The full working set, unfiltered.
    pub fn events(&self) -> &[ScheduledEvent] {
        &self.events
    }

    /// Day columns of the displayed week.
    pub fn buckets(&self) -> &WeekBuckets {
        &self.buckets
    }

    pub fn go_to_previous_week(&mut self) {
        self.week = self.week.previous();
        debug!(week_start = %self.week.start(), "moved to previous week");
        self.recompute();
    }

    pub fn go_to_next_week(&mut self) {
        self.week = self.week.next();
        debug!(week_start = %self.week.start(), "moved to next week");
        self.recompute();
    }

    /// Move `weeks` weeks forward (backward when negative).
    ///
    /// # Errors
    /// Returns `ScheduleError::DateOutOfRange` for a target week chrono
    /// cannot represent; the view stays on the current week.
    pub fn go_to_week_offset(&mut self, weeks: i64) -> Result<()> {
        self.week = self.week.offset(weeks)?;
        debug!(weeks, week_start = %self.week.start(), "moved by week offset");
        self.recompute();
        Ok(())
    }

    /// Jump to the week containing `date`.
    pub fn go_to_week_of(&mut self, date: NaiveDate) {
        self.week = WeekWindow::containing(date);
        debug!(week_start = %self.week.start(), "jumped to week");
        self.recompute();
    }

    /// Replace the working set.
    pub fn set_event_list(&mut self, events: Vec<ScheduledEvent>) {
        let mismatched = events.iter().filter(|e| week::has_weekday_mismatch(e)).count();
        if mismatched > 0 {
            warn!(mismatched, "dated events whose weekday disagrees with their date");
        }
        self.events = events;
        debug!(count = self.events.len(), "event list replaced");
        self.recompute();
    }

    /// Show only one team's events, or every team with `None`.
    ///
    /// Conflict checks keep using the whole working set.
    pub fn set_team_filter(&mut self, team: Option<TeamId>) {
        self.team = team;
        self.recompute();
    }

    /// Events on display: team-filtered and in listing order.
    pub fn displayed_events(&self) -> Vec<ScheduledEvent> {
        let mut shown = agenda::filter_by_team(&self.events, self.team);
        agenda::sort_for_listing(&mut shown);
        shown
    }

    /// Displayed events grouped per day of the current week.
    pub fn agenda(&self) -> Vec<AgendaDay> {
        agenda::agenda(&self.displayed_events(), &self.week)
    }

    fn recompute(&mut self) {
        self.buckets = week::bucketize(&self.displayed_events(), &self.week);
    }

    /// Placement of `event` on the grid, `None` when it is outside the
    /// visible hours.
    pub fn layout_for(&self, event: &ScheduledEvent) -> Option<Placement> {
        layout::is_visible(event, &self.grid).then(|| layout::layout(event, &self.grid))
    }

    /// Visible events of one column with their placements.
    pub fn column_layout(&self, column: usize) -> Vec<(&ScheduledEvent, Placement)> {
        self.buckets
            .get(column)
            .iter()
            .filter_map(|e| self.layout_for(e).map(|p| (e, p)))
            .collect()
    }

    /// Check a slot against the whole working set.
    ///
    /// `ignore` names the event being edited. A clash is a normal outcome:
    /// the form must reject the submission and not call the store.
    pub fn validate_new_event(
        &self,
        candidate: &Candidate,
        ignore: Option<EventId>,
    ) -> std::result::Result<(), SchedulingConflict> {
        conflict::check(candidate, &self.events, ignore, self.day_match)
    }

    /// Reload the working set from `store`. On failure nothing changes.
    pub fn refresh<S: EventStore + ?Sized>(&mut self, store: &S) -> std::result::Result<(), StoreError> {
        match store.list() {
            Ok(events) => {
                self.set_event_list(events);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "could not reload events; keeping previous list");
                Err(err)
            }
        }
    }

    /// Validate and create an event.
    ///
    /// The store is only called once the draft is valid and clash-free.
    pub fn create_event<S: EventStore + ?Sized>(
        &mut self,
        store: &mut S,
        draft: EventDraft,
    ) -> std::result::Result<ScheduledEvent, SubmitError> {
        let draft = self.prepare(draft, None)?;
        let created = store.create(draft)?;
        debug!(id = %created.id, "event created");
        self.after_write(store, Some(&created), None);
        Ok(created)
    }

    /// Validate and update event `id`. The event never clashes with itself.
    pub fn update_event<S: EventStore + ?Sized>(
        &mut self,
        store: &mut S,
        id: EventId,
        draft: EventDraft,
    ) -> std::result::Result<ScheduledEvent, SubmitError> {
        let draft = self.prepare(draft, Some(id))?;
        let updated = store.update(id, draft)?;
        debug!(%id, "event updated");
        self.after_write(store, Some(&updated), None);
        Ok(updated)
    }

    pub fn delete_event<S: EventStore + ?Sized>(
        &mut self,
        store: &mut S,
        id: EventId,
    ) -> std::result::Result<(), StoreError> {
        store.delete(id)?;
        debug!(%id, "event deleted");
        self.after_write(store, None, Some(id));
        Ok(())
    }

    fn prepare(
        &self,
        draft: EventDraft,
        ignore: Option<EventId>,
    ) -> std::result::Result<EventDraft, SubmitError> {
        let draft = draft.normalized();
        draft.validate()?;
        if let Err(clash) = self.validate_new_event(&draft.candidate(), ignore) {
            debug!(conflicting_id = %clash.conflicting_id, "submission rejected by schedule clash");
            return Err(clash.into());
        }
        Ok(draft)
    }

    /// Reload after a successful write. If the reload fails the write is
    /// applied to the local copy so the view still reflects it.
    fn after_write<S: EventStore + ?Sized>(
        &mut self,
        store: &S,
        written: Option<&ScheduledEvent>,
        removed: Option<EventId>,
    ) {
        if self.refresh(store).is_ok() {
            return;
        }
        let mut events = self.events.clone();
        if let Some(id) = removed {
            events.retain(|e| e.id != id);
        }
        if let Some(event) = written {
            match events.iter_mut().find(|e| e.id == event.id) {
                Some(slot) => *slot = event.clone(),
                None => events.push(event.clone()),
            }
        }
        self.set_event_list(events);
    }
}
