//! The event store the schedule view reads from and writes through.
//!
//! In the club application this is the REST backend; the engine only needs
//! the four CRUD calls below.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::event::{EventDraft, EventId, ScheduledEvent};

/// Failures reported by an event store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Event {0} not found")]
    NotFound(EventId),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend rejected the request (permissions, validation, ...).
    #[error("Backend error: {0}")]
    Backend(String),
}

/// CRUD access to the authoritative event list.
pub trait EventStore {
    fn list(&self) -> Result<Vec<ScheduledEvent>, StoreError>;

    fn create(&mut self, draft: EventDraft) -> Result<ScheduledEvent, StoreError>;

    fn update(&mut self, id: EventId, draft: EventDraft) -> Result<ScheduledEvent, StoreError>;

    fn delete(&mut self, id: EventId) -> Result<(), StoreError>;
}

/// Store kept entirely in memory. Ids are assigned sequentially from 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: BTreeMap<EventId, ScheduledEvent>,
    next_id: u64,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing events. Later ids continue after the
    /// largest seeded id.
    pub fn with_events(events: impl IntoIterator<Item = ScheduledEvent>) -> Self {
        let events: BTreeMap<EventId, ScheduledEvent> =
            events.into_iter().map(|e| (e.id, e)).collect();
        let next_id = events.keys().next_back().map_or(0, |id| id.0);
        Self { events, next_id }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventStore for InMemoryEventStore {
    fn list(&self) -> Result<Vec<ScheduledEvent>, StoreError> {
        Ok(self.events.values().cloned().collect())
    }

    fn create(&mut self, draft: EventDraft) -> Result<ScheduledEvent, StoreError> {
        self.next_id += 1;
        let id = EventId(self.next_id);
        let event = ScheduledEvent::from_draft(id, draft.normalized());
        self.events.insert(id, event.clone());
        Ok(event)
    }

    fn update(&mut self, id: EventId, draft: EventDraft) -> Result<ScheduledEvent, StoreError> {
        let slot = self.events.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let mut updated = ScheduledEvent::from_draft(id, draft.normalized());
        if updated.team_id == slot.team_id {
            updated.team_name = slot.team_name.take();
        }
        if updated.trainer_id == slot.trainer_id {
            updated.trainer_name = slot.trainer_name.take();
        }
        *slot = updated.clone();
        Ok(updated)
    }

    fn delete(&mut self, id: EventId) -> Result<(), StoreError> {
        self.events
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
