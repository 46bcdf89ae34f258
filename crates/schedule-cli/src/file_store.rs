//! Event store backed by a JSON file holding an array of events in the
//! backend's wire format.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use schedule_engine::{
    EventDraft, EventId, EventStore, InMemoryEventStore, ScheduledEvent, StoreError,
};
use tracing::debug;

pub struct JsonFileStore {
    path: PathBuf,
    events: InMemoryEventStore,
}

impl JsonFileStore {
    /// Load the store from `path`. A missing file is an empty schedule.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let events: Vec<ScheduledEvent> = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), count = events.len(), "loaded events");
        Ok(Self {
            path,
            events: InMemoryEventStore::with_events(events),
        })
    }

    fn persist(&self) -> Result<(), StoreError> {
        let events = self.events.list()?;
        let json = serde_json::to_string_pretty(&events)?;
        fs::write(&self.path, json + "\n")?;
        debug!(path = %self.path.display(), count = events.len(), "saved events");
        Ok(())
    }
}

impl EventStore for JsonFileStore {
    fn list(&self) -> Result<Vec<ScheduledEvent>, StoreError> {
        self.events.list()
    }

    fn create(&mut self, draft: EventDraft) -> Result<ScheduledEvent, StoreError> {
        let created = self.events.create(draft)?;
        self.persist()?;
        Ok(created)
    }

    fn update(&mut self, id: EventId, draft: EventDraft) -> Result<ScheduledEvent, StoreError> {
        let updated = self.events.update(id, draft)?;
        self.persist()?;
        Ok(updated)
    }

    fn delete(&mut self, id: EventId) -> Result<(), StoreError> {
        self.events.delete(id)?;
        self.persist()
    }
}
