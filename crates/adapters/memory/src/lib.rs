//! # hema-adapter-memory
//!
//! In-process [`EventSource`] holding event records in memory.
//!
//! Records can be seeded from a JSON array in the wire shape
//! (`id, name, color, start, end, trainer_id?, weekly_id?`, with
//! `weekly_event_id` accepted as an alias). Seeded records are kept as-is,
//! including ones with unreadable timestamps, so the calendar diagnostics see
//! exactly what a remote store would have sent.
//!
//! ## Dependency rule
//!
//! Depends on `hema-app` (port traits) and `hema-domain` only.

mod error;

use std::collections::HashSet;
use std::path::Path;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use hema_app::ports::EventSource;
use hema_domain::error::HemaError;
use hema_domain::event::{EventRecord, NewEvent};
use hema_domain::id::EventId;
use hema_domain::time::Timestamp;

pub use error::StoreError;

/// Event source backed by a `Vec` behind a lock.
pub struct InMemoryEventSource {
    records: RwLock<Vec<EventRecord>>,
    last_id: AtomicI64,
}

impl Default for InMemoryEventSource {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            last_id: AtomicI64::new(0),
        }
    }
}

impl InMemoryEventSource {
    /// Hold `records`; new events get ids above the highest seeded one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] when two records share an id.
    pub fn new(records: Vec<EventRecord>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
            return Err(StoreError::DuplicateId(dup.id));
        }
        let last_id = records.iter().map(|r| r.id.get()).max().unwrap_or(0);
        Ok(Self {
            records: RwLock::new(records),
            last_id: AtomicI64::new(last_id),
        })
    }

    /// Seed from a JSON array of event records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] when `json` is not an array of records,
    /// or [`StoreError::DuplicateId`] when two records share an id.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let records: Vec<EventRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Seed from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read, or any error of
    /// [`InMemoryEventSource::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let source = Self::from_json(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            events = source.len(),
            "seeded in-memory event source"
        );
        Ok(source)
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().map_or(0, |records| records.len())
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn range(&self, from: Timestamp, to: Timestamp) -> Result<Vec<EventRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records
            .iter()
            .filter(|record| {
                record
                    .start_instant()
                    .is_none_or(|start| start >= from && start < to)
            })
            .cloned()
            .collect())
    }

    fn find(&self, id: EventId) -> Result<Option<EventRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    fn insert(&self, event: NewEvent) -> Result<EventRecord, HemaError> {
        event.validate()?;
        let id = self.next_id()?;
        let record = event.into_event(id)?.to_record();
        self.records
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .push(record.clone());
        Ok(record)
    }

    fn replace(&self, id: EventId, event: NewEvent) -> Result<Option<EventRecord>, HemaError> {
        let record = event.into_event(id)?.to_record();
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter_mut().find(|r| r.id == id).map(|slot| {
            *slot = record;
            slot.clone()
        }))
    }

    fn remove(&self, id: EventId) -> Result<bool, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    fn next_id(&self) -> Result<EventId, StoreError> {
        let last = self
            .last_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
            .map_err(|_| StoreError::IdsExhausted)?;
        // the update above succeeded, so `last + 1` fits
        Ok(EventId::new(last + 1))
    }
}

impl EventSource for InMemoryEventSource {
    async fn list(&self, from: Timestamp, to: Timestamp) -> Result<Vec<EventRecord>, HemaError> {
        Ok(self.range(from, to)?)
    }

    async fn get_by_id(&self, id: EventId) -> Result<Option<EventRecord>, HemaError> {
        Ok(self.find(id)?)
    }

    async fn create(&self, event: NewEvent) -> Result<EventRecord, HemaError> {
        self.insert(event)
    }

    async fn update(&self, id: EventId, event: NewEvent) -> Result<Option<EventRecord>, HemaError> {
        self.replace(id, event)
    }

    async fn delete(&self, id: EventId) -> Result<bool, HemaError> {
        Ok(self.remove(id)?)
    }
}
