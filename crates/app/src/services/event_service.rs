//! Event service — use-cases for listing, reading and creating events.

use hema_domain::error::{HemaError, NotFoundError, ValidationError};
use hema_domain::event::{Event, EventRecord, NewEvent};
use hema_domain::id::EventId;
use hema_domain::time::Timestamp;

use crate::ports::EventSource;

/// Application service for event queries and creation.
pub struct EventService<S> {
    source: S,
}

impl<S: EventSource> EventService<S> {
    /// Create a new service backed by the given event source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Events starting within `[from, to)`, ordered by start then id.
    ///
    /// Malformed records are logged and left out.
    ///
    /// # Errors
    ///
    /// Returns [`HemaError::InvalidArgument`] when `from` is not before `to`,
    /// or the event source's error.
    pub async fn list_events(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Event>, HemaError> {
        if from >= to {
            return Err(ValidationError::InvalidTimeRange.into());
        }
        let records = self.source.list(from, to).await?;

        let mut events: Vec<Event> = records
            .iter()
            .filter_map(|record| match record.parse() {
                Ok(event) => Some(event),
                Err(err) => {
                    tracing::warn!(event_id = %err.id, reason = %err.reason, "skipping malformed event");
                    None
                }
            })
            .collect();
        events.sort_by_key(|event| (event.start, event.id));
        Ok(events)
    }

    /// Look up an event by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HemaError::NotFound`] when no event with `id` exists, or
    /// [`HemaError::Source`] when the stored record is unreadable.
    pub async fn get_event(&self, id: EventId) -> Result<Event, HemaError> {
        let record = self
            .source
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        parse_stored(&record)
    }

    /// Validate and store a new event.
    ///
    /// # Errors
    ///
    /// Returns [`HemaError::InvalidArgument`] if the payload is invalid, or
    /// the event source's error.
    pub async fn create_event(&self, event: NewEvent) -> Result<Event, HemaError> {
        event.validate()?;
        let record = self.source.create(event).await?;
        let created = parse_stored(&record)?;
        tracing::info!(event_id = %created.id, start = %created.start, "created event");
        Ok(created)
    }

    /// Validate and replace an existing event.
    ///
    /// # Errors
    ///
    /// Returns [`HemaError::InvalidArgument`] if the payload is invalid,
    /// [`HemaError::NotFound`] when no event with `id` exists, or the event
    /// source's error.
    pub async fn update_event(&self, id: EventId, event: NewEvent) -> Result<Event, HemaError> {
        event.validate()?;
        let record = self
            .source
            .update(id, event)
            .await?
            .ok_or_else(|| not_found(id))?;
        let updated = parse_stored(&record)?;
        tracing::info!(event_id = %id, start = %updated.start, "updated event");
        Ok(updated)
    }

    /// Remove an event.
    ///
    /// # Errors
    ///
    /// Returns [`HemaError::NotFound`] when no event with `id` exists, or the
    /// event source's error.
    pub async fn delete_event(&self, id: EventId) -> Result<(), HemaError> {
        if !self.source.delete(id).await? {
            return Err(not_found(id).into());
        }
        tracing::info!(event_id = %id, "deleted event");
        Ok(())
    }
}

fn not_found(id: EventId) -> NotFoundError {
    NotFoundError {
        entity: "Event",
        id: id.to_string(),
    }
}

fn parse_stored(record: &EventRecord) -> Result<Event, HemaError> {
    record.parse().map_err(|err| HemaError::Source(Box::new(err)))
}
