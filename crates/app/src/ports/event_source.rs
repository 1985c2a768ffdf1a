//! Event source port — where calendar events come from.
//!
//! In production this is the remote event store. The application never pages,
//! caches, or retries these calls; that is the adapter's business.

use std::future::Future;

use hema_domain::error::HemaError;
use hema_domain::event::{EventRecord, NewEvent};
use hema_domain::id::EventId;
use hema_domain::time::Timestamp;

/// Read/write access to stored events.
pub trait EventSource {
    /// Events starting within `[from, to)`.
    ///
    /// Records whose start cannot be read may be included; the calendar
    /// builder counts and drops them.
    fn list(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<EventRecord>, HemaError>> + Send;

    /// Get an event by its identifier.
    fn get_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<EventRecord>, HemaError>> + Send;

    /// Store a new event and return it with its assigned identifier.
    fn create(
        &self,
        event: NewEvent,
    ) -> impl Future<Output = Result<EventRecord, HemaError>> + Send;

    /// Replace the event `id`. `None` when no such event exists.
    fn update(
        &self,
        id: EventId,
        event: NewEvent,
    ) -> impl Future<Output = Result<Option<EventRecord>, HemaError>> + Send;

    /// Remove the event `id`. `false` when no such event existed.
    fn delete(&self, id: EventId) -> impl Future<Output = Result<bool, HemaError>> + Send;
}

impl<T: EventSource + Send + Sync> EventSource for std::sync::Arc<T> {
    fn list(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<EventRecord>, HemaError>> + Send {
        (**self).list(from, to)
    }

    fn get_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<EventRecord>, HemaError>> + Send {
        (**self).get_by_id(id)
    }

    fn create(
        &self,
        event: NewEvent,
    ) -> impl Future<Output = Result<EventRecord, HemaError>> + Send {
        (**self).create(event)
    }

    fn update(
        &self,
        id: EventId,
        event: NewEvent,
    ) -> impl Future<Output = Result<Option<EventRecord>, HemaError>> + Send {
        (**self).update(id, event)
    }

    fn delete(&self, id: EventId) -> impl Future<Output = Result<bool, HemaError>> + Send {
        (**self).delete(id)
    }
}
