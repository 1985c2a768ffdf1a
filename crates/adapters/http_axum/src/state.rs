//! Shared application state for axum handlers.

use std::sync::Arc;

use hema_app::ports::{Clock, EventSource};
use hema_app::services::calendar_service::CalendarService;
use hema_app::services::event_service::EventService;
use hema_domain::calendar::VisibleCounts;

/// Application state shared across all axum handlers.
///
/// Generic over the event source and clock to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`. Only the `Arc` wrappers are cloned.
pub struct AppState<S, C> {
    /// Month building.
    pub calendar_service: Arc<CalendarService<S, C>>,
    /// Event queries and creation.
    pub event_service: Arc<EventService<S>>,
    /// Per-breakpoint visible events for previews.
    pub visible_counts: VisibleCounts,
}

impl<S, C> Clone for AppState<S, C> {
    fn clone(&self) -> Self {
        Self {
            calendar_service: Arc::clone(&self.calendar_service),
            event_service: Arc::clone(&self.event_service),
            visible_counts: self.visible_counts,
        }
    }
}

impl<S, C> AppState<S, C>
where
    S: EventSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        calendar_service: CalendarService<S, C>,
        event_service: EventService<S>,
        visible_counts: VisibleCounts,
    ) -> Self {
        Self {
            calendar_service: Arc::new(calendar_service),
            event_service: Arc::new(event_service),
            visible_counts,
        }
    }
}
