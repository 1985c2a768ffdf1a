//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod calendar;
#[allow(clippy::missing_errors_doc)]
pub mod events;

use axum::Router;
use axum::routing::get;

use hema_app::ports::{Clock, EventSource};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, C>() -> Router<AppState<S, C>>
where
    S: EventSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        // Calendar
        .route("/calendar", get(calendar::current::<S, C>))
        .route("/calendar/{year}/{month}", get(calendar::month::<S, C>))
        .route(
            "/calendar/{year}/{month}/preview",
            get(calendar::preview::<S, C>),
        )
        // Events
        .route(
            "/events",
            get(events::list::<S, C>).post(events::create::<S, C>),
        )
        .route(
            "/events/{id}",
            get(events::get::<S, C>)
                .put(events::update::<S, C>)
                .delete(events::delete::<S, C>),
        )
}
