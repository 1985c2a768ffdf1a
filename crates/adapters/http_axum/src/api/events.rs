//! JSON REST handlers for events.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hema_app::ports::{Clock, EventSource};
use hema_domain::event::{Event, NewEvent};
use hema_domain::id::EventId;
use hema_domain::time::{day_window, parse_timestamp};

use crate::error::ApiError;
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::state::AppState;

/// Query parameters for the list endpoint.
///
/// Both bounds default to today in the display zone.
#[derive(Deserialize)]
pub struct ListQuery {
    /// Start of the range (inclusive). RFC 3339, or naive UTC.
    pub start: Option<String>,
    /// End of the range (exclusive). RFC 3339, or naive UTC.
    pub end: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Event>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Event>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Event>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/events?start=&end=`
pub async fn list<S, C>(
    State(state): State<AppState<S, C>>,
    QueryParams(params): QueryParams<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    S: EventSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let calendar = &state.calendar_service;
    let (day_start, day_end) = day_window(calendar.today(), calendar.zone());

    let from = params
        .start
        .as_deref()
        .map(parse_timestamp)
        .transpose()?
        .unwrap_or(day_start);
    let to = params
        .end
        .as_deref()
        .map(parse_timestamp)
        .transpose()?
        .unwrap_or(day_end);

    let events = state.event_service.list_events(from, to).await?;
    Ok(ListResponse::Ok(Json(events)))
}

/// `GET /api/events/:id`
pub async fn get<S, C>(
    State(state): State<AppState<S, C>>,
    PathParams(id): PathParams<i64>,
) -> Result<GetResponse, ApiError>
where
    S: EventSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let event = state.event_service.get_event(EventId::new(id)).await?;
    Ok(GetResponse::Ok(Json(event)))
}

/// `POST /api/events`
pub async fn create<S, C>(
    State(state): State<AppState<S, C>>,
    JsonBody(req): JsonBody<NewEvent>,
) -> Result<CreateResponse, ApiError>
where
    S: EventSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let created = state.event_service.create_event(req).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/events/:id`
pub async fn update<S, C>(
    State(state): State<AppState<S, C>>,
    PathParams(id): PathParams<i64>,
    JsonBody(req): JsonBody<NewEvent>,
) -> Result<GetResponse, ApiError>
where
    S: EventSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let updated = state
        .event_service
        .update_event(EventId::new(id), req)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/events/:id`
pub async fn delete<S, C>(
    State(state): State<AppState<S, C>>,
    PathParams(id): PathParams<i64>,
) -> Result<DeleteResponse, ApiError>
where
    S: EventSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    state.event_service.delete_event(EventId::new(id)).await?;
    Ok(DeleteResponse::NoContent)
}
