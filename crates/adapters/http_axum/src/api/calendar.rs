//! JSON REST handlers for calendar months.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use hema_app::ports::{Clock, EventSource};
use hema_domain::calendar::{Breakpoint, CalendarMonth, MonthBuild, MonthPreview};

use crate::error::ApiError;
use crate::extract::{PathParams, QueryParams};
use crate::state::AppState;

/// A month plus the number of events that could not be shown.
#[derive(Serialize)]
pub struct MonthBody {
    #[serde(flatten)]
    pub month: CalendarMonth,
    pub skipped_events: usize,
}

impl From<MonthBuild> for MonthBody {
    fn from(built: MonthBuild) -> Self {
        Self {
            skipped_events: built.skipped_events(),
            month: built.month,
        }
    }
}

#[derive(Serialize)]
struct PreviewBody<'a> {
    #[serde(flatten)]
    preview: MonthPreview<'a>,
    breakpoint: Breakpoint,
    skipped_events: usize,
}

/// Query parameters for the preview endpoint.
#[derive(Deserialize)]
pub struct PreviewQuery {
    /// `xs`, `sm` or `md`. Defaults to `md`.
    pub breakpoint: Option<String>,
}

/// Possible responses from the month endpoints.
pub enum MonthResponse {
    Ok(Json<MonthBody>),
}

impl IntoResponse for MonthResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/calendar`: the month containing today.
pub async fn current<S, C>(State(state): State<AppState<S, C>>) -> Result<MonthResponse, ApiError>
where
    S: EventSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let built = state.calendar_service.current_month().await?;
    Ok(MonthResponse::Ok(Json(built.into())))
}

/// `GET /api/calendar/:year/:month`
pub async fn month<S, C>(
    State(state): State<AppState<S, C>>,
    PathParams((year, month)): PathParams<(i32, u32)>,
) -> Result<MonthResponse, ApiError>
where
    S: EventSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let built = state.calendar_service.month(year, month).await?;
    Ok(MonthResponse::Ok(Json(built.into())))
}

/// `GET /api/calendar/:year/:month/preview?breakpoint=`
pub async fn preview<S, C>(
    State(state): State<AppState<S, C>>,
    PathParams((year, month)): PathParams<(i32, u32)>,
    QueryParams(params): QueryParams<PreviewQuery>,
) -> Result<Response, ApiError>
where
    S: EventSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let breakpoint = params
        .breakpoint
        .as_deref()
        .map(str::parse::<Breakpoint>)
        .transpose()?
        .unwrap_or(Breakpoint::Md);
    let limit = state.visible_counts.for_breakpoint(breakpoint);

    let built = state.calendar_service.month(year, month).await?;
    let body = PreviewBody {
        preview: MonthPreview::of(&built.month, limit),
        breakpoint,
        skipped_events: built.skipped_events(),
    };
    Ok(Json(&body).into_response())
}
