//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hema_domain::error::{HemaError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HemaError`] and request rejections to an HTTP response with the
/// appropriate status code and a JSON body.
pub enum ApiError {
    /// A failure reported by the application layer.
    Domain(HemaError),
    /// The request could not be decoded into handler arguments.
    Rejected { status: StatusCode, message: String },
}

impl From<HemaError> for ApiError {
    fn from(err: HemaError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // a body that parses as JSON but not as the payload is still bad input
        let status = match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
            other => other,
        };
        Self::Rejected {
            status,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(HemaError::InvalidArgument(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(HemaError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(HemaError::Source(err)) => {
                tracing::error!(error = %err, "event source error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "event source unavailable".to_string(),
                )
            }
            Self::Rejected { status, message } => (status, message),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
