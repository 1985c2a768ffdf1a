//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HemaError`]
//! via `#[from]` / `From` (no `String` variants at the top level).

/// Top-level error returned by domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum HemaError {
    /// A caller supplied an argument that violates a domain invariant.
    #[error("invalid argument")]
    InvalidArgument(#[from] ValidationError),

    /// A requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The event source failed (network, IO, decoding, …).
    #[error("event source error")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations detected before any work is done.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("month must be within 1..=12, got {0}")]
    InvalidMonth(u32),

    #[error("year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),

    #[error("name must not be empty")]
    EmptyName,

    #[error("color must be 6 hex digits without '#', got {0:?}")]
    InvalidColor(String),

    #[error("event start must be before its end")]
    InvalidTimeRange,

    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),

    #[error("unknown timezone {0:?}")]
    InvalidTimezone(String),

    #[error("unknown breakpoint {0:?}")]
    InvalidBreakpoint(String),
}

/// Lookup of a record by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
