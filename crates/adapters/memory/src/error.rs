//! Store-specific error type for the in-memory adapter.

use hema_domain::error::HemaError;
use hema_domain::id::EventId;

/// Errors originating from the in-memory event store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The seed file could not be read.
    #[error("failed to read seed file")]
    Io(#[from] std::io::Error),

    /// The seed file is not a JSON array of events.
    #[error("failed to decode seed events")]
    Json(#[from] serde_json::Error),

    /// Two seeded records share an id.
    #[error("event id {0} appears more than once in the seed")]
    DuplicateId(EventId),

    /// Every id above the highest stored one is taken.
    #[error("no event ids left to assign")]
    IdsExhausted,

    /// A writer panicked while holding the lock.
    #[error("event store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for HemaError {
    fn from(err: StoreError) -> Self {
        Self::Source(Box::new(err))
    }
}
