//! Error types for laptop store operations.

use thiserror::Error;

/// Failures surfaced by a [`LaptopStore`](super::LaptopStore).
///
/// A missing record is not an error; `find` returns `Ok(None)` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record already exists: {0}")]
    AlreadyExists(String),

    /// Records are keyed by id, so one must be assigned before saving.
    #[error("laptop ID is empty")]
    EmptyId,

    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),

    /// Raised by a search consumer to stop the scan early.
    #[error("search cancelled: {0}")]
    Cancelled(String),
}

impl StoreError {
    /// Create a cancellation error with a reason
    pub fn cancelled(reason: impl Into<String>) -> Self {
        StoreError::Cancelled(reason.into())
    }

    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists(_))
    }
}
