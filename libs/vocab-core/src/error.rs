//! Error types for vocab-core.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors from the spaced-repetition item scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A review mark that is not one of the three allowed symbols. Rejected
    /// before any state is touched.
    #[error("invalid review mark '{0}': expected O, Δ, or X")]
    InvalidMark(String),

    #[error("item not found: {0}")]
    ItemNotFound(Uuid),
}
