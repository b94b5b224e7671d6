//! Store error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying file is not valid JSON. Fatal for the load; no
    /// best-effort parse is attempted.
    #[error("corrupt data file: {0}")]
    Corrupt(#[from] serde_json::Error),
}
