//! Output traits and error types
//!
//! This module defines the trait interface for result sinks and the
//! associated error type.

use crate::record::ContactRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output lock poisoned")]
    LockPoisoned,
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Durable destination for first-seen contact records
pub trait RecordSink: Send + Sync {
    /// Appends one record; returns once it has been flushed
    fn write(&self, record: &ContactRecord) -> OutputResult<()>;
}
