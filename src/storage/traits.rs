//! Storage traits and error types
//!
//! This module defines the trait interface for the dedup store and
//! associated error types.

use crate::record::ContactRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Uniqueness-constrained contact persistence
///
/// Implementations must be safe to call from many crawl workers at once and
/// must decide "new or duplicate" atomically per record.
pub trait DedupStore: Send + Sync {
    /// Persists `record` if its `(contact_type, contact_value, site_domain)`
    /// key is new
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The record was inserted
    /// * `Ok(false)` - A record with the same key already exists
    /// * `Err(StorageError)` - The store failed; the record is lost
    fn save(&self, record: &ContactRecord) -> StorageResult<bool>;
}
