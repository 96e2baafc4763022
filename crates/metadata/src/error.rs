//! Record store error types.

use thiserror::Error;

/// Record store operation errors.
///
/// "Record absent" is not an error: lookups return `Ok(None)` so callers can
/// always tell a missing record apart from a failed operation.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The path argument was rejected before touching storage.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The store was closed and can no longer serve operations.
    #[error("store is closed")]
    Closed,

    /// Underlying storage I/O or constraint failure. No partial write
    /// survives a failed upsert.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for record store operations.
pub type MetadataResult<T> = std::result::Result<T, MetadataError>;
