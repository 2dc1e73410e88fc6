//! Storage error types.

use thiserror::Error;

/// Errors a storage backend can report.
///
/// These never escape a store's public API: load failures fall back to the
/// empty collection and write failures are logged and dropped.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend rejected or could not complete the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
}
