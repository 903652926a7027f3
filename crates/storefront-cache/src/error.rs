//! Cache error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    Open(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    Store(String),

    /// Filesystem error in a file-backed store.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
