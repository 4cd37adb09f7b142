//! Cache error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the cache blob.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Generic I/O error.
    #[error("Cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tree could not be serialized or the blob could not be decoded.
    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The stored timestamp is not a millisecond epoch value.
    #[error("Invalid cache timestamp: {value}")]
    InvalidTimestamp { value: String },
}

impl CacheError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
