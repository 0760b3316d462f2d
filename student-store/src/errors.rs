//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for student-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Underlying sled tree errors (open, read, flush).
    #[error("store error: {0}")]
    Store(#[from] sled::Error),

    /// JSON (de)serialization of stored documents.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
