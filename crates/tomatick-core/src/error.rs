//! Core error types for tomatick-core.
//!
//! The engine itself has no fatal error conditions: malformed persisted
//! state falls back to defaults, out-of-range input is clamped, and
//! redundant operation calls are no-ops. Errors only surface from the
//! storage boundary.

use thiserror::Error;

/// Core error type for tomatick-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value store errors
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
