//! Stroke errors.

use thiserror::Error;

/// Errors returned by stroke ingestion and deserialization.
#[derive(Debug, Error)]
pub enum StrokeError {
    /// An insert would overwrite points that are already committed.
    #[error("Index conflict: insert at {index} overlaps {len} committed points")]
    IndexConflict { index: usize, len: usize },
    #[error("Malformed stroke data: {0}")]
    Malformed(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for stroke operations.
pub type StrokeResult<T> = Result<T, StrokeError>;
