//! Error types for catalog loading and batch processing.

use thiserror::Error;

/// Failure to build the region catalog. Always fatal for a run.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{record}: missing required field '{field}'")]
    MissingField {
        record: String,
        field: &'static str,
    },

    #[error("{record}: ring {ring} has {points} point(s), at least 2 required")]
    ShortRing {
        record: String,
        ring: usize,
        points: usize,
    },

    #[error("{record}: invalid coordinate '{value}'")]
    InvalidCoordinate { record: String, value: String },

    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid catalog pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while reading or writing a batch of coordinate rows.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
