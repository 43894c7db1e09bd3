//! Error types for shift-engine operations.

use thiserror::Error;

/// Reasons a vacation request is rejected before any state is touched.
///
/// Checks run in declaration order; the first failing check is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("vacation label must not be empty")]
    EmptyLabel,

    #[error("vacation start and end dates are required")]
    MissingDate,

    #[error("vacation start {start} is after end {end}")]
    InvertedRange { start: String, end: String },
}

/// A date string that is not a canonical `YYYY-MM-DD` calendar date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected YYYY-MM-DD, got {0:?}")]
    SegmentCount(String),

    #[error("non-numeric date segment in {0:?}")]
    NonNumeric(String),

    #[error("no such calendar day: {0:?}")]
    ImpossibleDate(String),
}

/// Failures of the key-value persistence backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage read failed for key {key}: {message}")]
    Read { key: String, message: String },

    #[error("storage write failed for key {key}: {message}")]
    Write { key: String, message: String },

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize vacations: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors surfaced by vacation mutations on the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid vacation: {0}")]
    Validation(#[from] ValidationError),

    #[error("no vacation with id {0}")]
    NotFound(String),

    #[error("vacation change was not saved: {0}")]
    Persistence(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
