//! core::error
//!
//! Error taxonomy for the plate engine.
//!
//! Absence is not an error: single lookups return `Option`, and removing or
//! retaining keys that are not present is a no-op. Only malformed input,
//! navigation on an empty container and plate identity clashes surface as
//! [`PlateError`].

use thiserror::Error;

/// Errors from key construction, parsing and container navigation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlateError {
    #[error("invalid coordinate: row {row}, column {column} (row must be >= 0, column >= 1)")]
    InvalidCoordinate { row: i64, column: i64 },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("'{0}' is empty")]
    EmptyCollection(String),

    #[error("unknown plate type: {0}")]
    UnknownPlateType(String),

    #[error("plate {0} is already in the stack")]
    DuplicatePlate(String),
}

impl PlateError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        PlateError::Parse(message.into())
    }

    pub(crate) fn empty(label: &str) -> Self {
        PlateError::EmptyCollection(label.to_string())
    }
}

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, PlateError>;
