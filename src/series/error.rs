//! Series error types
//!
//! Defines all errors that can occur while generating or validating a series.

use thiserror::Error;

use super::types::Column;

/// Errors that can occur in the series layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// A generated value fell outside its plausibility range.
    /// The whole batch is discarded when this happens.
    #[error("{} data contains {} values", .column.noun(), .column.violation())]
    OutOfRange {
        column: Column,
        index: usize,
        value: f64,
    },

    /// Required columns are absent from the frame
    #[error("Missing required columns: {0:?}")]
    MissingColumns(Vec<String>),

    /// The series holds no samples
    #[error("Series contains no samples")]
    Empty,

    /// Generator parameters cannot produce a series
    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for series operations
pub type SeriesResult<T> = Result<T, SeriesError>;
