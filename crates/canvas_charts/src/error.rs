//! Error types for the canvas_charts crate

use thiserror::Error;

/// Errors that abort a chart draw before any primitive is issued
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The drawing surface could not be acquired or has no usable size
    #[error("Drawing surface unavailable")]
    SurfaceUnavailable,

    /// Null/empty data, non-finite cells, or a pie whose values do not sum above zero
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// A row whose value count differs from the first row
    #[error("Row {row} has {found} values, expected {expected}")]
    InconsistentRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Configuration that cannot produce a layout
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Serialization(err.to_string())
    }
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
