//! Error types for WIS wave data handling.

use thiserror::Error;

/// Result type alias using WisError.
pub type WisResult<T> = Result<T, WisError>;

/// Errors raised while building configuration or aligning wave series.
#[derive(Debug, Error)]
pub enum WisError {
    #[error("Invalid date '{0}': expected YYYYMMDD")]
    InvalidDate(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Invalid time units: {0}")]
    InvalidTimeUnits(String),

    #[error("Time value {0} is outside the representable calendar range")]
    TimeOutOfRange(i64),

    #[error("Series is empty")]
    EmptySeries,

    #[error("Series length mismatch: '{variable}' has {actual} samples, expected {expected}")]
    LengthMismatch {
        variable: String,
        expected: usize,
        actual: usize,
    },

    #[error("Metadata absent: {0}")]
    MetadataAbsent(String),
}
