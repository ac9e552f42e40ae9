//! Error types for WIS NetCDF reading.

use thiserror::Error;
use wis_common::WisError;

/// Result type for NetCDF reader operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF reading.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Remote or local resource could not be opened
    #[error("Resource unreachable: {locator}: {reason}")]
    ResourceUnreachable { locator: String, reason: String },

    /// Expected variable missing from the file
    #[error("Variable absent: {0}")]
    VariableAbsent(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Series could not be aligned
    #[error(transparent)]
    Series(#[from] WisError),
}
