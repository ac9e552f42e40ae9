//! Error types for retrieving and loading station files.

use thiserror::Error;
use wis_common::WisError;
use wis_netcdf::NetCdfError;

pub type LoadResult<T> = Result<T, LoadError>;

/// HTTP retrieval errors.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure, non-success status or truncated body
    #[error("Resource unreachable: {url}: {reason}")]
    ResourceUnreachable { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// Errors raised while loading a dataset from the archive.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    NetCdf(#[from] NetCdfError),

    #[error(transparent)]
    Series(#[from] WisError),

    #[error("NetCDF read task failed: {0}")]
    Task(String),
}

impl LoadError {
    /// Whether the archive could not be reached at all, as opposed to a
    /// file that was read but had unexpected content.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            LoadError::Fetch(FetchError::ResourceUnreachable { .. })
                | LoadError::NetCdf(NetCdfError::ResourceUnreachable { .. })
        )
    }
}
