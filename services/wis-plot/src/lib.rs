//! WIS ocean wave hindcast retrieval and plotting.
//!
//! Fetches monthly station files from the USACE WIS THREDDS archive,
//! aligns them on a UTC time axis and writes the three-panel station
//! chart:
//! - One locator per calendar month of the requested range
//! - HTTP download or direct OPeNDAP access
//! - Optional clipping to the requested dates
//! - SVG or PNG output

pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod pipeline;
pub mod source;

pub use config::{ConfigOverrides, LoadMode, RunConfig};
pub use error::{FetchError, LoadError, LoadResult};
pub use pipeline::{run, RunSummary};
pub use source::{source_for, HttpSource, OpendapSource, WaveSource};
