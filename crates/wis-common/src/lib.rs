//! Common types shared across the WIS wave plotting crates.

pub mod dataset;
pub mod error;
pub mod locator;
pub mod station;
pub mod time;

pub use dataset::WaveDataset;
pub use error::{WisError, WisResult};
pub use locator::{ArchiveAccess, LocatorBuilder};
pub use station::StationConfig;
pub use time::{DateRange, NearestMatch, TimeIndexWindow, TimeUnits, YearMonth};
