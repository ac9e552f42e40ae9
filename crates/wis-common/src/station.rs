//! Station identification.

use serde::{Deserialize, Serialize};

/// Identifiers for a WIS hindcast station.
///
/// `station_id` is the WIS/NDBC station number used in archive paths,
/// `companion_id` the matching CDIP buoy number shown in chart headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationConfig {
    pub station_id: String,
    pub region: String,
    #[serde(default)]
    pub companion_id: String,
    #[serde(default)]
    pub display_name: String,
}

impl StationConfig {
    pub fn new(
        station_id: impl Into<String>,
        region: impl Into<String>,
        companion_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            region: region.into(),
            companion_id: companion_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Station label used in chart headings, e.g. `STN 44098 (163)`.
    pub fn label(&self) -> String {
        if self.companion_id.is_empty() {
            format!("STN {}", self.station_id)
        } else {
            format!("STN {} ({})", self.station_id, self.companion_id)
        }
    }
}

impl Default for StationConfig {
    /// Jeffreys Ledge, Gulf of Maine.
    fn default() -> Self {
        Self::new("44098", "Atlantic", "163", "Jeffreys Ledge")
    }
}
