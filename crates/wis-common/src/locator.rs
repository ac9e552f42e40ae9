//! Archive locators for monthly WIS station files.
//!
//! Files live under
//! `<base>/<region>/ST<station>/<year>/WIS-ocean_waves_ST<station>_<year><month>.nc`.
//! Nothing here checks that a locator exists; failures surface when the
//! loader opens it.

use serde::{Deserialize, Serialize};

use crate::station::StationConfig;
use crate::time::{DateRange, YearMonth};

/// Root of the USACE CHL THREDDS server hosting the WIS hindcasts.
pub const THREDDS_ROOT: &str = "https://chlthredds.erdc.dren.mil/thredds";

/// How monthly files are retrieved from the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveAccess {
    /// OPeNDAP endpoint, opened directly by libnetcdf.
    Opendap,
    /// Plain HTTP download from the file server endpoint.
    #[default]
    Http,
}

impl ArchiveAccess {
    /// Default base URL for this access mode.
    pub fn base_url(&self) -> String {
        match self {
            ArchiveAccess::Opendap => format!("{}/dodsC/wis", THREDDS_ROOT),
            ArchiveAccess::Http => format!("{}/fileServer/wis", THREDDS_ROOT),
        }
    }
}

impl std::str::FromStr for ArchiveAccess {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "opendap" | "dap" => Ok(ArchiveAccess::Opendap),
            "http" | "fileserver" => Ok(ArchiveAccess::Http),
            other => Err(format!("unknown archive access mode: {}", other)),
        }
    }
}

/// Builds archive locators from station identifiers and months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorBuilder {
    base_url: String,
}

impl LocatorBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn for_access(access: ArchiveAccess) -> Self {
        Self::new(access.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `WIS-ocean_waves_ST44098_200801.nc`
    pub fn file_name(station_id: &str, month: YearMonth) -> String {
        format!("WIS-ocean_waves_ST{}_{}.nc", station_id, month)
    }

    /// Locator of one monthly file.
    pub fn locator(&self, station: &StationConfig, month: YearMonth) -> String {
        format!(
            "{}/{}/ST{}/{:04}/{}",
            self.base_url,
            station.region,
            station.station_id,
            month.year,
            Self::file_name(&station.station_id, month)
        )
    }

    /// One locator per calendar month of `range`, in ascending order.
    pub fn locators(&self, station: &StationConfig, range: &DateRange) -> Vec<String> {
        range
            .months()
            .into_iter()
            .map(|month| self.locator(station, month))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let builder = LocatorBuilder::new("http://localhost:8080/wis/");
        assert_eq!(builder.base_url(), "http://localhost:8080/wis");
    }

    #[test]
    fn test_access_from_str() {
        assert_eq!("OPeNDAP".parse::<ArchiveAccess>(), Ok(ArchiveAccess::Opendap));
        assert_eq!("http".parse::<ArchiveAccess>(), Ok(ArchiveAccess::Http));
        assert!("ftp".parse::<ArchiveAccess>().is_err());
    }

    #[test]
    fn test_opendap_locator() {
        let builder = LocatorBuilder::for_access(ArchiveAccess::Opendap);
        let month = YearMonth::new(2008, 12).unwrap();
        assert_eq!(
            builder.locator(&StationConfig::default(), month),
            "https://chlthredds.erdc.dren.mil/thredds/dodsC/wis/Atlantic/ST44098/2008/WIS-ocean_waves_ST44098_200812.nc"
        );
    }
}
