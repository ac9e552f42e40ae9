//! Run configuration.
//!
//! Loaded from a YAML file (see `config/wis-plot.yaml`), then overridden
//! by command-line flags. Every field has a default, so an empty file or
//! no file at all gives the Jeffreys Ledge January to April 2008 run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wis_common::{ArchiveAccess, DateRange, LocatorBuilder, StationConfig, WisResult};
use wis_netcdf::WaveVariables;

use crate::fetch::FetchConfig;

/// Default location of the run configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/wis-plot.yaml";

/// How many monthly files make up the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Only the month containing the start date
    Single,
    /// Every month touched by the range, concatenated
    #[default]
    Aggregate,
}

/// Immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub station: StationConfig,
    /// `YYYYMMDD`
    pub start_date: String,
    /// `YYYYMMDD`, inclusive
    pub end_date: String,
    pub mode: LoadMode,
    pub access: ArchiveAccess,
    /// Overrides the access mode's THREDDS endpoint
    pub base_url: Option<String>,
    pub direction_variable: String,
    /// Slice the loaded series to the requested dates
    pub clip_to_range: bool,
    /// Chart file, `.png` or `.svg`
    pub output: Option<PathBuf>,
    pub request_timeout_secs: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            station: StationConfig::default(),
            start_date: "20080101".to_string(),
            end_date: "20080430".to_string(),
            mode: LoadMode::Aggregate,
            access: ArchiveAccess::Http,
            base_url: None,
            direction_variable: wis_netcdf::variables::WAVE_MEAN_DIRECTION.to_string(),
            clip_to_range: true,
            output: None,
            request_timeout_secs: 300,
        }
    }
}

impl RunConfig {
    /// Load a run configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: RunConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(station = %config.station.station_id, path = %path.display(), "Loaded run config");
        Ok(config)
    }

    /// Load `path` if given, else the default file when it exists, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    debug!("No run config file, using built-in defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn date_range(&self) -> WisResult<DateRange> {
        DateRange::parse(&self.start_date, &self.end_date)
    }

    pub fn locator_builder(&self) -> LocatorBuilder {
        match &self.base_url {
            Some(base) => LocatorBuilder::new(base.as_str()),
            None => LocatorBuilder::for_access(self.access),
        }
    }

    pub fn variables(&self) -> WaveVariables {
        WaveVariables::default().with_direction(self.direction_variable.as_str())
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchConfig::default()
        }
    }

    /// Configured output, or `wis_<station>_<start>_<end>.png`.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "wis_{}_{}_{}.png",
                self.station.station_id, self.start_date, self.end_date
            ))
        })
    }
}

/// Command-line overrides for [`RunConfig`]. Unset flags leave the file value.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigOverrides {
    /// WIS station id (e.g. 44098)
    #[arg(long)]
    pub station: Option<String>,

    /// Archive region (e.g. Atlantic, Pacific, GulfOfMexico)
    #[arg(long)]
    pub region: Option<String>,

    /// Companion buoy id shown in the chart heading
    #[arg(long)]
    pub companion: Option<String>,

    /// Station display name, used when the data carries no title
    #[arg(long)]
    pub name: Option<String>,

    /// Start date, YYYYMMDD
    #[arg(long)]
    pub start: Option<String>,

    /// End date, YYYYMMDD (inclusive)
    #[arg(long)]
    pub end: Option<String>,

    /// Single month or aggregate over the range
    #[arg(long, value_enum)]
    pub mode: Option<LoadMode>,

    /// Archive access: http or opendap
    #[arg(long)]
    pub access: Option<ArchiveAccess>,

    /// Archive base URL, replacing the THREDDS endpoint
    #[arg(long, env = "WIS_BASE_URL")]
    pub base_url: Option<String>,

    /// Direction variable to read (waveMeanDirection or waveDirection)
    #[arg(long)]
    pub direction_variable: Option<String>,

    /// Plot everything loaded instead of clipping to the requested dates
    #[arg(long)]
    pub no_clip: bool,

    /// Output chart file (.png or .svg)
    #[arg(short, long, env = "WIS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(self, mut config: RunConfig) -> RunConfig {
        if let Some(v) = self.station {
            config.station.station_id = v;
        }
        if let Some(v) = self.region {
            config.station.region = v;
        }
        if let Some(v) = self.companion {
            config.station.companion_id = v;
        }
        if let Some(v) = self.name {
            config.station.display_name = v;
        }
        if let Some(v) = self.start {
            config.start_date = v;
        }
        if let Some(v) = self.end {
            config.end_date = v;
        }
        if let Some(v) = self.mode {
            config.mode = v;
        }
        if let Some(v) = self.access {
            config.access = v;
        }
        if self.base_url.is_some() {
            config.base_url = self.base_url;
        }
        if let Some(v) = self.direction_variable {
            config.direction_variable = v;
        }
        if self.no_clip {
            config.clip_to_range = false;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        if let Some(v) = self.timeout_secs {
            config.request_timeout_secs = v;
        }
        config
    }
}
