//! Access paths to the WIS archive.

use async_trait::async_trait;
use tracing::{debug, instrument};
use wis_common::{ArchiveAccess, WaveDataset};
use wis_netcdf::{load_wave_netcdf_from_bytes, open_wave_dataset, WaveVariables};

use crate::error::{LoadError, LoadResult};
use crate::fetch::{FetchConfig, HttpFetcher};

/// Something that can turn a monthly locator into a wave dataset.
#[async_trait]
pub trait WaveSource: Send + Sync {
    /// Open one locator and read its wave series.
    async fn open(&self, locator: &str, variables: &WaveVariables) -> LoadResult<WaveDataset>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Downloads from the THREDDS file server, then parses the body.
pub struct HttpSource {
    fetcher: HttpFetcher,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> LoadResult<Self> {
        Ok(Self {
            fetcher: HttpFetcher::new(config)?,
        })
    }
}

#[async_trait]
impl WaveSource for HttpSource {
    #[instrument(skip(self, variables))]
    async fn open(&self, locator: &str, variables: &WaveVariables) -> LoadResult<WaveDataset> {
        let body = self.fetcher.fetch(locator).await?;

        let label = locator.to_string();
        let variables = variables.clone();
        let dataset = tokio::task::spawn_blocking(move || {
            load_wave_netcdf_from_bytes(&body, &label, &variables)
        })
        .await
        .map_err(|e| LoadError::Task(e.to_string()))??;

        debug!(samples = dataset.len(), "Parsed downloaded file");
        Ok(dataset)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Opens OPeNDAP URLs (or local paths) directly through libnetcdf.
#[derive(Debug, Default)]
pub struct OpendapSource;

#[async_trait]
impl WaveSource for OpendapSource {
    #[instrument(skip(self, variables))]
    async fn open(&self, locator: &str, variables: &WaveVariables) -> LoadResult<WaveDataset> {
        let locator = locator.to_string();
        let variables = variables.clone();

        // libnetcdf blocks for the whole DAP transfer
        let dataset = tokio::task::spawn_blocking(move || open_wave_dataset(&locator, &variables))
            .await
            .map_err(|e| LoadError::Task(e.to_string()))??;

        Ok(dataset)
    }

    fn name(&self) -> &'static str {
        "opendap"
    }
}

/// Source matching the configured access mode.
pub fn source_for(access: ArchiveAccess, config: &FetchConfig) -> LoadResult<Box<dyn WaveSource>> {
    Ok(match access {
        ArchiveAccess::Http => Box::new(HttpSource::new(config)?),
        ArchiveAccess::Opendap => Box::new(OpendapSource),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_for_access() {
        let config = FetchConfig::default();
        assert_eq!(source_for(ArchiveAccess::Http, &config).unwrap().name(), "http");
        assert_eq!(
            source_for(ArchiveAccess::Opendap, &config).unwrap().name(),
            "opendap"
        );
    }
}
