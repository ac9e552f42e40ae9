//! Single-file and aggregate dataset loading.

use tracing::{info, warn};
use wis_common::{WaveDataset, WisError};
use wis_netcdf::WaveVariables;

use crate::config::LoadMode;
use crate::error::LoadResult;
use crate::source::WaveSource;

/// Load according to `mode`. Single mode reads only the first locator.
pub async fn load(
    mode: LoadMode,
    source: &dyn WaveSource,
    locators: &[String],
    variables: &WaveVariables,
) -> LoadResult<WaveDataset> {
    match mode {
        LoadMode::Single => {
            let locator = locators.first().ok_or(WisError::EmptySeries)?;
            load_single(source, locator, variables).await
        }
        LoadMode::Aggregate => load_aggregate(source, locators, variables).await,
    }
}

/// Open one monthly file.
pub async fn load_single(
    source: &dyn WaveSource,
    locator: &str,
    variables: &WaveVariables,
) -> LoadResult<WaveDataset> {
    info!(source = source.name(), locator = %locator, "Opening station file");
    let dataset = source.open(locator, variables).await?;
    info!(samples = dataset.len(), "Loaded station file");
    Ok(dataset)
}

/// Open every monthly file in order and concatenate along time.
///
/// Parts are joined as-is: overlapping or out-of-order months are kept
/// and only reported.
pub async fn load_aggregate(
    source: &dyn WaveSource,
    locators: &[String],
    variables: &WaveVariables,
) -> LoadResult<WaveDataset> {
    let total = locators.len();
    let mut parts = Vec::with_capacity(total);

    for (i, locator) in locators.iter().enumerate() {
        info!(
            source = source.name(),
            part = i + 1,
            total,
            locator = %locator,
            "Opening monthly file"
        );
        parts.push(source.open(locator, variables).await?);
    }

    let combined = WaveDataset::concat(parts)?;

    if !combined.is_time_ordered() {
        warn!(
            samples = combined.len(),
            "Concatenated series is not in time order; keeping every sample"
        );
    }

    info!(samples = combined.len(), files = total, "Aggregated monthly files");
    Ok(combined)
}
