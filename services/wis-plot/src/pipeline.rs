//! One run: locators, load, align, render, write.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{info, instrument, warn};
use wis_common::{DateRange, TimeIndexWindow, WaveDataset, WisResult};
use wis_renderer::{render_png, render_svg, ChartConfig, ChartTitle};

use crate::config::{LoadMode, RunConfig};
use crate::loader;
use crate::source::WaveSource;

/// Chart file formats, chosen by output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Png,
    Svg,
}

impl ChartFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => Ok(ChartFormat::Png),
            Some("svg") => Ok(ChartFormat::Svg),
            _ => bail!(
                "Unsupported chart format for {}: expected .png or .svg",
                path.display()
            ),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub files: usize,
    /// Samples loaded before clipping
    pub loaded_samples: usize,
    /// Samples drawn on the chart
    pub plotted_samples: usize,
}

/// Execute a run against `source`.
#[instrument(skip_all, fields(station = %config.station.station_id))]
pub async fn run(config: &RunConfig, source: &dyn WaveSource) -> Result<RunSummary> {
    let range = config.date_range()?;
    let output = config.output_path();
    // Fail on a bad extension before any downloading
    let format = ChartFormat::from_path(&output)?;

    let locators = config
        .locator_builder()
        .locators(&config.station, &range);

    info!(
        start = %range.start(),
        end = %range.end(),
        months = locators.len(),
        mode = ?config.mode,
        "Retrieving WIS hindcast"
    );

    let dataset = loader::load(config.mode, source, &locators, &config.variables())
        .await
        .context("Failed to load wave data")?;
    let loaded_samples = dataset.len();

    let dataset = if config.clip_to_range {
        clip_to_range(&dataset, &range)?
    } else {
        dataset
    };

    let title = ChartTitle::for_dataset(&dataset, &config.station, &range);
    let chart = ChartConfig::default();

    let bytes = match format {
        ChartFormat::Svg => render_svg(&dataset, &title, &range, &chart)?.into_bytes(),
        ChartFormat::Png => render_png(&dataset, &title, &range, &chart)?,
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    tokio::fs::write(&output, &bytes)
        .await
        .with_context(|| format!("Failed to write chart: {}", output.display()))?;

    info!(
        path = %output.display(),
        bytes = bytes.len(),
        samples = dataset.len(),
        "Chart written"
    );

    Ok(RunSummary {
        output,
        files: match config.mode {
            LoadMode::Single => 1,
            LoadMode::Aggregate => locators.len(),
        },
        loaded_samples,
        plotted_samples: dataset.len(),
    })
}

/// Slice `dataset` to the samples nearest the requested start and end.
///
/// A bound outside the loaded series is clamped to its edge with a warning.
pub fn clip_to_range(dataset: &WaveDataset, range: &DateRange) -> WisResult<WaveDataset> {
    let window = TimeIndexWindow::locate(dataset.times(), range)?;

    if !window.start.in_range {
        warn!(
            requested = %range.start_datetime(),
            distance_secs = window.start.distance_secs,
            "Start date outside loaded data, clamped to first sample"
        );
    }
    if !window.end.in_range {
        warn!(
            requested = %range.end_datetime(),
            distance_secs = window.end.distance_secs,
            "End date outside loaded data, clamped to last sample"
        );
    }

    Ok(dataset.slice(&window))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_format_from_extension() {
        assert_eq!(ChartFormat::from_path(Path::new("a.png")).unwrap(), ChartFormat::Png);
        assert_eq!(ChartFormat::from_path(Path::new("out/a.SVG")).unwrap(), ChartFormat::Svg);
        assert!(ChartFormat::from_path(Path::new("a.jpg")).is_err());
        assert!(ChartFormat::from_path(Path::new("chart")).is_err());
    }
}
