//! In-memory wave parameter series.

use chrono::{DateTime, Utc};

use crate::error::{WisError, WisResult};
use crate::time::TimeIndexWindow;

/// Aligned time, height, period and direction series for one station.
///
/// All four series have the same length. Missing values are `NaN`.
/// The dataset is built once per run and never modified afterwards;
/// operations such as [`WaveDataset::slice`] return a new dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveDataset {
    times: Vec<DateTime<Utc>>,
    height_m: Vec<f32>,
    period_s: Vec<f32>,
    direction_deg: Vec<f32>,
    title: Option<String>,
    direction_variable: String,
    sources: Vec<String>,
}

impl WaveDataset {
    /// Build a dataset, checking that every series matches the time axis.
    pub fn new(
        times: Vec<DateTime<Utc>>,
        height_m: Vec<f32>,
        period_s: Vec<f32>,
        direction_deg: Vec<f32>,
    ) -> WisResult<Self> {
        let expected = times.len();
        for (variable, actual) in [
            ("height", height_m.len()),
            ("period", period_s.len()),
            ("direction", direction_deg.len()),
        ] {
            if actual != expected {
                return Err(WisError::LengthMismatch {
                    variable: variable.to_string(),
                    expected,
                    actual,
                });
            }
        }

        Ok(Self {
            times,
            height_m,
            period_s,
            direction_deg,
            title: None,
            direction_variable: String::new(),
            sources: Vec::new(),
        })
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_direction_variable(mut self, name: impl Into<String>) -> Self {
        self.direction_variable = name.into();
        self
    }

    pub fn with_source(mut self, locator: impl Into<String>) -> Self {
        self.sources.push(locator.into());
        self
    }

    /// Concatenate monthly parts along time, in the order given.
    ///
    /// No reconciliation happens: overlapping or gapped parts are kept as-is
    /// and the result length is the sum of the part lengths. The title of
    /// the first part carrying one is kept.
    pub fn concat(parts: Vec<WaveDataset>) -> WisResult<Self> {
        let mut parts = parts.into_iter();
        let mut combined = parts.next().ok_or(WisError::EmptySeries)?;

        for part in parts {
            combined.times.extend(part.times);
            combined.height_m.extend(part.height_m);
            combined.period_s.extend(part.period_s);
            combined.direction_deg.extend(part.direction_deg);
            combined.sources.extend(part.sources);
            if combined.title.is_none() {
                combined.title = part.title;
            }
            if combined.direction_variable.is_empty() {
                combined.direction_variable = part.direction_variable;
            }
        }

        Ok(combined)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn height_m(&self) -> &[f32] {
        &self.height_m
    }

    pub fn period_s(&self) -> &[f32] {
        &self.period_s
    }

    pub fn direction_deg(&self) -> &[f32] {
        &self.direction_deg
    }

    /// Dataset title attribute, or `MetadataAbsent` if the source had none.
    pub fn title(&self) -> WisResult<&str> {
        self.title
            .as_deref()
            .ok_or_else(|| WisError::MetadataAbsent("title".to_string()))
    }

    /// Name of the variable the direction series was read from.
    pub fn direction_variable(&self) -> &str {
        &self.direction_variable
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Earliest and latest timestamp, regardless of ordering.
    pub fn time_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let min = self.times.iter().min()?;
        let max = self.times.iter().max()?;
        Some((*min, *max))
    }

    /// Whether timestamps never decrease.
    pub fn is_time_ordered(&self) -> bool {
        self.times.windows(2).all(|w| w[0] <= w[1])
    }

    /// Copy of the samples covered by `window`.
    pub fn slice(&self, window: &TimeIndexWindow) -> Self {
        let range = window.indices();
        let end = (*range.end() + 1).min(self.len());
        let start = (*range.start()).min(end);

        Self {
            times: self.times[start..end].to_vec(),
            height_m: self.height_m[start..end].to_vec(),
            period_s: self.period_s[start..end].to_vec(),
            direction_deg: self.direction_deg[start..end].to_vec(),
            title: self.title.clone(),
            direction_variable: self.direction_variable.clone(),
            sources: self.sources.clone(),
        }
    }
}
