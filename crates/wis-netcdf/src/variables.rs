//! Variable names read from WIS station files.

/// Time axis variable.
pub const TIME: &str = "time";
/// Significant wave height (m).
pub const WAVE_HS: &str = "waveHs";
/// Peak period (s).
pub const WAVE_TP: &str = "waveTp";
/// Mean wave direction (deg), current archive naming.
pub const WAVE_MEAN_DIRECTION: &str = "waveMeanDirection";
/// Wave direction (deg), naming seen in older single-file reads.
pub const WAVE_DIRECTION: &str = "waveDirection";
/// Global attribute holding the dataset title.
pub const TITLE_ATTRIBUTE: &str = "title";

/// Names of the four variables making up a wave dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveVariables {
    pub time: String,
    pub height: String,
    pub period: String,
    pub direction: String,
}

impl Default for WaveVariables {
    fn default() -> Self {
        Self {
            time: TIME.to_string(),
            height: WAVE_HS.to_string(),
            period: WAVE_TP.to_string(),
            direction: WAVE_MEAN_DIRECTION.to_string(),
        }
    }
}

impl WaveVariables {
    /// Read direction from `name` instead of `waveMeanDirection`.
    pub fn with_direction(mut self, name: impl Into<String>) -> Self {
        self.direction = name.into();
        self
    }
}
