//! Generators for synthetic hindcast series.
//!
//! Values follow smooth, deterministic patterns inside realistic ranges so
//! tests can assert on exact samples.

/// Seconds in one hour, the WIS output interval.
pub const HOUR: i64 = 3_600;

/// Raw time axis: `count` hourly samples starting at `start_unix`.
pub fn hourly_times(start_unix: i64, count: usize) -> Vec<i64> {
    (0..count as i64).map(|i| start_unix + i * HOUR).collect()
}

/// Significant wave heights between 0.5 and 3.5 m with a daily swell cycle.
pub fn synthetic_heights(count: usize) -> Vec<f32> {
    (0..count)
        .map(|i| {
            let phase = i as f32 / 24.0 * std::f32::consts::TAU;
            2.0 + 1.5 * phase.sin()
        })
        .collect()
}

/// Peak periods between 4 and 16 s.
pub fn synthetic_periods(count: usize) -> Vec<f32> {
    (0..count)
        .map(|i| {
            let phase = i as f32 / 48.0 * std::f32::consts::TAU;
            10.0 + 6.0 * phase.cos()
        })
        .collect()
}

/// Mean directions stepping 15 degrees per sample, wrapped to [0, 360).
pub fn synthetic_directions(count: usize) -> Vec<f32> {
    (0..count).map(|i| (i as f32 * 15.0) % 360.0).collect()
}

/// The four columns of a monthly station file.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveColumns {
    pub time: Vec<i64>,
    pub height: Vec<f32>,
    pub period: Vec<f32>,
    pub direction: Vec<f32>,
}

/// Hourly synthetic columns starting at `start_unix`.
pub fn wave_columns(start_unix: i64, count: usize) -> WaveColumns {
    WaveColumns {
        time: hourly_times(start_unix, count),
        height: synthetic_heights(count),
        period: synthetic_periods(count),
        direction: synthetic_directions(count),
    }
}
