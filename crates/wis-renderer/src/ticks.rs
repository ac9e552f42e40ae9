//! Axis tick placement.
//!
//! Time ticks follow the requested window: a sub-month request gets
//! day-of-month ticks every 5 days, anything longer gets one tick per
//! month start.

use chrono::{DateTime, Datelike, Utc};
use wis_common::time::start_of_day;
use wis_common::{DateRange, YearMonth};

/// Fixed metres to feet conversion used by the secondary height axis.
pub const METERS_TO_FEET: f64 = 3.28084;

/// Longest request, in days, that still gets day ticks.
pub const DAY_TICK_MAX_SPAN: i64 = 31;

/// Spacing of day ticks, counted from the first of each month.
const DAY_TICK_STEP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMode {
    /// Ticks on days 1, 6, 11, ... labelled `%-d`
    Day,
    /// Ticks on the first of each month labelled `%m/%d`
    Month,
}

impl TickMode {
    pub fn for_range(range: &DateRange) -> Self {
        if range.span_days() <= DAY_TICK_MAX_SPAN {
            TickMode::Day
        } else {
            TickMode::Month
        }
    }

    /// Label shown under the time axis.
    pub fn axis_label(&self) -> &'static str {
        match self {
            TickMode::Day => "Day",
            TickMode::Month => "Month",
        }
    }

    fn format(&self) -> &'static str {
        match self {
            TickMode::Day => "%-d",
            TickMode::Month => "%m/%d",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTick {
    pub time: DateTime<Utc>,
    pub label: String,
}

/// Ticks between `start` and `end` inclusive.
pub fn time_ticks(mode: TickMode, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<TimeTick> {
    let candidates: Vec<DateTime<Utc>> = match mode {
        TickMode::Day => start
            .date_naive()
            .iter_days()
            .take_while(|d| *d <= end.date_naive())
            .filter(|d| d.day() % DAY_TICK_STEP == 1)
            .map(start_of_day)
            .collect(),
        TickMode::Month => {
            let last = YearMonth::of(end.date_naive());
            let mut month = YearMonth::of(start.date_naive());
            let mut starts = Vec::new();
            while month <= last {
                if let Some(first) = month.first_day() {
                    starts.push(start_of_day(first));
                }
                month = month.next();
            }
            starts
        }
    };

    candidates
        .into_iter()
        .filter(|t| *t >= start && *t <= end)
        .map(|time| TimeTick {
            time,
            label: time.format(mode.format()).to_string(),
        })
        .collect()
}

/// Evenly spaced values from `min` to `max` inclusive.
pub fn value_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || max < min {
        return Vec::new();
    }
    let count = ((max - min) / step + 1e-9).floor() as usize;
    (0..=count).map(|i| min + i as f64 * step).collect()
}

/// Feet ticks for the secondary height axis as `(position_m, label)`.
///
/// Labels run 0 to `max_feet` in `step_feet` increments; positions are
/// the equivalent heights in metres.
pub fn feet_ticks(max_feet: u32, step_feet: u32) -> Vec<(f64, String)> {
    (0..=max_feet)
        .step_by(step_feet.max(1) as usize)
        .map(|ft| (ft as f64 / METERS_TO_FEET, ft.to_string()))
        .collect()
}
