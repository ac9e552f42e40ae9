//! Calendar handling and time alignment for hindcast series.
//!
//! WIS files store `time` as integer offsets from an epoch declared in the
//! variable's CF `units` attribute (in practice seconds since 1970-01-01).
//! Everything here works in UTC; no other zone is considered.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{WisError, WisResult};

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Returns `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

/// Parse a compact `YYYYMMDD` date.
pub fn parse_compact_date(s: &str) -> WisResult<NaiveDate> {
    let s = s.trim();
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WisError::InvalidDate(s.to_string()));
    }

    let year: i32 = s[0..4]
        .parse()
        .map_err(|_| WisError::InvalidDate(s.to_string()))?;
    let month: u32 = s[4..6]
        .parse()
        .map_err(|_| WisError::InvalidDate(s.to_string()))?;
    let day: u32 = s[6..8]
        .parse()
        .map_err(|_| WisError::InvalidDate(s.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| WisError::InvalidDate(s.to_string()))
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Requested calendar window, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> WisResult<Self> {
        if start > end {
            return Err(WisError::InvalidDateRange {
                start: start.format("%Y%m%d").to_string(),
                end: end.format("%Y%m%d").to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse from two `YYYYMMDD` strings.
    pub fn parse(start: &str, end: &str) -> WisResult<Self> {
        Self::new(parse_compact_date(start)?, parse_compact_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_datetime(&self) -> DateTime<Utc> {
        start_of_day(self.start)
    }

    /// Midnight at the start of the end date, used as the upper lookup target.
    pub fn end_datetime(&self) -> DateTime<Utc> {
        start_of_day(self.end)
    }

    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Every calendar month touched by the range, ascending, both ends included.
    pub fn months(&self) -> Vec<YearMonth> {
        let last = YearMonth::of(self.end);
        let mut months = Vec::new();
        let mut current = YearMonth::of(self.start);
        while current <= last {
            months.push(current);
            current = current.next();
        }
        months
    }

    /// `YYYYMMDD - YYYYMMDD`, as shown under chart titles.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d")
        )
    }
}

/// Epoch and step of a numeric time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    pub epoch: DateTime<Utc>,
    pub step_secs: i64,
}

impl Default for TimeUnits {
    /// Seconds since 1970-01-01T00:00:00Z.
    fn default() -> Self {
        Self {
            epoch: DateTime::<Utc>::UNIX_EPOCH,
            step_secs: 1,
        }
    }
}

impl TimeUnits {
    /// Parse a CF-style `"<unit> since <reference>"` string.
    ///
    /// Supported units are seconds, minutes, hours and days. The reference
    /// may be a date or a date-time, optionally suffixed with `Z` or `UTC`.
    pub fn parse_cf(units: &str) -> WisResult<Self> {
        let lowered = units.trim().to_ascii_lowercase();
        let (unit, reference) = lowered
            .split_once(" since ")
            .ok_or_else(|| WisError::InvalidTimeUnits(units.to_string()))?;

        let step_secs = match unit.trim() {
            "seconds" | "second" | "secs" | "sec" | "s" => 1,
            "minutes" | "minute" | "mins" | "min" => 60,
            "hours" | "hour" | "hrs" | "hr" | "h" => 3_600,
            "days" | "day" | "d" => 86_400,
            _ => return Err(WisError::InvalidTimeUnits(units.to_string())),
        };

        let reference = reference.trim();
        let reference = reference.strip_suffix("utc").unwrap_or(reference).trim();
        let reference = reference.strip_suffix('z').unwrap_or(reference);
        let reference = reference.replace('t', " ");

        let epoch = parse_reference(&reference)
            .ok_or_else(|| WisError::InvalidTimeUnits(units.to_string()))?;

        Ok(Self { epoch, step_secs })
    }

    /// Convert a raw sample value to a UTC timestamp: `epoch + value * step`.
    pub fn to_utc(&self, value: i64) -> WisResult<DateTime<Utc>> {
        value
            .checked_mul(self.step_secs)
            .and_then(Duration::try_seconds)
            .and_then(|offset| self.epoch.checked_add_signed(offset))
            .ok_or(WisError::TimeOutOfRange(value))
    }

    /// Convert a whole time axis.
    pub fn convert_all(&self, values: &[i64]) -> WisResult<Vec<DateTime<Utc>>> {
        values.iter().map(|&v| self.to_utc(v)).collect()
    }
}

fn parse_reference(s: &str) -> Option<DateTime<Utc>> {
    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}

/// Result of a nearest-value search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestMatch {
    /// Index of the closest sample; first one wins on ties.
    pub index: usize,
    /// Absolute distance between that sample and the target, in seconds.
    pub distance_secs: u64,
    /// Whether the target lay between the earliest and latest sample.
    /// `false` means the match was clamped to a series boundary.
    pub in_range: bool,
}

impl NearestMatch {
    pub fn within(&self, tolerance: Duration) -> bool {
        self.distance_secs <= tolerance.num_seconds().max(0) as u64
    }
}

fn nearest_in<I>(values: I, target: i64) -> Option<NearestMatch>
where
    I: IntoIterator<Item = i64>,
{
    let mut values = values.into_iter();
    let first = values.next()?;

    let mut best_index = 0;
    let mut best_distance = first.abs_diff(target);
    let (mut lo, mut hi) = (first, first);

    for (i, value) in values.enumerate() {
        let distance = value.abs_diff(target);
        // Strict comparison keeps the earliest index on equidistant samples
        if distance < best_distance {
            best_index = i + 1;
            best_distance = distance;
        }
        lo = lo.min(value);
        hi = hi.max(value);
    }

    Some(NearestMatch {
        index: best_index,
        distance_secs: best_distance,
        in_range: lo <= target && target <= hi,
    })
}

/// Nearest-index lookup over raw sample values. Linear scan.
pub fn nearest_index_raw(series: &[i64], target: i64) -> Option<NearestMatch> {
    nearest_in(series.iter().copied(), target)
}

/// Nearest-index lookup over calendar timestamps.
pub fn nearest_index(series: &[DateTime<Utc>], target: DateTime<Utc>) -> Option<NearestMatch> {
    nearest_in(series.iter().map(|t| t.timestamp()), target.timestamp())
}

/// Index bounds of a requested date range within a loaded series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeIndexWindow {
    pub start: NearestMatch,
    pub end: NearestMatch,
}

impl TimeIndexWindow {
    /// Locate both bounds of `range` by nearest-value search.
    pub fn locate(series: &[DateTime<Utc>], range: &DateRange) -> WisResult<Self> {
        let start = nearest_index(series, range.start_datetime()).ok_or(WisError::EmptySeries)?;
        let end = nearest_index(series, range.end_datetime()).ok_or(WisError::EmptySeries)?;
        Ok(Self { start, end })
    }

    /// Inclusive index range covered by the window.
    pub fn indices(&self) -> RangeInclusive<usize> {
        let lo = self.start.index.min(self.end.index);
        let hi = self.start.index.max(self.end.index);
        lo..=hi
    }

    pub fn len(&self) -> usize {
        self.indices().count()
    }

    /// A located window always holds at least one sample.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True when either bound fell outside the loaded series.
    pub fn is_clamped(&self) -> bool {
        !self.start.in_range || !self.end.in_range
    }
}
