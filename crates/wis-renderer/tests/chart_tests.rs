//! Tests for the three-panel station chart.
//!
//! Covers:
//! - Title composition and fallback
//! - Tick mode selection by requested span
//! - NaN handling in lines and scatter
//! - PNG output dimensions

use chrono::{DateTime, TimeZone, Utc};
use test_utils::attributes::TITLE;
use test_utils::dates::{AGGREGATE_END, AGGREGATE_START, JAN_2008_UNIX, SHORT_END, SHORT_START};
use test_utils::{synthetic_directions, synthetic_heights, synthetic_periods};
use wis_common::{DateRange, StationConfig, WaveDataset};
use wis_renderer::{render_png, render_svg, ChartConfig, ChartTitle, RenderError};

// ============================================================================
// Helper functions
// ============================================================================

fn hourly(start_unix: i64, count: usize) -> Vec<DateTime<Utc>> {
    (0..count as i64)
        .map(|i| Utc.timestamp_opt(start_unix + i * 3_600, 0).unwrap())
        .collect()
}

fn dataset(start_unix: i64, count: usize) -> WaveDataset {
    WaveDataset::new(
        hourly(start_unix, count),
        synthetic_heights(count),
        synthetic_periods(count),
        synthetic_directions(count),
    )
    .unwrap()
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Width and height from the IHDR chunk.
fn png_dimensions(png: &[u8]) -> (u32, u32) {
    let w = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let h = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    (w, h)
}

// ============================================================================
// Titles
// ============================================================================

#[test]
fn test_title_from_dataset_attribute() {
    let ds = dataset(JAN_2008_UNIX, 24).with_title(Some(TITLE.to_string()));
    let range = DateRange::parse(AGGREGATE_START, AGGREGATE_END).unwrap();
    let title = ChartTitle::for_dataset(&ds, &StationConfig::default(), &range);

    assert_eq!(title.heading, "WIS Hindcast Wave Data: STN 44098 (163)");
    assert_eq!(title.subheading, "20080101 - 20080430");
}

#[test]
fn test_title_falls_back_to_display_name() {
    let ds = dataset(JAN_2008_UNIX, 24);
    let range = DateRange::parse(AGGREGATE_START, AGGREGATE_END).unwrap();
    let title = ChartTitle::for_dataset(&ds, &StationConfig::default(), &range);

    assert_eq!(title.heading, "Jeffreys Ledge: STN 44098 (163)");
}

#[test]
fn test_svg_carries_both_title_lines() {
    let ds = dataset(JAN_2008_UNIX, 48);
    let range = DateRange::parse(AGGREGATE_START, AGGREGATE_END).unwrap();
    let title = ChartTitle::new(TITLE, &StationConfig::default(), &range);
    let svg = render_svg(&ds, &title, &range, &ChartConfig::default()).unwrap();

    assert!(svg.contains(">WIS Hindcast Wave Data: STN 44098 (163)</text>"));
    assert!(svg.contains(">20080101 - 20080430</text>"));
    assert!(svg.contains(r#"width="1500" height="1000""#));
}

// ============================================================================
// Axes and ticks
// ============================================================================

#[test]
fn test_multi_month_uses_month_ticks() {
    // 2008-01-01 through 2008-04-29, hourly
    let ds = dataset(JAN_2008_UNIX, 24 * 120);
    let range = DateRange::parse(AGGREGATE_START, AGGREGATE_END).unwrap();
    let title = ChartTitle::new(TITLE, &StationConfig::default(), &range);
    let svg = render_svg(&ds, &title, &range, &ChartConfig::default()).unwrap();

    assert!(svg.contains(">Month</text>"));
    for label in ["01/01", "02/01", "03/01", "04/01"] {
        assert!(svg.contains(&format!(">{}</text>", label)), "missing {}", label);
    }
}

#[test]
fn test_sub_month_uses_day_ticks() {
    // 2008-09-05T00:00Z
    let start = 1_220_572_800;
    let ds = dataset(start, 24 * 20 + 1);
    let range = DateRange::parse(SHORT_START, SHORT_END).unwrap();
    let title = ChartTitle::new(TITLE, &StationConfig::default(), &range);
    let svg = render_svg(&ds, &title, &range, &ChartConfig::default()).unwrap();

    assert!(svg.contains(">Day</text>"));
    assert!(!svg.contains(">Month</text>"));
    for label in ["6", "11", "16", "21"] {
        assert!(svg.contains(&format!(">{}</text>", label)), "missing {}", label);
    }
    assert!(!svg.contains(">06</text>"));
}

#[test]
fn test_axis_labels_present() {
    let ds = dataset(JAN_2008_UNIX, 24);
    let range = DateRange::parse(AGGREGATE_START, AGGREGATE_END).unwrap();
    let title = ChartTitle::new(TITLE, &StationConfig::default(), &range);
    let svg = render_svg(&ds, &title, &range, &ChartConfig::default()).unwrap();

    for label in ["Hs(m)", "Hs(ft)", "Tp(s)", "Dmean(deg)"] {
        assert!(svg.contains(&format!(">{}</text>", label)), "missing {}", label);
    }
    // Feet axis runs 0..25
    assert!(svg.contains(">25</text>"));
    assert!(svg.contains("stroke-dasharray"));
}

// ============================================================================
// Missing values
// ============================================================================

#[test]
fn test_nan_breaks_lines_and_drops_markers() {
    let n = 10;
    let mut heights = synthetic_heights(n);
    heights[4] = f32::NAN;
    let mut directions = synthetic_directions(n);
    directions[2] = f32::NAN;
    directions[7] = f32::NAN;

    let ds = WaveDataset::new(
        hourly(JAN_2008_UNIX, n),
        heights,
        synthetic_periods(n),
        directions,
    )
    .unwrap();
    let range = DateRange::parse("20080101", "20080102").unwrap();
    let title = ChartTitle::new(TITLE, &StationConfig::default(), &range);
    let svg = render_svg(&ds, &title, &range, &ChartConfig::default()).unwrap();

    // Two height runs plus one period run
    assert_eq!(count(&svg, "<polyline"), 3);
    assert_eq!(count(&svg, "<circle"), 8);
    assert!(!svg.contains("NaN"));
}

#[test]
fn test_single_sample_renders() {
    let ds = dataset(JAN_2008_UNIX, 1);
    let range = DateRange::parse("20080101", "20080101").unwrap();
    let title = ChartTitle::new(TITLE, &StationConfig::default(), &range);
    let svg = render_svg(&ds, &title, &range, &ChartConfig::default()).unwrap();

    assert_eq!(count(&svg, "<circle"), 1);
    assert!(!svg.contains("NaN"));
}

#[test]
fn test_empty_dataset_rejected() {
    let ds = WaveDataset::new(vec![], vec![], vec![], vec![]).unwrap();
    let range = DateRange::parse(AGGREGATE_START, AGGREGATE_END).unwrap();
    let title = ChartTitle::new(TITLE, &StationConfig::default(), &range);

    let result = render_svg(&ds, &title, &range, &ChartConfig::default());
    assert!(matches!(result, Err(RenderError::EmptyDataset)));
}

// ============================================================================
// PNG output
// ============================================================================

#[test]
fn test_render_png_dimensions() {
    let ds = dataset(JAN_2008_UNIX, 24 * 31);
    let range = DateRange::parse("20080101", "20080131").unwrap();
    let title = ChartTitle::new(TITLE, &StationConfig::default(), &range);
    let png = render_png(&ds, &title, &range, &ChartConfig::default()).unwrap();

    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(png_dimensions(&png), (1500, 1000));
}

#[test]
fn test_render_png_custom_size() {
    let ds = dataset(JAN_2008_UNIX, 24);
    let range = DateRange::parse("20080101", "20080102").unwrap();
    let title = ChartTitle::new(TITLE, &StationConfig::default(), &range);
    let config = ChartConfig {
        width: 900,
        height: 600,
        ..ChartConfig::default()
    };
    let png = render_png(&ds, &title, &range, &config).unwrap();
    assert_eq!(png_dimensions(&png), (900, 600));
}
