//! Three-panel station chart.
//!
//! Panels share one time axis and are stacked top to bottom:
//!
//! | Panel     | Series        | Y range    | Style   |
//! |-----------|---------------|------------|---------|
//! | Height    | `waveHs`      | 0..8 m     | line    |
//! | Period    | `waveTp`      | 0..28 s    | line    |
//! | Direction | mean dir      | 0..360 deg | scatter |
//!
//! The height panel carries a second axis on the right in feet.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use wis_common::{DateRange, StationConfig, WaveDataset};

use crate::error::{RenderError, RenderResult};
use crate::png::create_png;
use crate::raster::rasterize_svg;
use crate::svg::{finite_runs, Anchor, Stroke, SvgWriter};
use crate::ticks::{feet_ticks, time_ticks, value_ticks, TickMode, TimeTick};

const MARGIN_LEFT: f64 = 110.0;
const MARGIN_RIGHT: f64 = 110.0;
const MARGIN_TOP: f64 = 120.0;
const MARGIN_BOTTOM: f64 = 90.0;
const PANEL_GAP: f64 = 25.0;
const TICK_LEN: f64 = 6.0;

/// Half a day of padding either side when the series has a single sample.
const SINGLE_SAMPLE_PAD_SECS: i64 = 12 * 3_600;

/// Highest label on the feet axis.
const FEET_AXIS_MAX: u32 = 25;
const FEET_AXIS_STEP: u32 = 5;

/// Chart appearance.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Width in pixels (default: 1500)
    pub width: u32,
    /// Height in pixels (default: 1000)
    pub height: u32,
    /// Color of lines and markers
    pub series_color: String,
    /// Color of the dashed major gridlines
    pub grid_color: String,
    pub font_family: String,
    pub line_width: f64,
    pub marker_radius: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1000,
            series_color: "#0000ff".to_string(),
            grid_color: "#0000ff".to_string(),
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            line_width: 1.5,
            marker_radius: 2.0,
        }
    }
}

/// The two heading lines above the panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTitle {
    /// `<title>: STN <station_id> (<companion_id>)`
    pub heading: String,
    /// `<start> - <end>` as `YYYYMMDD`
    pub subheading: String,
}

impl ChartTitle {
    pub fn new(title: &str, station: &StationConfig, range: &DateRange) -> Self {
        Self {
            heading: format!("{}: {}", title, station.label()),
            subheading: range.label(),
        }
    }

    /// Title from the dataset's title attribute, or the station display
    /// name when the attribute was not present.
    pub fn for_dataset(dataset: &WaveDataset, station: &StationConfig, range: &DateRange) -> Self {
        match dataset.title() {
            Ok(title) => Self::new(title, station, range),
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = %station.display_name,
                    "Dataset carries no title, using station display name"
                );
                Self::new(&station.display_name, station, range)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeriesStyle {
    Line,
    Scatter,
}

struct PanelSpec {
    y_label: &'static str,
    y_min: f64,
    y_max: f64,
    y_step: f64,
    style: SeriesStyle,
}

const HEIGHT_PANEL: PanelSpec = PanelSpec {
    y_label: "Hs(m)",
    y_min: 0.0,
    y_max: 8.0,
    y_step: 1.0,
    style: SeriesStyle::Line,
};

const PERIOD_PANEL: PanelSpec = PanelSpec {
    y_label: "Tp(s)",
    y_min: 0.0,
    y_max: 28.0,
    y_step: 5.0,
    style: SeriesStyle::Line,
};

const DIRECTION_PANEL: PanelSpec = PanelSpec {
    y_label: "Dmean(deg)",
    y_min: 0.0,
    y_max: 360.0,
    y_step: 90.0,
    style: SeriesStyle::Scatter,
};

/// Maps timestamps onto the shared horizontal extent.
struct TimeScale {
    t0: i64,
    t1: i64,
    left: f64,
    right: f64,
}

impl TimeScale {
    fn x(&self, t: DateTime<Utc>) -> f64 {
        let frac = (t.timestamp() - self.t0) as f64 / (self.t1 - self.t0) as f64;
        self.left + frac * (self.right - self.left)
    }
}

/// Pixel frame of one panel and its value range.
struct PanelFrame {
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
    y_min: f64,
    y_max: f64,
}

impl PanelFrame {
    fn y(&self, v: f64) -> f64 {
        let frac = (v - self.y_min) / (self.y_max - self.y_min);
        self.bottom - frac * (self.bottom - self.top)
    }

    fn width(&self) -> f64 {
        self.right - self.left
    }

    fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Render the station chart as an SVG document.
///
/// Tick style follows `range`; the time axis spans the dataset's own
/// first to last sample.
pub fn render_svg(
    dataset: &WaveDataset,
    title: &ChartTitle,
    range: &DateRange,
    config: &ChartConfig,
) -> RenderResult<String> {
    if config.width == 0 || config.height == 0 {
        return Err(RenderError::InvalidSize {
            width: config.width,
            height: config.height,
        });
    }
    let (first, last) = dataset.time_bounds().ok_or(RenderError::EmptyDataset)?;

    let (t0, t1) = if first == last {
        (
            first.timestamp() - SINGLE_SAMPLE_PAD_SECS,
            last.timestamp() + SINGLE_SAMPLE_PAD_SECS,
        )
    } else {
        (first.timestamp(), last.timestamp())
    };

    let width = config.width as f64;
    let height = config.height as f64;
    let scale = TimeScale {
        t0,
        t1,
        left: MARGIN_LEFT,
        right: width - MARGIN_RIGHT,
    };

    let mode = TickMode::for_range(range);
    let ticks = time_ticks(mode, first, last);

    debug!(
        samples = dataset.len(),
        tick_mode = ?mode,
        ticks = ticks.len(),
        "Rendering station chart"
    );

    let mut svg = SvgWriter::new(config.width, config.height, &config.font_family);
    svg.rect(0.0, 0.0, width, height, "#ffffff", None);

    svg.text(width / 2.0, 45.0, &title.heading, 30.0, Anchor::Middle, None);
    svg.text(width / 2.0, 85.0, &title.subheading, 20.0, Anchor::Middle, None);

    let panel_height = (height - MARGIN_TOP - MARGIN_BOTTOM - 2.0 * PANEL_GAP) / 3.0;
    let panels: [(&PanelSpec, &[f32]); 3] = [
        (&HEIGHT_PANEL, dataset.height_m()),
        (&PERIOD_PANEL, dataset.period_s()),
        (&DIRECTION_PANEL, dataset.direction_deg()),
    ];

    for (i, (spec, values)) in panels.iter().enumerate() {
        let top = MARGIN_TOP + i as f64 * (panel_height + PANEL_GAP);
        let frame = PanelFrame {
            top,
            bottom: top + panel_height,
            left: scale.left,
            right: scale.right,
            y_min: spec.y_min,
            y_max: spec.y_max,
        };

        draw_panel(&mut svg, i, spec, &frame, &scale, &ticks, dataset.times(), values, config);

        if i == 0 {
            draw_feet_axis(&mut svg, &frame);
        }
        if i == panels.len() - 1 {
            draw_time_labels(&mut svg, &frame, &scale, &ticks, mode);
        }
    }

    Ok(svg.finish())
}

/// Render the station chart straight to PNG bytes.
pub fn render_png(
    dataset: &WaveDataset,
    title: &ChartTitle,
    range: &DateRange,
    config: &ChartConfig,
) -> RenderResult<Vec<u8>> {
    let svg = render_svg(dataset, title, range, config)?;
    let image = rasterize_svg(&svg)?;
    create_png(&image.pixels, image.width as usize, image.height as usize)
}

#[allow(clippy::too_many_arguments)]
fn draw_panel(
    svg: &mut SvgWriter,
    index: usize,
    spec: &PanelSpec,
    frame: &PanelFrame,
    scale: &TimeScale,
    ticks: &[TimeTick],
    times: &[DateTime<Utc>],
    values: &[f32],
    config: &ChartConfig,
) {
    let grid = Stroke::dashed(&config.grid_color, 0.8, "6 4");
    let axis = Stroke::solid("#000000", 1.0);

    // Major gridlines
    for tick in ticks {
        let x = scale.x(tick.time);
        svg.line(x, frame.top, x, frame.bottom, &grid);
    }
    for v in value_ticks(spec.y_min, spec.y_max, spec.y_step) {
        let y = frame.y(v);
        svg.line(frame.left, y, frame.right, y, &grid);
        svg.line(frame.left - TICK_LEN, y, frame.left, y, &axis);
        svg.text(frame.left - TICK_LEN - 4.0, y + 4.0, &format!("{}", v), 12.0, Anchor::End, None);
    }

    let clip_id = format!("panel{}", index);
    svg.clip_rect(&clip_id, frame.left, frame.top, frame.width(), frame.height());
    svg.begin_clipped_group(&clip_id);

    let points = times
        .iter()
        .zip(values)
        .map(|(t, v)| (scale.x(*t), frame.y(*v as f64)));

    match spec.style {
        SeriesStyle::Line => {
            let stroke = Stroke::solid(&config.series_color, config.line_width);
            for run in finite_runs(points) {
                svg.polyline(&run, &stroke);
            }
        }
        SeriesStyle::Scatter => {
            for (x, y) in points.filter(|(_, y)| y.is_finite()) {
                svg.circle(x, y, config.marker_radius, &config.series_color);
            }
        }
    }

    svg.end_group();

    svg.rect(frame.left, frame.top, frame.width(), frame.height(), "none", Some(&axis));
    svg.text(
        frame.left - 70.0,
        frame.top + frame.height() / 2.0,
        spec.y_label,
        18.0,
        Anchor::Middle,
        Some(-90.0),
    );
}

fn draw_feet_axis(svg: &mut SvgWriter, frame: &PanelFrame) {
    let axis = Stroke::solid("#000000", 1.0);

    for (meters, label) in feet_ticks(FEET_AXIS_MAX, FEET_AXIS_STEP) {
        if meters > frame.y_max {
            continue;
        }
        let y = frame.y(meters);
        svg.line(frame.right, y, frame.right + TICK_LEN, y, &axis);
        svg.text(frame.right + TICK_LEN + 4.0, y + 4.0, &label, 12.0, Anchor::Start, None);
    }

    svg.text(
        frame.right + 70.0,
        frame.top + frame.height() / 2.0,
        "Hs(ft)",
        18.0,
        Anchor::Middle,
        Some(90.0),
    );
}

fn draw_time_labels(
    svg: &mut SvgWriter,
    frame: &PanelFrame,
    scale: &TimeScale,
    ticks: &[TimeTick],
    mode: TickMode,
) {
    let axis = Stroke::solid("#000000", 1.0);

    for tick in ticks {
        let x = scale.x(tick.time);
        svg.line(x, frame.bottom, x, frame.bottom + TICK_LEN, &axis);
        svg.text(x, frame.bottom + TICK_LEN + 16.0, &tick.label, 12.0, Anchor::Middle, None);
    }

    svg.text(
        (frame.left + frame.right) / 2.0,
        frame.bottom + 60.0,
        mode.axis_label(),
        18.0,
        Anchor::Middle,
        None,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_frame_maps_range() {
        let frame = PanelFrame {
            top: 100.0,
            bottom: 300.0,
            left: 0.0,
            right: 10.0,
            y_min: 0.0,
            y_max: 8.0,
        };
        assert_eq!(frame.y(0.0), 300.0);
        assert_eq!(frame.y(8.0), 100.0);
        assert_eq!(frame.y(4.0), 200.0);
    }

    #[test]
    fn test_title_lines() {
        let station = StationConfig::default();
        let range = DateRange::parse("20080101", "20080430").unwrap();
        let title = ChartTitle::new("WIS Hindcast", &station, &range);
        assert_eq!(title.heading, "WIS Hindcast: STN 44098 (163)");
        assert_eq!(title.subheading, "20080101 - 20080430");
    }
}
