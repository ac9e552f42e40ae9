//! Chart rendering for WIS wave parameter series.
//!
//! Produces the three-panel station chart:
//! - Significant wave height, with a secondary feet axis
//! - Peak period
//! - Mean direction as a scatter
//!
//! Charts are built as SVG documents. PNG output rasterises the SVG with
//! resvg and encodes it with the in-crate PNG writer.

pub mod chart;
pub mod error;
pub mod png;
pub mod raster;
pub mod svg;
pub mod ticks;

pub use chart::{render_png, render_svg, ChartConfig, ChartTitle};
pub use error::{RenderError, RenderResult};
pub use raster::{rasterize_svg, RasterImage};
pub use ticks::{TickMode, TimeTick, METERS_TO_FEET};
