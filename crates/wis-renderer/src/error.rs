//! Error types for chart rendering.

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to plot: dataset has no samples")]
    EmptyDataset,

    #[error("Invalid chart size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("SVG rasterisation failed: {0}")]
    Rasterize(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
