//! SVG rasterisation with resvg.

use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// Straight (non-premultiplied) RGBA pixels, row-major.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Rasterise an SVG document at its own size on a white background.
///
/// Text uses fonts installed on the system; with none available text is
/// skipped rather than failing the render.
pub fn rasterize_svg(svg: &str) -> RenderResult<RasterImage> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| RenderError::Rasterize(format!("Failed to parse SVG: {}", e)))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(RenderError::InvalidSize { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    // Pixmap data is premultiplied; PNG wants straight alpha
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        pixels.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    debug!(width, height, "Rasterised chart");

    Ok(RasterImage {
        width,
        height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterize_filled_rect() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
            <rect x="0" y="0" width="2" height="2" fill="#ff0000"/>
        </svg>"##;
        let img = rasterize_svg(svg).unwrap();
        assert_eq!((img.width, img.height), (4, 2));
        assert_eq!(img.pixels.len(), 4 * 2 * 4);
        // Left half red, right half the white background
        assert_eq!(&img.pixels[0..4], &[255, 0, 0, 255]);
        assert_eq!(&img.pixels[12..16], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_rasterize_rejects_garbage() {
        assert!(matches!(
            rasterize_svg("not svg"),
            Err(RenderError::Rasterize(_))
        ));
    }
}
