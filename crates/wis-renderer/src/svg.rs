//! Minimal SVG document writer.
//!
//! Only the elements the station chart needs: rectangles, lines,
//! polylines, circles and text, plus rectangular clip paths.

use std::fmt::Write;

/// Text anchoring for [`SvgWriter::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Stroke settings shared by lines and polylines.
#[derive(Debug, Clone)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    pub dash: Option<&'a str>,
}

impl<'a> Stroke<'a> {
    pub fn solid(color: &'a str, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: &'a str, width: f64, dash: &'a str) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }

    fn attrs(&self) -> String {
        let mut out = format!(
            r#"stroke="{}" stroke-width="{}""#,
            escape(self.color),
            fmt_num(self.width)
        );
        if let Some(dash) = self.dash {
            let _ = write!(out, r#" stroke-dasharray="{}""#, escape(dash));
        }
        out
    }
}

/// Accumulates SVG markup into a string.
pub struct SvgWriter {
    buf: String,
    font_family: String,
}

impl SvgWriter {
    pub fn new(width: u32, height: u32, font_family: &str) -> Self {
        let mut buf = String::with_capacity(64 * 1024);
        let _ = write!(
            buf,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );
        buf.push('\n');
        Self {
            buf,
            font_family: font_family.to_string(),
        }
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: Option<&Stroke>) {
        let _ = write!(
            self.buf,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h),
            escape(fill)
        );
        if let Some(stroke) = stroke {
            let _ = write!(self.buf, " {}", stroke.attrs());
        }
        self.buf.push_str("/>\n");
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke) {
        let _ = writeln!(
            self.buf,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2),
            stroke.attrs()
        );
    }

    /// Single polyline. Fewer than two points draws nothing.
    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        let coords: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
            .collect();
        let _ = writeln!(
            self.buf,
            r#"<polyline points="{}" fill="none" stroke-linejoin="round" {}/>"#,
            coords.join(" "),
            stroke.attrs()
        );
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        let _ = writeln!(
            self.buf,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(r),
            escape(fill)
        );
    }

    /// Text at `(x, y)`, optionally rotated by `rotate` degrees about that point.
    pub fn text(&mut self, x: f64, y: f64, content: &str, size: f64, anchor: Anchor, rotate: Option<f64>) {
        let _ = write!(
            self.buf,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" text-anchor="{}""#,
            fmt_num(x),
            fmt_num(y),
            escape(&self.font_family),
            fmt_num(size),
            anchor.as_str()
        );
        if let Some(angle) = rotate {
            let _ = write!(
                self.buf,
                r#" transform="rotate({} {} {})""#,
                fmt_num(angle),
                fmt_num(x),
                fmt_num(y)
            );
        }
        let _ = writeln!(self.buf, ">{}</text>", escape(content));
    }

    /// Define a rectangular clip path under `id`.
    pub fn clip_rect(&mut self, id: &str, x: f64, y: f64, w: f64, h: f64) {
        let _ = writeln!(
            self.buf,
            r#"<defs><clipPath id="{}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
            escape(id),
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h)
        );
    }

    /// Open a group clipped by a path from [`SvgWriter::clip_rect`].
    pub fn begin_clipped_group(&mut self, clip_id: &str) {
        let _ = writeln!(self.buf, r#"<g clip-path="url(#{})">"#, escape(clip_id));
    }

    pub fn end_group(&mut self) {
        self.buf.push_str("</g>\n");
    }

    pub fn finish(mut self) -> String {
        self.buf.push_str("</svg>\n");
        self.buf
    }
}

/// Split a sampled curve into runs of finite points.
///
/// A NaN in either coordinate ends the current run, so gaps in the data
/// show as breaks in the line.
pub fn finite_runs<I>(points: I) -> Vec<Vec<(f64, f64)>>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for (x, y) in points {
        if x.is_finite() && y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Escape text for use in attribute values and element content.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Two decimals is well below a pixel; keeps documents compact.
fn fmt_num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
