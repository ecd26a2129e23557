//! Text rasterization for labels, titles, and attribution lines.
//!
//! Text is laid out as a minimal SVG document and rendered with `resvg`
//! against the system font collection, then alpha-blended onto the
//! target canvas. Machines without any usable font render an empty
//! layer; the surrounding geometry is unaffected.

use std::sync::{Arc, OnceLock};

use image::{Rgba, RgbaImage};

use crate::error::AlbumError;

/// Font stack requested for every span.
const FONT_FAMILY: &str = "Poppins, DejaVu Sans, sans-serif";

/// Fraction of the font size added below the optical center to hit the
/// text baseline.
const BASELINE_OFFSET: f64 = 0.35;

/// One horizontally centered line of text.
#[derive(Debug, Clone, Copy)]
pub struct TextSpan<'a> {
    pub text: &'a str,
    pub font_px: u32,
    /// CSS font weight (400 regular, 600 semibold, 700/800 bold).
    pub weight: u16,
    pub center_x: u32,
    pub center_y: u32,
    pub color: [u8; 3],
    pub opacity: f32,
}

/// Render `spans` onto a transparent layer of the given size.
pub fn render_text_layer(
    width: u32,
    height: u32,
    spans: &[TextSpan<'_>],
) -> Result<RgbaImage, AlbumError> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| AlbumError::Render("zero-sized text layer".to_string()))?;

    let renderable: Vec<&TextSpan<'_>> =
        spans.iter().filter(|span| !span.text.is_empty()).collect();
    if !renderable.is_empty() {
        let svg = build_svg(width, height, &renderable);
        let options = usvg::Options {
            fontdb: font_database().clone(),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| AlbumError::Render(e.to_string()))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
    }

    // tiny-skia pixels are premultiplied; convert back to straight alpha.
    let mut layer = RgbaImage::new(width, height);
    for (pixel, out) in pixmap.pixels().iter().zip(layer.pixels_mut()) {
        let c = pixel.demultiply();
        *out = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(layer)
}

/// Render `spans` and blend them onto `canvas`.
pub fn draw_spans(canvas: &mut RgbaImage, spans: &[TextSpan<'_>]) -> Result<(), AlbumError> {
    let layer = render_text_layer(canvas.width(), canvas.height(), spans)?;
    image::imageops::overlay(canvas, &layer, 0, 0);
    Ok(())
}

fn build_svg(width: u32, height: u32, spans: &[&TextSpan<'_>]) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    for span in spans {
        let baseline_y = f64::from(span.center_y) + f64::from(span.font_px) * BASELINE_OFFSET;
        let [r, g, b] = span.color;
        svg.push_str(&format!(
            r#"<text x="{x}" y="{y:.1}" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="{size}" font-weight="{weight}" fill="rgb({r},{g},{b})" fill-opacity="{opacity}">{text}</text>"#,
            x = span.center_x,
            y = baseline_y,
            size = span.font_px,
            weight = span.weight,
            opacity = span.opacity,
            text = xml_escape(span.text),
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// The process-wide font collection, loaded once.
fn font_database() -> &'static Arc<usvg::fontdb::Database> {
    static FONTDB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTDB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if db.is_empty() {
            tracing::warn!("no system fonts found; labels and titles will render empty");
        }
        Arc::new(db)
    })
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
