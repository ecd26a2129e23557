//! Pure layout math for cropping, framing, and album stitching.
//!
//! Everything here is deterministic integer geometry derived from the
//! source dimensions; no pixels are touched. The raster side
//! ([`crate::compose`]) executes these layouts.

use crate::ratio::AspectRatio;

/* --------------------------------------------------------------------------
Center crop
-------------------------------------------------------------------------- */

/// A crop window inside a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Compute the centered crop window bringing `src` to `ratio`.
///
/// If the source is wider than the target ratio, width is cropped to
/// `height * ratio` centered horizontally; otherwise height is cropped
/// to `width / ratio` centered vertically. Always a true crop, never
/// padding, no letterboxing. An already-conforming image crops to its
/// own full extent.
pub fn center_crop_rect(src_width: u32, src_height: u32, ratio: AspectRatio) -> CropRect {
    let src_ratio = f64::from(src_width) / f64::from(src_height);
    let target = ratio.value();

    if src_ratio > target {
        let width = ((f64::from(src_height) * target).round() as u32).min(src_width);
        CropRect {
            x: (src_width - width) / 2,
            y: 0,
            width,
            height: src_height,
        }
    } else {
        let height = ((f64::from(src_width) / target).round() as u32).min(src_height);
        CropRect {
            x: 0,
            y: (src_height - height) / 2,
            width: src_width,
            height,
        }
    }
}

/* --------------------------------------------------------------------------
Single-frame layout
-------------------------------------------------------------------------- */

/// A horizontally centered line of text: its size and vertical optical
/// center. The horizontal center is supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLine {
    pub font_px: u32,
    pub center_y: u32,
}

/// Layout of one framed shot: the image padded onto a backing card with
/// room at the bottom for an optional label and the attribution footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub image_x: u32,
    pub image_y: u32,
    /// Height of the reserved band under the image.
    pub bottom_padding: u32,
    /// Present only when a label is requested.
    pub label: Option<TextLine>,
    pub footer_primary: TextLine,
    pub footer_secondary: TextLine,
}

/// Side and top padding as a fraction of image width.
const FRAME_EDGE_FRACTION: f64 = 0.04;
/// Bottom band fraction without a label.
const FRAME_BOTTOM_FRACTION: f64 = 0.18;
/// Bottom band fraction with a label.
const FRAME_BOTTOM_LABELED_FRACTION: f64 = 0.24;

/// Compute the frame layout for an image of the given dimensions.
///
/// All paddings and font sizes scale with image width; font sizes are
/// clamped to readable minimums.
pub fn frame_layout(image_width: u32, image_height: u32, has_label: bool) -> FrameLayout {
    let w = f64::from(image_width);

    let side = (w * FRAME_EDGE_FRACTION).round() as u32;
    let top = (w * FRAME_EDGE_FRACTION).round() as u32;
    let bottom_fraction = if has_label {
        FRAME_BOTTOM_LABELED_FRACTION
    } else {
        FRAME_BOTTOM_FRACTION
    };
    let bottom = (w * bottom_fraction).round() as u32;

    let canvas_width = image_width + side * 2;
    let canvas_height = image_height + top + bottom;

    let label = has_label.then(|| TextLine {
        font_px: scaled_font(w, 0.08, 24),
        // Centered in the part of the band above the attribution area.
        center_y: image_height + top + (bottom.saturating_sub((w * 0.1) as u32)) / 2,
    });

    FrameLayout {
        canvas_width,
        canvas_height,
        image_x: side,
        image_y: top,
        bottom_padding: bottom,
        label,
        footer_primary: TextLine {
            font_px: scaled_font(w, 0.05, 12),
            center_y: canvas_height - (w * 0.11).round() as u32,
        },
        footer_secondary: TextLine {
            font_px: scaled_font(w, 0.035, 8),
            center_y: canvas_height - (w * 0.05).round() as u32,
        },
    }
}

/* --------------------------------------------------------------------------
Album grid layout
-------------------------------------------------------------------------- */

/// Column count for an album of `count` images.
pub fn grid_columns(count: usize) -> u32 {
    if count > 4 {
        3
    } else {
        2
    }
}

/// Row count given a column count.
pub fn grid_rows(count: usize, columns: u32) -> u32 {
    (count as u32).div_ceil(columns)
}

/// Per-shot label band height on the album sheet.
pub fn shot_label_band(image_width: u32) -> u32 {
    (f64::from(image_width) * 0.14).round() as u32
}

/// Label line within one album cell, relative to the cell origin.
pub fn shot_label_line(image_width: u32, image_height: u32) -> TextLine {
    TextLine {
        font_px: scaled_font(f64::from(image_width), 0.08, 24),
        center_y: image_height + shot_label_band(image_width) / 2,
    }
}

/// The white sheet holding the image grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Gap between and around cells.
    pub padding: u32,
    pub width: u32,
    pub height: u32,
}

/// Compute the sheet layout. Cell size is uniform (taken from the first
/// image); padding is 5% of cell width.
pub fn sheet_layout(count: usize, cell_width: u32, cell_height: u32) -> SheetLayout {
    let columns = grid_columns(count);
    let rows = grid_rows(count, columns);
    let padding = (f64::from(cell_width) * 0.05).floor() as u32;

    SheetLayout {
        columns,
        rows,
        cell_width,
        cell_height,
        padding,
        width: columns * cell_width + (columns + 1) * padding,
        height: rows * cell_height + (rows + 1) * padding,
    }
}

impl SheetLayout {
    /// Top-left corner of the cell holding image `index`.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let row = index as u32 / self.columns;
        let col = index as u32 % self.columns;
        (
            self.padding + col * (self.cell_width + self.padding),
            self.padding + row * (self.cell_height + self.padding),
        )
    }
}

/* --------------------------------------------------------------------------
Album canvas layout
-------------------------------------------------------------------------- */

/// The final album canvas: title band, sheet, attribution footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub outer_padding: u32,
    pub title_band: u32,
    pub footer_band: u32,
    pub sheet_x: u32,
    pub sheet_y: u32,
    pub title: TextLine,
    pub footer_primary: TextLine,
    pub footer_secondary: TextLine,
}

/// Compute the album canvas layout around a stitched sheet.
pub fn album_layout(sheet_width: u32, sheet_height: u32) -> AlbumLayout {
    let w = f64::from(sheet_width);

    let outer_padding = (w * 0.05).round() as u32;
    let title_font = scaled_font(w, 0.07, 48);
    let footer_font = scaled_font(w, 0.025, 24);
    let footer_secondary_font = scaled_font(w, 0.022, 18);

    let title_band = (f64::from(title_font) * 1.5).round() as u32;
    let footer_band = footer_font * 4;

    let canvas_width = sheet_width + outer_padding * 2;
    let canvas_height = sheet_height + outer_padding * 2 + title_band + footer_band;

    AlbumLayout {
        canvas_width,
        canvas_height,
        outer_padding,
        title_band,
        footer_band,
        sheet_x: outer_padding,
        sheet_y: outer_padding + title_band,
        title: TextLine {
            font_px: title_font,
            center_y: outer_padding + title_band / 2,
        },
        footer_primary: TextLine {
            font_px: footer_font,
            center_y: canvas_height - (f64::from(footer_band) * 0.66).round() as u32,
        },
        footer_secondary: TextLine {
            font_px: footer_secondary_font,
            center_y: canvas_height - (f64::from(footer_band) * 0.33).round() as u32,
        },
    }
}

/// Font size scaled to a reference width, clamped to a minimum.
fn scaled_font(reference_width: f64, fraction: f64, minimum: u32) -> u32 {
    ((reference_width * fraction).floor() as u32).max(minimum)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
