//! Raster composition: crop, frame, and stitch.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

use crate::error::AlbumError;
use crate::geometry::{
    album_layout, center_crop_rect, frame_layout, sheet_layout, shot_label_band, shot_label_line,
};
use crate::ratio::AspectRatio;
use crate::text::{draw_spans, TextSpan};

/// Backing card color behind framed shots and albums.
const CARD_BG: Rgba<u8> = Rgba([17, 24, 39, 255]);

/// The white sheet the album grid sits on.
const SHEET_BG: Rgba<u8> = Rgba([255, 255, 255, 255]);

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];

/// First attribution line on every export.
pub const ATTRIBUTION_PRIMARY: &str = "Made with Pictura";

/// Second attribution line on every export.
pub const ATTRIBUTION_SECONDARY: &str = "Restyle your photos at pictura.studio";

/// Center-crop `image` to `ratio`.
///
/// Deterministic and idempotent: an image already at `ratio` comes back
/// with identical dimensions.
pub fn center_crop(image: &DynamicImage, ratio: AspectRatio) -> DynamicImage {
    let rect = center_crop_rect(image.width(), image.height(), ratio);
    image.crop_imm(rect.x, rect.y, rect.width, rect.height)
}

/// Crop one shot and frame it on a backing card with an optional label
/// and the attribution footer.
pub fn frame_single(
    image: &DynamicImage,
    ratio: AspectRatio,
    label: Option<&str>,
) -> Result<RgbaImage, AlbumError> {
    let cropped = center_crop(image, ratio).to_rgba8();
    let layout = frame_layout(cropped.width(), cropped.height(), label.is_some());

    let mut canvas = RgbaImage::from_pixel(layout.canvas_width, layout.canvas_height, CARD_BG);
    imageops::overlay(
        &mut canvas,
        &cropped,
        i64::from(layout.image_x),
        i64::from(layout.image_y),
    );

    let center_x = layout.canvas_width / 2;
    let mut spans = Vec::with_capacity(3);
    if let (Some(text), Some(line)) = (label, layout.label) {
        spans.push(TextSpan {
            text,
            font_px: line.font_px,
            weight: 700,
            center_x,
            center_y: line.center_y,
            color: WHITE,
            opacity: 0.9,
        });
    }
    spans.push(TextSpan {
        text: ATTRIBUTION_PRIMARY,
        font_px: layout.footer_primary.font_px,
        weight: 600,
        center_x,
        center_y: layout.footer_primary.center_y,
        color: WHITE,
        opacity: 0.4,
    });
    spans.push(TextSpan {
        text: ATTRIBUTION_SECONDARY,
        font_px: layout.footer_secondary.font_px,
        weight: 600,
        center_x,
        center_y: layout.footer_secondary.center_y,
        color: WHITE,
        opacity: 0.4,
    });
    draw_spans(&mut canvas, &spans)?;

    Ok(canvas)
}

/// One album entry: a successful shot plus its optional stamped label.
#[derive(Debug, Clone, Copy)]
pub struct AlbumShot<'a> {
    pub image: &'a DynamicImage,
    pub label: Option<&'a str>,
}

/// Stitch successful shots into one titled album.
///
/// Every image is cropped to `ratio` and scaled to the first image's
/// size, laid out on a white sheet (3 columns when more than 4 shots,
/// otherwise 2), then composed onto a card with a centered title band
/// and the attribution footer. Deterministic for the same inputs.
pub fn stitch_album(
    shots: &[AlbumShot<'_>],
    ratio: AspectRatio,
    title: &str,
) -> Result<RgbaImage, AlbumError> {
    if shots.is_empty() {
        return Err(AlbumError::NoImages);
    }

    let cropped: Vec<RgbaImage> = shots
        .iter()
        .map(|shot| center_crop(shot.image, ratio).to_rgba8())
        .collect();

    let cell_image_width = cropped[0].width();
    let cell_image_height = cropped[0].height();
    let has_labels = shots.iter().any(|shot| shot.label.is_some());
    let label_band = if has_labels {
        shot_label_band(cell_image_width)
    } else {
        0
    };

    let sheet = sheet_layout(
        shots.len(),
        cell_image_width,
        cell_image_height + label_band,
    );
    let mut sheet_canvas = RgbaImage::from_pixel(sheet.width, sheet.height, SHEET_BG);

    let mut label_spans = Vec::new();
    for (index, image) in cropped.iter().enumerate() {
        let (cell_x, cell_y) = sheet.cell_origin(index);

        // Uniform cell size comes from the first image; later shots may
        // differ by a pixel after rounding and are scaled to fit.
        let scaled;
        let cell_image = if image.dimensions() != (cell_image_width, cell_image_height) {
            scaled = imageops::resize(
                image,
                cell_image_width,
                cell_image_height,
                FilterType::Lanczos3,
            );
            &scaled
        } else {
            image
        };
        imageops::overlay(
            &mut sheet_canvas,
            cell_image,
            i64::from(cell_x),
            i64::from(cell_y),
        );

        if let Some(text) = shots[index].label {
            let line = shot_label_line(cell_image_width, cell_image_height);
            label_spans.push(TextSpan {
                text,
                font_px: line.font_px,
                weight: 800,
                center_x: cell_x + cell_image_width / 2,
                center_y: cell_y + line.center_y,
                color: BLACK,
                opacity: 0.8,
            });
        }
    }
    draw_spans(&mut sheet_canvas, &label_spans)?;

    let layout = album_layout(sheet.width, sheet.height);
    let mut canvas = RgbaImage::from_pixel(layout.canvas_width, layout.canvas_height, CARD_BG);
    imageops::overlay(
        &mut canvas,
        &sheet_canvas,
        i64::from(layout.sheet_x),
        i64::from(layout.sheet_y),
    );

    let center_x = layout.canvas_width / 2;
    draw_spans(
        &mut canvas,
        &[
            TextSpan {
                text: title,
                font_px: layout.title.font_px,
                weight: 800,
                center_x,
                center_y: layout.title.center_y,
                color: WHITE,
                opacity: 0.9,
            },
            TextSpan {
                text: ATTRIBUTION_PRIMARY,
                font_px: layout.footer_primary.font_px,
                weight: 600,
                center_x,
                center_y: layout.footer_primary.center_y,
                color: WHITE,
                opacity: 0.5,
            },
            TextSpan {
                text: ATTRIBUTION_SECONDARY,
                font_px: layout.footer_secondary.font_px,
                weight: 600,
                center_x,
                center_y: layout.footer_secondary.center_y,
                color: WHITE,
                opacity: 0.5,
            },
        ],
    )?;

    Ok(canvas)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{album_layout, sheet_layout};
    use crate::ratio::{PORTRAIT, SQUARE};
    use assert_matches::assert_matches;

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([90, 120, 30, 255])))
    }

    #[test]
    fn center_crop_is_idempotent_on_square() {
        let image = solid(500, 500);
        let once = center_crop(&image, SQUARE);
        assert_eq!((once.width(), once.height()), (500, 500));
        let twice = center_crop(&once, SQUARE);
        assert_eq!((twice.width(), twice.height()), (500, 500));
    }

    #[test]
    fn center_crop_to_portrait() {
        let cropped = center_crop(&solid(1600, 1600), PORTRAIT);
        assert_eq!((cropped.width(), cropped.height()), (900, 1600));
    }

    #[test]
    fn framed_shot_without_label_is_shorter() {
        let image = solid(400, 400);
        let plain = frame_single(&image, SQUARE, None).unwrap();
        let labeled = frame_single(&image, SQUARE, Some("1950s")).unwrap();

        assert_eq!(plain.width(), labeled.width());
        assert!(labeled.height() > plain.height());
        // side padding 4% each side
        assert_eq!(plain.width(), 400 + 2 * 16);
    }

    #[test]
    fn framed_shot_keeps_the_card_background_in_the_band() {
        let framed = frame_single(&solid(400, 400), SQUARE, None).unwrap();
        // A corner pixel belongs to the card, not the photo.
        assert_eq!(framed.get_pixel(0, 0), &CARD_BG);
    }

    #[test]
    fn album_of_four_uses_two_columns() {
        let images: Vec<DynamicImage> = (0..4).map(|_| solid(200, 200)).collect();
        let shots: Vec<AlbumShot<'_>> = images
            .iter()
            .map(|image| AlbumShot { image, label: None })
            .collect();

        let album = stitch_album(&shots, SQUARE, "Pictura: Time Traveler").unwrap();

        let sheet = sheet_layout(4, 200, 200);
        let layout = album_layout(sheet.width, sheet.height);
        assert_eq!(album.dimensions(), (layout.canvas_width, layout.canvas_height));
    }

    #[test]
    fn album_of_five_uses_three_columns() {
        let images: Vec<DynamicImage> = (0..5).map(|_| solid(200, 200)).collect();
        let shots: Vec<AlbumShot<'_>> = images
            .iter()
            .map(|image| AlbumShot { image, label: None })
            .collect();

        let album = stitch_album(&shots, SQUARE, "Album").unwrap();

        let sheet = sheet_layout(5, 200, 200);
        assert_eq!(sheet.columns, 3);
        let layout = album_layout(sheet.width, sheet.height);
        assert_eq!(album.dimensions(), (layout.canvas_width, layout.canvas_height));
    }

    #[test]
    fn labels_extend_every_cell() {
        let images: Vec<DynamicImage> = (0..2).map(|_| solid(200, 200)).collect();
        let labeled_shots: Vec<AlbumShot<'_>> = images
            .iter()
            .map(|image| AlbumShot { image, label: Some("1950s") })
            .collect();
        let plain_shots: Vec<AlbumShot<'_>> = images
            .iter()
            .map(|image| AlbumShot { image, label: None })
            .collect();

        let labeled = stitch_album(&labeled_shots, SQUARE, "Album").unwrap();
        let plain = stitch_album(&plain_shots, SQUARE, "Album").unwrap();
        assert!(labeled.height() > plain.height());
        assert_eq!(labeled.width(), plain.width());
    }

    #[test]
    fn mixed_sizes_are_normalized_to_the_first() {
        let first = solid(200, 200);
        let second = solid(401, 400);
        let shots = [
            AlbumShot { image: &first, label: None },
            AlbumShot { image: &second, label: None },
        ];

        let album = stitch_album(&shots, SQUARE, "Album").unwrap();
        let sheet = sheet_layout(2, 200, 200);
        let layout = album_layout(sheet.width, sheet.height);
        assert_eq!(album.dimensions(), (layout.canvas_width, layout.canvas_height));
    }

    #[test]
    fn empty_album_is_rejected() {
        assert_matches!(
            stitch_album(&[], SQUARE, "Album"),
            Err(AlbumError::NoImages)
        );
    }
}
