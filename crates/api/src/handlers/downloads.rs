//! Shot and album export handlers.
//!
//! Exports never mutate generation state: they read successful items,
//! composite, and stream PNG bytes back.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use pictura_album::codec::{decode_data_uri, encode_png};
use pictura_album::compose::{frame_single, stitch_album, AlbumShot};
use pictura_album::ratio::EXPORT_RATIOS;
use pictura_album::AspectRatio;
use pictura_core::error::CoreError;
use pictura_core::item::GenerationStatus;
use pictura_core::theme::{album_title, shows_shot_labels};
use pictura_core::types::ItemIndex;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotDownloadRequest {
    pub index: ItemIndex,
    /// `"1:1"` or `"9:16"`.
    pub ratio: String,
}

#[derive(Debug, Deserialize)]
pub struct AlbumDownloadRequest {
    pub ratio: String,
}

/// POST /api/v1/downloads/shot
///
/// Frames one successful shot (crop, card, optional label, attribution)
/// and returns it as a PNG attachment.
pub async fn download_shot(
    State(state): State<AppState>,
    Json(request): Json<ShotDownloadRequest>,
) -> AppResult<Response> {
    let ratio = parse_export_ratio(&request.ratio)?;

    let (image_url, label, labeled) = {
        let session = state.session.lock().await;
        let item = session
            .items
            .get(request.index)
            .ok_or(CoreError::NotFound {
                entity: "generation item",
                index: request.index,
            })?;
        let image_url = item.image_url.clone().ok_or_else(|| {
            AppError::BadRequest("That photo hasn't been generated yet.".to_string())
        })?;
        let labeled = session
            .theme_key
            .as_deref()
            .is_some_and(shows_shot_labels);
        (image_url, item.id.clone(), labeled)
    };

    let source = decode_data_uri(&image_url)?;
    let framed = frame_single(&source, ratio, labeled.then_some(label.as_str()))?;
    let png = encode_png(&framed)?;

    let filename = format!("pictura-{}-{}.png", file_slug(&label), ratio.file_tag());
    Ok(png_attachment(&filename, png))
}

/// POST /api/v1/downloads/album
///
/// Stitches every successful shot into one titled album PNG.
pub async fn download_album(
    State(state): State<AppState>,
    Json(request): Json<AlbumDownloadRequest>,
) -> AppResult<Response> {
    let ratio = parse_export_ratio(&request.ratio)?;

    let (successful, theme_key) = {
        let session = state.session.lock().await;
        let successful: Vec<(String, String)> = session
            .items
            .iter()
            .filter(|item| item.status == GenerationStatus::Success)
            .filter_map(|item| {
                item.image_url
                    .clone()
                    .map(|url| (url, item.id.clone()))
            })
            .collect();
        (successful, session.theme_key.clone().unwrap_or_default())
    };

    if successful.is_empty() {
        return Err(pictura_album::AlbumError::NoImages.into());
    }

    let labeled = shows_shot_labels(&theme_key);
    let images = successful
        .iter()
        .map(|(url, _)| decode_data_uri(url))
        .collect::<Result<Vec<_>, _>>()?;
    let shots: Vec<AlbumShot<'_>> = images
        .iter()
        .zip(&successful)
        .map(|(image, (_, label))| AlbumShot {
            image,
            label: labeled.then_some(label.as_str()),
        })
        .collect();

    let album = stitch_album(&shots, ratio, &album_title(&theme_key))?;
    let png = encode_png(&album)?;

    let filename = format!("pictura-album-{}.png", ratio.file_tag());
    Ok(png_attachment(&filename, png))
}

/// Parse a ratio string and restrict it to the offered export set.
fn parse_export_ratio(raw: &str) -> AppResult<AspectRatio> {
    let ratio: AspectRatio = raw.parse().map_err(AppError::Album)?;
    if !EXPORT_RATIOS.contains(&ratio) {
        return Err(AppError::BadRequest(format!(
            "Unsupported export ratio '{raw}'. Offered: 1:1, 9:16."
        )));
    }
    Ok(ratio)
}

fn png_attachment(filename: &str, png: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        png,
    )
        .into_response()
}

/// Filename-safe form of a shot label.
fn file_slug(label: &str) -> String {
    let slug: String = label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let trimmed: Vec<&str> = slug.split('-').filter(|part| !part.is_empty()).collect();
    if trimmed.is_empty() {
        "shot".to_string()
    } else {
        trimmed.join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_lowercase_and_collapsed() {
        assert_eq!(file_slug("1950s"), "1950s");
        assert_eq!(file_slug("Over the Shoulder"), "over-the-shoulder");
        assert_eq!(file_slug("A  vibrant   mohawk!"), "a-vibrant-mohawk");
        assert_eq!(file_slug("***"), "shot");
    }

    #[test]
    fn only_offered_ratios_pass() {
        assert!(parse_export_ratio("1:1").is_ok());
        assert!(parse_export_ratio("9:16").is_ok());
        assert!(parse_export_ratio("4:3").is_err());
        assert!(parse_export_ratio("banana").is_err());
    }
}
