//! Data-URI image payloads: decode to pixels, encode results as PNG.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::AlbumError;

/// Decode a base64 `data:` URI into pixels.
pub fn decode_data_uri(uri: &str) -> Result<DynamicImage, AlbumError> {
    let payload = uri
        .split_once(',')
        .map(|(_, payload)| payload)
        .filter(|payload| !payload.is_empty())
        .ok_or_else(|| AlbumError::InvalidImage("expected a base64 data URI".to_string()))?;

    let bytes = BASE64
        .decode(payload)
        .map_err(|e| AlbumError::InvalidImage(format!("base64 decode failed: {e}")))?;

    Ok(image::load_from_memory(&bytes)?)
}

/// Encode pixels as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, AlbumError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encode pixels as a PNG `data:` URI.
pub fn encode_png_data_uri(image: &RgbaImage) -> Result<String, AlbumError> {
    Ok(format!(
        "data:image/png;base64,{}",
        BASE64.encode(encode_png(image)?)
    ))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
