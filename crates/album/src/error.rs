/// Errors from cropping, framing, or stitching.
#[derive(Debug, thiserror::Error)]
pub enum AlbumError {
    /// A ratio string was not of the form `W:H` with positive integers.
    #[error("Invalid aspect ratio '{0}': expected the form W:H")]
    InvalidRatio(String),

    /// An image payload was not a decodable base64 data URI.
    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    /// The `image` crate failed to decode or encode.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// Text rasterization failed.
    #[error("Text rendering failed: {0}")]
    Render(String),

    /// An album was requested with no successful images.
    #[error("There are no successful images to include in an album.")]
    NoImages,
}
