//! Image decoding and grayscale conversion.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the
//! decoded RGBA image plus a single-channel grayscale view of it.
//! The RGBA image is retained at working resolution so visualizers can
//! draw wall overlays on top of the original plan.

use image::{GrayImage, RgbaImage};

use crate::types::PipelineError;

/// Decode raw image bytes into an RGBA image.
///
/// Supports PNG, JPEG, BMP, and WebP formats (whatever the `image`
/// crate can decode).
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

/// Convert an RGBA image to grayscale.
///
/// Uses the standard luminance formula
/// `0.299*R + 0.587*G + 0.114*B` via the `image` crate.
#[must_use = "returns the grayscale image"]
pub fn to_grayscale(img: &RgbaImage) -> GrayImage {
    image::DynamicImage::ImageRgba8(img.clone()).to_luma8()
}
