//! Working-resolution normalization.
//!
//! Floor plans arrive at wildly different resolutions; all downstream
//! thresholds (merge distances, minimum lengths, Hough votes) are
//! expressed in working-resolution pixels. This module scales the
//! decoded image to a fixed width, preserving aspect ratio.

use image::RgbaImage;
use image::imageops::FilterType;

/// Scale an image to the given width, preserving aspect ratio.
///
/// The height is derived from the original aspect ratio and clamped to
/// a minimum of one pixel. An image already at the target width is
/// returned unchanged (no resampling pass).
#[must_use = "returns the resized image"]
pub fn resize_to_width(img: &RgbaImage, width: u32) -> RgbaImage {
    if img.width() == width {
        return img.clone();
    }

    let scale = f64::from(width) / f64::from(img.width());
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let height = ((f64::from(img.height()) * scale).round() as u32).max(1);
    image::imageops::resize(img, width, height, FilterType::Triangle)
}
