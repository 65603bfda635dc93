//! Image decoding and grayscale conversion.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces a
//! single-channel grayscale image suitable for the filtering stages.
//!
//! Conversion uses the BT.601 luminance weights
//! `0.299*R + 0.587*G + 0.114*B`, rounded to the nearest integer.
//! Implemented in-crate rather than via `DynamicImage::to_luma8`, which
//! applies BT.709 weights and would shift every downstream threshold.

use image::{DynamicImage, GrayImage};

use crate::types::PipelineError;

/// Decode raw image bytes into a color image.
///
/// Supports PNG, JPEG, BMP, and WebP formats (whatever the `image` crate
/// can decode).
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    Ok(image::load_from_memory(bytes)?)
}

/// Convert a decoded image to grayscale with BT.601 luma weights.
///
/// Each pixel becomes `round(0.299*R + 0.587*G + 0.114*B)`, clamped to
/// `[0, 255]`. Alpha is ignored.
#[must_use = "returns the grayscale image"]
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    let rgba = image.to_rgba8();
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, _] = rgba.get_pixel(x, y).0;
        image::Luma([luma(r, g, b)])
    })
}

/// BT.601 weighted luminance of one RGB sample.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let value = 0.114f64.mul_add(
        f64::from(b),
        0.299f64.mul_add(f64::from(r), 0.587 * f64::from(g)),
    );
    value.round().clamp(0.0, 255.0) as u8
}
