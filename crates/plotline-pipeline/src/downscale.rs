//! Image downscaling to a working resolution.
//!
//! Reduces the input image so the longest axis is at most the configured
//! `max_dimension`, preserving aspect ratio with a single scale factor.
//! All expensive downstream stages (blur, edge detection, thinning,
//! tracing) then operate on a bounded pixel grid.
//!
//! If the image is already at or below the cap, it is returned unchanged.

use image::DynamicImage;

/// Downscale a decoded image so the longest axis is at most
/// `max_dimension` pixels, using bilinear resampling.
///
/// Returns the (possibly unchanged) image and whether downscaling was
/// actually applied.
#[must_use]
pub fn downscale(image: &DynamicImage, max_dimension: u32) -> (DynamicImage, bool) {
    let long_axis = image.width().max(image.height());

    if long_axis <= max_dimension {
        return (image.clone(), false);
    }

    let resized = image.resize(
        max_dimension,
        max_dimension,
        image::imageops::FilterType::Triangle,
    );
    (resized, true)
}
