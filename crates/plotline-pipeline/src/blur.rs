//! Fixed-kernel smoothing before edge detection.
//!
//! Applies a 3x3 Gaussian-like kernel to suppress high-frequency noise
//! that would otherwise produce spurious edges. Implemented in-crate
//! because the kernel, its normalization, and the border policy are all
//! fixed: interior pixels are convolved with
//! `[[1,2,1],[2,4,2],[1,2,1]] / 16`, the 1-pixel border is copied
//! through unfiltered.

use image::GrayImage;

/// Smoothing kernel, row-major. Weights sum to 16.
const KERNEL: [[u32; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];

/// Apply the fixed 3x3 blur to a grayscale image.
///
/// Interior pixels get the weighted average of their 3x3 neighborhood,
/// rounded to the nearest integer. Border pixels keep their input value.
/// Images narrower than 3 pixels in either axis have no interior and are
/// returned unchanged.
#[must_use = "returns the blurred image"]
#[allow(clippy::cast_possible_truncation)]
pub fn blur(image: &GrayImage) -> GrayImage {
    let (w, h) = (image.width(), image.height());
    let mut out = image.clone();

    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut acc = 0u32;
            for (ky, row) in KERNEL.iter().enumerate() {
                for (kx, &weight) in row.iter().enumerate() {
                    let px = x + kx as u32 - 1;
                    let py = y + ky as u32 - 1;
                    acc += weight * u32::from(image.get_pixel(px, py).0[0]);
                }
            }
            // +8 rounds instead of truncating.
            out.put_pixel(x, y, image::Luma([((acc + 8) / 16) as u8]));
        }
    }

    out
}
