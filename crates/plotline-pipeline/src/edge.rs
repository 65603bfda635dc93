//! Sobel edge detection and binary thresholding.
//!
//! Computes the gradient magnitude of a blurred grayscale image with the
//! 3x3 Sobel operator and thresholds it into a binary edge map: 255 for
//! edge pixels, 0 for background. Only interior pixels are evaluated;
//! the 1-pixel border is always background, which lets every later stage
//! read 8-neighborhoods without bounds checks.

use image::GrayImage;

/// Horizontal Sobel kernel, row-major.
const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Vertical Sobel kernel, row-major.
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Detect edges by thresholded Sobel gradient magnitude.
///
/// The magnitude of each interior pixel is `min(255, sqrt(gx^2 + gy^2))`;
/// pixels strictly above `threshold` become foreground (255). Images
/// narrower than 3 pixels in either axis have no interior and produce an
/// all-background map.
#[must_use = "returns the binary edge map"]
pub fn sobel_edges(image: &GrayImage, threshold: u8) -> GrayImage {
    let (w, h) = (image.width(), image.height());
    let mut out = GrayImage::new(w, h);

    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let (mut gx, mut gy) = (0i32, 0i32);
            for ky in 0..3u32 {
                for kx in 0..3u32 {
                    let sample = i32::from(image.get_pixel(x + kx - 1, y + ky - 1).0[0]);
                    gx += SOBEL_X[ky as usize][kx as usize] * sample;
                    gy += SOBEL_Y[ky as usize][kx as usize] * sample;
                }
            }
            let magnitude = f64::from(gx * gx + gy * gy).sqrt().min(255.0);
            if magnitude > f64::from(threshold) {
                out.put_pixel(x, y, image::Luma([255]));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 20x20 image with a sharp vertical boundary at x = 10.
    fn sharp_edge_image() -> GrayImage {
        GrayImage::from_fn(20, 20, |x, _y| {
            if x < 10 { image::Luma([0]) } else { image::Luma([255]) }
        })
    }

    fn edge_count(edges: &GrayImage) -> u32 {
        edges.pixels().map(|p| u32::from(p.0[0] > 0)).sum()
    }

    #[test]
    fn blank_image_produces_no_edges() {
        let img = GrayImage::from_pixel(20, 20, image::Luma([128]));
        let edges = sobel_edges(&img, 45);
        assert_eq!(edge_count(&edges), 0, "expected no edges in uniform image");
    }

    #[test]
    fn sharp_boundary_detected() {
        let img = sharp_edge_image();
        let edges = sobel_edges(&img, 45);
        assert!(
            edge_count(&edges) > 0,
            "expected edges at sharp boundary, found none"
        );
        // The detected edge sits on the boundary columns.
        assert_eq!(edges.get_pixel(9, 10).0[0], 255);
        assert_eq!(edges.get_pixel(10, 10).0[0], 255);
        assert_eq!(edges.get_pixel(2, 10).0[0], 0);
    }

    #[test]
    fn output_is_binary() {
        let img = sharp_edge_image();
        let edges = sobel_edges(&img, 45);
        for p in edges.pixels() {
            assert!(p.0[0] == 0 || p.0[0] == 255, "non-binary value {}", p.0[0]);
        }
    }

    #[test]
    fn border_is_always_background() {
        let img = GrayImage::from_fn(12, 12, |x, y| image::Luma([((x * 37 + y * 91) % 256) as u8]));
        let edges = sobel_edges(&img, 10);
        let (w, h) = (img.width(), img.height());
        for x in 0..w {
            assert_eq!(edges.get_pixel(x, 0).0[0], 0);
            assert_eq!(edges.get_pixel(x, h - 1).0[0], 0);
        }
        for y in 0..h {
            assert_eq!(edges.get_pixel(0, y).0[0], 0);
            assert_eq!(edges.get_pixel(w - 1, y).0[0], 0);
        }
    }

    #[test]
    fn output_dimensions_match_input() {
        let img = GrayImage::new(17, 31);
        let edges = sobel_edges(&img, 45);
        assert_eq!(edges.width(), 17);
        assert_eq!(edges.height(), 31);
    }

    #[test]
    fn tiny_image_produces_empty_map() {
        let img = GrayImage::from_pixel(2, 2, image::Luma([255]));
        let edges = sobel_edges(&img, 45);
        assert_eq!(edge_count(&edges), 0);
    }

    #[test]
    fn higher_threshold_never_adds_edges() {
        let img = GrayImage::from_fn(20, 20, |x, y| image::Luma([((x * x + y * 13) % 256) as u8]));
        let low = sobel_edges(&img, 40);
        let high = sobel_edges(&img, 50);
        for (lo, hi) in low.pixels().zip(high.pixels()) {
            assert!(
                hi.0[0] <= lo.0[0],
                "raising the threshold must only remove edges",
            );
        }
    }
}
