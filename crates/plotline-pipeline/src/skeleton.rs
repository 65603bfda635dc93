//! Morphological thinning of a binary edge map.
//!
//! Reduces thick foreground regions to 1-pixel-wide centerlines with the
//! classic two-subiteration thinning scheme: each pass collects removal
//! candidates against the pre-pass image, then deletes them together, so
//! decisions inside a pass never observe partially-updated state.
//!
//! The loop is bounded by [`MAX_ITERATIONS`]; hitting the cap is a
//! stopping condition, not an error, and the raster is returned as-is.

use image::GrayImage;

/// Upper bound on pass-1 + pass-2 iterations.
pub const MAX_ITERATIONS: usize = 100;

/// Which subiteration is running. The two differ only in the pair of
/// neighborhood products that must vanish.
#[derive(Clone, Copy)]
enum Subpass {
    First,
    Second,
}

/// Thin a binary raster until every foreground region is centerline-thin.
///
/// Input foreground is any non-zero pixel; output foreground is 255.
/// The 1-pixel border is never foreground and never examined. Already
/// thin input comes back unchanged (thinning is idempotent).
#[must_use = "returns the thinned raster"]
pub fn skeletonize(edges: &GrayImage) -> GrayImage {
    let (w, h) = (edges.width() as usize, edges.height() as usize);
    let mut grid: Vec<u8> = edges.pixels().map(|p| u8::from(p.0[0] > 0)).collect();

    if w >= 3 && h >= 3 {
        for _ in 0..MAX_ITERATIONS {
            let removed =
                thin_pass(&mut grid, w, h, Subpass::First) + thin_pass(&mut grid, w, h, Subpass::Second);
            if removed == 0 {
                break;
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    GrayImage::from_fn(edges.width(), edges.height(), |x, y| {
        image::Luma([grid[y as usize * w + x as usize] * 255])
    })
}

/// One subiteration: collect all removal candidates, then clear them.
///
/// Returns the number of pixels removed.
fn thin_pass(grid: &mut [u8], w: usize, h: usize, subpass: Subpass) -> usize {
    let mut candidates = Vec::new();

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if grid[y * w + x] == 0 {
                continue;
            }

            let p = ring(grid, w, x, y);
            let neighbors: u8 = p.iter().sum();
            if !(2..=6).contains(&neighbors) {
                continue;
            }
            if transitions(&p) != 1 {
                continue;
            }

            // p = [P2, P3, P4, P5, P6, P7, P8, P9], clockwise from north.
            let (c1, c2) = match subpass {
                Subpass::First => (p[0] * p[2] * p[4], p[2] * p[4] * p[6]),
                Subpass::Second => (p[0] * p[2] * p[6], p[0] * p[4] * p[6]),
            };
            if c1 == 0 && c2 == 0 {
                candidates.push(y * w + x);
            }
        }
    }

    for &idx in &candidates {
        grid[idx] = 0;
    }
    candidates.len()
}

/// The 8-neighborhood of an interior pixel, clockwise from north:
/// `[P2, P3, P4, P5, P6, P7, P8, P9]`.
fn ring(grid: &[u8], w: usize, x: usize, y: usize) -> [u8; 8] {
    [
        grid[(y - 1) * w + x],
        grid[(y - 1) * w + x + 1],
        grid[y * w + x + 1],
        grid[(y + 1) * w + x + 1],
        grid[(y + 1) * w + x],
        grid[(y + 1) * w + x - 1],
        grid[y * w + x - 1],
        grid[(y - 1) * w + x - 1],
    ]
}

/// Count of 0 -> 1 transitions walking the neighbor ring once, including
/// the wrap from P9 back to P2.
fn transitions(p: &[u8; 8]) -> u32 {
    (0..8)
        .map(|i| u32::from(p[i] == 0 && p[(i + 1) % 8] == 1))
        .sum()
}
