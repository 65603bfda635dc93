//! Stroke tracing: walk a binary raster into ordered point sequences.
//!
//! This module defines the [`Tracer`] trait for pluggable tracing
//! strategies and the [`TracerKind`] enum for selecting one at runtime.
//!
//! # Strategy pattern
//!
//! [`Centerline`](TracerKind::Centerline) is the canonical strategy: it
//! expects a thinned raster, starts every walk at an endpoint (a
//! foreground pixel with exactly one foreground neighbor) and sweeps up
//! closed loops afterwards. [`RawEdge`](TracerKind::RawEdge) is a
//! simpler fallback for untinned edge maps; it walks with a directional
//! bias so it does not immediately double back along a thick edge, and
//! it uses its own step cap and minimum stroke length. The two
//! strategies' constants are deliberately distinct.
//!
//! Visited pixels are tracked in a flat `width * height` byte array
//! indexed by `y * width + x`, not a hash set.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::types::{Point, Polyline};

/// Strokes from a thinned raster shorter than this are noise.
pub const MIN_CENTERLINE_POINTS: usize = 5;

/// Strokes from a raw edge map shorter than this are noise.
pub const MIN_RAW_EDGE_POINTS: usize = 10;

/// Per-stroke step bound for centerline walks.
pub const CENTERLINE_STEP_CAP: usize = 10_000;

/// Per-stroke step bound for raw-edge walks.
pub const RAW_EDGE_STEP_CAP: usize = 5_000;

/// The 8 neighbor offsets, clockwise from north.
const DIRECTIONS: [(i64, i64); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Selects which tracing strategy walks the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TracerKind {
    /// Endpoint-first walk over a thinned (centerline) raster.
    #[default]
    Centerline,
    /// Direction-biased walk directly over a thresholded edge map.
    RawEdge,
}

/// Trait for stroke tracing strategies.
///
/// Input: a binary raster (non-zero pixels = foreground).
/// Output: a set of disconnected strokes, one polyline each.
pub trait Tracer {
    /// Trace strokes in the given binary raster.
    fn trace(&self, raster: &GrayImage) -> Vec<Polyline>;
}

impl Tracer for TracerKind {
    fn trace(&self, raster: &GrayImage) -> Vec<Polyline> {
        match *self {
            Self::Centerline => trace_centerline(raster),
            Self::RawEdge => trace_raw_edge(raster),
        }
    }
}

/// Endpoint-first tracing for thinned rasters.
///
/// Phase 1 walks from every unvisited endpoint so open strokes are
/// captured tip-to-tip. Phase 2 sweeps the remaining unvisited
/// foreground, which can only belong to closed loops, and breaks each
/// loop open at the scan position.
fn trace_centerline(raster: &GrayImage) -> Vec<Polyline> {
    let grid = Grid::new(raster);
    let mut visited = vec![false; grid.w * grid.h];
    let mut strokes = Vec::new();

    // Phase 1: open strokes, started at endpoints.
    for y in 0..grid.h {
        for x in 0..grid.w {
            if grid.foreground(x, y)
                && !visited[y * grid.w + x]
                && grid.neighbor_count(x, y) == 1
            {
                let stroke = walk(&grid, &mut visited, x, y, CENTERLINE_STEP_CAP, false);
                if stroke.len() >= MIN_CENTERLINE_POINTS {
                    strokes.push(Polyline::new(stroke));
                }
            }
        }
    }

    // Phase 2: closed loops with no endpoint to anchor on.
    for y in 0..grid.h {
        for x in 0..grid.w {
            if grid.foreground(x, y) && !visited[y * grid.w + x] {
                let stroke = walk(&grid, &mut visited, x, y, CENTERLINE_STEP_CAP, false);
                if stroke.len() >= MIN_CENTERLINE_POINTS {
                    strokes.push(Polyline::new(stroke));
                }
            }
        }
    }

    strokes
}

/// Direction-biased tracing for raw (untinned) edge maps.
fn trace_raw_edge(raster: &GrayImage) -> Vec<Polyline> {
    let grid = Grid::new(raster);
    let mut visited = vec![false; grid.w * grid.h];
    let mut strokes = Vec::new();

    for y in 0..grid.h {
        for x in 0..grid.w {
            if grid.foreground(x, y) && !visited[y * grid.w + x] {
                let stroke = walk(&grid, &mut visited, x, y, RAW_EDGE_STEP_CAP, true);
                if stroke.len() >= MIN_RAW_EDGE_POINTS {
                    strokes.push(Polyline::new(stroke));
                }
            }
        }
    }

    strokes
}

/// Walk one stroke from `(x, y)`: mark, append, step to the first
/// unvisited foreground neighbor, repeat until stuck or `step_cap`.
///
/// Without bias the neighbor search always runs clockwise from north.
/// With bias it starts three directions counter-clockwise of the last
/// step taken, so a walk along a thick edge prefers to keep its heading
/// instead of curling back into pixels beside its own trail.
#[allow(clippy::cast_precision_loss)]
fn walk(
    grid: &Grid<'_>,
    visited: &mut [bool],
    start_x: usize,
    start_y: usize,
    step_cap: usize,
    biased: bool,
) -> Vec<Point> {
    let (mut x, mut y) = (start_x, start_y);
    let mut last_direction: Option<usize> = None;
    let mut stroke = Vec::new();

    loop {
        visited[y * grid.w + x] = true;
        stroke.push(Point::new(x as f64, y as f64));
        if stroke.len() >= step_cap {
            break;
        }

        let first = match (biased, last_direction) {
            (true, Some(dir)) => (dir + 5) % 8,
            _ => 0,
        };

        let mut stepped = false;
        for offset in 0..DIRECTIONS.len() {
            let dir = (first + offset) % 8;
            let (dx, dy) = DIRECTIONS[dir];
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= grid.w as i64 || ny >= grid.h as i64 {
                continue;
            }
            #[allow(clippy::cast_sign_loss)]
            let (nx, ny) = (nx as usize, ny as usize);
            if grid.foreground(nx, ny) && !visited[ny * grid.w + nx] {
                x = nx;
                y = ny;
                last_direction = Some(dir);
                stepped = true;
                break;
            }
        }

        if !stepped {
            break;
        }
    }

    stroke
}

/// Borrowed view of a binary raster with usize dimensions.
struct Grid<'a> {
    raster: &'a GrayImage,
    w: usize,
    h: usize,
}

impl<'a> Grid<'a> {
    fn new(raster: &'a GrayImage) -> Self {
        Self {
            raster,
            w: raster.width() as usize,
            h: raster.height() as usize,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn foreground(&self, x: usize, y: usize) -> bool {
        self.raster.get_pixel(x as u32, y as u32).0[0] > 0
    }

    /// Number of foreground pixels among the 8 neighbors.
    #[allow(clippy::cast_sign_loss)]
    fn neighbor_count(&self, x: usize, y: usize) -> usize {
        DIRECTIONS
            .iter()
            .filter(|(dx, dy)| {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                nx >= 0
                    && ny >= 0
                    && nx < self.w as i64
                    && ny < self.h as i64
                    && self.foreground(nx as usize, ny as usize)
            })
            .count()
    }
}
