//! Shared types for the plotline tracing pipeline.

use serde::{Deserialize, Serialize};

use crate::curve::VectorPath;
use crate::trace::TracerKind;

/// Re-export `GrayImage` so downstream crates can reference
/// intermediate raster data without depending on `image` directly.
pub use image::GrayImage;

/// A 2D point in planar coordinates.
///
/// Units are pixels while a path is still tied to its source raster and
/// millimeters once it has been scaled for a machine bed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Midpoint between this point and another.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// An ordered sequence of points forming one continuous stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polyline and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for the tracing pipeline.
///
/// All parameters have defaults exposed both through [`Default`] and as
/// associated `DEFAULT_*` consts so CLI flag defaults cannot silently
/// diverge from the library's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Working resolution: images are downscaled so the longest axis is
    /// at most this many pixels before any filtering runs.
    pub max_dimension: u32,

    /// Gradient-magnitude cutoff for the edge detector. Interior pixels
    /// whose Sobel magnitude exceeds this value become foreground.
    pub edge_threshold: u8,

    /// Which tracing strategy walks the binary raster into strokes.
    pub tracer: TracerKind,

    /// Douglas-Peucker simplification tolerance in pixels. Higher values
    /// remove more points, producing simpler paths.
    pub simplify_tolerance: f64,
}

impl PipelineConfig {
    /// Default working resolution cap in pixels.
    pub const DEFAULT_MAX_DIMENSION: u32 = 1000;
    /// Default edge detector cutoff.
    pub const DEFAULT_EDGE_THRESHOLD: u8 = 45;
    /// Default simplification tolerance in pixels.
    pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 2.0;
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_dimension: Self::DEFAULT_MAX_DIMENSION,
            edge_threshold: Self::DEFAULT_EDGE_THRESHOLD,
            tracer: TracerKind::default(),
            simplify_tolerance: Self::DEFAULT_SIMPLIFY_TOLERANCE,
        }
    }
}

/// Result of running the full tracing pipeline.
///
/// Contains the traced vector paths and metadata about the source image
/// needed by downstream consumers (e.g., the motion program emitter uses
/// the dimensions to derive the canvas-to-bed scale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// The vector paths produced by the pipeline, in trace order.
    pub paths: Vec<VectorPath>,

    /// Dimensions of the working raster in pixels (post-downscale).
    pub dimensions: Dimensions,
}

/// Result of running the pipeline with all intermediate stage outputs
/// preserved.
///
/// Each field captures the output of one logical pipeline stage, enabling
/// callers to display previews for every step of the processing chain.
///
/// Note: does not derive `PartialEq` or serde traits because `GrayImage`
/// implements neither; stage previews are consumed in-process.
#[derive(Debug, Clone)]
pub struct StagedResult {
    /// Stage 1: decoded, downscaled, grayscale image.
    pub grayscale: GrayImage,
    /// Stage 2: blurred image.
    pub blurred: GrayImage,
    /// Stage 3: thresholded binary edge map.
    pub edges: GrayImage,
    /// Stage 4: thinned centerline raster (`None` in raw-edge mode).
    pub skeleton: Option<GrayImage>,
    /// Stage 5: raw traced strokes.
    pub traced: Vec<Polyline>,
    /// Stage 6: simplified strokes.
    pub simplified: Vec<Polyline>,
    /// Stage 7: smoothed vector paths.
    pub paths: Vec<VectorPath>,
    /// Working raster dimensions in pixels.
    pub dimensions: Dimensions,
}

/// Errors that can occur during pipeline processing.
///
/// Degenerate imagery is not an error: a blank or featureless input
/// simply produces zero paths.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,
}
