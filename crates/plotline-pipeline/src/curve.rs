//! Smoothed piecewise-curve encoding of simplified strokes.
//!
//! A [`VectorPath`] is a start anchor followed by line and quadratic
//! Bezier segments. Encoding routes each quadratic through the midpoint
//! of consecutive input points, with the interior point as the control:
//! the reconstructed shape is biased toward smoothness and deliberately
//! does *not* pass through interior points. This is intentional lossy
//! smoothing — the tolerance already applied by simplification bounds
//! how far the input could deviate anyway.
//!
//! Once produced, a path carries no raster data and is freely copyable.

use serde::{Deserialize, Serialize};

use crate::types::{Point, Polyline};

/// One segment of a [`VectorPath`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Straight line to `to`.
    Line {
        /// Segment endpoint.
        to: Point,
    },
    /// Quadratic Bezier curve to `to`, bent toward `ctrl`.
    Quadratic {
        /// Control point.
        ctrl: Point,
        /// Segment endpoint.
        to: Point,
    },
}

impl Segment {
    /// The endpoint this segment arrives at.
    #[must_use]
    pub const fn endpoint(&self) -> Point {
        match *self {
            Self::Line { to } | Self::Quadratic { to, .. } => to,
        }
    }
}

/// A smoothed vector path: a start anchor plus segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorPath {
    start: Point,
    segments: Vec<Segment>,
}

impl VectorPath {
    /// Create a path from a start anchor and segments.
    #[must_use]
    pub const fn new(start: Point, segments: Vec<Segment>) -> Self {
        Self { start, segments }
    }

    /// The start anchor.
    #[must_use]
    pub const fn start(&self) -> Point {
        self.start
    }

    /// The path's segments, in draw order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The point a pen enters this path at.
    #[must_use]
    pub const fn first_point(&self) -> Point {
        self.start
    }

    /// The point a pen leaves this path at.
    #[must_use]
    pub fn last_point(&self) -> Point {
        self.segments
            .last()
            .map_or(self.start, Segment::endpoint)
    }

    /// Flatten the path back into a polyline.
    ///
    /// Lines contribute their endpoint; each quadratic is sampled at
    /// `curve_resolution` uniform parameter steps (a resolution of 0 is
    /// treated as 1, i.e. a straight hop to the endpoint).
    #[must_use]
    pub fn flatten(&self, curve_resolution: u32) -> Polyline {
        let steps = curve_resolution.max(1);
        let mut points = vec![self.start];
        let mut cursor = self.start;

        for segment in &self.segments {
            match *segment {
                Segment::Line { to } => points.push(to),
                Segment::Quadratic { ctrl, to } => {
                    for step in 1..=steps {
                        let t = f64::from(step) / f64::from(steps);
                        points.push(quadratic_point(cursor, ctrl, to, t));
                    }
                }
            }
            cursor = segment.endpoint();
        }

        Polyline::new(points)
    }
}

/// Encode a simplified stroke as a smoothed vector path.
///
/// The first point becomes the start anchor; each interior point
/// contributes a quadratic segment controlled by that point and ending
/// at the midpoint toward the next; a final line segment reaches the
/// last point. Returns `None` for an empty stroke. Single-point strokes
/// become a segmentless path, two-point strokes a single line.
#[must_use]
pub fn encode(polyline: &Polyline) -> Option<VectorPath> {
    let points = polyline.points();
    let (&first, rest) = points.split_first()?;
    let Some(&last) = rest.last() else {
        return Some(VectorPath::new(first, Vec::new()));
    };

    let mut segments = Vec::with_capacity(points.len() - 1);
    for window in points.windows(2).skip(1) {
        segments.push(Segment::Quadratic {
            ctrl: window[0],
            to: window[0].midpoint(window[1]),
        });
    }
    segments.push(Segment::Line { to: last });

    Some(VectorPath::new(first, segments))
}

/// Standard quadratic Bezier evaluation:
/// `(1-t)^2 * p0 + 2(1-t)t * ctrl + t^2 * p1`.
fn quadratic_point(p0: Point, ctrl: Point, p1: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let w0 = u * u;
    let w1 = 2.0 * u * t;
    let w2 = t * t;
    Point::new(
        w2.mul_add(p1.x, w0.mul_add(p0.x, w1 * ctrl.x)),
        w2.mul_add(p1.y, w0.mul_add(p0.y, w1 * ctrl.y)),
    )
}
