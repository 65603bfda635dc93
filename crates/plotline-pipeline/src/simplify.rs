//! Stroke simplification using the Douglas-Peucker algorithm.
//!
//! Reduces point count in polylines by removing points that lie within a
//! given tolerance of the chord between their neighbors. Implemented
//! in-crate with an explicit work-stack of index ranges, so the depth of
//! the subdivision never touches the call stack regardless of input
//! size.
//!
//! Distances are compared squared, against `tolerance^2`, and measured
//! to the chord *segment* — the projection parameter is clamped to
//! `[0, 1]`, falling back to endpoint distance for points beyond either
//! end or when the chord is degenerate.

use crate::types::{Point, Polyline};

/// Simplify a single polyline under `tolerance`.
///
/// The first and last points are always retained; an interior point
/// survives only if some subdivision step finds it farther than
/// `tolerance` from its enclosing chord. Polylines with two or fewer
/// points are returned unchanged.
#[must_use = "returns the simplified polyline"]
pub fn simplify(polyline: &Polyline, tolerance: f64) -> Polyline {
    let points = polyline.points();
    if points.len() <= 2 {
        return polyline.clone();
    }

    let tolerance_sq = tolerance * tolerance;
    let mut kept = vec![false; points.len()];
    kept[0] = true;
    kept[points.len() - 1] = true;

    let mut ranges = vec![(0, points.len() - 1)];
    while let Some((first, last)) = ranges.pop() {
        if last <= first + 1 {
            continue;
        }

        let mut max_dist_sq = 0.0;
        let mut max_idx = first;
        for i in (first + 1)..last {
            let d = segment_distance_squared(points[i], points[first], points[last]);
            if d > max_dist_sq {
                max_dist_sq = d;
                max_idx = i;
            }
        }

        if max_dist_sq > tolerance_sq {
            kept[max_idx] = true;
            ranges.push((first, max_idx));
            ranges.push((max_idx, last));
        }
    }

    let simplified: Vec<Point> = points
        .iter()
        .zip(&kept)
        .filter(|&(_, k)| *k)
        .map(|(&p, _)| p)
        .collect();

    Polyline::new(simplified)
}

/// Simplify multiple polylines, applying the reduction to each
/// independently.
#[must_use = "returns the simplified polylines"]
pub fn simplify_paths(polylines: &[Polyline], tolerance: f64) -> Vec<Polyline> {
    polylines.iter().map(|pl| simplify(pl, tolerance)).collect()
}

/// Squared distance from point `p` to the segment `a`-`b`.
///
/// Projects `p` onto the segment's supporting line and clamps the
/// projection parameter to `[0, 1]`; coincident endpoints reduce to the
/// point-to-point distance.
fn segment_distance_squared(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx.mul_add(dx, dy * dy);

    if length_sq == 0.0 {
        return p.distance_squared(a);
    }

    let t = (dx.mul_add(p.x - a.x, dy * (p.y - a.y)) / length_sq).clamp(0.0, 1.0);
    let projection = Point::new(t.mul_add(dx, a.x), t.mul_add(dy, a.y));
    p.distance_squared(projection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_polyline_unchanged() {
        let pl = Polyline::new(vec![]);
        assert!(simplify(&pl, 1.0).is_empty());
    }

    #[test]
    fn two_points_unchanged() {
        let pl = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert_eq!(simplify(&pl, 1.0).len(), 2);
    }

    #[test]
    fn collinear_points_collapse_to_endpoints() {
        let pl = Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
            Point::new(4.0, 4.0),
        ]);
        let result = simplify(&pl, 0.5);
        assert_eq!(result.len(), 2);
        assert_eq!(result.points()[0], Point::new(0.0, 0.0));
        assert_eq!(result.points()[1], Point::new(4.0, 4.0));
    }

    #[test]
    fn endpoints_always_retained() {
        let pl = Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 8.0),
            Point::new(2.0, -3.0),
            Point::new(3.0, 0.5),
            Point::new(4.0, 1.0),
        ]);
        let result = simplify(&pl, 100.0);
        assert_eq!(result.len(), 2);
        assert_eq!(result.first(), pl.first());
        assert_eq!(result.last(), pl.last());
    }

    #[test]
    fn zigzag_retains_peaks() {
        let pl = Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 5.0),
            Point::new(4.0, 0.0),
            Point::new(6.0, 5.0),
            Point::new(8.0, 0.0),
        ]);
        // All peaks deviate > 1.0 from any enclosing chord.
        assert_eq!(simplify(&pl, 1.0).len(), 5);
    }

    #[test]
    fn large_tolerance_collapses_zigzag() {
        let pl = Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 5.0),
            Point::new(4.0, 0.0),
            Point::new(6.0, 5.0),
            Point::new(8.0, 0.0),
        ]);
        assert_eq!(simplify(&pl, 10.0).len(), 2);
    }

    #[test]
    fn retained_points_within_tolerance_of_result() {
        // Every dropped point must lie within tolerance of the segment
        // between its surviving neighbors.
        let tolerance = 1.5;
        let original: Vec<Point> = (0..40)
            .map(|i| {
                let x = f64::from(i);
                Point::new(x, (x / 3.0).sin() * 4.0)
            })
            .collect();
        let pl = Polyline::new(original.clone());
        let result = simplify(&pl, tolerance);
        let survivors = result.points();

        for p in &original {
            let min_dist_sq = survivors
                .windows(2)
                .map(|seg| segment_distance_squared(*p, seg[0], seg[1]))
                .fold(f64::INFINITY, f64::min);
            assert!(
                min_dist_sq <= tolerance * tolerance + 1e-9,
                "point ({}, {}) deviates {} > {tolerance}",
                p.x,
                p.y,
                min_dist_sq.sqrt(),
            );
        }
    }

    #[test]
    fn simplify_paths_applies_to_each() {
        let polylines = vec![
            Polyline::new(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(2.0, 2.0),
            ]),
            Polyline::new(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 5.0),
                Point::new(2.0, 0.0),
            ]),
        ];
        let results = simplify_paths(&polylines, 0.5);
        assert_eq!(results.len(), 2);
        // First polyline: collinear, collapses.
        assert_eq!(results[0].len(), 2);
        // Second polyline: peak well above tolerance, kept.
        assert_eq!(results[1].len(), 3);
    }

    #[test]
    fn deep_subdivision_does_not_overflow() {
        // A long alternating sawtooth forces one subdivision per point;
        // the explicit range stack keeps this off the call stack.
        let points: Vec<Point> = (0..10_000)
            .map(|i| {
                let x = f64::from(i);
                Point::new(x, if i % 2 == 0 { 0.0 } else { 10.0 })
            })
            .collect();
        let pl = Polyline::new(points);
        let result = simplify(&pl, 1.0);
        assert_eq!(result.len(), 10_000);
    }

    // --- segment_distance_squared ---

    #[test]
    fn distance_perpendicular_to_segment() {
        // Point (1, 3) projects inside the segment (0,0)-(2,0).
        let d = segment_distance_squared(
            Point::new(1.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
        );
        assert!((d - 9.0).abs() < 1e-10);
    }

    #[test]
    fn distance_clamps_beyond_segment_end() {
        // Point (5, 0) projects past b; distance falls back to |p - b|.
        let d = segment_distance_squared(
            Point::new(5.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
        );
        assert!((d - 9.0).abs() < 1e-10);
    }

    #[test]
    fn distance_clamps_before_segment_start() {
        let d = segment_distance_squared(
            Point::new(-3.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
        );
        assert!((d - 25.0).abs() < 1e-10);
    }

    #[test]
    fn distance_coincident_endpoints() {
        let d = segment_distance_squared(
            Point::new(3.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
        );
        assert!((d - 25.0).abs() < 1e-10);
    }
}
