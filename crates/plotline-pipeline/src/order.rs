//! Path ordering: sequence independent paths to reduce pen-up travel.
//!
//! Greedy nearest-neighbor heuristic: starting from the machine origin,
//! repeatedly jump to the remaining path whose entry point is closest to
//! wherever the pen just stopped. O(n^2) in path count. This is not a
//! minimum-tour solver and must not be mistaken for one — it only has
//! to beat the arbitrary order the tracer produced.
//!
//! Paths are never reversed: the pen always enters a path at its start
//! anchor, so the smoothed geometry is drawn exactly as encoded.

use crate::curve::VectorPath;
use crate::types::Point;

/// Reorder paths to reduce total travel distance.
///
/// Selection compares Euclidean distance from the current position to
/// each remaining path's first point; ties keep the earliest path in
/// the remaining list, so the ordering is deterministic. The current
/// position starts at the origin `(0, 0)` and tracks each chosen
/// path's last point. Every input path appears in the output exactly
/// once.
#[must_use = "returns the reordered paths"]
pub fn order_paths(paths: &[VectorPath]) -> Vec<VectorPath> {
    let mut visited = vec![false; paths.len()];
    let mut ordered = Vec::with_capacity(paths.len());
    let mut position = Point::new(0.0, 0.0);

    for _ in 0..paths.len() {
        let mut best: Option<usize> = None;
        let mut best_dist = f64::INFINITY;

        for (j, path) in paths.iter().enumerate() {
            if visited[j] {
                continue;
            }
            // Strict < keeps the earliest index on ties.
            let dist = position.distance_squared(path.first_point());
            if dist < best_dist {
                best_dist = dist;
                best = Some(j);
            }
        }

        let Some(best_idx) = best else {
            break;
        };
        visited[best_idx] = true;
        position = paths[best_idx].last_point();
        ordered.push(paths[best_idx].clone());
    }

    ordered
}
