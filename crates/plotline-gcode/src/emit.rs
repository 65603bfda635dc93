//! Motion program emission.
//!
//! Serializes ordered vector paths into a G-code subset:
//!
//! - `;`-prefixed metadata comment lines
//! - a fixed setup block: `G21` (millimeters), `G90` (absolute
//!   positioning), `G92 X0.00 Y0.00` (origin set)
//! - per path: the configured pen-up line, a `G0` rapid to the path's
//!   first point at the travel rate, the configured pen-down line, then
//!   one `G1` linear move per remaining point at the feed rate
//! - a trailing pen-up, rapid back to the origin, and `M2`
//!
//! Coordinates are converted from pixels to millimeters by a single
//! linear scale and formatted with exactly 2 decimal places. An empty
//! path list still emits the header and end marker.

use std::fmt::Write;

use plotline_pipeline::{Dimensions, VectorPath};

use crate::config::MachineConfig;

/// Canvas-to-bed scale in mm/px: the largest uniform factor that fits
/// the raster inside the configured bed.
///
/// Degenerate dimensions fall back to 1.0 rather than dividing by zero.
#[must_use]
pub fn bed_scale(dimensions: Dimensions, config: &MachineConfig) -> f64 {
    if dimensions.width == 0 || dimensions.height == 0 {
        return 1.0;
    }
    (config.bed_width / f64::from(dimensions.width))
        .min(config.bed_height / f64::from(dimensions.height))
}

/// Emit a motion program, fitting the canvas to the configured bed.
#[must_use = "returns the motion program text"]
pub fn emit(paths: &[VectorPath], dimensions: Dimensions, config: &MachineConfig) -> String {
    emit_scaled(paths, config, bed_scale(dimensions, config))
}

/// Emit a motion program with an explicit canvas-to-bed scale in mm/px.
///
/// Paths are flattened at the configured curve resolution; flattened
/// paths with fewer than two points are skipped. The output always ends
/// with a pen lift, a rapid to the origin, and the `M2` end marker,
/// even when `paths` is empty.
#[must_use = "returns the motion program text"]
pub fn emit_scaled(paths: &[VectorPath], config: &MachineConfig, scale: f64) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "; plotline motion program");
    let _ = writeln!(out, "; paths: {}", paths.len());
    let _ = writeln!(
        out,
        "; bed: {:.0}mm x {:.0}mm",
        config.bed_width, config.bed_height,
    );
    let _ = writeln!(out, "; scale: {scale:.4} mm/px");
    out.push_str("G21\n");
    out.push_str("G90\n");
    out.push_str("G92 X0.00 Y0.00\n");

    for path in paths {
        let flat = path.flatten(config.curve_resolution);
        let points = flat.points();
        let Some((first, rest)) = points.split_first() else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }

        let _ = writeln!(out, "{}", config.pen_up);
        let _ = writeln!(
            out,
            "G0 X{:.2} Y{:.2} F{:.0}",
            first.x * scale,
            first.y * scale,
            config.travel_rate,
        );
        let _ = writeln!(out, "{}", config.pen_down);
        for point in rest {
            let _ = writeln!(
                out,
                "G1 X{:.2} Y{:.2} F{:.0}",
                point.x * scale,
                point.y * scale,
                config.feed_rate,
            );
        }
    }

    let _ = writeln!(out, "{}", config.pen_up);
    let _ = writeln!(out, "G0 X0.00 Y0.00 F{:.0}", config.travel_rate);
    let _ = writeln!(out, "M2");

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use plotline_pipeline::{Point, Segment};

    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    /// Straight-line path from `(x0, y0)` to `(x1, y1)`.
    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> VectorPath {
        VectorPath::new(
            Point::new(x0, y0),
            vec![Segment::Line {
                to: Point::new(x1, y1),
            }],
        )
    }

    #[test]
    fn bed_scale_fits_longest_axis() {
        let config = MachineConfig {
            bed_width: 100.0,
            bed_height: 100.0,
            ..MachineConfig::default()
        };
        // 200x100 canvas: width is the limiting axis.
        assert!((bed_scale(dims(200, 100), &config) - 0.5).abs() < 1e-12);
        // 100x200 canvas: height limits.
        assert!((bed_scale(dims(100, 200), &config) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn bed_scale_degenerate_dimensions_is_identity() {
        let config = MachineConfig::default();
        assert!((bed_scale(dims(0, 100), &config) - 1.0).abs() < f64::EPSILON);
        assert!((bed_scale(dims(100, 0), &config) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_paths_still_emit_header_and_end_marker() {
        let program = emit(&[], dims(100, 100), &MachineConfig::default());
        assert!(program.starts_with("; plotline motion program\n"));
        assert!(program.contains("; paths: 0\n"));
        assert!(program.contains("G21\n"));
        assert!(program.contains("G90\n"));
        assert!(program.contains("G92 X0.00 Y0.00\n"));
        assert!(program.ends_with("M2\n"));
    }

    #[test]
    fn single_path_brackets_draw_with_pen_commands() {
        let config = MachineConfig::default();
        let program = emit_scaled(&[line(0.0, 0.0, 10.0, 0.0)], &config, 1.0);
        let lines: Vec<&str> = program.lines().collect();

        let pen_down_pos = lines.iter().position(|l| *l == "G1 Z0").unwrap();
        assert_eq!(lines[pen_down_pos - 2], "G0 Z5");
        assert_eq!(lines[pen_down_pos - 1], "G0 X0.00 Y0.00 F6000");
        assert_eq!(lines[pen_down_pos + 1], "G1 X10.00 Y0.00 F1500");
    }

    #[test]
    fn two_path_program_matches_expected_motion() {
        let config = MachineConfig {
            bed_width: 100.0,
            feed_rate: 3000.0,
            travel_rate: 6000.0,
            ..MachineConfig::default()
        };
        let paths = vec![line(0.0, 0.0, 10.0, 0.0), line(0.0, 10.0, 10.0, 10.0)];
        let program = emit_scaled(&paths, &config, 1.0);

        let motion: Vec<&str> = program
            .lines()
            .filter(|l| l.starts_with("G0 X") || l.starts_with("G1 X"))
            .collect();
        assert_eq!(
            motion,
            vec![
                "G0 X0.00 Y0.00 F6000",
                "G1 X10.00 Y0.00 F3000",
                "G0 X0.00 Y10.00 F6000",
                "G1 X10.00 Y10.00 F3000",
                // Trailing return to origin.
                "G0 X0.00 Y0.00 F6000",
            ],
        );
    }

    #[test]
    fn coordinates_use_exactly_two_decimals() {
        let program = emit_scaled(
            &[line(1.0 / 3.0, 2.0 / 3.0, 10.5, 0.125)],
            &MachineConfig::default(),
            1.0,
        );
        for l in program.lines().filter(|l| l.contains(" X")) {
            for token in l.split_whitespace() {
                if let Some(value) = token.strip_prefix('X').or_else(|| token.strip_prefix('Y')) {
                    let decimals = value.split('.').nth(1).unwrap();
                    assert_eq!(decimals.len(), 2, "token {token} in line {l}");
                }
            }
        }
    }

    #[test]
    fn scale_applies_to_all_coordinates() {
        let program = emit_scaled(
            &[line(0.0, 0.0, 10.0, 20.0)],
            &MachineConfig::default(),
            0.5,
        );
        assert!(program.contains("G1 X5.00 Y10.00"));
    }

    #[test]
    fn single_point_path_is_skipped() {
        // A path that flattens to one point cannot be drawn.
        let dot = VectorPath::new(Point::new(5.0, 5.0), vec![]);
        let program = emit_scaled(&[dot], &MachineConfig::default(), 1.0);
        assert!(!program.contains("X5.00"));
        // Only the trailing return-to-origin rapid remains.
        let rapids = program.lines().filter(|l| l.starts_with("G0 X")).count();
        assert_eq!(rapids, 1);
    }

    #[test]
    fn quadratic_paths_are_flattened_at_configured_resolution() {
        let config = MachineConfig {
            curve_resolution: 4,
            ..MachineConfig::default()
        };
        let curved = VectorPath::new(
            Point::new(0.0, 0.0),
            vec![Segment::Quadratic {
                ctrl: Point::new(5.0, 10.0),
                to: Point::new(10.0, 0.0),
            }],
        );
        let program = emit_scaled(&[curved], &config, 1.0);
        // 4 samples = 4 linear moves for the one curved segment.
        let draws = program.lines().filter(|l| l.starts_with("G1 X")).count();
        assert_eq!(draws, 4);
    }

    #[test]
    fn custom_pen_commands_are_emitted_verbatim() {
        let config = MachineConfig {
            pen_up: "M3 S0".to_string(),
            pen_down: "M3 S90".to_string(),
            ..MachineConfig::default()
        };
        let program = emit_scaled(&[line(0.0, 0.0, 10.0, 0.0)], &config, 1.0);
        assert!(program.contains("M3 S0\n"));
        assert!(program.contains("M3 S90\n"));
        assert!(!program.contains("G0 Z5"));
    }

    #[test]
    fn emission_is_deterministic() {
        let paths = vec![line(0.0, 0.0, 10.0, 0.0), line(0.0, 10.0, 10.0, 10.0)];
        let config = MachineConfig::default();
        assert_eq!(
            emit(&paths, dims(50, 50), &config),
            emit(&paths, dims(50, 50), &config),
        );
    }
}
