//! Motion program parsing.
//!
//! Reconstructs a drawable toolpath from the G-code subset written by
//! [`crate::emit`]. This is a best-effort reconstructor, not a
//! validator: blank lines, comments and anything unrecognized are
//! skipped without error.
//!
//! # Pen-state heuristic
//!
//! Pen state is detected by literal substring matching against the
//! *configured* `pen_up` / `pen_down` command strings — exactly the
//! tokens the emitter writes, nothing more general. A program emitted
//! under one pen configuration and parsed under another will silently
//! misclassify draw and travel moves. That coupling is inherent to the
//! codec's scope (round-tripping its own output) and is deliberately
//! left as-is rather than grown into a command interpreter.

use serde::{Deserialize, Serialize};

use plotline_pipeline::Point;

use crate::config::MachineConfig;

/// Whether a move deposits ink or merely repositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Pen-down drawing motion.
    Draw,
    /// Pen-up repositioning motion.
    Travel,
}

/// One straight machine motion between two bed positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolpathMove {
    /// Where the motion starts, in millimeters.
    pub from: Point,
    /// Where the motion ends, in millimeters.
    pub to: Point,
    /// Draw or travel, per the pen state at emission time.
    pub kind: MoveKind,
    /// Speed of this motion in mm/min.
    pub feed_rate: f64,
}

/// Parse a motion program into a toolpath.
///
/// Line-oriented, with running state: position starts at the origin,
/// pen starts up, feed rate starts at `config.feed_rate`. Coordinate
/// and feed tokens are matched case-insensitively; pen commands are
/// matched literally (see the module docs). A `G92` line repositions
/// the running coordinates without producing a move. Every other line
/// carrying an `X` or `Y` token produces exactly one move; an axis
/// missing from the line carries its previous value.
#[must_use = "returns the reconstructed toolpath"]
pub fn parse(program: &str, config: &MachineConfig) -> Vec<ToolpathMove> {
    let mut moves = Vec::new();
    let mut position = Point::new(0.0, 0.0);
    let mut pen_down = false;
    let mut feed_rate = config.feed_rate;

    for raw in program.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if line.contains(config.pen_up.as_str()) {
            pen_down = false;
            continue;
        }
        if line.contains(config.pen_down.as_str()) {
            pen_down = true;
            continue;
        }

        let upper = line.to_uppercase();
        if let Some(f) = axis_value(&upper, 'F') {
            feed_rate = f;
        }

        let x = axis_value(&upper, 'X');
        let y = axis_value(&upper, 'Y');

        if upper.starts_with("G92") {
            // Origin set: reposition without motion.
            position = Point::new(x.unwrap_or(position.x), y.unwrap_or(position.y));
            continue;
        }

        if x.is_none() && y.is_none() {
            continue;
        }

        let target = Point::new(x.unwrap_or(position.x), y.unwrap_or(position.y));
        moves.push(ToolpathMove {
            from: position,
            to: target,
            kind: if pen_down {
                MoveKind::Draw
            } else {
                MoveKind::Travel
            },
            feed_rate,
        });
        position = target;
    }

    moves
}

/// Extract the numeric value following the first occurrence of `axis`.
///
/// `line` is expected to be uppercased already. Returns `None` when the
/// letter is absent or not followed by a parseable number.
fn axis_value(line: &str, axis: char) -> Option<f64> {
    let start = line.find(axis)? + 1;
    let rest = &line[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}
