//! Machine configuration for motion program generation.

use serde::{Deserialize, Serialize};

/// Physical and kinematic parameters of the target machine.
///
/// Immutable per pipeline run; supplied by whoever owns settings
/// persistence. Defaults are exposed both through [`Default`] and as
/// associated `DEFAULT_*` consts so CLI flag defaults cannot silently
/// diverge from the library's.
///
/// `pen_up` and `pen_down` are emitted verbatim as whole command lines.
/// The parser recognizes pen state by matching these exact strings back
/// (see [`crate::parse`]), so reconfiguring them affects both
/// directions of the codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Usable bed width in millimeters.
    pub bed_width: f64,
    /// Usable bed height in millimeters.
    pub bed_height: f64,
    /// Pen-down drawing speed in mm/min.
    pub feed_rate: f64,
    /// Pen-up repositioning speed in mm/min.
    pub travel_rate: f64,
    /// Literal command line that lifts the pen.
    pub pen_up: String,
    /// Literal command line that lowers the pen.
    pub pen_down: String,
    /// Samples per quadratic segment when flattening curves.
    pub curve_resolution: u32,
    /// Simplification tolerance handed to path editing tools, in the
    /// same units as the paths being edited.
    pub simplify_tolerance: f64,
}

impl MachineConfig {
    /// Default bed width in millimeters.
    pub const DEFAULT_BED_WIDTH: f64 = 300.0;
    /// Default bed height in millimeters.
    pub const DEFAULT_BED_HEIGHT: f64 = 200.0;
    /// Default drawing speed in mm/min.
    pub const DEFAULT_FEED_RATE: f64 = 1500.0;
    /// Default travel speed in mm/min.
    pub const DEFAULT_TRAVEL_RATE: f64 = 6000.0;
    /// Default pen lift: a small-elevation rapid move.
    pub const DEFAULT_PEN_UP: &'static str = "G0 Z5";
    /// Default pen drop: a zero-elevation linear move.
    pub const DEFAULT_PEN_DOWN: &'static str = "G1 Z0";
    /// Default samples per quadratic segment.
    pub const DEFAULT_CURVE_RESOLUTION: u32 = 8;
    /// Default editing simplification tolerance.
    pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 2.0;
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            bed_width: Self::DEFAULT_BED_WIDTH,
            bed_height: Self::DEFAULT_BED_HEIGHT,
            feed_rate: Self::DEFAULT_FEED_RATE,
            travel_rate: Self::DEFAULT_TRAVEL_RATE,
            pen_up: Self::DEFAULT_PEN_UP.to_string(),
            pen_down: Self::DEFAULT_PEN_DOWN.to_string(),
            curve_resolution: Self::DEFAULT_CURVE_RESOLUTION,
            simplify_tolerance: Self::DEFAULT_SIMPLIFY_TOLERANCE,
        }
    }
}
