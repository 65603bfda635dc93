//! plotline-gcode: Pure motion program codec (sans-IO)
//!
//! Serializes ordered vector paths into a constrained G-code subset and
//! parses that subset back into a drawable toolpath. Both directions
//! are plain string transformations with no I/O.

pub mod config;
pub mod emit;
pub mod parse;

pub use config::MachineConfig;
pub use emit::{bed_scale, emit, emit_scaled};
pub use parse::{MoveKind, ToolpathMove, parse};
