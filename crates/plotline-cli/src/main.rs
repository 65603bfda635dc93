//! plotline: CLI driver for the tracing pipeline and motion codec.
//!
//! `trace` runs an image through the full pipeline and writes the
//! resulting motion program to a file or stdout. `preview` parses an
//! existing program back into a toolpath and prints a move summary.
//!
//! # Usage
//!
//! ```text
//! plotline trace drawing.png -o drawing.gcode
//! plotline preview drawing.gcode
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use plotline_gcode::{MachineConfig, MoveKind, emit, parse};
use plotline_pipeline::{PipelineConfig, TracerKind, order_paths, process_staged};

/// Convert raster images into pen plotter motion programs.
#[derive(Parser)]
#[command(name = "plotline", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Trace an image and emit a motion program.
    Trace(TraceArgs),
    /// Parse a motion program and print a toolpath summary.
    Preview(PreviewArgs),
}

#[derive(clap::Args)]
struct TraceArgs {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Write the motion program here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Working resolution (max dimension in pixels after downscaling).
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_MAX_DIMENSION)]
    max_dimension: u32,

    /// Edge detector gradient-magnitude cutoff.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_EDGE_THRESHOLD)]
    edge_threshold: u8,

    /// Trace the raw edge map instead of the thinned centerlines.
    #[arg(long)]
    raw_edges: bool,

    /// Simplification tolerance in pixels.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_SIMPLIFY_TOLERANCE)]
    simplify_tolerance: f64,

    #[command(flatten)]
    machine: MachineArgs,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, the individual pipeline parameter flags are
    /// ignored. The JSON must be a valid `PipelineConfig`
    /// serialization.
    #[arg(long)]
    config_json: Option<String>,
}

#[derive(clap::Args)]
struct PreviewArgs {
    /// Path to the motion program to parse.
    program_path: PathBuf,

    #[command(flatten)]
    machine: MachineArgs,
}

/// Machine parameters shared by both subcommands.
#[derive(clap::Args)]
struct MachineArgs {
    /// Bed width in millimeters.
    #[arg(long, default_value_t = MachineConfig::DEFAULT_BED_WIDTH)]
    bed_width: f64,

    /// Bed height in millimeters.
    #[arg(long, default_value_t = MachineConfig::DEFAULT_BED_HEIGHT)]
    bed_height: f64,

    /// Drawing speed in mm/min.
    #[arg(long, default_value_t = MachineConfig::DEFAULT_FEED_RATE)]
    feed_rate: f64,

    /// Travel speed in mm/min.
    #[arg(long, default_value_t = MachineConfig::DEFAULT_TRAVEL_RATE)]
    travel_rate: f64,

    /// Pen lift command line.
    #[arg(long, default_value = MachineConfig::DEFAULT_PEN_UP)]
    pen_up: String,

    /// Pen drop command line.
    #[arg(long, default_value = MachineConfig::DEFAULT_PEN_DOWN)]
    pen_down: String,

    /// Samples per quadratic segment when flattening curves.
    #[arg(long, default_value_t = MachineConfig::DEFAULT_CURVE_RESOLUTION)]
    curve_resolution: u32,
}

impl MachineArgs {
    fn to_config(&self) -> MachineConfig {
        MachineConfig {
            bed_width: self.bed_width,
            bed_height: self.bed_height,
            feed_rate: self.feed_rate,
            travel_rate: self.travel_rate,
            pen_up: self.pen_up.clone(),
            pen_down: self.pen_down.clone(),
            curve_resolution: self.curve_resolution,
            ..MachineConfig::default()
        }
    }
}

/// Build a [`PipelineConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual parameter flags are ignored.
fn pipeline_config(args: &TraceArgs) -> Result<PipelineConfig, String> {
    if let Some(ref json) = args.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(PipelineConfig {
        max_dimension: args.max_dimension,
        edge_threshold: args.edge_threshold,
        tracer: if args.raw_edges {
            TracerKind::RawEdge
        } else {
            TracerKind::Centerline
        },
        simplify_tolerance: args.simplify_tolerance,
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Trace(args) => run_trace(&args),
        Command::Preview(args) => run_preview(&args),
    }
}

fn run_trace(args: &TraceArgs) -> ExitCode {
    let config = match pipeline_config(args) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    let machine = args.machine.to_config();

    let image_bytes = match std::fs::read(&args.image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", args.image_path.display());
            return ExitCode::FAILURE;
        }
    };
    info!(
        image = %args.image_path.display(),
        bytes = image_bytes.len(),
        "tracing image"
    );

    let staged = match process_staged(&image_bytes, &config) {
        Ok(staged) => staged,
        Err(e) => {
            eprintln!("Pipeline error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let simplified_points: usize = staged.simplified.iter().map(plotline_pipeline::Polyline::len).sum();
    debug!(
        strokes = staged.traced.len(),
        simplified_points,
        "trace stages complete"
    );

    let ordered = order_paths(&staged.paths);
    let program = emit(&ordered, staged.dimensions, &machine);
    info!(
        paths = ordered.len(),
        width = staged.dimensions.width,
        height = staged.dimensions.height,
        program_bytes = program.len(),
        "motion program ready"
    );

    match args.output {
        Some(ref path) => match std::fs::write(path, &program) {
            Ok(()) => {
                eprintln!("Motion program written to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error writing {}: {e}", path.display());
                ExitCode::FAILURE
            }
        },
        None => {
            print!("{program}");
            ExitCode::SUCCESS
        }
    }
}

fn run_preview(args: &PreviewArgs) -> ExitCode {
    let machine = args.machine.to_config();

    let program = match std::fs::read_to_string(&args.program_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {e}", args.program_path.display());
            return ExitCode::FAILURE;
        }
    };

    let toolpath = parse(&program, &machine);

    let mut draw_len = 0.0;
    let mut travel_len = 0.0;
    for mv in &toolpath {
        match mv.kind {
            MoveKind::Draw => draw_len += mv.from.distance(mv.to),
            MoveKind::Travel => travel_len += mv.from.distance(mv.to),
        }
    }
    let draws = toolpath.iter().filter(|m| m.kind == MoveKind::Draw).count();

    println!("moves:  {}", toolpath.len());
    println!("draw:   {draws} moves, {draw_len:.1}mm");
    println!("travel: {} moves, {travel_len:.1}mm", toolpath.len() - draws);

    ExitCode::SUCCESS
}
