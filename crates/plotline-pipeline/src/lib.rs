//! plotline-pipeline: Pure raster-to-vector tracing pipeline (sans-IO).
//!
//! Converts raster images into smoothed vector paths through:
//! decode -> downscale -> grayscale -> blur -> edge detection ->
//! thinning -> stroke tracing -> simplification -> curve encoding.
//!
//! This crate has **no I/O dependencies** — it operates on in-memory
//! byte slices and returns structured data. File handling, machine
//! communication and any remote tracing service live with the callers.
//!
//! Every stage is a synchronous, deterministic transformation over
//! owned buffers, so independent pipeline runs may execute concurrently
//! with no coordination.

pub mod blur;
pub mod curve;
pub mod downscale;
pub mod edge;
pub mod grayscale;
pub mod order;
pub mod simplify;
pub mod skeleton;
pub mod trace;
pub mod types;

pub use curve::{Segment, VectorPath};
pub use order::order_paths;
pub use trace::{Tracer, TracerKind};
pub use types::{
    Dimensions, GrayImage, PipelineConfig, PipelineError, Point, Polyline, ProcessResult,
    StagedResult,
};

/// Run the full tracing pipeline.
///
/// Takes raw image bytes (PNG, JPEG, BMP, WebP) and a configuration,
/// and produces a [`ProcessResult`] containing the traced vector paths
/// and the working raster dimensions. The dimensions are needed by the
/// motion program emitter to derive the canvas-to-bed scale.
///
/// A featureless image is not an error: it produces zero paths.
///
/// # Pipeline steps
///
/// 1. Decode the image
/// 2. Downscale to the working resolution
/// 3. Grayscale conversion
/// 4. Fixed-kernel blur
/// 5. Sobel edge detection + threshold
/// 6. Thinning and tracing (strategy-dependent, see [`trace_edge_map`])
/// 7. Stroke simplification
/// 8. Curve encoding
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized.
pub fn process(
    image_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<ProcessResult, PipelineError> {
    let staged = process_staged(image_bytes, config)?;
    Ok(ProcessResult {
        paths: staged.paths,
        dimensions: staged.dimensions,
    })
}

/// Trace an already-binarized edge map into vector paths.
///
/// This is the ingestion point for edge rasters produced outside the
/// local filtering stages — for example by a remote tracing service.
/// It runs the identical tail of the pipeline (thinning when the
/// centerline strategy is selected, then tracing, simplification and
/// curve encoding), so downstream behavior is the same regardless of
/// which side supplied the raster. Infallible: a blank map yields an
/// empty vec.
#[must_use = "returns the traced vector paths"]
pub fn trace_edge_map(edges: &GrayImage, config: &PipelineConfig) -> Vec<VectorPath> {
    trace_edge_map_staged(edges, config).3
}

/// Run the pipeline preserving every intermediate stage output.
///
/// Same processing as [`process`], but each stage's raster or stroke
/// set is kept in the returned [`StagedResult`] so callers can render
/// previews of the whole chain.
///
/// # Errors
///
/// Same conditions as [`process`].
pub fn process_staged(
    image_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<StagedResult, PipelineError> {
    let decoded = grayscale::decode(image_bytes)?;
    let (working, _) = downscale::downscale(&decoded, config.max_dimension);
    let gray = grayscale::to_grayscale(&working);
    let dimensions = Dimensions {
        width: gray.width(),
        height: gray.height(),
    };

    let blurred = blur::blur(&gray);
    let edges = edge::sobel_edges(&blurred, config.edge_threshold);
    let (skeleton, traced, simplified, paths) = trace_edge_map_staged(&edges, config);

    Ok(StagedResult {
        grayscale: gray,
        blurred,
        edges,
        skeleton,
        traced,
        simplified,
        paths,
        dimensions,
    })
}

/// Shared tail of the pipeline: thin (centerline strategy only), trace,
/// simplify, encode. Returns the optional skeleton raster, the raw
/// strokes, the simplified strokes, and the encoded paths.
fn trace_edge_map_staged(
    edges: &GrayImage,
    config: &PipelineConfig,
) -> (
    Option<GrayImage>,
    Vec<Polyline>,
    Vec<Polyline>,
    Vec<VectorPath>,
) {
    let (skeleton, traced) = match config.tracer {
        TracerKind::Centerline => {
            let thinned = skeleton::skeletonize(edges);
            let traced = config.tracer.trace(&thinned);
            (Some(thinned), traced)
        }
        TracerKind::RawEdge => (None, config.tracer.trace(edges)),
    };

    let simplified = simplify::simplify_paths(&traced, config.simplify_tolerance);
    let paths = simplified.iter().filter_map(curve::encode).collect();

    (skeleton, traced, simplified, paths)
}
