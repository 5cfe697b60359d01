//! wallform-pipeline: Pure floor-plan wall detection (sans-IO).
//!
//! Converts raster floor-plan images into identified wall segments
//! through: decode -> resize -> grayscale -> Otsu binarization ->
//! morphological denoise -> Canny edges -> Hough segment extraction ->
//! wall assembly (orientation snap, spatial merge, identification).
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. Filesystem and terminal
//! interaction live in the `wallform` CLI crate; serialization lives
//! in `wallform-export`.

pub mod assemble;
pub mod binarize;
pub mod edge;
pub mod grayscale;
pub mod hough;
pub mod merge;
pub mod orient;
pub mod resize;
pub mod types;

pub use assemble::detect_walls;
pub use types::{
    DetectResult, Dimensions, MergeStrategy, PipelineConfig, PipelineError, Point, RawSegment,
    StagedResult, Wall, WallConfig,
};

/// Run the full image-to-walls pipeline.
///
/// Takes raw image bytes (PNG, JPEG, BMP, WebP) and a configuration,
/// and produces a [`DetectResult`] with the identified walls and the
/// working-resolution dimensions the wall coordinates refer to.
///
/// Finding no walls is a valid outcome and yields an empty wall list,
/// not an error.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `image_bytes` is empty,
/// [`PipelineError::ImageDecode`] if the image cannot be decoded, and
/// [`PipelineError::InvalidConfig`] if the configuration fails
/// validation.
pub fn process(
    image_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<DetectResult, PipelineError> {
    let staged = process_staged(image_bytes, config)?;
    Ok(DetectResult {
        walls: staged.walls,
        dimensions: staged.dimensions,
    })
}

/// Run the pipeline keeping every intermediate stage output.
///
/// Used by visualizers (overlay rendering needs the working-resolution
/// image) and by diagnostics (per-stage counts).
///
/// # Errors
///
/// Same conditions as [`process`].
pub fn process_staged(
    image_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<StagedResult, PipelineError> {
    config.validate()?;

    // 1. Decode and normalize to working resolution.
    let decoded = grayscale::decode(image_bytes)?;
    let resized = resize::resize_to_width(&decoded, config.resize_width);
    let dimensions = Dimensions {
        width: resized.width(),
        height: resized.height(),
    };

    // 2. Grayscale.
    let gray = grayscale::to_grayscale(&resized);

    // 3. Otsu binarization and morphological denoise.
    let binary = binarize::denoise(&binarize::otsu_binarize(&gray));

    // 4. Canny edge detection.
    let edges = edge::canny(&binary, config.canny_low, config.canny_high);

    // 5. Hough line segment extraction.
    let raw_segments = hough::detect_segments(
        &edges,
        hough::SegmentOptions {
            vote_threshold: config.hough_vote_threshold,
            suppression_radius: config.hough_suppression_radius,
            min_line_length: config.min_line_length,
            max_line_gap: config.max_line_gap,
        },
    );

    // 6. Wall assembly: orientation snap, spatial merge, identification.
    let snapped = orient::filter_and_snap(&raw_segments, &config.walls);
    let merged = merge::merge_segments(&snapped, &config.walls);
    let walls = merged
        .into_iter()
        .enumerate()
        .map(|(i, segment)| Wall::from_segment(segment, i + 1))
        .collect();

    Ok(StagedResult {
        resized,
        grayscale: gray,
        binary,
        edges,
        raw_segments,
        snapped,
        walls,
        dimensions,
    })
}
