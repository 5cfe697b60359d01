//! wallform: CLI for batch floor-plan wall detection.
//!
//! Runs the detection pipeline on a single image or every image in a
//! directory, writing per image:
//!
//! - `<stem>_walls.json` — wall document (full by default, `--minimal`
//!   for the id+points record format)
//! - `<stem>_detection.png` — walls drawn over the working-resolution
//!   plan
//! - `<stem>_walls.svg` — optional vector overlay (`--svg`)
//!
//! A failure on one image is logged and counted; the remaining images
//! are still processed.
//!
//! # Usage
//!
//! ```text
//! wallform [OPTIONS] <INPUT>
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info};

use wallform_pipeline::{DetectResult, MergeStrategy, PipelineConfig, WallConfig};

/// Floor-plan wall detection.
///
/// Detects axis-aligned wall segments in raster floor plans and
/// exports them for CAD/JSON consumers.
#[derive(Parser)]
#[command(name = "wallform", version)]
struct Cli {
    /// Input image (PNG, JPEG, BMP, WebP) or a directory of images.
    input: PathBuf,

    /// Directory for JSON/PNG/SVG outputs (created if missing).
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Working width in pixels; images are scaled to this width.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_RESIZE_WIDTH)]
    resize_width: u32,

    /// Canny low threshold.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_CANNY_LOW)]
    canny_low: f32,

    /// Canny high threshold.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_CANNY_HIGH)]
    canny_high: f32,

    /// Minimum Hough accumulator votes for a line.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_HOUGH_VOTE_THRESHOLD)]
    hough_threshold: u32,

    /// Minimum raw line segment length in pixels.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_MIN_LINE_LENGTH)]
    min_line_length: f64,

    /// Maximum bridged gap when extracting line segments, in pixels.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_MAX_LINE_GAP)]
    max_line_gap: f64,

    /// Angular tolerance for orientation filtering, in degrees.
    #[arg(long, default_value_t = WallConfig::DEFAULT_ANGLE_TOLERANCE)]
    angle_tolerance: f64,

    /// Endpoint distance for merging segments, in pixels.
    #[arg(long, default_value_t = WallConfig::DEFAULT_MERGE_DISTANCE)]
    merge_distance: f64,

    /// Minimum wall length in pixels.
    #[arg(long, default_value_t = WallConfig::DEFAULT_MIN_WALL_LENGTH)]
    min_wall_length: f64,

    /// Clustering strategy for the merge stage.
    #[arg(long, value_enum, default_value_t = Strategy::UnionFind)]
    merge_strategy: Strategy,

    /// Write the minimal id+points JSON record format instead of the
    /// full wall document.
    #[arg(long)]
    minimal: bool,

    /// Also write an SVG overlay per image.
    #[arg(long)]
    svg: bool,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, the individual pipeline parameter flags are
    /// ignored. Missing fields fall back to their defaults.
    #[arg(long)]
    config_json: Option<String>,
}

/// Clustering strategy selection.
#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    /// Transitive union-find clustering (order-independent).
    UnionFind,
    /// Legacy single-level clustering anchored on cluster seeds.
    SeedAnchored,
}

impl From<Strategy> for MergeStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::UnionFind => Self::UnionFind,
            Strategy::SeedAnchored => Self::SeedAnchored,
        }
    }
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
        if let Some(ref json) = self.config_json {
            return Ok(serde_json::from_str(json)?);
        }
        Ok(PipelineConfig {
            resize_width: self.resize_width,
            canny_low: self.canny_low,
            canny_high: self.canny_high,
            hough_vote_threshold: self.hough_threshold,
            min_line_length: self.min_line_length,
            max_line_gap: self.max_line_gap,
            walls: WallConfig {
                angle_tolerance: self.angle_tolerance,
                merge_distance: self.merge_distance,
                min_wall_length: self.min_wall_length,
                merge_strategy: self.merge_strategy.into(),
                ..WallConfig::default()
            },
            ..PipelineConfig::default()
        })
    }
}

/// Extensions accepted when scanning a directory.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

fn collect_images(input: &Path) -> std::io::Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut images: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
                })
        })
        .collect();
    images.sort();
    Ok(images)
}

/// Process one image: detect walls and write JSON, PNG, and optional
/// SVG outputs. Returns the number of walls found.
fn process_image(
    image_path: &Path,
    cli: &Cli,
    config: &PipelineConfig,
) -> Result<usize, Box<dyn std::error::Error>> {
    let bytes = fs::read(image_path)?;
    let staged = wallform_pipeline::process_staged(&bytes, config)?;

    info!(
        "{}: {} raw segments, {} snapped, {} walls",
        image_path.display(),
        staged.raw_segments.len(),
        staged.snapped.len(),
        staged.walls.len(),
    );

    let stem = image_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("plan");
    let source = image_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(stem);

    let result = DetectResult {
        walls: staged.walls.clone(),
        dimensions: staged.dimensions,
    };

    let json = if cli.minimal {
        wallform_export::to_json(&wallform_export::minimal_document(source, &result))?
    } else {
        wallform_export::to_json(&wallform_export::wall_document(source, &result))?
    };
    let json_path = cli.output_dir.join(format!("{stem}_walls.json"));
    fs::write(&json_path, json)?;

    let overlay = wallform_export::draw_walls(&staged.resized, &staged.walls);
    let overlay_path = cli.output_dir.join(format!("{stem}_detection.png"));
    overlay.save(&overlay_path)?;

    if cli.svg {
        let svg = wallform_export::to_svg(&staged.walls, staged.dimensions);
        let svg_path = cli.output_dir.join(format!("{stem}_walls.svg"));
        fs::write(&svg_path, svg)?;
    }

    Ok(result.walls.len())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match cli.pipeline_config() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        error!("invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let images = match collect_images(&cli.input) {
        Ok(images) => images,
        Err(e) => {
            error!("cannot read {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };
    if images.is_empty() {
        error!("no images found in {}", cli.input.display());
        return ExitCode::FAILURE;
    }

    if let Err(e) = fs::create_dir_all(&cli.output_dir) {
        error!(
            "cannot create output directory {}: {e}",
            cli.output_dir.display()
        );
        return ExitCode::FAILURE;
    }

    info!("processing {} image(s)", images.len());
    let mut failures = 0usize;
    for image_path in &images {
        match process_image(image_path, &cli, &config) {
            Ok(count) => info!("{}: {count} wall(s) written", image_path.display()),
            Err(e) => {
                // One bad image must not sink the batch.
                error!("{}: {e}", image_path.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        error!("{failures} of {} image(s) failed", images.len());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
