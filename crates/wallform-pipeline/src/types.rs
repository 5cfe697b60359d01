//! Shared types for the wallform detection pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference
/// intermediate raster data without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbaImage` so downstream crates can reference the
/// working-resolution source image without depending on `image` directly.
pub use image::RgbaImage;

/// A 2D point in image pixel coordinates.
///
/// Coordinates are integral: every point originates from a pixel of the
/// edge map, and consolidated wall endpoints are rounded back onto the
/// pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from the left edge).
    pub x: i32,
    /// Vertical position (pixels from the top edge).
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }
}

/// A raw straight-line candidate produced by the line detector.
///
/// Length and angle are derived from the endpoints on demand rather
/// than stored, so they can never disagree with the geometry. Raw
/// segments carry no identifier; identifiers exist only on the final
/// [`Wall`] shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSegment {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
}

impl RawSegment {
    /// Create a new raw segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Euclidean length in pixels.
    #[must_use]
    pub fn length(self) -> f64 {
        self.start.distance(self.end)
    }

    /// Orientation of the segment in degrees, normalized into `[0, 180)`.
    ///
    /// A segment and its endpoint-reversed counterpart share the same
    /// angle: the direction `start -> end` is reduced modulo 180, so a
    /// raw 180 maps to 0.
    #[must_use]
    pub fn angle(self) -> f64 {
        let dx = f64::from(self.end.x - self.start.x);
        let dy = f64::from(self.end.y - self.start.y);
        dy.atan2(dx).to_degrees().rem_euclid(180.0)
    }
}

/// A final, identified wall segment.
///
/// Produced only by the assembly stage. `length` and `angle` are frozen
/// copies of the derived values at identification time; the endpoints
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Sequential identifier in detection order: `"w1"`, `"w2"`, ...
    pub id: String,
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
    /// Euclidean length in pixels.
    pub length: f64,
    /// Orientation in degrees, in `[0, 180)`.
    pub angle: f64,
}

impl Wall {
    /// Build a wall from a consolidated segment and its 1-based index.
    #[must_use]
    pub fn from_segment(segment: RawSegment, index: usize) -> Self {
        Self {
            id: format!("w{index}"),
            start: segment.start,
            end: segment.end,
            length: segment.length(),
            angle: segment.angle(),
        }
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// How mergeable segments are grouped into clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MergeStrategy {
    /// Union-find over all mergeable pairs: transitive and independent
    /// of input order within each cluster.
    #[default]
    UnionFind,

    /// Single pass anchored on the first unconsumed segment: later
    /// segments join a cluster only if mergeable against the seed
    /// itself, never against other members. Kept for bit-for-bit
    /// parity with the historical behavior.
    SeedAnchored,
}

/// Parameters of the wall assembly core.
///
/// All parameters have documented defaults; deserializing a partial
/// mapping fills the gaps from [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Maximum angular distance (degrees) from the nearest target angle
    /// for a raw segment to survive orientation filtering.
    pub angle_tolerance: f64,

    /// Maximum endpoint-to-endpoint distance (pixels) for two segments
    /// to be considered part of the same wall.
    pub merge_distance: f64,

    /// Minimum length (pixels) of a consolidated segment to be emitted
    /// as a wall.
    pub min_wall_length: f64,

    /// Canonical orientations (degrees) the snapper knows how to
    /// produce. Must be a superset of `target_angles`.
    pub snap_angles: Vec<f64>,

    /// Orientations (degrees) actually enforced during filtering, in
    /// priority order: a segment equidistant between two targets snaps
    /// to the one listed first.
    pub target_angles: Vec<f64>,

    /// Clustering behavior of the merge stage.
    pub merge_strategy: MergeStrategy,
}

impl WallConfig {
    /// Default angular tolerance in degrees.
    pub const DEFAULT_ANGLE_TOLERANCE: f64 = 10.0;
    /// Default merge distance in pixels.
    pub const DEFAULT_MERGE_DISTANCE: f64 = 20.0;
    /// Default minimum wall length in pixels.
    pub const DEFAULT_MIN_WALL_LENGTH: f64 = 100.0;
    /// Default canonical snap angles in degrees.
    pub const DEFAULT_SNAP_ANGLES: [f64; 4] = [0.0, 45.0, 90.0, 135.0];
    /// Default enforced target angles in degrees.
    pub const DEFAULT_TARGET_ANGLES: [f64; 2] = [0.0, 90.0];

    /// Check the configuration for values no pipeline run can satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] when a tolerance or
    /// distance is negative or non-finite, `target_angles` is empty, or
    /// a target angle is not listed in `snap_angles`.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let finite_non_negative = |name: &str, v: f64| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(PipelineError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {v}"
                )))
            }
        };
        finite_non_negative("angle_tolerance", self.angle_tolerance)?;
        finite_non_negative("merge_distance", self.merge_distance)?;
        finite_non_negative("min_wall_length", self.min_wall_length)?;

        if self.target_angles.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "target_angles must not be empty".to_owned(),
            ));
        }
        for &target in &self.target_angles {
            if !self.snap_angles.iter().any(|&s| (s - target).abs() < 1e-9) {
                return Err(PipelineError::InvalidConfig(format!(
                    "target angle {target} is not in snap_angles"
                )));
            }
        }
        Ok(())
    }
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            angle_tolerance: Self::DEFAULT_ANGLE_TOLERANCE,
            merge_distance: Self::DEFAULT_MERGE_DISTANCE,
            min_wall_length: Self::DEFAULT_MIN_WALL_LENGTH,
            snap_angles: Self::DEFAULT_SNAP_ANGLES.to_vec(),
            target_angles: Self::DEFAULT_TARGET_ANGLES.to_vec(),
            merge_strategy: MergeStrategy::default(),
        }
    }
}

/// Configuration for the full image-to-walls pipeline.
///
/// Wraps the preprocessing and line-detection parameters around the
/// core [`WallConfig`]. Deserializing a partial mapping fills gaps from
/// [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Working width in pixels; input images are scaled to this width
    /// preserving aspect ratio before any processing.
    pub resize_width: u32,

    /// Canny edge detector low threshold.
    pub canny_low: f32,

    /// Canny edge detector high threshold.
    pub canny_high: f32,

    /// Minimum accumulator votes for a Hough line to be considered.
    pub hough_vote_threshold: u32,

    /// Non-maximum suppression radius in Hough parameter space.
    pub hough_suppression_radius: u32,

    /// Minimum length (pixels) of an extracted raw line segment.
    pub min_line_length: f64,

    /// Maximum run of non-edge pixels bridged when walking a Hough line
    /// across the edge map.
    pub max_line_gap: f64,

    /// Wall assembly parameters.
    pub walls: WallConfig,
}

impl PipelineConfig {
    /// Default working width in pixels.
    pub const DEFAULT_RESIZE_WIDTH: u32 = 1024;
    /// Default Canny low threshold.
    pub const DEFAULT_CANNY_LOW: f32 = 50.0;
    /// Default Canny high threshold.
    pub const DEFAULT_CANNY_HIGH: f32 = 150.0;
    /// Default Hough vote threshold.
    pub const DEFAULT_HOUGH_VOTE_THRESHOLD: u32 = 80;
    /// Default Hough suppression radius.
    pub const DEFAULT_HOUGH_SUPPRESSION_RADIUS: u32 = 8;
    /// Default minimum raw line length in pixels.
    pub const DEFAULT_MIN_LINE_LENGTH: f64 = 50.0;
    /// Default maximum bridged gap in pixels.
    pub const DEFAULT_MAX_LINE_GAP: f64 = 20.0;

    /// Check the configuration for values no pipeline run can satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] for a zero working
    /// width, non-finite line parameters, or an invalid [`WallConfig`].
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.resize_width == 0 {
            return Err(PipelineError::InvalidConfig(
                "resize_width must be at least 1".to_owned(),
            ));
        }
        if !self.min_line_length.is_finite() || self.min_line_length < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "min_line_length must be finite and non-negative, got {}",
                self.min_line_length
            )));
        }
        if !self.max_line_gap.is_finite() || self.max_line_gap < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "max_line_gap must be finite and non-negative, got {}",
                self.max_line_gap
            )));
        }
        self.walls.validate()
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            resize_width: Self::DEFAULT_RESIZE_WIDTH,
            canny_low: Self::DEFAULT_CANNY_LOW,
            canny_high: Self::DEFAULT_CANNY_HIGH,
            hough_vote_threshold: Self::DEFAULT_HOUGH_VOTE_THRESHOLD,
            hough_suppression_radius: Self::DEFAULT_HOUGH_SUPPRESSION_RADIUS,
            min_line_length: Self::DEFAULT_MIN_LINE_LENGTH,
            max_line_gap: Self::DEFAULT_MAX_LINE_GAP,
            walls: WallConfig::default(),
        }
    }
}

/// Result of running the full detection pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectResult {
    /// Identified walls in detection order. Empty when nothing
    /// survives filtering or merging; that is a valid result, not an
    /// error.
    pub walls: Vec<Wall>,

    /// Working-resolution dimensions the wall coordinates refer to.
    ///
    /// Exporters use this to set coordinate spaces (e.g., the SVG
    /// `viewBox`).
    pub dimensions: Dimensions,
}

/// Result of running the pipeline with all intermediate stage outputs
/// preserved, for overlays and diagnostics.
///
/// Does not derive `PartialEq` or serde traits: the raster fields are
/// bulky intermediates consumed in-process by visualizers, not part of
/// the persisted contract.
#[derive(Debug, Clone)]
pub struct StagedResult {
    /// Stage 1: working-resolution RGBA image (overlay background).
    pub resized: RgbaImage,
    /// Stage 2: grayscale image.
    pub grayscale: GrayImage,
    /// Stage 3: Otsu-binarized, denoised foreground mask.
    pub binary: GrayImage,
    /// Stage 4: Canny edge map.
    pub edges: GrayImage,
    /// Stage 5: raw Hough line segments.
    pub raw_segments: Vec<RawSegment>,
    /// Stage 6: orientation-filtered, snapped segments.
    pub snapped: Vec<RawSegment>,
    /// Stage 7: identified walls.
    pub walls: Vec<Wall>,
    /// Working-resolution dimensions.
    pub dimensions: Dimensions,
}

/// Errors that can occur during pipeline processing.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Pipeline configuration is invalid.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}
