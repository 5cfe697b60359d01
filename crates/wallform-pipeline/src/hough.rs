//! Raw line segment extraction from the edge map.
//!
//! [`imageproc::hough::detect_lines`] yields infinite polar lines
//! `(r, theta)`; walls are finite. Each detected polar line is walked
//! across the edge map pixel by pixel, and contiguous runs of edge
//! pixels become [`RawSegment`]s. Short interruptions (door openings
//! drawn into a wall, antialiasing dropouts) up to `max_line_gap`
//! pixels are bridged; runs shorter than `min_line_length` are
//! discarded.
//!
//! The output is an unordered collection of noisy, fragmented,
//! near-duplicate candidates; consolidation is the assembly stage's
//! job, not this one's.

use image::GrayImage;
use imageproc::hough::{LineDetectionOptions, PolarLine, detect_lines};

use crate::types::{Point, RawSegment};

/// Parameters for segment extraction.
#[derive(Debug, Clone, Copy)]
pub struct SegmentOptions {
    /// Minimum accumulator votes for a polar line to be considered.
    pub vote_threshold: u32,
    /// Non-maximum suppression radius in Hough parameter space.
    pub suppression_radius: u32,
    /// Minimum length in pixels of an emitted segment.
    pub min_line_length: f64,
    /// Maximum run of non-edge pixels bridged while walking a line.
    pub max_line_gap: f64,
}

/// Detect raw line segments in a binary edge map.
///
/// Returns an unordered collection of segments with integer endpoints
/// lying exactly on their detected polar lines. May be empty; that is
/// a valid result.
#[must_use = "returns the detected raw segments"]
pub fn detect_segments(edges: &GrayImage, options: SegmentOptions) -> Vec<RawSegment> {
    let polar_lines = detect_lines(
        edges,
        LineDetectionOptions {
            vote_threshold: options.vote_threshold,
            suppression_radius: options.suppression_radius,
        },
    );

    let mut segments = Vec::new();
    for line in &polar_lines {
        extract_along_line(edges, line, options, &mut segments);
    }
    segments
}

/// Walk one polar line across the edge map, appending the edge-pixel
/// runs it covers as segments.
///
/// The line `x*cos(theta) + y*sin(theta) = r` is parameterized as
/// `p(t) = (r*cos - t*sin, r*sin + t*cos)` and sampled at integer `t`
/// over the image diagonal. Accumulator quantization means edge pixels
/// sit up to one pixel off the ideal line, so each sample also checks
/// its two neighbors along the line normal. Run endpoints are taken
/// from the ideal line, keeping every emitted segment exactly
/// collinear with its polar line.
fn extract_along_line(
    edges: &GrayImage,
    line: &PolarLine,
    options: SegmentOptions,
    out: &mut Vec<RawSegment>,
) {
    let theta = f64::from(line.angle_in_degrees).to_radians();
    let (sin, cos) = theta.sin_cos();
    let r = f64::from(line.r);

    #[allow(clippy::cast_possible_truncation)]
    let t_max = f64::from(edges.width())
        .hypot(f64::from(edges.height()))
        .ceil() as i64;

    // Normal direction, rounded to the nearest pixel offset.
    #[allow(clippy::cast_possible_truncation)]
    let (nx, ny) = (cos.round() as i32, sin.round() as i32);

    let mut run: Option<(Point, Point)> = None;
    let mut gap = 0.0;

    for t in -t_max..=t_max {
        #[allow(clippy::cast_possible_truncation)]
        let x = (t as f64).mul_add(-sin, r * cos).round() as i32;
        #[allow(clippy::cast_possible_truncation)]
        let y = (t as f64).mul_add(cos, r * sin).round() as i32;

        if is_edge_near(edges, x, y, nx, ny) {
            let p = Point::new(x, y);
            run = match run {
                None => Some((p, p)),
                Some((start, _)) => Some((start, p)),
            };
            gap = 0.0;
        } else if let Some((start, end)) = run {
            gap += 1.0;
            if gap > options.max_line_gap {
                flush_run(start, end, options.min_line_length, out);
                run = None;
                gap = 0.0;
            }
        }
    }

    if let Some((start, end)) = run {
        flush_run(start, end, options.min_line_length, out);
    }
}

/// Check the sampled pixel and its two normal-direction neighbors.
fn is_edge_near(edges: &GrayImage, x: i32, y: i32, nx: i32, ny: i32) -> bool {
    [(x, y), (x + nx, y + ny), (x - nx, y - ny)]
        .into_iter()
        .any(|(px, py)| is_edge(edges, px, py))
}

fn is_edge(edges: &GrayImage, x: i32, y: i32) -> bool {
    if x < 0 || y < 0 {
        return false;
    }
    #[allow(clippy::cast_sign_loss)]
    let (ux, uy) = (x as u32, y as u32);
    ux < edges.width() && uy < edges.height() && edges.get_pixel(ux, uy).0[0] > 0
}

fn flush_run(start: Point, end: Point, min_line_length: f64, out: &mut Vec<RawSegment>) {
    let segment = RawSegment::new(start, end);
    if segment.length() >= min_line_length {
        out.push(segment);
    }
}
