//! Wall assembly: the full raw-segments-to-walls core.
//!
//! Runs orientation filtering/snapping, spatial clustering/merge, and
//! identifier assignment in that fixed order. Pure: no I/O, no shared
//! state between invocations, deterministic for identical input order
//! and configuration. Concurrent callers may share one `WallConfig`
//! across threads and run one invocation per image.

use crate::merge;
use crate::orient;
use crate::types::{RawSegment, Wall, WallConfig};

/// Convert raw line detections into identified wall segments.
///
/// Stages:
///
/// 1. Orientation filter and snap ([`orient::filter_and_snap`])
/// 2. Spatial clustering and merge ([`merge::merge_segments`])
/// 3. Sequential identification (`"w1"`, `"w2"`, ... in merge order)
///
/// An empty result is a valid, non-exceptional outcome: no input, or
/// every candidate filtered or merged away, yields an empty vector
/// rather than an error.
#[must_use = "returns the identified walls"]
pub fn detect_walls(raw_segments: &[RawSegment], config: &WallConfig) -> Vec<Wall> {
    let snapped = orient::filter_and_snap(raw_segments, config);
    let merged = merge::merge_segments(&snapped, config);

    merged
        .into_iter()
        .enumerate()
        .map(|(i, segment)| Wall::from_segment(segment, i + 1))
        .collect()
}
