//! Spatial clustering and consolidation of snapped segments.
//!
//! The Hough stage reports one physical wall as several fragmented,
//! near-duplicate segments (both faces of a thick stroke, runs split by
//! door openings). This stage partitions mutually-proximate,
//! similarly-oriented segments into clusters and collapses each cluster
//! into a single consolidated segment.
//!
//! Two clustering strategies are available (see
//! [`MergeStrategy`](crate::types::MergeStrategy)): the default
//! union-find grouping, which is transitive and independent of input
//! order within a cluster, and the legacy seed-anchored single pass,
//! which joins a segment only if it is mergeable against the cluster's
//! seed segment.

use std::collections::HashMap;

use petgraph::unionfind::UnionFind;

use crate::types::{MergeStrategy, Point, RawSegment, WallConfig};

/// Maximum angle difference in degrees for two segments to merge.
///
/// Deliberately independent of the configured `angle_tolerance`: by the
/// time segments reach this stage they are snapped onto canonical
/// angles, so this only needs to separate distinct orientations.
pub const MAX_MERGE_ANGLE_DIFF: f64 = 5.0;

/// Decide whether two segments belong to the same wall.
///
/// Requires both an angle difference of at most
/// [`MAX_MERGE_ANGLE_DIFF`] and at least one endpoint of one segment
/// within `merge_distance` of an endpoint of the other (all four
/// combinations are checked).
#[must_use]
pub fn mergeable(a: RawSegment, b: RawSegment, merge_distance: f64) -> bool {
    if (a.angle() - b.angle()).abs() > MAX_MERGE_ANGLE_DIFF {
        return false;
    }

    [a.start, a.end]
        .into_iter()
        .any(|p| [b.start, b.end].into_iter().any(|q| p.distance(q) <= merge_distance))
}

/// Cluster segments and collapse each cluster into one consolidated
/// segment, dropping results shorter than `config.min_wall_length`.
///
/// Degenerate clusters (zero extent) collapse to zero-length segments
/// and are removed by the same length filter. Output order is
/// deterministic: clusters appear in order of their earliest member.
#[must_use = "returns the consolidated segments"]
pub fn merge_segments(segments: &[RawSegment], config: &WallConfig) -> Vec<RawSegment> {
    let clusters = match config.merge_strategy {
        MergeStrategy::UnionFind => cluster_union_find(segments, config.merge_distance),
        MergeStrategy::SeedAnchored => cluster_seed_anchored(segments, config.merge_distance),
    };

    clusters
        .into_iter()
        .filter_map(|members| {
            let points: Vec<Point> = members
                .into_iter()
                .flat_map(|i| [segments[i].start, segments[i].end])
                .collect();
            let merged = reconstruct(&points)?;
            (merged.length() >= config.min_wall_length).then_some(merged)
        })
        .collect()
}

/// Transitive clustering: union every mergeable pair, then group by
/// set representative. Clusters are ordered by their first member
/// index.
fn cluster_union_find(segments: &[RawSegment], merge_distance: f64) -> Vec<Vec<usize>> {
    let mut sets = UnionFind::<usize>::new(segments.len());
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            if mergeable(segments[i], segments[j], merge_distance) {
                sets.union(i, j);
            }
        }
    }

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut by_root: HashMap<usize, usize> = HashMap::new();
    for i in 0..segments.len() {
        let root = sets.find(i);
        match by_root.get(&root) {
            Some(&cluster) => clusters[cluster].push(i),
            None => {
                by_root.insert(root, clusters.len());
                clusters.push(vec![i]);
            }
        }
    }
    clusters
}

/// Legacy single-level clustering: process segments in input order,
/// seed a cluster with the first unconsumed segment, and absorb later
/// segments mergeable against that seed. A segment mergeable only with
/// a non-seed member is never joined; callers needing transitive
/// closure use [`MergeStrategy::UnionFind`](crate::types::MergeStrategy)
/// or run this pass iteratively.
fn cluster_seed_anchored(segments: &[RawSegment], merge_distance: f64) -> Vec<Vec<usize>> {
    let mut consumed = vec![false; segments.len()];
    let mut clusters = Vec::new();

    for i in 0..segments.len() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;
        let mut members = vec![i];

        for j in (i + 1)..segments.len() {
            if !consumed[j] && mergeable(segments[i], segments[j], merge_distance) {
                consumed[j] = true;
                members.push(j);
            }
        }
        clusters.push(members);
    }
    clusters
}

/// Collapse a cluster's accumulated endpoints into one segment.
///
/// Takes the bounding box of all points. A wider-than-tall cluster is
/// treated as horizontal, running from `min_x` to `max_x` at the mean
/// y-coordinate; otherwise vertical, from `min_y` to `max_y` at the
/// mean x. Means are rounded to the nearest integer.
fn reconstruct(points: &[Point]) -> Option<RawSegment> {
    let first = points.first()?;
    let (mut min_x, mut max_x) = (first.x, first.x);
    let (mut min_y, mut max_y) = (first.y, first.y);
    let (mut sum_x, mut sum_y) = (0i64, 0i64);

    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
        sum_x += i64::from(p.x);
        sum_y += i64::from(p.y);
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let mean = |sum: i64| (sum as f64 / points.len() as f64).round() as i32;

    let segment = if (max_x - min_x).abs() > (max_y - min_y).abs() {
        let y = mean(sum_y);
        RawSegment::new(Point::new(min_x, y), Point::new(max_x, y))
    } else {
        let x = mean(sum_x);
        RawSegment::new(Point::new(x, min_y), Point::new(x, max_y))
    };
    Some(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x0: i32, y0: i32, x1: i32, y1: i32) -> RawSegment {
        RawSegment::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    fn config(min_wall_length: f64) -> WallConfig {
        WallConfig {
            min_wall_length,
            ..WallConfig::default()
        }
    }

    #[test]
    fn collinear_fragments_merge_into_one_wall() {
        // Endpoint distance (60,50)-(70,52) is ~10.2, within the default
        // merge distance of 20.
        let fragments = [seg(10, 50, 60, 50), seg(70, 52, 120, 52)];
        let merged = merge_segments(&fragments, &config(50.0));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start, Point::new(10, 51));
        assert_eq!(merged[0].end, Point::new(120, 51));
        assert!((merged[0].length() - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distant_fragments_stay_separate() {
        let fragments = [seg(0, 0, 60, 0), seg(100, 0, 160, 0)];
        let merged = merge_segments(&fragments, &config(50.0));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn orthogonal_neighbors_do_not_merge() {
        // Touching endpoints but 90 degrees apart.
        let a = seg(0, 0, 100, 0);
        let b = seg(100, 0, 100, 100);
        assert!(!mergeable(a, b, 20.0));
        let merged = merge_segments(&[a, b], &config(50.0));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn short_consolidated_segment_is_dropped() {
        let merged = merge_segments(&[seg(0, 0, 80, 0)], &config(100.0));
        assert!(merged.is_empty());
    }

    #[test]
    fn degenerate_segment_never_reaches_output() {
        let merged = merge_segments(&[seg(5, 5, 5, 5)], &config(100.0));
        assert!(merged.is_empty());
    }

    #[test]
    fn vertical_cluster_reconstructs_vertically() {
        let fragments = [seg(40, 0, 40, 90), seg(42, 100, 42, 200)];
        let merged = merge_segments(&fragments, &config(50.0));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start, Point::new(41, 0));
        assert_eq!(merged[0].end, Point::new(41, 200));
        assert!((merged[0].angle() - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn merged_length_spans_all_contributors() {
        let fragments = [seg(10, 50, 60, 50), seg(70, 52, 120, 52)];
        let merged = merge_segments(&fragments, &config(50.0));
        let max_span = fragments
            .iter()
            .map(|s| s.length())
            .fold(0.0_f64, f64::max);
        assert!(merged[0].length() >= max_span);
    }

    #[test]
    fn union_find_merges_transitively() {
        // A-B and B-C are mergeable, A-C is not; the chain must still
        // collapse into one wall.
        let chain = [seg(0, 0, 50, 0), seg(60, 0, 110, 0), seg(120, 0, 170, 0)];
        let merged = merge_segments(&chain, &config(100.0));
        assert_eq!(merged.len(), 1);
        assert!((merged[0].length() - 170.0).abs() < f64::EPSILON);
    }

    #[test]
    fn seed_anchored_does_not_chain_through_members() {
        let chain = [seg(0, 0, 50, 0), seg(60, 0, 110, 0), seg(120, 0, 170, 0)];
        let legacy = WallConfig {
            min_wall_length: 100.0,
            merge_strategy: MergeStrategy::SeedAnchored,
            ..WallConfig::default()
        };
        let merged = merge_segments(&chain, &legacy);
        // The seed absorbs only its direct neighbor; the tail segment
        // forms its own cluster and falls below the minimum length.
        assert_eq!(merged.len(), 1);
        assert!((merged[0].length() - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn union_find_membership_is_input_order_independent() {
        let a = seg(0, 0, 50, 0);
        let b = seg(60, 0, 110, 0);
        let c = seg(120, 0, 170, 0);
        let forward = merge_segments(&[a, b, c], &config(100.0));
        let backward = merge_segments(&[c, b, a], &config(100.0));
        assert_eq!(forward, backward);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(merge_segments(&[], &WallConfig::default()).is_empty());
    }

    #[test]
    fn mergeable_checks_all_endpoint_pairs() {
        // Only a.start is close to b.end.
        let a = seg(100, 0, 200, 0);
        let b = seg(0, 2, 95, 2);
        assert!(mergeable(a, b, 20.0));
        assert!(mergeable(b, a, 20.0));
    }

    #[test]
    fn mergeable_rejects_large_angle_difference() {
        let a = seg(0, 0, 100, 0);
        let b = seg(0, 10, 100, 21); // ~6.3 degrees
        assert!(!mergeable(a, b, 50.0));
    }
}
