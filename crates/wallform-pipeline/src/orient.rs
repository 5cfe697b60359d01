//! Orientation filtering and angle snapping.
//!
//! Raw Hough segments are noisy: a wall drawn horizontally comes back
//! at 0.7 degrees, a vertical one at 89.4. This stage keeps only
//! segments within `angle_tolerance` of a configured target angle and
//! corrects ("snaps") the survivors so their orientation matches the
//! target exactly.
//!
//! Axis-aligned targets snap by coordinate forcing (`end.y = start.y`
//! for horizontal, `end.x = start.x` for vertical), which is exactly
//! representable in integer pixels. Oblique targets (45, 135) snap by
//! rotating both endpoints about the segment midpoint, preserving
//! length; the result is exact up to integer rounding.

use crate::types::{Point, RawSegment, WallConfig};

/// Angles closer to an axis than this are treated as that axis when
/// choosing the snapping method.
const AXIS_EPS: f64 = 1.0;

/// Keep segments oriented near a target angle and snap them onto it.
///
/// For each segment the angular distance to every entry of
/// `config.target_angles` is computed; the minimum decides. Segments
/// whose minimum exceeds `config.angle_tolerance` are discarded. A
/// segment exactly equidistant between two targets resolves to the
/// target listed first (stable and deterministic, but order-dependent).
///
/// Snapping an already-aligned segment leaves its endpoints unchanged.
#[must_use = "returns the filtered, snapped segments"]
pub fn filter_and_snap(segments: &[RawSegment], config: &WallConfig) -> Vec<RawSegment> {
    segments
        .iter()
        .filter_map(|&segment| {
            let angle = segment.angle();
            let target = nearest_target(angle, &config.target_angles)?;
            if angular_distance(angle, target) > config.angle_tolerance {
                return None;
            }
            Some(snap_to_angle(segment, target))
        })
        .collect()
}

/// The first target with minimal angular distance, or `None` when the
/// target list is empty. A strict `<` comparison makes ties resolve to
/// the earlier entry.
fn nearest_target(angle: f64, targets: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for &target in targets {
        let dist = angular_distance(angle, target);
        if best.is_none_or(|(best_dist, _)| dist < best_dist) {
            best = Some((dist, target));
        }
    }
    best.map(|(_, target)| target)
}

/// Absolute angular distance in degrees.
fn angular_distance(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

/// Force a segment's orientation to exactly `target` degrees.
pub(crate) fn snap_to_angle(segment: RawSegment, target: f64) -> RawSegment {
    if angular_distance(target, 0.0) < AXIS_EPS || angular_distance(target, 180.0) < AXIS_EPS {
        // Horizontal: flatten onto the first endpoint's row.
        RawSegment::new(
            segment.start,
            Point::new(segment.end.x, segment.start.y),
        )
    } else if angular_distance(target, 90.0) < AXIS_EPS {
        // Vertical: flatten onto the first endpoint's column.
        RawSegment::new(
            segment.start,
            Point::new(segment.start.x, segment.end.y),
        )
    } else {
        rotate_about_midpoint(segment, target)
    }
}

/// Rotate a segment about its midpoint so it lies at exactly `target`
/// degrees, preserving length. Endpoints are rounded back onto the
/// pixel grid.
fn rotate_about_midpoint(segment: RawSegment, target: f64) -> RawSegment {
    let half = segment.length() / 2.0;
    let mid_x = f64::from(segment.start.x + segment.end.x) / 2.0;
    let mid_y = f64::from(segment.start.y + segment.end.y) / 2.0;
    let (sin, cos) = target.to_radians().sin_cos();

    #[allow(clippy::cast_possible_truncation)]
    let point_at = |sign: f64| {
        Point::new(
            sign.mul_add(half * cos, mid_x).round() as i32,
            sign.mul_add(half * sin, mid_y).round() as i32,
        )
    };
    RawSegment::new(point_at(-1.0), point_at(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_targets(targets: &[f64]) -> WallConfig {
        WallConfig {
            target_angles: targets.to_vec(),
            ..WallConfig::default()
        }
    }

    #[test]
    fn near_horizontal_segment_is_snapped_flat() {
        let raw = RawSegment::new(Point::new(10, 50), Point::new(110, 53));
        let snapped = filter_and_snap(&[raw], &WallConfig::default());
        assert_eq!(snapped.len(), 1);
        assert_eq!(snapped[0].start, Point::new(10, 50));
        assert_eq!(snapped[0].end, Point::new(110, 50));
        assert!(snapped[0].angle().abs() < f64::EPSILON);
    }

    #[test]
    fn near_vertical_segment_is_snapped_upright() {
        let raw = RawSegment::new(Point::new(30, 10), Point::new(33, 120));
        let snapped = filter_and_snap(&[raw], &WallConfig::default());
        assert_eq!(snapped.len(), 1);
        assert_eq!(snapped[0].start, Point::new(30, 10));
        assert_eq!(snapped[0].end, Point::new(30, 120));
        assert!((snapped[0].angle() - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn segment_outside_tolerance_is_discarded() {
        // 47 degrees with targets {0, 90}: nearest distance is 43 > 10.
        let raw = RawSegment::new(Point::new(0, 0), Point::new(100, 107));
        assert!((raw.angle() - 46.9).abs() < 0.5);
        let snapped = filter_and_snap(&[raw], &WallConfig::default());
        assert!(snapped.is_empty());
    }

    #[test]
    fn snap_is_idempotent_on_aligned_segments() {
        let horizontal = RawSegment::new(Point::new(5, 9), Point::new(205, 9));
        let vertical = RawSegment::new(Point::new(7, 10), Point::new(7, 90));
        let snapped = filter_and_snap(&[horizontal, vertical], &WallConfig::default());
        assert_eq!(snapped, vec![horizontal, vertical]);
    }

    #[test]
    fn equidistant_tie_resolves_to_first_listed_target() {
        // 45 is exactly equidistant between 0 and 90; whichever target
        // is listed first must win.
        assert_eq!(nearest_target(45.0, &[0.0, 90.0]), Some(0.0));
        assert_eq!(nearest_target(45.0, &[90.0, 0.0]), Some(90.0));
        // Off the tie point the numerically nearer target wins
        // regardless of listing order.
        assert_eq!(nearest_target(44.0, &[90.0, 0.0]), Some(0.0));
        assert_eq!(nearest_target(46.0, &[0.0, 90.0]), Some(90.0));
    }

    #[test]
    fn empty_target_list_discards_everything() {
        let raw = RawSegment::new(Point::new(0, 0), Point::new(100, 0));
        let snapped = filter_and_snap(&[raw], &config_with_targets(&[]));
        assert!(snapped.is_empty());
    }

    #[test]
    fn oblique_snap_rotates_about_midpoint_preserving_length() {
        // 41 degrees, target 45.
        let raw = RawSegment::new(Point::new(0, 0), Point::new(100, 87));
        let config = WallConfig {
            target_angles: vec![45.0],
            ..WallConfig::default()
        };
        let snapped = filter_and_snap(&[raw], &config);
        assert_eq!(snapped.len(), 1);
        let s = snapped[0];
        assert!((s.angle() - 45.0).abs() < 1.0, "angle {}", s.angle());
        assert!((s.length() - raw.length()).abs() < 2.0, "length drifted");

        // Midpoint stays put (up to rounding).
        let mid_x = f64::from(s.start.x + s.end.x) / 2.0;
        let mid_y = f64::from(s.start.y + s.end.y) / 2.0;
        assert!((mid_x - 50.0).abs() <= 1.0);
        assert!((mid_y - 43.5).abs() <= 1.0);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_and_snap(&[], &WallConfig::default()).is_empty());
    }

    #[test]
    fn snapped_angles_match_targets_exactly_for_axes() {
        let raws = vec![
            RawSegment::new(Point::new(0, 10), Point::new(90, 5)),
            RawSegment::new(Point::new(40, 0), Point::new(45, 80)),
        ];
        for segment in filter_and_snap(&raws, &WallConfig::default()) {
            let angle = segment.angle();
            assert!(
                angle.abs() < f64::EPSILON || (angle - 90.0).abs() < f64::EPSILON,
                "angle {angle} not snapped exactly"
            );
        }
    }
}
