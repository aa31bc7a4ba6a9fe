//! Joint-angle geometry.

use repcoach_common::config::ExerciseThresholds;
use repcoach_pose_model::landmark::Point2D;

/// Angle in degrees at vertex `b` between segments `b→a` and `b→c`.
///
/// Always in `[0, 180]`. Returns exactly `0.0` when either segment has zero
/// length, so trackers stay total over degenerate detections.
pub fn angle(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    let (bax, bay) = (a.x - b.x, a.y - b.y);
    let (bcx, bcy) = (c.x - b.x, c.y - b.y);

    let mag_ba = bax.hypot(bay);
    let mag_bc = bcx.hypot(bcy);

    if mag_ba == 0.0 || mag_bc == 0.0 {
        return 0.0;
    }

    // Normalize first: the raw dot product and magnitude product underflow
    // together for very short segments.
    let cosine = (bax / mag_ba) * (bcx / mag_bc) + (bay / mag_ba) * (bcy / mag_bc);
    if !cosine.is_finite() {
        return 0.0;
    }

    // Rounding can push the cosine just past ±1.
    cosine.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Map an angle onto a 0..100 progress scale.
///
/// `angle_min` maps to 100 and `angle_max` to 0. Outside the band the value
/// overshoots linearly unless `clamp` is set.
pub fn progress(angle: f64, thresholds: ExerciseThresholds, clamp: bool) -> f64 {
    let span = thresholds.angle_max - thresholds.angle_min;
    if span <= 0.0 {
        return 0.0;
    }
    let value = (thresholds.angle_max - angle) / span * 100.0;
    if clamp {
        value.clamp(0.0, 100.0)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    #[test]
    fn test_right_angle() {
        let deg = angle(p(0.0, 1.0), p(0.0, 0.0), p(1.0, 0.0));
        assert!((deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_straight_line_is_180() {
        let deg = angle(p(0.0, 0.0), p(0.5, 0.5), p(1.0, 1.0));
        assert!((deg - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_folded_segments_are_zero() {
        let deg = angle(p(1.0, 0.0), p(0.0, 0.0), p(2.0, 0.0));
        assert!(deg.abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_vertex_is_zero() {
        let b = p(0.3, 0.4);
        assert_eq!(angle(b, b, p(0.9, 0.9)), 0.0);
        assert_eq!(angle(p(0.1, 0.1), b, b), 0.0);
    }

    #[test]
    fn test_tiny_segments_keep_their_angle() {
        let deg = angle(p(1e-170, 0.0), p(0.0, 0.0), p(0.0, 1e-170));
        assert!((deg - 90.0).abs() < 1e-9);

        let deg = angle(p(1e-300, 1e-300), p(0.0, 0.0), p(1e-300, 0.0));
        assert!((deg - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_huge_segments_stay_in_range() {
        let deg = angle(p(f64::MAX, 0.0), p(-f64::MAX, 0.0), p(f64::MAX, f64::MAX));
        assert!((0.0..=180.0).contains(&deg));
    }

    #[test]
    fn test_progress_endpoints() {
        let t = ExerciseThresholds::new(90.0, 160.0);
        assert!((progress(90.0, t, false) - 100.0).abs() < 1e-9);
        assert!(progress(160.0, t, false).abs() < 1e-9);
        assert!((progress(125.0, t, false) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_overshoots_unless_clamped() {
        let t = ExerciseThresholds::new(90.0, 160.0);
        assert!(progress(80.0, t, false) > 100.0);
        assert!(progress(170.0, t, false) < 0.0);
        assert_eq!(progress(80.0, t, true), 100.0);
        assert_eq!(progress(170.0, t, true), 0.0);
    }
}
