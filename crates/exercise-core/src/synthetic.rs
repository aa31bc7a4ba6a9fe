//! Synthetic landmark generation.
//!
//! Builds full 33-point detections whose driving joint angles are known
//! exactly, for tests and for producing replayable demo streams.

use repcoach_common::config::{ExerciseThresholds, TrackingConfig};
use repcoach_pose_model::exercise::ExerciseKind;
use repcoach_pose_model::frame::PoseFrame;
use repcoach_pose_model::landmark::{FrameDimensions, LandmarkIndex, LandmarkSet, Point2D};

const SEGMENT: f64 = 0.2;

/// Trunk angle used when only the knee angle matters.
pub const UPRIGHT_TRUNK_DEG: f64 = 170.0;

/// Point at `len` from `origin`, rotated `deg` clockwise from `reference`.
fn rotate_from(origin: Point2D, reference: (f64, f64), deg: f64, len: f64) -> Point2D {
    let (sin, cos) = deg.to_radians().sin_cos();
    let (rx, ry) = reference;
    Point2D::new(
        origin.x + len * (rx * cos - ry * sin),
        origin.y + len * (rx * sin + ry * cos),
    )
}

/// A side-on squatter with the given knee and trunk angles (degrees).
pub fn squat_pose(knee_deg: f64, trunk_deg: f64) -> LandmarkSet {
    let knee = Point2D::new(0.5, 0.65);
    let hip = Point2D::new(0.5, 0.45);
    // Knee→hip points up; the ankle swings away from it by the knee angle.
    let ankle = rotate_from(knee, (0.0, -1.0), knee_deg, SEGMENT);
    // Hip→knee points down; the shoulder swings away from it by the trunk angle.
    let shoulder = rotate_from(hip, (0.0, 1.0), -trunk_deg, SEGMENT);

    LandmarkSet::with_points(&[
        (LandmarkIndex::LeftShoulder, shoulder),
        (LandmarkIndex::LeftHip, hip),
        (LandmarkIndex::LeftKnee, knee),
        (LandmarkIndex::LeftAnkle, ankle),
    ])
}

/// Both arms bent to the same elbow angle (degrees).
pub fn arm_pose(elbow_deg: f64) -> LandmarkSet {
    let mut points = Vec::with_capacity(6);
    for (x, shoulder_idx, elbow_idx, wrist_idx, mirror) in [
        (
            0.4,
            LandmarkIndex::LeftShoulder,
            LandmarkIndex::LeftElbow,
            LandmarkIndex::LeftWrist,
            1.0,
        ),
        (
            0.6,
            LandmarkIndex::RightShoulder,
            LandmarkIndex::RightElbow,
            LandmarkIndex::RightWrist,
            -1.0,
        ),
    ] {
        let shoulder = Point2D::new(x, 0.3);
        let elbow = Point2D::new(x, 0.5);
        let wrist = rotate_from(elbow, (0.0, -1.0), mirror * elbow_deg, 0.9 * SEGMENT);
        points.push((shoulder_idx, shoulder));
        points.push((elbow_idx, elbow));
        points.push((wrist_idx, wrist));
    }
    LandmarkSet::with_points(&points)
}

/// A detection whose driving angle for `kind` equals `angle_deg`.
pub fn pose_for(kind: ExerciseKind, angle_deg: f64) -> LandmarkSet {
    match kind {
        ExerciseKind::Squat => squat_pose(angle_deg, UPRIGHT_TRUNK_DEG),
        ExerciseKind::PushUp | ExerciseKind::HammerCurl => arm_pose(angle_deg),
    }
}

/// Driving angles for `reps` full repetitions: from 10° past `angle_max`
/// down to 10° past `angle_min` and back, in `step_deg` increments.
pub fn repetition_angles(thresholds: ExerciseThresholds, reps: u32, step_deg: f64) -> Vec<f64> {
    let top = (thresholds.angle_max + 10.0).min(180.0);
    let bottom = (thresholds.angle_min - 10.0).max(0.0);
    let step = step_deg.abs().max(0.1);

    let mut descent = vec![];
    let mut a = top;
    while a > bottom {
        descent.push(a);
        a -= step;
    }
    descent.push(bottom);

    let mut angles = vec![];
    for _ in 0..reps {
        angles.extend(descent.iter().copied());
        angles.extend(descent.iter().rev().skip(1).copied());
    }
    angles
}

fn thresholds_for(kind: ExerciseKind, config: &TrackingConfig) -> ExerciseThresholds {
    match kind {
        ExerciseKind::Squat => config.squat,
        ExerciseKind::PushUp => config.push_up,
        ExerciseKind::HammerCurl => config.hammer_curl,
    }
}

/// A replayable stream of `reps` repetitions at `fps` frames per second.
pub fn repetition_stream(
    kind: ExerciseKind,
    config: &TrackingConfig,
    reps: u32,
    fps: u32,
    dims: FrameDimensions,
) -> Vec<PoseFrame> {
    let frame_ms = 1000 / u64::from(fps.max(1));
    repetition_angles(thresholds_for(kind, config), reps, 5.0)
        .into_iter()
        .enumerate()
        .map(|(i, deg)| PoseFrame::new(i as u64 * frame_ms, dims, pose_for(kind, deg)))
        .collect()
}
