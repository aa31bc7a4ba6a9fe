//! Squat tracking.
//!
//! The knee angle (hip–knee–ankle) drives stage and count. The trunk angle
//! (shoulder–hip–knee) drives a posture cue that overrides every other
//! message. Feedback is re-derived from scratch on each frame.

use repcoach_common::config::{ExerciseThresholds, TrackingConfig};
use repcoach_pose_model::analysis::{FrameAnalysis, FrameStatus, LandmarksUsed, Stage};
use repcoach_pose_model::exercise::ExerciseKind;
use repcoach_pose_model::landmark::{
    FrameDimensions, LandmarkError, LandmarkIndex, LandmarkSet, Point2D,
};

use super::{degraded, ExerciseTracker, TrackerState};
use crate::geometry::{angle, progress};

pub const FEEDBACK_FRAMING: &str =
    "Bad framing! Position the camera so your whole body, from shoulders to feet, is visible.";
pub const FEEDBACK_REP_COMPLETE: &str = "Repetition complete!";
pub const FEEDBACK_GO_LOWER: &str = "Go lower for a full squat.";
pub const FEEDBACK_CHEST_UP: &str = "Keep your chest up and your back straight.";
pub const FEEDBACK_START: &str = "Start the movement";
pub const FEEDBACK_DRIVE_UP: &str = "Drive up with force!";

/// Squat tracker. Reads the detector-left side only.
#[derive(Debug, Clone)]
pub struct SquatTracker {
    thresholds: ExerciseThresholds,
    depth_cue: f64,
    trunk_min: f64,
    clamp_progress: bool,
}

struct SquatPoints {
    shoulder: Point2D,
    hip: Point2D,
    knee: Point2D,
    ankle: Point2D,
}

impl SquatPoints {
    fn read(landmarks: &LandmarkSet) -> Result<Self, LandmarkError> {
        Ok(Self {
            hip: landmarks.point(LandmarkIndex::LeftHip)?,
            knee: landmarks.point(LandmarkIndex::LeftKnee)?,
            ankle: landmarks.point(LandmarkIndex::LeftAnkle)?,
            shoulder: landmarks.point(LandmarkIndex::LeftShoulder)?,
        })
    }

    fn labelled(&self) -> LandmarksUsed {
        LandmarksUsed::from([
            ("hip".to_string(), self.hip),
            ("knee".to_string(), self.knee),
            ("ankle".to_string(), self.ankle),
            ("shoulder".to_string(), self.shoulder),
        ])
    }
}

impl SquatTracker {
    pub fn from_config(config: &TrackingConfig) -> Self {
        Self {
            thresholds: config.squat,
            depth_cue: config.squat_depth_cue,
            trunk_min: config.squat_trunk_min,
            clamp_progress: config.clamp_progress,
        }
    }
}

impl Default for SquatTracker {
    fn default() -> Self {
        Self::from_config(&TrackingConfig::default())
    }
}

impl ExerciseTracker for SquatTracker {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Squat
    }

    fn thresholds(&self) -> ExerciseThresholds {
        self.thresholds
    }

    fn initial_state(&self) -> TrackerState {
        TrackerState::new(Stage::Up, "")
    }

    fn track(
        &self,
        state: &mut TrackerState,
        landmarks: &LandmarkSet,
        _dims: FrameDimensions,
    ) -> FrameAnalysis {
        let points = match SquatPoints::read(landmarks) {
            Ok(points) => points,
            Err(e) => return degraded(self.kind(), state, FEEDBACK_FRAMING, &e),
        };

        let knee_angle = angle(points.hip, points.knee, points.ankle);
        let progress = progress(knee_angle, self.thresholds, self.clamp_progress);
        let mut feedback = None;

        if knee_angle > self.thresholds.angle_max {
            state.stage = Stage::Up;
        }
        if knee_angle < self.thresholds.angle_min && state.stage == Stage::Up {
            state.stage = Stage::Down;
            state.counter += 1;
            feedback = Some(FEEDBACK_REP_COMPLETE);
            tracing::debug!(counter = state.counter, angle = knee_angle, "Squat counted");
        }

        // Evaluated every frame while down, not only on the transition.
        if state.stage == Stage::Down && knee_angle > self.depth_cue {
            feedback = Some(FEEDBACK_GO_LOWER);
        }

        let trunk_angle = angle(points.shoulder, points.hip, points.knee);
        if trunk_angle < self.trunk_min {
            feedback = Some(FEEDBACK_CHEST_UP);
        }

        let feedback = feedback.unwrap_or(match state.stage {
            Stage::Up => FEEDBACK_START,
            Stage::Down => FEEDBACK_DRIVE_UP,
        });
        state.feedback = feedback.to_string();

        FrameAnalysis {
            exercise: self.kind(),
            counter: state.counter,
            angle: knee_angle,
            stage: state.stage,
            feedback: state.feedback.clone(),
            landmarks_used: points.labelled(),
            progress,
            status: FrameStatus::Tracked,
        }
    }
}
