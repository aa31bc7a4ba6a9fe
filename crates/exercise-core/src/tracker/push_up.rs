//! Push-up tracking from the elbow angle (shoulder–elbow–wrist).

use repcoach_common::config::{ExerciseThresholds, TrackingConfig};
use repcoach_pose_model::analysis::{FrameAnalysis, FrameStatus, Stage};
use repcoach_pose_model::exercise::ExerciseKind;
use repcoach_pose_model::landmark::{FrameDimensions, LandmarkSet};

use super::{degraded, Arms, ExerciseTracker, TrackerState};
use crate::geometry::{angle, progress};

pub const FEEDBACK_FRAMING: &str =
    "Bad framing! Position the camera so both arms, from shoulders to wrists, are visible.";
pub const FEEDBACK_START: &str = "Starting position";
pub const FEEDBACK_PUSH: &str = "Push up with force!";
pub const FEEDBACK_NEXT: &str = "Excellent! Get ready for the next one.";

/// Push-up tracker. Starts in the up stage; a rep counts on the way down.
#[derive(Debug, Clone)]
pub struct PushUpTracker {
    thresholds: ExerciseThresholds,
    clamp_progress: bool,
}

impl PushUpTracker {
    pub fn from_config(config: &TrackingConfig) -> Self {
        Self {
            thresholds: config.push_up,
            clamp_progress: config.clamp_progress,
        }
    }
}

impl Default for PushUpTracker {
    fn default() -> Self {
        Self::from_config(&TrackingConfig::default())
    }
}

impl ExerciseTracker for PushUpTracker {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::PushUp
    }

    fn thresholds(&self) -> ExerciseThresholds {
        self.thresholds
    }

    fn initial_state(&self) -> TrackerState {
        TrackerState::new(Stage::Up, FEEDBACK_START)
    }

    fn track(
        &self,
        state: &mut TrackerState,
        landmarks: &LandmarkSet,
        _dims: FrameDimensions,
    ) -> FrameAnalysis {
        let arms = match Arms::read(landmarks) {
            Ok(arms) => arms,
            Err(e) => return degraded(self.kind(), state, FEEDBACK_FRAMING, &e),
        };

        let arm = arms.detector_left;
        let elbow_angle = angle(arm.shoulder, arm.elbow, arm.wrist);
        let progress = progress(elbow_angle, self.thresholds, self.clamp_progress);

        if elbow_angle > self.thresholds.angle_max {
            if state.stage == Stage::Down {
                state.feedback = FEEDBACK_NEXT.to_string();
            }
            state.stage = Stage::Up;
        } else if elbow_angle < self.thresholds.angle_min && state.stage == Stage::Up {
            state.stage = Stage::Down;
            state.counter += 1;
            state.feedback = FEEDBACK_PUSH.to_string();
            tracing::debug!(counter = state.counter, angle = elbow_angle, "Push-up counted");
        }

        FrameAnalysis {
            exercise: self.kind(),
            counter: state.counter,
            angle: elbow_angle,
            stage: state.stage,
            feedback: state.feedback.clone(),
            landmarks_used: arms.labelled(false),
            progress,
            status: FrameStatus::Tracked,
        }
    }
}
