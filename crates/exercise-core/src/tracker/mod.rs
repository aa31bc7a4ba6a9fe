//! Exercise trackers.
//!
//! Each tracker is a two-stage hysteresis state machine over one driving
//! joint angle. Trackers themselves are immutable after construction (they
//! hold thresholds only); the mutable part lives in [`TrackerState`], which
//! the owner passes in exclusively for every frame.

pub mod hammer_curl;
pub mod push_up;
pub mod squat;

use repcoach_common::config::{ExerciseThresholds, TrackingConfig};
use repcoach_pose_model::analysis::{FrameAnalysis, FrameStatus, LandmarksUsed, Stage};
use repcoach_pose_model::exercise::ExerciseKind;
use repcoach_pose_model::landmark::{
    FrameDimensions, LandmarkError, LandmarkIndex, LandmarkSet, Point2D,
};

pub use hammer_curl::HammerCurlTracker;
pub use push_up::PushUpTracker;
pub use squat::SquatTracker;

/// Mutable per-exercise, per-session tracking state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerState {
    pub counter: u32,
    pub stage: Stage,
    pub feedback: String,
}

impl TrackerState {
    pub fn new(stage: Stage, feedback: impl Into<String>) -> Self {
        Self {
            counter: 0,
            stage,
            feedback: feedback.into(),
        }
    }
}

/// Process one frame of landmarks for one exercise.
pub trait ExerciseTracker: Send {
    fn kind(&self) -> ExerciseKind;

    /// Hysteresis band fixed at construction.
    fn thresholds(&self) -> ExerciseThresholds;

    /// State for a fresh session.
    fn initial_state(&self) -> TrackerState;

    /// Advance `state` by one frame and report the result.
    ///
    /// Missing or malformed landmarks never fail: the result is marked
    /// degraded and `state` is left untouched.
    fn track(
        &self,
        state: &mut TrackerState,
        landmarks: &LandmarkSet,
        dims: FrameDimensions,
    ) -> FrameAnalysis;
}

/// Construct the tracker for `kind` with thresholds from `config`.
pub fn tracker_for(kind: ExerciseKind, config: &TrackingConfig) -> Box<dyn ExerciseTracker> {
    match kind {
        ExerciseKind::Squat => Box::new(SquatTracker::from_config(config)),
        ExerciseKind::PushUp => Box::new(PushUpTracker::from_config(config)),
        ExerciseKind::HammerCurl => Box::new(HammerCurlTracker::from_config(config)),
    }
}

/// Result for a frame whose required landmarks could not be read.
pub(crate) fn degraded(
    kind: ExerciseKind,
    state: &TrackerState,
    feedback: &str,
    error: &LandmarkError,
) -> FrameAnalysis {
    tracing::warn!(exercise = %kind, error = %error, "Degraded frame");
    FrameAnalysis {
        exercise: kind,
        counter: state.counter,
        angle: 0.0,
        stage: state.stage,
        feedback: feedback.to_string(),
        landmarks_used: LandmarksUsed::new(),
        progress: 0.0,
        status: FrameStatus::Degraded {
            reason: error.to_string(),
        },
    }
}

/// Shoulder, elbow, and wrist of one arm.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Arm {
    pub shoulder: Point2D,
    pub elbow: Point2D,
    pub wrist: Point2D,
}

/// Both arms, keyed by detector side. Each arm tracker drives its angle
/// from the detector-left arm and reports both for display.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Arms {
    pub detector_left: Arm,
    pub detector_right: Arm,
}

impl Arms {
    pub fn read(landmarks: &LandmarkSet) -> Result<Self, LandmarkError> {
        Ok(Self {
            detector_left: Arm {
                shoulder: landmarks.point(LandmarkIndex::LeftShoulder)?,
                elbow: landmarks.point(LandmarkIndex::LeftElbow)?,
                wrist: landmarks.point(LandmarkIndex::LeftWrist)?,
            },
            detector_right: Arm {
                shoulder: landmarks.point(LandmarkIndex::RightShoulder)?,
                elbow: landmarks.point(LandmarkIndex::RightElbow)?,
                wrist: landmarks.point(LandmarkIndex::RightWrist)?,
            },
        })
    }

    /// Label the six points for overlay drawing. `mirrored` swaps the
    /// side names to match a selfie-view camera.
    pub fn labelled(&self, mirrored: bool) -> LandmarksUsed {
        let (left, right) = if mirrored {
            (&self.detector_right, &self.detector_left)
        } else {
            (&self.detector_left, &self.detector_right)
        };
        let mut used = LandmarksUsed::new();
        for (side, arm) in [("left", left), ("right", right)] {
            used.insert(format!("shoulder_{side}"), arm.shoulder);
            used.insert(format!("elbow_{side}"), arm.elbow);
            used.insert(format!("wrist_{side}"), arm.wrist);
        }
        used
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic;

    #[test]
    fn test_factory_matches_kind() {
        let config = TrackingConfig::default();
        for kind in ExerciseKind::ALL {
            let tracker = tracker_for(kind, &config);
            assert_eq!(tracker.kind(), kind);
            assert_eq!(tracker.initial_state().counter, 0);
        }
    }

    #[test]
    fn test_factory_applies_config_thresholds() {
        let config = TrackingConfig {
            push_up: ExerciseThresholds::new(80.0, 150.0),
            ..Default::default()
        };
        let tracker = tracker_for(ExerciseKind::PushUp, &config);
        assert_eq!(tracker.thresholds(), ExerciseThresholds::new(80.0, 150.0));
    }

    #[test]
    fn test_arm_labels_mirror() {
        let arms = Arms::read(&synthetic::arm_pose(90.0)).unwrap();
        let plain = arms.labelled(false);
        let mirrored = arms.labelled(true);
        assert_eq!(plain.len(), 6);
        assert_eq!(plain["shoulder_left"], mirrored["shoulder_right"]);
        assert_eq!(plain["wrist_right"], mirrored["wrist_left"]);
    }
}
