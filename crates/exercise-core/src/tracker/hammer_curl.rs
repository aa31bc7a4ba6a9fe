//! Hammer curl tracking from the elbow angle.
//!
//! Uses the same detector-side arm as the push-up but labels it for a
//! mirrored camera view, so the driving arm is reported as `*_right`.

use repcoach_common::config::{ExerciseThresholds, TrackingConfig};
use repcoach_pose_model::analysis::{FrameAnalysis, FrameStatus, Stage};
use repcoach_pose_model::exercise::ExerciseKind;
use repcoach_pose_model::landmark::{FrameDimensions, LandmarkSet};

use super::{degraded, Arms, ExerciseTracker, TrackerState};
use crate::geometry::{angle, progress};

pub const FEEDBACK_FRAMING: &str =
    "Bad framing! Position the camera so both arms, from shoulders to wrists, are visible.";
pub const FEEDBACK_START: &str = "Start the movement";
pub const FEEDBACK_LOWER: &str = "Lower the weight in a controlled manner.";

/// Hammer curl tracker. Starts in the down stage; a rep counts at the top.
#[derive(Debug, Clone)]
pub struct HammerCurlTracker {
    thresholds: ExerciseThresholds,
    clamp_progress: bool,
}

impl HammerCurlTracker {
    pub fn from_config(config: &TrackingConfig) -> Self {
        Self {
            thresholds: config.hammer_curl,
            clamp_progress: config.clamp_progress,
        }
    }
}

impl Default for HammerCurlTracker {
    fn default() -> Self {
        Self::from_config(&TrackingConfig::default())
    }
}

impl ExerciseTracker for HammerCurlTracker {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::HammerCurl
    }

    fn thresholds(&self) -> ExerciseThresholds {
        self.thresholds
    }

    fn initial_state(&self) -> TrackerState {
        TrackerState::new(Stage::Down, FEEDBACK_START)
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
            state.stage = Stage::Down;
        } else if elbow_angle < self.thresholds.angle_min && state.stage == Stage::Down {
            state.stage = Stage::Up;
            state.counter += 1;
            state.feedback = FEEDBACK_LOWER.to_string();
            tracing::debug!(counter = state.counter, angle = elbow_angle, "Curl counted");
        }

        FrameAnalysis {
            exercise: self.kind(),
            counter: state.counter,
            angle: elbow_angle,
            stage: state.stage,
            feedback: state.feedback.clone(),
            landmarks_used: arms.labelled(true),
            progress,
            status: FrameStatus::Tracked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::arm_pose;
    use repcoach_pose_model::LandmarkIndex;

    fn run(tracker: &HammerCurlTracker, state: &mut TrackerState, elbow: f64) -> FrameAnalysis {
        tracker.track(state, &arm_pose(elbow), FrameDimensions::new(720, 1280))
    }

    #[test]
    fn test_starts_down() {
        let state = HammerCurlTracker::default().initial_state();
        assert_eq!(state.stage, Stage::Down);
        assert_eq!(state.counter, 0);
    }

    #[test]
    fn test_full_cycle_counts_once() {
        let tracker = HammerCurlTracker::default();
        let mut state = tracker.initial_state();

        run(&tracker, &mut state, 170.0);
        let top = run(&tracker, &mut state, 20.0);
        assert_eq!(top.counter, 1);
        assert_eq!(top.stage, Stage::Up);
        assert_eq!(top.feedback, FEEDBACK_LOWER);

        let bottom = run(&tracker, &mut state, 170.0);
        assert_eq!(bottom.counter, 1);
        assert_eq!(bottom.stage, Stage::Down);
    }

    #[test]
    fn test_no_recount_until_arm_extends() {
        let tracker = HammerCurlTracker::default();
        let mut state = tracker.initial_state();
        for elbow in [20.0, 90.0, 20.0, 120.0, 25.0] {
            run(&tracker, &mut state, elbow);
        }
        assert_eq!(state.counter, 1);

        run(&tracker, &mut state, 165.0);
        run(&tracker, &mut state, 25.0);
        assert_eq!(state.counter, 2);
    }

    #[test]
    fn test_progress_tracks_contraction() {
        let tracker = HammerCurlTracker::default();
        let mut state = tracker.initial_state();
        assert!(run(&tracker, &mut state, 160.0).progress.abs() < 1e-6);
        assert!((run(&tracker, &mut state, 30.0).progress - 100.0).abs() < 1e-6);
        assert!((run(&tracker, &mut state, 95.0).progress - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_elbow_degrades_without_touching_state() {
        let tracker = HammerCurlTracker::default();
        let mut state = tracker.initial_state();
        run(&tracker, &mut state, 170.0);
        run(&tracker, &mut state, 20.0);
        let before = state.clone();

        let short = LandmarkSet::new(arm_pose(20.0).iter().take(13).copied().collect());
        let result = tracker.track(&mut state, &short, FrameDimensions::default());
        assert!(result.is_degraded());
        assert_eq!(result.feedback, FEEDBACK_FRAMING);
        assert_eq!(result.counter, 1);
        assert_eq!(result.stage, Stage::Up);
        assert_eq!(result.angle, 0.0);
        assert!(result.landmarks_used.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_driving_arm_is_labelled_right() {
        let tracker = HammerCurlTracker::default();
        let mut state = tracker.initial_state();
        let pose = arm_pose(90.0);
        let result = tracker.track(&mut state, &pose, FrameDimensions::default());
        assert_eq!(
            result.landmarks_used["elbow_right"],
            pose.point(LandmarkIndex::LeftElbow).unwrap()
        );
    }
}
