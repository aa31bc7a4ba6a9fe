//! Exercise session state.
//!
//! A session is one user's continuous tracking attempt. It owns one tracker
//! and one [`TrackerState`] per exercise it has seen, so switching exercises
//! mid-session never mixes their counters.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use repcoach_common::clock::SessionClock;
use repcoach_common::config::TrackingConfig;
use repcoach_common::error::{RepcoachError, RepcoachResult};
use repcoach_pose_model::analysis::FrameAnalysis;
use repcoach_pose_model::exercise::ExerciseKind;
use repcoach_pose_model::landmark::{FrameDimensions, LandmarkSet};

use crate::tracker::{tracker_for, ExerciseTracker, TrackerState};

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One exercise's tracker plus its per-session state and frame counts.
struct TrackedExercise {
    tracker: Box<dyn ExerciseTracker>,
    state: TrackerState,
    frames_analyzed: u64,
    degraded_frames: u64,
}

impl TrackedExercise {
    fn new(tracker: Box<dyn ExerciseTracker>) -> Self {
        let state = tracker.initial_state();
        Self {
            tracker,
            state,
            frames_analyzed: 0,
            degraded_frames: 0,
        }
    }

    fn track(&mut self, landmarks: &LandmarkSet, dims: FrameDimensions) -> FrameAnalysis {
        let analysis = self.tracker.track(&mut self.state, landmarks, dims);
        self.frames_analyzed += 1;
        if analysis.is_degraded() {
            self.degraded_frames += 1;
        }
        analysis
    }
}

/// Per-exercise totals reported when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseSummary {
    pub exercise: ExerciseKind,
    pub repetitions: u32,
    pub frames_analyzed: u64,
    pub degraded_frames: u64,
}

/// End-of-session report.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub no_body_frames: u64,
    pub exercises: Vec<ExerciseSummary>,
}

impl SessionSummary {
    pub fn total_repetitions(&self) -> u32 {
        self.exercises.iter().map(|e| e.repetitions).sum()
    }
}

/// All tracking state for one session.
pub struct ExerciseSession {
    id: SessionId,
    clock: SessionClock,
    config: TrackingConfig,
    exercises: BTreeMap<ExerciseKind, TrackedExercise>,
    no_body_frames: u64,
}

impl ExerciseSession {
    pub fn new(id: SessionId, config: TrackingConfig) -> Self {
        Self {
            id,
            clock: SessionClock::start(),
            config,
            exercises: BTreeMap::new(),
            no_body_frames: 0,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Analyze one frame for the exercise named by `exercise_id`.
    ///
    /// Fails with `UnsupportedExercise` for identifiers outside the catalog
    /// and `NoBodyDetected` when the detector reported no landmarks. Any
    /// other landmark problem yields a degraded `Ok` result.
    pub fn analyze(
        &mut self,
        exercise_id: &str,
        landmarks: &LandmarkSet,
        dims: FrameDimensions,
    ) -> RepcoachResult<FrameAnalysis> {
        let kind = ExerciseKind::from_id(exercise_id).ok_or_else(|| {
            tracing::warn!(session = %self.id, exercise = exercise_id, "Unsupported exercise");
            RepcoachError::unsupported_exercise(exercise_id)
        })?;
        self.analyze_kind(kind, landmarks, dims)
    }

    /// Analyze one frame for an already-resolved exercise.
    pub fn analyze_kind(
        &mut self,
        kind: ExerciseKind,
        landmarks: &LandmarkSet,
        dims: FrameDimensions,
    ) -> RepcoachResult<FrameAnalysis> {
        if landmarks.is_empty() {
            self.no_body_frames += 1;
            return Err(RepcoachError::NoBodyDetected);
        }

        let config = &self.config;
        let exercise = self
            .exercises
            .entry(kind)
            .or_insert_with(|| TrackedExercise::new(tracker_for(kind, config)));
        Ok(exercise.track(landmarks, dims))
    }

    /// Current state for `kind`, if the session has tracked it.
    pub fn state(&self, kind: ExerciseKind) -> Option<&TrackerState> {
        self.exercises.get(&kind).map(|e| &e.state)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            started_at: self.clock.started_at(),
            ended_at: self.clock.now(),
            duration_secs: self.clock.elapsed_secs(),
            no_body_frames: self.no_body_frames,
            exercises: self
                .exercises
                .iter()
                .map(|(kind, e)| ExerciseSummary {
                    exercise: *kind,
                    repetitions: e.state.counter,
                    frames_analyzed: e.frames_analyzed,
                    degraded_frames: e.degraded_frames,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{arm_pose, pose_for};
    use repcoach_pose_model::analysis::{FrameStatus, Stage};
    use repcoach_pose_model::landmark::{Landmark, LandmarkError, LandmarkIndex};

    fn session() -> ExerciseSession {
        ExerciseSession::new(SessionId::new(), TrackingConfig::default())
    }

    #[test]
    fn test_unsupported_exercise() {
        let mut s = session();
        let err = s
            .analyze("jumping_jack", &arm_pose(90.0), FrameDimensions::default())
            .unwrap_err();
        assert!(matches!(err, RepcoachError::UnsupportedExercise { ref id } if id == "jumping_jack"));
    }

    #[test]
    fn test_unsupported_checked_before_detection() {
        let mut s = session();
        let err = s
            .analyze("jumping_jack", &LandmarkSet::default(), FrameDimensions::default())
            .unwrap_err();
        assert!(matches!(err, RepcoachError::UnsupportedExercise { .. }));
    }

    #[test]
    fn test_empty_landmarks_is_no_body() {
        let mut s = session();
        let err = s
            .analyze("squat", &LandmarkSet::default(), FrameDimensions::default())
            .unwrap_err();
        assert!(matches!(err, RepcoachError::NoBodyDetected));
        assert_eq!(s.summary().no_body_frames, 1);
        assert!(s.state(ExerciseKind::Squat).is_none());
    }

    #[test]
    fn test_exercises_do_not_share_state() {
        let mut s = session();
        let dims = FrameDimensions::default();
        for deg in [170.0, 60.0, 170.0] {
            s.analyze("push_up", &pose_for(ExerciseKind::PushUp, deg), dims)
                .unwrap();
        }
        let curl = s
            .analyze("hammer_curl", &pose_for(ExerciseKind::HammerCurl, 170.0), dims)
            .unwrap();

        assert_eq!(s.state(ExerciseKind::PushUp).unwrap().counter, 1);
        assert_eq!(curl.counter, 0);
        assert_eq!(curl.stage, Stage::Down);
    }

    #[test]
    fn test_summary_counts_frames() {
        let mut s = session();
        let dims = FrameDimensions::default();
        for deg in [170.0, 80.0, 170.0] {
            s.analyze("squat", &pose_for(ExerciseKind::Squat, deg), dims)
                .unwrap();
        }
        let short = LandmarkSet::new(arm_pose(90.0).iter().take(5).copied().collect());
        let degraded = s.analyze("squat", &short, dims).unwrap();
        assert!(degraded.is_degraded());

        let summary = s.summary();
        assert_eq!(summary.total_repetitions(), 1);
        assert_eq!(
            summary.exercises,
            vec![ExerciseSummary {
                exercise: ExerciseKind::Squat,
                repetitions: 1,
                frames_analyzed: 4,
                degraded_frames: 1,
            }]
        );
        assert!(summary.ended_at >= summary.started_at);
    }

    #[test]
    fn test_non_finite_landmark_degrades() {
        let mut s = session();
        let dims = FrameDimensions::default();
        for deg in [170.0, 80.0] {
            s.analyze("squat", &pose_for(ExerciseKind::Squat, deg), dims)
                .unwrap();
        }

        let mut raw: Vec<Landmark> = pose_for(ExerciseKind::Squat, 170.0).iter().copied().collect();
        raw[LandmarkIndex::LeftKnee.index()].x = f64::NAN;
        let result = s.analyze("squat", &LandmarkSet::new(raw), dims).unwrap();

        let reason = LandmarkError::NonFinite {
            index: LandmarkIndex::LeftKnee,
        }
        .to_string();
        assert_eq!(result.status, FrameStatus::Degraded { reason });
        assert_eq!(result.angle, 0.0);
        assert_eq!(result.progress, 0.0);
        assert_eq!(result.counter, 1);
        assert_eq!(result.stage, Stage::Down);

        let summary = s.summary();
        assert_eq!(summary.exercises[0].degraded_frames, 1);
        assert_eq!(summary.exercises[0].repetitions, 1);
    }

    #[test]
    fn test_summary_json_shape() {
        let mut s = session();
        s.analyze("push_up", &arm_pose(170.0), FrameDimensions::default())
            .unwrap();

        let json = serde_json::to_value(s.summary()).unwrap();
        assert_eq!(json["session_id"], s.id().to_string());
        assert_eq!(json["exercises"][0]["exercise"], "push_up");
        assert_eq!(json["exercises"][0]["repetitions"], 0);
    }
}
