//! Session-keyed tracking registry.
//!
//! Holds one [`ExerciseSession`] per session id. Each session sits behind
//! its own mutex, so frames for one session are applied one at a time while
//! different sessions proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use repcoach_common::config::TrackingConfig;
use repcoach_common::error::{RepcoachError, RepcoachResult};
use repcoach_pose_model::analysis::FrameAnalysis;
use repcoach_pose_model::landmark::{FrameDimensions, LandmarkSet};

use crate::session::{ExerciseSession, SessionId, SessionSummary};

type SharedSession = Arc<Mutex<ExerciseSession>>;

/// Registry of live sessions. Cheap to share behind an `Arc`.
pub struct SessionRegistry {
    config: TrackingConfig,
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
}

impl SessionRegistry {
    /// Create a registry whose sessions use `config` for their trackers.
    pub fn new(config: TrackingConfig) -> RepcoachResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: TrackingConfig::default(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a new, empty session.
    pub fn open_session(&self) -> RepcoachResult<SessionId> {
        let id = SessionId::new();
        let session = ExerciseSession::new(id, self.config.clone());
        self.sessions
            .write()
            .map_err(|_| RepcoachError::session("session registry lock poisoned"))?
            .insert(id, Arc::new(Mutex::new(session)));
        tracing::info!(session = %id, "Session opened");
        Ok(id)
    }

    /// Route one frame to the session's tracker for `exercise_id`.
    pub fn analyze(
        &self,
        session: SessionId,
        exercise_id: &str,
        landmarks: &LandmarkSet,
        dims: FrameDimensions,
    ) -> RepcoachResult<FrameAnalysis> {
        let shared = self.get(session)?;
        let mut guard = shared
            .lock()
            .map_err(|_| RepcoachError::session(format!("session {session} state lock poisoned")))?;
        guard.analyze(exercise_id, landmarks, dims)
    }

    /// End a session, release its trackers, and report its totals.
    pub fn close_session(&self, session: SessionId) -> RepcoachResult<SessionSummary> {
        let shared = self
            .sessions
            .write()
            .map_err(|_| RepcoachError::session("session registry lock poisoned"))?
            .remove(&session)
            .ok_or_else(|| RepcoachError::session_not_found(session))?;

        // Waits for any frame still in flight on another thread.
        let guard = shared
            .lock()
            .map_err(|_| RepcoachError::session(format!("session {session} state lock poisoned")))?;
        let summary = guard.summary();
        tracing::info!(
            session = %session,
            repetitions = summary.total_repetitions(),
            duration_secs = summary.duration_secs,
            "Session closed"
        );
        Ok(summary)
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> RepcoachResult<usize> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepcoachError::session("session registry lock poisoned"))?;
        Ok(sessions.len())
    }

    fn get(&self, session: SessionId) -> RepcoachResult<SharedSession> {
        self.sessions
            .read()
            .map_err(|_| RepcoachError::session("session registry lock poisoned"))?
            .get(&session)
            .cloned()
            .ok_or_else(|| RepcoachError::session_not_found(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::pose_for;
    use repcoach_common::config::ExerciseThresholds;
    use repcoach_pose_model::exercise::ExerciseKind;

    #[test]
    fn test_rejects_invalid_config() {
        let config = TrackingConfig {
            squat: ExerciseThresholds::new(160.0, 90.0),
            ..Default::default()
        };
        assert!(matches!(
            SessionRegistry::new(config),
            Err(RepcoachError::Config { .. })
        ));
    }

    #[test]
    fn test_open_analyze_close() {
        let registry = SessionRegistry::with_defaults();
        let id = registry.open_session().unwrap();
        assert_eq!(registry.session_count().unwrap(), 1);

        let dims = FrameDimensions::new(480, 640);
        for deg in [170.0, 20.0, 170.0] {
            registry
                .analyze(id, "hammer_curl", &pose_for(ExerciseKind::HammerCurl, deg), dims)
                .unwrap();
        }

        let summary = registry.close_session(id).unwrap();
        assert_eq!(summary.session_id, id);
        assert_eq!(summary.total_repetitions(), 1);
        assert_eq!(registry.session_count().unwrap(), 0);
    }

    #[test]
    fn test_closed_session_is_not_found() {
        let registry = SessionRegistry::with_defaults();
        let id = registry.open_session().unwrap();
        registry.close_session(id).unwrap();

        let err = registry
            .analyze(id, "squat", &pose_for(ExerciseKind::Squat, 170.0), FrameDimensions::default())
            .unwrap_err();
        assert!(matches!(err, RepcoachError::SessionNotFound { .. }));
        assert!(matches!(
            registry.close_session(id),
            Err(RepcoachError::SessionNotFound { .. })
        ));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let registry = SessionRegistry::with_defaults();
        let a = registry.open_session().unwrap();
        let b = registry.open_session().unwrap();
        let dims = FrameDimensions::default();

        for deg in [170.0, 80.0] {
            registry
                .analyze(a, "squat", &pose_for(ExerciseKind::Squat, deg), dims)
                .unwrap();
        }
        let other = registry
            .analyze(b, "squat", &pose_for(ExerciseKind::Squat, 80.0), dims)
            .unwrap();

        // Session b starts fresh in the up stage, so its own descent counts.
        assert_eq!(other.counter, 1);
        let first = registry
            .analyze(a, "squat", &pose_for(ExerciseKind::Squat, 80.0), dims)
            .unwrap();
        assert_eq!(first.counter, 1);
    }

    #[test]
    fn test_poisoned_registry_reports_session_error() {
        let registry = Arc::new(SessionRegistry::with_defaults());
        let shared = Arc::clone(&registry);
        let _ = std::thread::spawn(move || {
            let _guard = shared.sessions.write().unwrap();
            panic!("writer died holding the registry lock");
        })
        .join();

        assert!(matches!(
            registry.session_count(),
            Err(RepcoachError::Session { .. })
        ));
        assert!(matches!(
            registry.open_session(),
            Err(RepcoachError::Session { .. })
        ));
    }
}
