use std::sync::Arc;
use std::thread;

use repcoach_common::config::TrackingConfig;
use repcoach_exercise_core::synthetic::{pose_for, repetition_stream};
use repcoach_exercise_core::SessionRegistry;
use repcoach_pose_model::exercise::ExerciseKind;
use repcoach_pose_model::landmark::FrameDimensions;

const DIMS: FrameDimensions = FrameDimensions {
    height: 720,
    width: 1280,
};

#[test]
fn parallel_sessions_keep_their_own_counts() {
    let registry = Arc::new(SessionRegistry::with_defaults());
    let config = TrackingConfig::default();

    let plans: Vec<(ExerciseKind, u32)> = vec![
        (ExerciseKind::Squat, 3),
        (ExerciseKind::PushUp, 5),
        (ExerciseKind::HammerCurl, 2),
        (ExerciseKind::Squat, 1),
        (ExerciseKind::PushUp, 4),
        (ExerciseKind::HammerCurl, 6),
    ];

    thread::scope(|scope| {
        for (kind, reps) in &plans {
            let registry = Arc::clone(&registry);
            let frames = repetition_stream(*kind, &config, *reps, 30, DIMS);
            scope.spawn(move || {
                let id = registry.open_session().unwrap();
                for frame in &frames {
                    registry
                        .analyze(id, kind.id(), &frame.landmarks, frame.dimensions())
                        .unwrap();
                }
                let summary = registry.close_session(id).unwrap();
                assert_eq!(summary.total_repetitions(), *reps);
            });
        }
    });

    assert_eq!(registry.session_count().unwrap(), 0);
}

#[test]
fn concurrent_frames_for_one_session_count_once() {
    let registry = Arc::new(SessionRegistry::with_defaults());
    let id = registry.open_session().unwrap();
    registry
        .analyze(id, "squat", &pose_for(ExerciseKind::Squat, 170.0), DIMS)
        .unwrap();

    let bottom = pose_for(ExerciseKind::Squat, 80.0);
    thread::scope(|scope| {
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            let bottom = &bottom;
            scope.spawn(move || {
                for _ in 0..25 {
                    registry.analyze(id, "squat", bottom, DIMS).unwrap();
                }
            });
        }
    });

    let summary = registry.close_session(id).unwrap();
    assert_eq!(summary.total_repetitions(), 1);
    assert_eq!(summary.exercises[0].frames_analyzed, 1 + 8 * 25);
}
