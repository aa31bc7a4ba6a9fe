//! Replay a pose-frame stream through a tracking session.

use std::path::PathBuf;
use std::time::Duration;

use repcoach_common::config::TrackingConfig;
use repcoach_common::error::RepcoachError;
use repcoach_exercise_core::{SessionRegistry, SessionSummary};
use repcoach_pose_model::analysis::FrameAnalysis;
use repcoach_pose_model::exercise::ExerciseKind;
use repcoach_pose_model::frame::{parse_frames, PoseFrame};

pub async fn run(
    path: PathBuf,
    exercise: String,
    json: bool,
    realtime: bool,
    tracking: TrackingConfig,
) -> anyhow::Result<()> {
    let kind = ExerciseKind::from_id(&exercise)
        .ok_or_else(|| RepcoachError::unsupported_exercise(&exercise))?;

    let content = std::fs::read_to_string(&path)
        .map_err(|_| anyhow::anyhow!("Stream file not found: {}", path.display()))?;
    let frames =
        parse_frames(&content).map_err(|e| anyhow::anyhow!("Failed to parse frames: {e}"))?;

    if !json {
        println!(
            "Replaying {} frames of {} from {}",
            frames.len(),
            kind.display_name(),
            path.display()
        );
    }
    if frames.is_empty() {
        if !json {
            println!("  No frames to analyze.");
        }
        return Ok(());
    }

    let registry = SessionRegistry::new(tracking)?;
    let session = registry.open_session()?;
    let start = tokio::time::Instant::now();

    for frame in &frames {
        if realtime {
            tokio::time::sleep_until(start + Duration::from_millis(frame.timestamp_ms)).await;
        }

        match registry.analyze(session, kind.id(), &frame.landmarks, frame.dimensions()) {
            Ok(analysis) => report_frame(frame, &analysis, kind, json)?,
            Err(RepcoachError::NoBodyDetected) => {
                tracing::warn!(t = frame.timestamp_ms, "No body detected");
                if !json {
                    println!("{:>8}ms  no body detected", frame.timestamp_ms);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    let summary = registry.close_session(session)?;
    report_summary(&summary, json)
}

/// Overlay point whose pixel position is shown in the table.
fn vertex_label(kind: ExerciseKind) -> &'static str {
    match kind {
        ExerciseKind::Squat => "knee",
        ExerciseKind::PushUp => "elbow_left",
        ExerciseKind::HammerCurl => "elbow_right",
    }
}

fn report_frame(
    frame: &PoseFrame,
    analysis: &FrameAnalysis,
    kind: ExerciseKind,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(analysis)?);
        return Ok(());
    }

    let vertex = analysis
        .landmarks_used
        .get(vertex_label(kind))
        .map(|p| {
            let (x, y) = p.to_pixel(frame.dimensions());
            format!("({x:>4},{y:>4})")
        })
        .unwrap_or_else(|| "     --    ".to_string());

    println!(
        "{:>8}ms  reps {:>3}  {:<4}  {:>6.1}°  {:>6.1}%  {}  {}",
        frame.timestamp_ms,
        analysis.counter,
        analysis.stage,
        analysis.angle,
        analysis.progress,
        vertex,
        analysis.feedback
    );
    Ok(())
}

fn report_summary(summary: &SessionSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(summary)?);
        return Ok(());
    }

    println!();
    println!("Session {}", summary.session_id);
    println!("  Started: {}", summary.started_at.to_rfc3339());
    println!("  Duration: {:.2}s", summary.duration_secs);
    println!("  Frames without a body: {}", summary.no_body_frames);
    for e in &summary.exercises {
        println!(
            "  {}: {} reps ({} frames, {} degraded)",
            e.exercise.display_name(),
            e.repetitions,
            e.frames_analyzed,
            e.degraded_frames
        );
    }
    println!("\nReplay complete.");
    Ok(())
}
