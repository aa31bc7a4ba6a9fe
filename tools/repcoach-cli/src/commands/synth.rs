//! Generate a synthetic pose-frame stream.

use std::path::PathBuf;

use repcoach_common::config::TrackingConfig;
use repcoach_common::error::RepcoachError;
use repcoach_exercise_core::synthetic::repetition_stream;
use repcoach_pose_model::exercise::ExerciseKind;
use repcoach_pose_model::frame::serialize_frames;
use repcoach_pose_model::landmark::FrameDimensions;

pub fn run(
    exercise: String,
    reps: u32,
    fps: u32,
    output: Option<PathBuf>,
    tracking: TrackingConfig,
) -> anyhow::Result<()> {
    let kind = ExerciseKind::from_id(&exercise)
        .ok_or_else(|| RepcoachError::unsupported_exercise(&exercise))?;
    if fps == 0 {
        anyhow::bail!("--fps must be positive");
    }

    let dims = FrameDimensions::new(720, 1280);
    let frames = repetition_stream(kind, &tracking, reps, fps, dims);
    let mut content =
        format!("# repcoach synthetic stream: exercise={kind} reps={reps} fps={fps}\n");
    content.push_str(&serialize_frames(&frames)?);

    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
            tracing::info!(frames = frames.len(), path = %path.display(), "Synthetic stream written");
        }
        None => print!("{content}"),
    }

    Ok(())
}
