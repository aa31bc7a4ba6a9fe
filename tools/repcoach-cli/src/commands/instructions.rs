//! Show execution instructions for one exercise.

use repcoach_common::error::RepcoachError;
use repcoach_pose_model::exercise::ExerciseKind;

pub fn run(exercise: String) -> anyhow::Result<()> {
    let kind = ExerciseKind::from_id(&exercise)
        .ok_or_else(|| RepcoachError::unsupported_exercise(&exercise))?;

    println!("{}\n", kind.display_name());
    print!("{}", kind.instructions().to_markdown());
    Ok(())
}
