//! List supported exercises.

use repcoach_pose_model::exercise::ExerciseKind;

pub fn run() -> anyhow::Result<()> {
    println!("Supported exercises:");
    for kind in ExerciseKind::ALL {
        println!("  {:<12} {}", kind.id(), kind.display_name());
    }
    Ok(())
}
