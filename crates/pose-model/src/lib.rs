//! RepCoach Pose Model
//!
//! Defines the data contracts shared by trackers and tooling:
//! - **Landmarks:** The 33-point body keypoint convention of the upstream detector
//! - **Exercises:** The closed catalog of supported exercises and their instructions
//! - **Analysis:** The uniform per-frame result every tracker produces
//! - **Frames:** JSONL pose-frame streams for replay and fixtures
//!
//! All coordinates are normalized to `[0.0, 1.0]` relative to the frame
//! dimensions, as reported by the pose detector.

pub mod analysis;
pub mod exercise;
pub mod frame;
pub mod landmark;

pub use analysis::*;
pub use exercise::*;
pub use frame::*;
pub use landmark::*;
