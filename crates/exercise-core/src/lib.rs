//! RepCoach Exercise Core
//!
//! Turns per-frame body landmarks into repetition counts and form feedback:
//! - **Geometry:** Joint angles from three landmarks, progress interpolation
//! - **Trackers:** Hysteresis state machines for squat, push-up, and hammer curl
//! - **Sessions:** Per-session tracker ownership and a session-keyed registry
//! - **Synthetic:** Landmark sets with known joint angles, for tests and demos
//!
//! This crate is pure computation. It performs no I/O and holds no detector.
//! All inputs are data; all outputs are data.

pub mod geometry;
pub mod registry;
pub mod session;
pub mod synthetic;
pub mod tracker;

pub use registry::SessionRegistry;
pub use session::{ExerciseSession, ExerciseSummary, SessionId, SessionSummary};
pub use tracker::{tracker_for, ExerciseTracker, TrackerState};
