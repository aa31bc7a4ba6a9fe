//! The uniform per-frame result produced by every exercise tracker.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseKind;
use crate::landmark::Point2D;

/// Named points a tracker consulted, for overlay drawing.
pub type LandmarksUsed = BTreeMap<String, Point2D>;

/// Coarse phase of a repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Up,
    Down,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a frame was fully tracked or absorbed as a degraded result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameStatus {
    /// All required landmarks were read; state may have advanced.
    Tracked,
    /// Required landmarks were missing or malformed; state is unchanged.
    Degraded { reason: String },
}

/// Result of analyzing one frame for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    pub exercise: ExerciseKind,

    /// Repetitions counted so far in this session.
    pub counter: u32,

    /// Driving joint angle in degrees, 0 on degraded frames.
    pub angle: f64,

    pub stage: Stage,

    /// Advisory text for the user. May be empty.
    pub feedback: String,

    pub landmarks_used: LandmarksUsed,

    /// Nominally 0..100; may overshoot unless clamping is configured.
    pub progress: f64,

    pub status: FrameStatus,
}

impl FrameAnalysis {
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, FrameStatus::Degraded { .. })
    }
}
