//! Pose-frame streams.
//!
//! Recorded detector output is stored as JSONL, one frame per line. Lines
//! starting with `#` carry free-form headers and are skipped on parse. A
//! frame with an empty `landmarks` array is a "no body detected" frame.

use serde::{Deserialize, Serialize};

use crate::landmark::{FrameDimensions, LandmarkSet};

/// One frame of detector output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Milliseconds since the start of the stream.
    #[serde(rename = "t")]
    pub timestamp_ms: u64,

    pub width: u32,
    pub height: u32,

    #[serde(default)]
    pub landmarks: LandmarkSet,
}

impl PoseFrame {
    pub fn new(timestamp_ms: u64, dims: FrameDimensions, landmarks: LandmarkSet) -> Self {
        Self {
            timestamp_ms,
            width: dims.width,
            height: dims.height,
            landmarks,
        }
    }

    pub fn dimensions(&self) -> FrameDimensions {
        FrameDimensions::new(self.height, self.width)
    }
}

/// Parse frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<PoseFrame>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize frames to JSONL format.
pub fn serialize_frames(frames: &[PoseFrame]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}
