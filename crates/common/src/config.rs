//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RepcoachError, RepcoachResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tracker thresholds and cue settings.
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hysteresis band for one exercise's driving angle, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseThresholds {
    /// Contracted extreme. Crossing below it (in the right stage) counts a rep.
    pub angle_min: f64,
    /// Extended extreme. Crossing above it re-arms the counter.
    pub angle_max: f64,
}

impl ExerciseThresholds {
    pub const fn new(angle_min: f64, angle_max: f64) -> Self {
        Self {
            angle_min,
            angle_max,
        }
    }
}

/// Tracker configuration, applied when a tracker is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub squat: ExerciseThresholds,
    pub push_up: ExerciseThresholds,
    pub hammer_curl: ExerciseThresholds,

    /// Knee angle above which a squat held in the down stage is too shallow.
    pub squat_depth_cue: f64,

    /// Trunk angle (shoulder-hip-knee) below which the posture cue fires.
    pub squat_trunk_min: f64,

    /// Saturate progress to [0, 100] instead of letting it overshoot.
    pub clamp_progress: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            squat: ExerciseThresholds::new(90.0, 160.0),
            push_up: ExerciseThresholds::new(70.0, 160.0),
            hammer_curl: ExerciseThresholds::new(30.0, 160.0),
            squat_depth_cue: 100.0,
            squat_trunk_min: 70.0,
            clamp_progress: false,
        }
    }
}

impl TrackingConfig {
    /// Check that every threshold band is a proper sub-range of [0, 180].
    pub fn validate(&self) -> RepcoachResult<()> {
        for (name, t) in [
            ("squat", self.squat),
            ("push_up", self.push_up),
            ("hammer_curl", self.hammer_curl),
        ] {
            if !(0.0..=180.0).contains(&t.angle_min) || !(0.0..=180.0).contains(&t.angle_max) {
                return Err(RepcoachError::config(format!(
                    "{name}: thresholds must lie within [0, 180] degrees"
                )));
            }
            if t.angle_min >= t.angle_max {
                return Err(RepcoachError::config(format!(
                    "{name}: angle_min ({}) must be below angle_max ({})",
                    t.angle_min, t.angle_max
                )));
            }
        }
        for (name, value) in [
            ("squat_depth_cue", self.squat_depth_cue),
            ("squat_trunk_min", self.squat_trunk_min),
        ] {
            if !(0.0..=180.0).contains(&value) {
                return Err(RepcoachError::config(format!(
                    "{name} must lie within [0, 180] degrees"
                )));
            }
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "repcoach=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> RepcoachResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.tracking.validate()?;
        Ok(config)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("repcoach").join("config.json")
}
