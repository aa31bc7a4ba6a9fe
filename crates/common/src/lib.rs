//! RepCoach Common Utilities
//!
//! Shared infrastructure for all RepCoach crates:
//! - Error types and result aliases
//! - Session clock for start/end timestamps
//! - Tracing/logging initialization
//! - Configuration loading (tracking thresholds, logging)

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
