//! Session timing.
//!
//! A session clock pairs a monotonic start instant (for durations) with the
//! wall-clock start time (for summaries shown to people).

use std::time::Instant;

use chrono::{DateTime, Utc};

/// Clock anchored to the moment a tracking session was opened.
#[derive(Debug, Clone)]
pub struct SessionClock {
    epoch: Instant,
    started_at: DateTime<Utc>,
}

impl SessionClock {
    /// Create a clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Wall-clock time the session started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Seconds elapsed since the session started.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock "now" derived from the monotonic clock, so that
    /// `now() - started_at()` never goes negative.
    pub fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.epoch.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.started_at + elapsed
    }
}
