//! Error types shared across RepCoach crates.

/// Top-level error type for RepCoach operations.
///
/// Only `UnsupportedExercise` and `NoBodyDetected` are produced by frame
/// analysis itself. Landmark problems inside a tracker never surface here;
/// they degrade the frame result instead.
#[derive(Debug, thiserror::Error)]
pub enum RepcoachError {
    #[error("Unsupported exercise: {id}")]
    UnsupportedExercise { id: String },

    #[error("No body detected in frame")]
    NoBodyDetected,

    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using RepcoachError.
pub type RepcoachResult<T> = Result<T, RepcoachError>;

impl RepcoachError {
    pub fn unsupported_exercise(id: impl Into<String>) -> Self {
        Self::UnsupportedExercise { id: id.into() }
    }

    pub fn session_not_found(id: impl ToString) -> Self {
        Self::SessionNotFound { id: id.to_string() }
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether the caller can succeed by retrying with a later frame.
    ///
    /// `NoBodyDetected` means "reposition the camera"; everything else
    /// is fatal for the request as issued.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoBodyDetected)
    }
}
