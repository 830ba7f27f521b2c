//! Error types for KYC Voice.

use serde::{Deserialize, Serialize};

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Channel-related errors.
///
/// These describe the channel itself failing. Per-turn problems (silence,
/// garbled audio, a flaky recognizer) are reported as a `CaptureOutcome`.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel {name} disconnected: {reason}")]
    Disconnected { name: String, reason: String },

    #[error("Failed to speak on channel {name}: {reason}")]
    SpeakFailed { name: String, reason: String },
}

/// Session snapshot persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Session lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session already finalized as {from}, cannot transition to {to}")]
    AlreadyFinalized { from: String, to: String },

    #[error("Cannot finalize a session as {0}")]
    InvalidFinalStatus(String),
}

/// Why a capture attempt or a whole interview did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No speech within the listen window.
    Timeout,
    /// Speech detected but not transcribable.
    Unclear,
    /// Recognition backend failure.
    ServiceError,
    /// Transcribed text failed the field's predicate.
    ValidationFailure,
    /// Explicit refusal of consent.
    ConsentDeclined,
    /// Attempt budget consumed without success.
    RetriesExhausted,
    /// External interrupt (Ctrl+C).
    UserCancelled,
    /// The input channel went away mid-interview.
    ChannelClosed,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Timeout => "timeout",
            Self::Unclear => "unclear",
            Self::ServiceError => "service_error",
            Self::ValidationFailure => "validation_failure",
            Self::ConsentDeclined => "consent_declined",
            Self::RetriesExhausted => "retries_exhausted",
            Self::UserCancelled => "user_cancelled",
            Self::ChannelClosed => "channel_closed",
        };
        write!(f, "{s}")
    }
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
