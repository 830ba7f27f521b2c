//! The turn-taking channel trait and per-turn capture outcomes.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ChannelError, FailureKind};

/// Result of a single listen attempt.
///
/// Either a usable utterance or a failure status, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Trimmed, non-empty transcription.
    Utterance(String),
    /// No speech within the listen window.
    Timeout,
    /// Speech detected but not transcribable.
    Unclear,
    /// The recognition backend failed for this turn.
    ServiceError,
}

impl CaptureOutcome {
    /// Build an utterance outcome. Blank text is treated as `Unclear`.
    pub fn utterance(text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self::Unclear
        } else {
            Self::Utterance(trimmed.to_string())
        }
    }

    /// The transcribed text, or the failure this turn counts as.
    pub fn into_text(self) -> Result<String, FailureKind> {
        match self {
            Self::Utterance(text) => Ok(text),
            Self::Timeout => Err(FailureKind::Timeout),
            Self::Unclear => Err(FailureKind::Unclear),
            Self::ServiceError => Err(FailureKind::ServiceError),
        }
    }
}

/// A voice (or voice-like) channel the interview talks through.
///
/// Turns strictly alternate: every `speak` completes before the next
/// `listen` begins.
#[async_trait]
pub trait InputChannel: Send + Sync {
    /// Channel name, used in logs.
    fn name(&self) -> &str;

    /// Say something to the user.
    async fn speak(&self, text: &str) -> Result<(), ChannelError>;

    /// Wait up to `timeout` for the user's next utterance.
    ///
    /// `Err` means the channel is gone and no further turns are possible.
    async fn listen(&self, timeout: Duration) -> Result<CaptureOutcome, ChannelError>;

    /// Speak, logging instead of propagating failures.
    async fn say(&self, text: &str) {
        if let Err(e) = self.speak(text).await {
            tracing::warn!(channel = self.name(), error = %e, "Failed to speak");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utterance_is_trimmed() {
        assert_eq!(
            CaptureOutcome::utterance("  John Doe \n"),
            CaptureOutcome::Utterance("John Doe".to_string())
        );
    }

    #[test]
    fn blank_utterance_is_unclear() {
        assert_eq!(CaptureOutcome::utterance(""), CaptureOutcome::Unclear);
        assert_eq!(CaptureOutcome::utterance("   \t"), CaptureOutcome::Unclear);
    }

    #[test]
    fn utterance_yields_text() {
        assert_eq!(
            CaptureOutcome::utterance(" yes ").into_text(),
            Ok("yes".to_string())
        );
    }

    #[test]
    fn failures_map_to_taxonomy() {
        assert_eq!(CaptureOutcome::Timeout.into_text(), Err(FailureKind::Timeout));
        assert_eq!(CaptureOutcome::Unclear.into_text(), Err(FailureKind::Unclear));
        assert_eq!(
            CaptureOutcome::ServiceError.into_text(),
            Err(FailureKind::ServiceError)
        );
        assert_eq!(CaptureOutcome::utterance("  ").into_text(), Err(FailureKind::Unclear));
    }
}
