//! ScriptedChannel — replays a fixed sequence of capture outcomes.
//!
//! Records everything spoken so callers can assert on the dialogue. Used by
//! tests and for dry runs of the interview without a microphone.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::channels::{CaptureOutcome, InputChannel};
use crate::error::ChannelError;

/// A deterministic channel driven by a pre-recorded script.
pub struct ScriptedChannel {
    script: Mutex<VecDeque<CaptureOutcome>>,
    spoken: Mutex<Vec<String>>,
    listens: AtomicUsize,
    /// When the script runs out: hang forever instead of disconnecting.
    hang_when_exhausted: bool,
}

impl ScriptedChannel {
    /// Create a channel that replays `outcomes` in order.
    pub fn new(outcomes: impl IntoIterator<Item = CaptureOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            spoken: Mutex::new(Vec::new()),
            listens: AtomicUsize::new(0),
            hang_when_exhausted: false,
        }
    }

    /// Create a channel where every turn is a successful utterance.
    pub fn from_utterances(utterances: &[&str]) -> Self {
        Self::new(utterances.iter().map(|u| CaptureOutcome::utterance(*u)))
    }

    /// Make `listen` wait indefinitely once the script is used up.
    pub fn hang_when_exhausted(mut self) -> Self {
        self.hang_when_exhausted = true;
        self
    }

    /// Everything spoken so far, in order.
    pub async fn spoken(&self) -> Vec<String> {
        self.spoken.lock().await.clone()
    }

    /// Number of `listen` calls made.
    pub fn listen_count(&self) -> usize {
        self.listens.load(Ordering::SeqCst)
    }

    /// Outcomes not yet consumed.
    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl InputChannel for ScriptedChannel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn speak(&self, text: &str) -> Result<(), ChannelError> {
        tracing::debug!(text, "Scripted speak");
        self.spoken.lock().await.push(text.to_string());
        Ok(())
    }

    async fn listen(&self, _timeout: Duration) -> Result<CaptureOutcome, ChannelError> {
        self.listens.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().await.pop_front();
        match next {
            Some(outcome) => Ok(outcome),
            None if self.hang_when_exhausted => std::future::pending().await,
            None => Err(ChannelError::Disconnected {
                name: "scripted".to_string(),
                reason: "script exhausted".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_outcomes_in_order() {
        let channel = ScriptedChannel::new([
            CaptureOutcome::Timeout,
            CaptureOutcome::utterance("John Doe"),
        ]);
        let timeout = Duration::from_millis(10);

        assert_eq!(channel.listen(timeout).await.unwrap(), CaptureOutcome::Timeout);
        assert_eq!(
            channel.listen(timeout).await.unwrap().into_text(),
            Ok("John Doe".to_string())
        );
        assert_eq!(channel.listen_count(), 2);
        assert_eq!(channel.remaining().await, 0);
    }

    #[tokio::test]
    async fn exhausted_script_disconnects() {
        let channel = ScriptedChannel::new([]);
        let err = channel.listen(Duration::from_millis(10)).await.unwrap_err();
        assert!(matches!(err, ChannelError::Disconnected { .. }));
    }

    #[tokio::test]
    async fn exhausted_script_can_hang() {
        let channel = ScriptedChannel::new([]).hang_when_exhausted();
        let waited = tokio::time::timeout(
            Duration::from_millis(20),
            channel.listen(Duration::from_secs(5)),
        )
        .await;
        assert!(waited.is_err(), "listen should still be pending");
    }

    #[tokio::test]
    async fn records_spoken_lines() {
        let channel = ScriptedChannel::new([]);
        channel.say("Hello").await;
        channel.speak("Goodbye").await.unwrap();
        assert_eq!(channel.spoken().await, vec!["Hello", "Goodbye"]);
    }
}
