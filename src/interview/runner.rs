//! Top-level run — races the interview against cancellation and always
//! persists exactly one snapshot.

use std::future::Future;

use tracing::{error, info, warn};

use crate::error::{FailureKind, PersistenceError};
use crate::store::SessionStore;

use super::driver::{InterviewDriver, InterviewOutcome};
use super::session::{FailureRecord, SessionState, VerificationStatus};

/// What happened and where the snapshot went.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub session_id: String,
    pub status: VerificationStatus,
    /// Set when the interview reached its own end.
    pub outcome: Option<InterviewOutcome>,
    /// Location reported by the store.
    pub location: String,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.status == VerificationStatus::Completed
    }
}

/// Run the interview until it ends or `cancel` resolves, then persist.
///
/// Completed, declined, exhausted, cancelled, and channel-failure paths all
/// finalize the session and call `store.save` once. Only a failing save is
/// returned as an error.
pub async fn run_interview<F>(
    driver: &InterviewDriver,
    session: &mut SessionState,
    store: &dyn SessionStore,
    cancel: F,
) -> Result<RunReport, PersistenceError>
where
    F: Future<Output = ()>,
{
    let result = {
        let run = driver.run(session);
        tokio::select! {
            biased;
            _ = cancel => None,
            result = run => Some(result),
        }
    };

    let outcome = match result {
        Some(Ok(outcome)) => Some(outcome),
        Some(Err(e)) => {
            error!(session_id = session.id(), "Interview channel failed: {}", e);
            conclude(session, FailureKind::ChannelClosed);
            None
        }
        None => {
            info!(session_id = session.id(), "Interview cancelled");
            conclude(session, FailureKind::UserCancelled);
            None
        }
    };

    persist(session, store, outcome).await
}

/// End a session that never got to run (or was interrupted outside
/// [`run_interview`]) and persist it.
pub async fn abort_interview(
    session: &mut SessionState,
    store: &dyn SessionStore,
    kind: FailureKind,
) -> Result<RunReport, PersistenceError> {
    conclude(session, kind);
    persist(session, store, None).await
}

/// Finalize a still-pending session for an external stop.
fn conclude(session: &mut SessionState, kind: FailureKind) {
    if session.status().is_terminal() {
        // Interrupted after the outcome was already settled.
        return;
    }
    let status = match kind {
        FailureKind::UserCancelled => VerificationStatus::Cancelled,
        _ => VerificationStatus::Error,
    };
    session.record_failure(FailureRecord::new(kind));
    if let Err(e) = session.finalize(status) {
        warn!(session_id = session.id(), "Could not finalize session: {}", e);
    }
}

async fn persist(
    session: &mut SessionState,
    store: &dyn SessionStore,
    outcome: Option<InterviewOutcome>,
) -> Result<RunReport, PersistenceError> {
    if !session.status().is_terminal() {
        warn!(session_id = session.id(), "Session still pending at persist; marking as error");
        conclude(session, FailureKind::ChannelClosed);
    }

    let snapshot = session.snapshot();
    let location = store.save(&snapshot).await?;
    info!(
        session_id = session.id(),
        status = %session.status(),
        location = %location,
        "Session saved"
    );

    Ok(RunReport {
        session_id: session.id().to_string(),
        status: session.status(),
        outcome,
        location,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::channels::ScriptedChannel;
    use crate::config::InterviewConfig;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn immediate_cancel_persists_cancelled_session() {
        let channel = Arc::new(ScriptedChannel::from_utterances(&["John Doe"]));
        let driver = InterviewDriver::new(channel.clone(), InterviewConfig::default());
        let store = MemoryStore::new();
        let mut session = SessionState::new();

        let report = run_interview(&driver, &mut session, &store, async {})
            .await
            .unwrap();

        assert_eq!(report.status, VerificationStatus::Cancelled);
        assert!(report.outcome.is_none());
        assert_eq!(channel.listen_count(), 0);

        let saved = store.snapshots().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(
            saved[0].failure.as_ref().map(|f| f.kind),
            Some(FailureKind::UserCancelled)
        );
    }

    #[tokio::test]
    async fn abort_before_start_persists_once() {
        let store = MemoryStore::new();
        let mut session = SessionState::new();

        let report = abort_interview(&mut session, &store, FailureKind::ChannelClosed)
            .await
            .unwrap();

        assert_eq!(report.status, VerificationStatus::Error);
        assert!(!report.succeeded());
        assert_eq!(store.snapshots().await.len(), 1);
    }

    #[tokio::test]
    async fn cancel_after_finalize_keeps_outcome() {
        let store = MemoryStore::new();
        let mut session = SessionState::new();
        session.finalize(VerificationStatus::Completed).unwrap();

        let report = abort_interview(&mut session, &store, FailureKind::UserCancelled)
            .await
            .unwrap();

        assert_eq!(report.status, VerificationStatus::Completed);
        assert!(session.failure().is_none());
    }
}
