//! InterviewDriver — walks the fields in order, asks for consent, and
//! finalizes the session.

use std::sync::Arc;

use tracing::info;

use crate::channels::InputChannel;
use crate::config::InterviewConfig;
use crate::error::{ChannelError, FailureKind};

use super::consent::ConsentClassifier;
use super::field::FieldSpec;
use super::prompts;
use super::retry::{ConsentOutcome, FieldCapture, RetryController};
use super::session::{FailureRecord, SessionState, VerificationStatus};

/// How an interview that ran to its own end finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewOutcome {
    Completed,
    ConsentDeclined,
    /// Stopped on `field` after the attempt budget ran out.
    Abandoned { field: String, last_failure: FailureKind },
}

/// Sequences field capture and consent for one session.
pub struct InterviewDriver {
    channel: Arc<dyn InputChannel>,
    config: InterviewConfig,
    fields: Vec<FieldSpec>,
    classifier: ConsentClassifier,
}

impl InterviewDriver {
    /// Driver for the standard name → phone → PAN interview.
    pub fn new(channel: Arc<dyn InputChannel>, config: InterviewConfig) -> Self {
        let classifier = ConsentClassifier::new(config.consent_match);
        Self {
            channel,
            config,
            fields: FieldSpec::standard_sequence(),
            classifier,
        }
    }

    /// Run the interview, recording into `session`.
    ///
    /// On `Ok` the session has been finalized. On `Err` the channel failed
    /// mid-interview and the session is still pending.
    pub async fn run(&self, session: &mut SessionState) -> Result<InterviewOutcome, ChannelError> {
        let channel = self.channel.as_ref();
        let retry = RetryController::new(
            channel,
            self.config.max_retries,
            self.config.listen_timeout,
        );

        info!(session_id = session.id(), channel = channel.name(), "Interview started");
        channel.say(prompts::WELCOME).await;

        for spec in &self.fields {
            match retry.collect_field(spec).await? {
                FieldCapture::Captured { value, attempts } => {
                    info!(field = %spec.kind, attempts, "Field captured");
                    session.record_field(spec.kind, value, attempts);
                }
                FieldCapture::Abandoned { last_failure, .. } => {
                    channel.say(spec.abandon_message).await;
                    session.record_failure(FailureRecord::retries_exhausted(
                        spec.kind.key(),
                        last_failure,
                    ));
                    finish(session, VerificationStatus::Error);
                    return Ok(InterviewOutcome::Abandoned {
                        field: spec.kind.key().to_string(),
                        last_failure,
                    });
                }
            }
        }

        match retry.collect_consent(&self.classifier).await? {
            ConsentOutcome::Granted { attempts } => {
                session.record_consent(true);
                session.record_attempts("consent", attempts);
            }
            ConsentOutcome::Declined { .. } => {
                channel.say(prompts::CONSENT_DECLINED).await;
                session.record_consent(false);
                session.record_failure(
                    FailureRecord::new(FailureKind::ConsentDeclined).with_field("consent"),
                );
                finish(session, VerificationStatus::ConsentDeclined);
                return Ok(InterviewOutcome::ConsentDeclined);
            }
            ConsentOutcome::Abandoned { last_failure, .. } => {
                session.record_failure(FailureRecord::retries_exhausted("consent", last_failure));
                finish(session, VerificationStatus::Error);
                return Ok(InterviewOutcome::Abandoned {
                    field: "consent".to_string(),
                    last_failure,
                });
            }
        }

        channel.say(&self.readback(session)).await;
        finish(session, VerificationStatus::Completed);
        channel.say(prompts::COMPLETION).await;

        Ok(InterviewOutcome::Completed)
    }

    fn readback(&self, session: &SessionState) -> String {
        let entries: Vec<(&str, &str)> = self
            .fields
            .iter()
            .filter_map(|spec| {
                session
                    .value(spec.kind)
                    .map(|value| (spec.kind.readback_label(), value))
            })
            .collect();
        prompts::readback(&entries)
    }
}

fn finish(session: &mut SessionState, status: VerificationStatus) {
    match session.finalize(status) {
        Ok(()) => info!(session_id = session.id(), %status, "Interview finished"),
        Err(e) => tracing::warn!(session_id = session.id(), "Could not finalize session: {}", e),
    }
}
