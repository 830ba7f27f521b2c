//! Bounded-retry capture — prompt, listen, classify, then accept, retry, or give up.
//!
//! One loop serves both field capture and the consent question. Each caller
//! supplies the messages for every failure branch and a classifier turning
//! an utterance into a [`Step`].
//!
//! Every failed attempt (timeout, unclear, service error, rejected answer)
//! consumes one attempt from the same budget of `max_retries + 1`, so the
//! classifier runs at most that many times.

use std::time::Duration;

use tracing::{debug, info};

use crate::channels::InputChannel;
use crate::error::{ChannelError, FailureKind};

use super::consent::{ConsentClassifier, ConsentDecision};
use super::field::FieldSpec;
use super::prompts;

/// What the classifier made of an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// Good answer; capture succeeds.
    Accept(T),
    /// Bad answer; re-prompt if attempts remain.
    Reject,
    /// Terminal answer; capture ends immediately without retry.
    Stop(T),
}

/// Messages spoken by the retry loop.
#[derive(Debug, Clone, Copy)]
pub struct RetryMessages<'a> {
    pub prompt: &'a str,
    pub on_timeout: &'a str,
    pub on_unclear: &'a str,
    pub on_service_error: &'a str,
    pub on_rejected: &'a str,
    pub timeout_exhausted: &'a str,
    pub unclear_exhausted: &'a str,
    pub service_error_exhausted: &'a str,
    pub rejected_exhausted: &'a str,
}

impl<'a> RetryMessages<'a> {
    /// Messages for capturing a field.
    pub fn for_field(spec: &'a FieldSpec) -> Self {
        Self {
            prompt: spec.prompt,
            on_timeout: prompts::DIDNT_HEAR,
            on_unclear: prompts::DIDNT_CATCH,
            on_service_error: prompts::TECHNICAL_DIFFICULTY,
            on_rejected: spec.invalid_message,
            timeout_exhausted: prompts::TROUBLE_HEARING,
            unclear_exhausted: prompts::TROUBLE_UNDERSTANDING,
            service_error_exhausted: prompts::TECHNICAL_EXHAUSTED,
            rejected_exhausted: spec.exhausted_message,
        }
    }

    /// Messages for the consent question.
    pub fn for_consent() -> Self {
        Self {
            prompt: prompts::CONSENT_PROMPT,
            on_timeout: prompts::CONSENT_REPROMPT,
            on_unclear: prompts::CONSENT_REPROMPT,
            on_service_error: prompts::TECHNICAL_DIFFICULTY,
            on_rejected: prompts::CONSENT_YES_NO_ONLY,
            timeout_exhausted: prompts::CONSENT_UNCONFIRMED,
            unclear_exhausted: prompts::CONSENT_UNCONFIRMED,
            service_error_exhausted: prompts::CONSENT_UNCONFIRMED,
            rejected_exhausted: prompts::CONSENT_NOT_UNDERSTOOD,
        }
    }

    fn for_failure(&self, kind: FailureKind) -> (&'a str, &'a str) {
        match kind {
            FailureKind::Timeout => (self.on_timeout, self.timeout_exhausted),
            FailureKind::Unclear => (self.on_unclear, self.unclear_exhausted),
            FailureKind::ServiceError => (self.on_service_error, self.service_error_exhausted),
            FailureKind::ValidationFailure => (self.on_rejected, self.rejected_exhausted),
            // Interview-level causes; a listen turn never fails this way.
            FailureKind::ConsentDeclined
            | FailureKind::RetriesExhausted
            | FailureKind::UserCancelled
            | FailureKind::ChannelClosed => (self.on_rejected, self.rejected_exhausted),
        }
    }
}

/// How a bounded capture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    Accepted { value: T, attempts: u32 },
    Stopped { value: T, attempts: u32 },
    Exhausted { attempts: u32, last_failure: FailureKind },
}

/// Result of capturing one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCapture {
    /// Valid, normalized value.
    Captured { value: String, attempts: u32 },
    /// Budget consumed without a valid answer.
    Abandoned { attempts: u32, last_failure: FailureKind },
}

/// Result of the consent question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentOutcome {
    Granted { attempts: u32 },
    /// Explicit refusal; never re-asked.
    Declined { attempts: u32 },
    /// No usable yes/no within the budget.
    Abandoned { attempts: u32, last_failure: FailureKind },
}

/// Runs bounded-retry captures over a channel.
pub struct RetryController<'c> {
    channel: &'c dyn InputChannel,
    max_retries: u32,
    listen_timeout: Duration,
}

impl<'c> RetryController<'c> {
    pub fn new(channel: &'c dyn InputChannel, max_retries: u32, listen_timeout: Duration) -> Self {
        Self {
            channel,
            max_retries,
            listen_timeout,
        }
    }

    /// Attempts available per capture.
    fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// The generic loop. `label` only feeds logs.
    pub async fn run<T, F>(
        &self,
        label: &str,
        messages: &RetryMessages<'_>,
        mut classify: F,
    ) -> Result<RetryOutcome<T>, ChannelError>
    where
        F: FnMut(&str) -> Step<T>,
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            self.channel.say(messages.prompt).await;

            let outcome = self.channel.listen(self.listen_timeout).await?;
            let failure = match outcome.into_text() {
                Ok(text) => match classify(&text) {
                    Step::Accept(value) => {
                        debug!(field = label, attempt, "Capture accepted");
                        return Ok(RetryOutcome::Accepted {
                            value,
                            attempts: attempt,
                        });
                    }
                    Step::Stop(value) => {
                        debug!(field = label, attempt, "Capture stopped");
                        return Ok(RetryOutcome::Stopped {
                            value,
                            attempts: attempt,
                        });
                    }
                    Step::Reject => FailureKind::ValidationFailure,
                },
                Err(kind) => kind,
            };

            info!(
                field = label,
                attempt,
                max_attempts,
                failure = %failure,
                "Capture attempt failed"
            );

            let (retry_message, exhausted_message) = messages.for_failure(failure);
            if attempt < max_attempts {
                self.channel.say(retry_message).await;
            } else {
                self.channel.say(exhausted_message).await;
                return Ok(RetryOutcome::Exhausted {
                    attempts: attempt,
                    last_failure: failure,
                });
            }
        }
    }

    /// Capture one field: prompt until a valid answer or the budget runs out.
    pub async fn collect_field(&self, spec: &FieldSpec) -> Result<FieldCapture, ChannelError> {
        let messages = RetryMessages::for_field(spec);
        let outcome = self
            .run(spec.kind.key(), &messages, |text| match spec.accept(text) {
                Some(value) => Step::Accept(value),
                None => Step::Reject,
            })
            .await?;

        Ok(match outcome {
            RetryOutcome::Accepted { value, attempts } | RetryOutcome::Stopped { value, attempts } => {
                FieldCapture::Captured { value, attempts }
            }
            RetryOutcome::Exhausted {
                attempts,
                last_failure,
            } => FieldCapture::Abandoned {
                attempts,
                last_failure,
            },
        })
    }

    /// Ask for consent. Declining ends the question at once.
    pub async fn collect_consent(
        &self,
        classifier: &ConsentClassifier,
    ) -> Result<ConsentOutcome, ChannelError> {
        let messages = RetryMessages::for_consent();
        let outcome = self
            .run("consent", &messages, |text| match classifier.classify(text) {
                ConsentDecision::Granted => Step::Accept(ConsentDecision::Granted),
                ConsentDecision::Declined => Step::Stop(ConsentDecision::Declined),
                ConsentDecision::Indeterminate => Step::Reject,
            })
            .await?;

        Ok(match outcome {
            RetryOutcome::Accepted { attempts, .. } => ConsentOutcome::Granted { attempts },
            RetryOutcome::Stopped { attempts, .. } => ConsentOutcome::Declined { attempts },
            RetryOutcome::Exhausted {
                attempts,
                last_failure,
            } => ConsentOutcome::Abandoned {
                attempts,
                last_failure,
            },
        })
    }
}
