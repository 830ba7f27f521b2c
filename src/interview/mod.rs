//! Interview core — bounded-retry field capture, consent, and the session
//! lifecycle.
//!
//! The driver asks for each field in turn through a [`RetryController`],
//! stops at the first field that cannot be captured, then asks for consent.
//! Every path ends with the session finalized and handed to a
//! [`SessionStore`](crate::store::SessionStore) by [`run_interview`].

pub mod consent;
pub mod driver;
pub mod field;
pub mod prompts;
pub mod retry;
pub mod runner;
pub mod session;
pub mod validators;

pub use consent::{ConsentClassifier, ConsentDecision, ConsentMatch};
pub use driver::{InterviewDriver, InterviewOutcome};
pub use field::{FieldKind, FieldSpec};
pub use retry::{ConsentOutcome, FieldCapture, RetryController, RetryMessages, RetryOutcome, Step};
pub use runner::{RunReport, abort_interview, run_interview};
pub use session::{FailureRecord, SessionSnapshot, SessionState, UserData, VerificationStatus};
