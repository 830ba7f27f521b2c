//! Session state — the single record an interview accumulates and persists.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FailureKind, SessionError};

use super::field::FieldKind;

/// Overall verification status.
///
/// Starts as `Pending` and moves to exactly one terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Completed,
    ConsentDeclined,
    Cancelled,
    Error,
}

impl VerificationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::ConsentDeclined => "consent_declined",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// Why a session ended without completing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub kind: FailureKind,
    /// Field being captured when the interview stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Last per-attempt failure, for exhausted captures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<FailureKind>,
}

impl FailureRecord {
    pub fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            field: None,
            cause: None,
        }
    }

    pub fn retries_exhausted(field: impl Into<String>, cause: FailureKind) -> Self {
        Self {
            kind: FailureKind::RetriesExhausted,
            field: Some(field.into()),
            cause: Some(cause),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Mutable record of one interview.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: String,
    created_at: DateTime<Utc>,
    values: BTreeMap<String, String>,
    consent: Option<bool>,
    attempts: BTreeMap<String, u32>,
    status: VerificationStatus,
    failure: Option<FailureRecord>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Start a new pending session stamped with the current time.
    pub fn new() -> Self {
        let created_at = Utc::now();
        let suffix = Uuid::new_v4().simple().to_string();
        let id = format!("kyc_{}_{}", created_at.format("%Y%m%d_%H%M%S"), &suffix[..8]);
        Self::with_id(id, created_at)
    }

    /// Start a session with a caller-chosen identity.
    pub fn with_id(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at,
            values: BTreeMap::new(),
            consent: None,
            attempts: BTreeMap::new(),
            status: VerificationStatus::Pending,
            failure: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    pub fn value(&self, field: FieldKind) -> Option<&str> {
        self.values.get(field.key()).map(String::as_str)
    }

    pub fn consent(&self) -> Option<bool> {
        self.consent
    }

    pub fn attempts(&self, key: &str) -> Option<u32> {
        self.attempts.get(key).copied()
    }

    pub fn failure(&self) -> Option<&FailureRecord> {
        self.failure.as_ref()
    }

    /// Store a validated value and the attempts it took.
    ///
    /// Only called with answers that passed the field's validator.
    pub fn record_field(&mut self, field: FieldKind, value: String, attempts: u32) {
        self.values.insert(field.key().to_string(), value);
        self.record_attempts(field.key(), attempts);
    }

    pub fn record_attempts(&mut self, key: &str, attempts: u32) {
        self.attempts.insert(key.to_string(), attempts);
    }

    pub fn record_consent(&mut self, granted: bool) {
        self.consent = Some(granted);
    }

    /// Remember why the session stopped. The first recorded cause wins.
    pub fn record_failure(&mut self, failure: FailureRecord) {
        if self.failure.is_none() {
            self.failure = Some(failure);
        }
    }

    /// Move from `Pending` to a terminal status. Allowed exactly once.
    pub fn finalize(&mut self, status: VerificationStatus) -> Result<(), SessionError> {
        if !status.is_terminal() {
            return Err(SessionError::InvalidFinalStatus(status.to_string()));
        }
        if self.status.is_terminal() {
            return Err(SessionError::AlreadyFinalized {
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }
        self.status = status;
        Ok(())
    }

    /// Serializable view handed to the persistence layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            timestamp: self.created_at.to_rfc3339(),
            user_data: UserData {
                fields: self.values.clone(),
                consent: self.consent,
            },
            verification_status: self.status,
            attempts: self.attempts.clone(),
            failure: self.failure.clone(),
        }
    }
}

/// Collected values plus the consent flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent: Option<bool>,
}

/// Persisted form of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    /// RFC 3339 creation time.
    pub timestamp: String,
    pub user_data: UserData,
    pub verification_status: VerificationStatus,
    pub attempts: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureRecord>,
}
