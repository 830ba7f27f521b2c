//! `SessionStore` trait — single async interface for snapshot persistence.

use async_trait::async_trait;

use crate::error::PersistenceError;
use crate::interview::SessionSnapshot;

/// Backend-agnostic sink for finished sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Write a snapshot and return where it went (path, URI, ...).
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<String, PersistenceError>;
}
