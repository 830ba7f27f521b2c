//! In-memory store — keeps snapshots for inspection.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::PersistenceError;
use crate::interview::SessionSnapshot;
use crate::store::SessionStore;

#[derive(Default)]
pub struct MemoryStore {
    snapshots: Mutex<Vec<SessionSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every snapshot saved so far, oldest first.
    pub async fn snapshots(&self) -> Vec<SessionSnapshot> {
        self.snapshots.lock().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<String, PersistenceError> {
        self.snapshots.lock().await.push(snapshot.clone());
        Ok(format!("memory://{}", snapshot.session_id))
    }
}
