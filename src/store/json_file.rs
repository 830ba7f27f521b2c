//! JSON file store — one pretty-printed file per session.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::error::PersistenceError;
use crate::interview::SessionSnapshot;
use crate::store::SessionStore;

/// Writes `<dir>/kyc_session_<stamp>.json`.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File a snapshot is written to.
    pub fn path_for(&self, snapshot: &SessionSnapshot) -> PathBuf {
        let stamp = snapshot
            .session_id
            .strip_prefix("kyc_")
            .unwrap_or(&snapshot.session_id);
        self.dir.join(format!("kyc_session_{stamp}.json"))
    }
}

#[async_trait]
impl SessionStore for JsonFileStore {
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<String, PersistenceError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(snapshot);
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, json).await?;
        tracing::debug!(path = %path.display(), "Wrote session snapshot");
        Ok(path.display().to_string())
    }
}
