//! In-memory snapshot store

use tokio::sync::Mutex;

use super::SnapshotStore;
use crate::error::AppResult;

/// Keeps the snapshot in memory. Same semantics as the file store.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    data: Mutex<Vec<u8>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a payload
    pub fn with_data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Mutex::new(data.into()),
        }
    }
}

#[axum::async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn save(&self, data: &[u8]) -> AppResult<()> {
        let mut stored = self.data.lock().await;
        stored.clear();
        stored.extend_from_slice(data);
        Ok(())
    }

    async fn load(&self) -> AppResult<Vec<u8>> {
        Ok(self.data.lock().await.clone())
    }
}
