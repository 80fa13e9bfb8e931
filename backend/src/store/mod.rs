//! Persistence of the latest weather snapshot
//!
//! Exactly one payload is kept: every save replaces the previous one in full.

pub mod file;
pub mod memory;

pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;

use crate::error::AppResult;

/// Storage for the single cached snapshot payload
#[axum::async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Replace the stored payload with `data`
    async fn save(&self, data: &[u8]) -> AppResult<()>;

    /// Return the stored payload; empty when nothing was saved yet
    async fn load(&self) -> AppResult<Vec<u8>>;

    /// Drop the stored payload
    async fn clear(&self) -> AppResult<()> {
        self.save(&[]).await
    }
}
