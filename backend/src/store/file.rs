//! File-backed snapshot store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::SnapshotStore;
use crate::error::{AppError, AppResult};

/// Stores the snapshot in a single file.
///
/// Writes go to a sibling `.tmp` file which is synced and renamed over the
/// target, so a reader sees either the old payload or the new one.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> AppError {
    AppError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

#[axum::async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, data: &[u8]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("create directory", parent, e))?;
        }

        let tmp_path = self.tmp_path();
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)
            .await
            .map_err(|e| storage_error("open", &tmp_path, e))?;
        file.write_all(data)
            .await
            .map_err(|e| storage_error("write", &tmp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| storage_error("sync", &tmp_path, e))?;
        drop(file);

        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| storage_error("replace", &self.path, e))?;

        tracing::debug!(path = %self.path.display(), bytes = data.len(), "Snapshot saved");
        Ok(())
    }

    async fn load(&self) -> AppResult<Vec<u8>> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Write access is only needed when the file has to be created
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(false)
                    .open(&self.path)
                    .await
                    .map_err(|e| storage_error("create", &self.path, e))?;
                tracing::info!(path = %self.path.display(), "Created empty snapshot file");
                Vec::new()
            }
            Err(e) => return Err(storage_error("read", &self.path, e)),
        };

        tracing::debug!(path = %self.path.display(), bytes = data.len(), "Snapshot loaded");
        Ok(data)
    }
}
