//! JSON file snapshot source
//! 
//! Reads snapshots exported by the network layer from disk. A directory
//! holds one `<wallet_id>.json` per wallet; a plain file serves every wallet.

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use crate::domain::entities::WalletSnapshot;
use crate::domain::repositories::SnapshotSource;
use crate::shared::constants::SNAPSHOT_FILE_EXTENSION;
use crate::shared::error::WalletError;

#[derive(Debug, Clone)]
pub struct JsonFileSnapshotSource {
    path: PathBuf,
}

impl JsonFileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File holding the snapshot for `wallet_id`
    pub async fn snapshot_path(&self, wallet_id: &str) -> Result<PathBuf, WalletError> {
        // A missing path is treated as a file; the read reports it
        let is_dir = tokio::fs::metadata(&self.path)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Ok(self.path.clone());
        }
        if wallet_id.is_empty() || wallet_id.contains(['/', '\\']) || wallet_id.starts_with('.') {
            return Err(WalletError::validation(format!("Invalid wallet id for file lookup: {:?}", wallet_id)));
        }
        Ok(self.path.join(format!("{}.{}", wallet_id, SNAPSHOT_FILE_EXTENSION)))
    }
}

#[async_trait]
impl SnapshotSource for JsonFileSnapshotSource {
    async fn fetch_snapshot(&self, wallet_id: &str) -> Result<WalletSnapshot, WalletError> {
        let path = self.snapshot_path(wallet_id).await?;
        log::debug!("Reading snapshot for {} from {}", wallet_id, path.display());
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| WalletError::storage(format!("Failed to read {}: {}", path.display(), e)))?;
        WalletSnapshot::from_slice(&bytes)
    }
}
