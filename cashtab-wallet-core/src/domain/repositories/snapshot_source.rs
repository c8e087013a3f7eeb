//! Snapshot source for wallet data
//! 
//! The network collaborator fetches balances from the chain and shapes them
//! into a `WalletSnapshot`. The core never speaks a wire protocol itself.

use async_trait::async_trait;
use crate::domain::entities::WalletSnapshot;
use crate::shared::error::WalletError;

/// Source of fresh wallet snapshots
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the latest snapshot for a wallet
    async fn fetch_snapshot(&self, wallet_id: &str) -> Result<WalletSnapshot, WalletError>;
}
