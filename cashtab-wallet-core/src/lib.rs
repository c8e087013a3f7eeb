//! Cashtab Wallet Core
//! 
//! Client-side wallet state model for Cashtab.
//! Tracks the base-currency balance and token balances of the active wallet
//! from snapshots delivered by the network layer.
//! 
//! ## Architecture
//! 
//! - **Core**: Wallet state store and session management
//! - **Domain**: Entities and the snapshot source seam
//! - **Shared**: Common types, constants, errors, and utilities
//! - **Infrastructure**: Configuration, logging, and file-backed snapshots
//! 
//! ## Usage
//! 
//! ```rust,no_run
//! use cashtab_wallet_core::{WalletCore, WalletCoreConfig, WalletIdentity};
//! 
//! # async fn run() -> Result<(), cashtab_wallet_core::WalletError> {
//! let config = WalletCoreConfig::from_env()?;
//! let core = WalletCore::from_config(config)?;
//! 
//! core.open_wallet(WalletIdentity::new("w1", "Savings")).await?;
//! let store = core.manager.read().await;
//! println!("balance: {}", store.get_total_balance());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use tokio::task::JoinHandle;

pub mod core;
pub mod domain;
pub mod shared;
pub mod infrastructure;

// Re-export specific components
pub use crate::core::wallet::{WalletManager, WalletStateStore, WalletSummary, TokenSummary};
pub use crate::infrastructure::{init_logging, JsonFileSnapshotSource, WalletCoreConfig};

// Re-export domain entities
pub use crate::domain::{SnapshotSource, Token, TokenInfo, WalletIdentity, WalletSnapshot, WalletState};

// Re-export shared types
pub use crate::shared::error::WalletError;
pub use crate::shared::types::{Amount, CurrencyUnit, TokenId, WalletId, WalletResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load configuration from the environment and install the logger
pub fn init() -> Result<WalletCoreConfig, WalletError> {
    let config = WalletCoreConfig::from_env()?;
    init_logging(config.log_level);
    log::debug!("{} {} initialized", NAME, VERSION);
    Ok(config)
}

/// Wallet core: configuration plus the session manager
pub struct WalletCore {
    pub config: WalletCoreConfig,
    pub manager: Arc<WalletManager>,
}

impl WalletCore {
    pub fn new(config: WalletCoreConfig, source: Arc<dyn SnapshotSource>) -> Self {
        Self {
            config,
            manager: Arc::new(WalletManager::new(source)),
        }
    }

    /// Build a core reading snapshots from the configured path
    pub fn from_config(config: WalletCoreConfig) -> Result<Self, WalletError> {
        let path = config
            .snapshot_path
            .clone()
            .ok_or_else(|| WalletError::config("No snapshot path configured"))?;
        Ok(Self::new(config, Arc::new(JsonFileSnapshotSource::new(path))))
    }

    /// Switch to `identity` and load its first snapshot
    pub async fn open_wallet(&self, identity: WalletIdentity) -> Result<(), WalletError> {
        self.manager.switch_wallet(identity).await;
        self.manager.refresh().await
    }

    pub async fn close_wallet(&self) {
        self.manager.logout().await;
    }

    /// Start polling the snapshot source at the configured interval
    pub fn start_polling(&self) -> JoinHandle<()> {
        WalletManager::spawn_refresh_loop(self.manager.clone(), self.config.refresh_interval)
    }

    pub async fn summary(&self) -> Result<WalletSummary, WalletError> {
        let (identity, state) = self.manager.session().await;
        WalletSummary::build(identity.as_ref(), &state, &self.config.currency)
    }
}

impl Drop for WalletCore {
    fn drop(&mut self) {
        log::debug!("WalletCore dropped");
    }
}
