//! Wallet entity and related value objects
//! 
//! This module contains the wallet state aggregate, the inbound snapshot
//! payload it is built from, and the identity of the wallet a session tracks.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::domain::entities::token::{find_token, Token};
use crate::shared::error::WalletError;
use crate::shared::types::{Amount, WalletId};
use crate::shared::utils::generate_id;

/// Current aggregate view of a wallet's balances
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletState {
    /// Base-currency balance as computed by the network layer
    pub total_balance: Amount,
    /// Tokens in discovery order
    pub tokens: Vec<Token>,
    pub loading: bool,
}

impl WalletState {
    /// The empty state every session starts from
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(total_balance: Amount, tokens: Vec<Token>) -> Self {
        Self {
            total_balance,
            tokens,
            loading: false,
        }
    }

    /// Check non-negative amounts and unique token ids
    pub fn validate(&self) -> Result<(), WalletError> {
        if self.total_balance < 0 {
            return Err(WalletError::invalid_state(format!(
                "Total balance cannot be negative: {}",
                self.total_balance
            )));
        }

        let mut seen = HashSet::with_capacity(self.tokens.len());
        for token in &self.tokens {
            if token.balance < 0 {
                return Err(WalletError::invalid_state(format!(
                    "Token {} has negative balance: {}",
                    token.token_id, token.balance
                )));
            }
            if !seen.insert(token.token_id.as_str()) {
                return Err(WalletError::invalid_state(format!(
                    "Duplicate token id: {}",
                    token.token_id
                )));
            }
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.total_balance == 0 && self.tokens.is_empty()
    }

    pub fn get_token(&self, token_id: &str) -> Option<&Token> {
        find_token(&self.tokens, token_id)
    }
}

/// Snapshot payload delivered by the network collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    pub total_balance: Amount,
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,
}

impl WalletSnapshot {
    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, WalletError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Convert into a validated wallet state
    pub fn into_state(self) -> Result<WalletState, WalletError> {
        let state = WalletState {
            total_balance: self.total_balance,
            tokens: self.tokens,
            loading: self.loading.unwrap_or(false),
        };
        state.validate()?;
        Ok(state)
    }
}

impl TryFrom<WalletSnapshot> for WalletState {
    type Error = WalletError;

    fn try_from(snapshot: WalletSnapshot) -> Result<Self, Self::Error> {
        snapshot.into_state()
    }
}

impl From<WalletState> for WalletSnapshot {
    fn from(state: WalletState) -> Self {
        Self {
            total_balance: state.total_balance,
            tokens: state.tokens,
            loading: Some(state.loading),
        }
    }
}

/// Identity of the wallet a session is tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletIdentity {
    pub wallet_id: WalletId,
    pub name: String,
}

impl WalletIdentity {
    pub fn new(wallet_id: impl Into<WalletId>, name: impl Into<String>) -> Self {
        Self {
            wallet_id: wallet_id.into(),
            name: name.into(),
        }
    }

    /// Create an identity with a freshly generated id
    pub fn generate(name: impl Into<String>) -> Self {
        Self::new(format!("wallet_{}", generate_id()), name)
    }

    /// Display label; blank names have none
    pub fn label(&self) -> Option<&str> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}
