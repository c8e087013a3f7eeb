//! Wallet state store
//! 
//! Holds the single current `WalletState` of a session and answers
//! synchronous queries against it. Replacement is all-or-nothing: an
//! invalid snapshot is rejected before anything is written.

use chrono::{DateTime, Utc};
use crate::domain::entities::{find_token, Token, WalletState};
use crate::shared::error::WalletError;
use crate::shared::types::Amount;

/// Store for the current wallet state
#[derive(Debug, Default)]
pub struct WalletStateStore {
    state: WalletState,
    last_updated: Option<DateTime<Utc>>,
}

impl WalletStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole state. On error the previous state is kept.
    pub fn replace_state(&mut self, new_state: WalletState) -> Result<(), WalletError> {
        if let Err(e) = new_state.validate() {
            log::warn!("Rejected wallet state: {}", e);
            return Err(e);
        }

        log::debug!(
            "Replacing wallet state: total_balance={}, tokens={}, loading={}",
            new_state.total_balance,
            new_state.tokens.len(),
            new_state.loading
        );
        self.state = new_state;
        self.last_updated = Some(Utc::now());
        Ok(())
    }

    pub fn get_total_balance(&self) -> Amount {
        self.state.total_balance
    }

    pub fn has_token(&self, token_id: &str) -> bool {
        self.get_token(token_id).is_some()
    }

    /// `None` when the wallet does not hold the token
    pub fn get_token(&self, token_id: &str) -> Option<&Token> {
        find_token(&self.state.tokens, token_id)
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn set_loading(&mut self, flag: bool) {
        self.state.loading = flag;
    }

    /// Drop the current state, e.g. on logout or wallet switch
    pub fn clear(&mut self) {
        self.state = WalletState::empty();
        self.last_updated = None;
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    pub fn tokens(&self) -> &[Token] {
        &self.state.tokens
    }

    pub fn token_count(&self) -> usize {
        self.state.tokens.len()
    }

    pub fn has_balance(&self) -> bool {
        self.state.total_balance > 0
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}
