//! Token entity for the wallet core

use serde::{Deserialize, Serialize};
use crate::shared::error::WalletError;
use crate::shared::types::{Amount, TokenId};
use crate::shared::utils::format_amount;

/// Display metadata for a token, as reported by the network layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub ticker: String,
    pub name: String,
    pub decimals: u8,
}

/// One token balance held by the wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub token_id: TokenId,
    pub balance: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<TokenInfo>,
}

impl Token {
    pub fn new(token_id: impl Into<TokenId>, balance: Amount) -> Self {
        Self {
            token_id: token_id.into(),
            balance,
            info: None,
        }
    }

    pub fn with_info(mut self, info: TokenInfo) -> Self {
        self.info = Some(info);
        self
    }

    pub fn decimals(&self) -> u8 {
        self.info.as_ref().map(|info| info.decimals).unwrap_or(0)
    }

    pub fn ticker(&self) -> Option<&str> {
        self.info.as_ref().map(|info| info.ticker.as_str())
    }

    /// Balance rendered with the token's decimals
    pub fn formatted_balance(&self) -> Result<String, WalletError> {
        format_amount(self.balance, self.decimals())
    }
}

/// Linear scan for a token by id
pub fn find_token<'a>(tokens: &'a [Token], token_id: &str) -> Option<&'a Token> {
    tokens.iter().find(|t| t.token_id == token_id)
}
