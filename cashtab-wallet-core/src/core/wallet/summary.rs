//! Display-ready summary of a wallet state

use serde::Serialize;
use crate::domain::entities::{WalletIdentity, WalletState};
use crate::shared::error::WalletError;
use crate::shared::types::CurrencyUnit;
use crate::shared::utils::format_with_ticker;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
    pub token_id: String,
    pub ticker: Option<String>,
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub label: Option<String>,
    pub balance: String,
    pub has_balance: bool,
    pub tokens: Vec<TokenSummary>,
    pub loading: bool,
}

impl WalletSummary {
    pub fn build(
        identity: Option<&WalletIdentity>,
        state: &WalletState,
        currency: &CurrencyUnit,
    ) -> Result<Self, WalletError> {
        let tokens = state
            .tokens
            .iter()
            .map(|token| {
                Ok(TokenSummary {
                    token_id: token.token_id.clone(),
                    ticker: token.ticker().map(str::to_string),
                    balance: token.formatted_balance()?,
                })
            })
            .collect::<Result<Vec<_>, WalletError>>()?;

        Ok(Self {
            label: identity.and_then(|i| i.label()).map(str::to_string),
            balance: format_with_ticker(state.total_balance, currency.decimals, &currency.ticker)?,
            has_balance: state.total_balance > 0,
            tokens,
            loading: state.loading,
        })
    }
}
