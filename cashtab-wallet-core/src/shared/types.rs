// Basic types for wallet state
pub type WalletId = String;
pub type TokenId = String;

/// Amount in base units: satoshis for the base currency, smallest unit for tokens.
/// Signed so that negative payload values can be represented and rejected.
pub type Amount = i128;

// Result types for better error handling
pub type WalletResult<T> = Result<T, crate::shared::error::WalletError>;

/// Display unit for the base currency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyUnit {
    pub ticker: String,
    pub decimals: u8,
}

impl CurrencyUnit {
    pub fn new(ticker: impl Into<String>, decimals: u8) -> Self {
        Self {
            ticker: ticker.into(),
            decimals,
        }
    }
}

impl Default for CurrencyUnit {
    fn default() -> Self {
        Self::new(
            crate::shared::constants::DEFAULT_CURRENCY_TICKER,
            crate::shared::constants::DEFAULT_CURRENCY_DECIMALS,
        )
    }
}
