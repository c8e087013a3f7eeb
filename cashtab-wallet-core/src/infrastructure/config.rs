//! Runtime configuration for the wallet core
//! 
//! Values come from the process environment, after loading `.env` if present.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use dotenv::dotenv;
use log::LevelFilter;
use crate::shared::constants::*;
use crate::shared::error::WalletError;
use crate::shared::types::CurrencyUnit;

#[derive(Debug, Clone, PartialEq)]
pub struct WalletCoreConfig {
    pub log_level: LevelFilter,
    pub refresh_interval: Duration,
    pub snapshot_path: Option<PathBuf>,
    pub currency: CurrencyUnit,
}

impl Default for WalletCoreConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            snapshot_path: None,
            currency: CurrencyUnit::default(),
        }
    }
}

impl WalletCoreConfig {
    /// Load configuration from .env and the process environment
    pub fn from_env() -> Result<Self, WalletError> {
        dotenv().ok(); // Load .env if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WalletError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let log_level = match get(ENV_LOG_LEVEL) {
            Some(raw) => parse_value::<LevelFilter>(ENV_LOG_LEVEL, &raw)?,
            None => LevelFilter::Info,
        };

        let refresh_secs = match get(ENV_REFRESH_INTERVAL_SECS) {
            Some(raw) => parse_value::<u64>(ENV_REFRESH_INTERVAL_SECS, &raw)?,
            None => DEFAULT_REFRESH_INTERVAL_SECS,
        };

        let decimals = match get(ENV_CURRENCY_DECIMALS) {
            Some(raw) => parse_value::<u8>(ENV_CURRENCY_DECIMALS, &raw)?,
            None => DEFAULT_CURRENCY_DECIMALS,
        };

        let ticker = get(ENV_CURRENCY_TICKER).unwrap_or_else(|| DEFAULT_CURRENCY_TICKER.to_string());

        let config = Self {
            log_level,
            refresh_interval: Duration::from_secs(refresh_secs),
            snapshot_path: get(ENV_SNAPSHOT_PATH).map(PathBuf::from),
            currency: CurrencyUnit::new(ticker, decimals),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WalletError> {
        if self.refresh_interval.is_zero() {
            return Err(WalletError::config(format!("{} must be greater than zero", ENV_REFRESH_INTERVAL_SECS)));
        }
        if self.currency.decimals > MAX_DECIMALS {
            return Err(WalletError::config(format!(
                "{} must be at most {}, got {}",
                ENV_CURRENCY_DECIMALS, MAX_DECIMALS, self.currency.decimals
            )));
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, WalletError> {
    T::from_str(raw).map_err(|_| WalletError::config(format!("Invalid value for {}: {}", key, raw)))
}
