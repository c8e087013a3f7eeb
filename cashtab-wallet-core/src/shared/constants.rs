//! Constants for the wallet core
//! 
//! This module contains all constants used throughout the wallet core.

// Base currency display defaults (eCash: 1 XEC = 100 satoshis)
pub const DEFAULT_CURRENCY_TICKER: &str = "XEC";
pub const DEFAULT_CURRENCY_DECIMALS: u8 = 2;
pub const MAX_DECIMALS: u8 = 18;

// Refresh polling
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;

// Environment variable names
pub const ENV_LOG_LEVEL: &str = "WALLET_CORE_LOG_LEVEL";
pub const ENV_REFRESH_INTERVAL_SECS: &str = "WALLET_CORE_REFRESH_INTERVAL_SECS";
pub const ENV_SNAPSHOT_PATH: &str = "WALLET_CORE_SNAPSHOT_PATH";
pub const ENV_CURRENCY_TICKER: &str = "WALLET_CORE_CURRENCY_TICKER";
pub const ENV_CURRENCY_DECIMALS: &str = "WALLET_CORE_CURRENCY_DECIMALS";

// Snapshot files
pub const SNAPSHOT_FILE_EXTENSION: &str = "json";
