//! Utility functions for the wallet core
//! 
//! This module contains common utility functions used throughout the wallet core.

use crate::shared::error::WalletError;
use crate::shared::types::Amount;

/// Generate a unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Format a base-unit amount with decimals, e.g. `500000` with 2 decimals is `5000.00`
pub fn format_amount(amount: Amount, decimals: u8) -> Result<String, WalletError> {
    if amount < 0 {
        return Err(WalletError::validation(format!("Cannot format negative amount: {}", amount)));
    }
    
    let amount_str = amount.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return Ok(amount_str);
    }
    
    if amount_str.len() <= decimals {
        // Pad with leading zeros
        let mut formatted = "0.".to_string();
        formatted.push_str(&"0".repeat(decimals - amount_str.len()));
        formatted.push_str(&amount_str);
        Ok(formatted)
    } else {
        // Insert decimal point
        let mut formatted = amount_str;
        let decimal_pos = formatted.len() - decimals;
        formatted.insert(decimal_pos, '.');
        Ok(formatted)
    }
}

/// Format an amount followed by its ticker, e.g. `5000.00 XEC`
pub fn format_with_ticker(amount: Amount, decimals: u8, ticker: &str) -> Result<String, WalletError> {
    let formatted = format_amount(amount, decimals)?;
    if ticker.is_empty() {
        Ok(formatted)
    } else {
        Ok(format!("{} {}", formatted, ticker))
    }
}
