use anyhow::Context;
use cashtab_wallet_core::{init, WalletCore, WalletIdentity};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = init().context("failed to load configuration")?;

    let mut args = std::env::args().skip(1);
    let wallet_id = args.next().unwrap_or_else(|| "default".to_string());
    let wallet_name = args.next().unwrap_or_default();

    println!("Cashtab Wallet Core Configuration:\n");
    println!("  Log level: {}", config.log_level);
    println!("  Refresh interval: {}s", config.refresh_interval.as_secs());
    println!("  Currency: {} ({} decimals)", config.currency.ticker, config.currency.decimals);
    println!(
        "  Snapshot path: {}",
        config
            .snapshot_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );

    let core = WalletCore::from_config(config)?;
    core.open_wallet(WalletIdentity::new(wallet_id.clone(), wallet_name))
        .await
        .with_context(|| format!("failed to load wallet {}", wallet_id))?;

    let summary = core.summary().await?;
    println!("\nWallet {}:\n", summary.label.as_deref().unwrap_or(&wallet_id));
    println!("  Balance: {}", summary.balance);
    if summary.tokens.is_empty() {
        println!("  Tokens: (none)");
    } else {
        println!("  Tokens:");
        for token in &summary.tokens {
            println!(
                "    {} {} ({})",
                token.balance,
                token.ticker.as_deref().unwrap_or(""),
                token.token_id
            );
        }
    }
    Ok(())
}
