//! # checkout-cli
//!
//! Command-line shell for the checkout pricing engine.
//!
//! ```bash
//! # Builtin catalog (A=20, B=50, C=30, buy 3 get 2 free on B)
//! checkout ABBACBBAB
//!
//! # Custom pricing, itemised receipt
//! CHECKOUT_CONFIG=config/pricing.toml checkout --json ABBACBBAB
//! ```

pub mod args;
pub mod config;
pub mod logger;

pub use args::{parse_from, usage, Cli, Invocation};
pub use config::{load_dotenv, load_pricing_config, AppConfig, CONFIG_ENV};

/// Run one checkout and render what should be printed on stdout
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = AppConfig::from_cli(cli);
    let checkout = config.build_checkout()?;

    if cli.json {
        let receipt = checkout.checkout_receipt(&cli.items)?;
        tracing::info!(receipt = %receipt.id, total = receipt.total, "checkout complete");
        Ok(receipt.to_json()?)
    } else {
        let total = checkout.checkout(&cli.items)?;
        tracing::info!(total, "checkout complete");
        Ok(format!("total at checkout is {}", total))
    }
}
