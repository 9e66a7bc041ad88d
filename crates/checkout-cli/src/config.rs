//! # Application Configuration
//!
//! Resolves which pricing configuration to load and builds the checkout.

use crate::args::Cli;
use anyhow::Context;
use checkout_core::{Checkout, MissingProductPolicy, PricingConfig};
use std::path::{Path, PathBuf};

/// Environment variable naming the pricing configuration file
pub const CONFIG_ENV: &str = "CHECKOUT_CONFIG";

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Pricing configuration file; builtin pricing when unset
    pub pricing_path: Option<PathBuf>,
    /// Force strict handling of unknown products
    pub strict: bool,
}

impl AppConfig {
    /// Merge command line flags with environment variables.
    ///
    /// `--config` wins over `CHECKOUT_CONFIG`.
    pub fn from_cli(cli: &Cli) -> Self {
        let pricing_path = cli
            .config
            .clone()
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

        Self {
            pricing_path,
            strict: cli.strict,
        }
    }

    /// Load pricing and build the checkout
    pub fn build_checkout(&self) -> anyhow::Result<Checkout> {
        let pricing = match &self.pricing_path {
            Some(path) => load_pricing_config(path)?,
            None => {
                tracing::debug!("no pricing configuration given, using builtin pricing");
                PricingConfig::builtin()
            }
        };

        let mut checkout = Checkout::from_config(&pricing)?;
        if self.strict {
            checkout = checkout.with_policy(MissingProductPolicy::Strict);
        }
        Ok(checkout)
    }
}

/// Load a `.env` file into the process environment, without overriding
/// variables that are already set. `None` searches from the working
/// directory upwards. Returns the file that was loaded.
pub fn load_dotenv(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).ok().map(|_| path.to_path_buf()),
        None => dotenvy::dotenv().ok(),
    }
}

/// Load pricing configuration from a TOML file
pub fn load_pricing_config(path: &Path) -> anyhow::Result<PricingConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let pricing = PricingConfig::from_toml(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!(
        products = pricing.products.len(),
        rules = pricing.rules.len(),
        "Loaded pricing from {}",
        path.display()
    );
    Ok(pricing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_builtin_when_no_path() {
        let config = AppConfig::default();
        let checkout = config.build_checkout().unwrap();
        assert_eq!(checkout.checkout("ABBACBBAB").unwrap(), 240);
    }

    #[test]
    fn test_load_from_file() {
        let file = temp_file("[[products]]\nid = \"A\"\nunit_price = 7\n");
        let config = AppConfig {
            pricing_path: Some(file.path().to_path_buf()),
            strict: false,
        };

        let checkout = config.build_checkout().unwrap();
        assert_eq!(checkout.checkout("AAB").unwrap(), 14);
    }

    #[test]
    fn test_strict_flag() {
        let config = AppConfig {
            pricing_path: None,
            strict: true,
        };
        let checkout = config.build_checkout().unwrap();
        assert_eq!(checkout.policy(), MissingProductPolicy::Strict);
        assert!(checkout.checkout("Q").is_err());
    }

    #[test]
    fn test_dotenv_sets_config_path() {
        let file = temp_file("CHECKOUT_DOTENV_TEST=config/pricing.toml\n");

        assert_eq!(load_dotenv(Some(file.path())), Some(file.path().to_path_buf()));
        assert_eq!(
            std::env::var("CHECKOUT_DOTENV_TEST").unwrap(),
            "config/pricing.toml"
        );
        assert_eq!(load_dotenv(Some(Path::new("/nonexistent/.env"))), None);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_pricing_config(Path::new("/nonexistent/pricing.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_rule_is_error() {
        let file = temp_file(
            "[[rules]]\nkind = \"buy_x_get_y_free\"\nproduct_id = \"B\"\nbuy = 0\nfree = 2\n",
        );
        let config = AppConfig {
            pricing_path: Some(file.path().to_path_buf()),
            strict: false,
        };

        assert!(config.build_checkout().is_err());
    }
}
