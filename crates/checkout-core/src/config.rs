//! # Pricing Configuration
//!
//! Catalog and promotion setup, loaded from TOML (`config/pricing.toml`):
//!
//! ```toml
//! [[products]]
//! id = "A"
//! unit_price = 20
//!
//! [[rules]]
//! kind = "buy_x_get_y_free"
//! product_id = "B"
//! buy = 3
//! free = 2
//! ```

use crate::error::{CheckoutError, CheckoutResult};
use crate::product::{Catalog, MissingProductPolicy, Product};
use crate::rule::{BoxedPricingRule, BuyXGetYFree, FlatUnitPrice, NForPriceOfM};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Serializable description of one pricing rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Charge unit price for everything still unclaimed
    FlatUnitPrice,
    /// Buy `buy` units, get `free` units for nothing
    BuyXGetYFree {
        product_id: String,
        buy: u32,
        free: u32,
    },
    /// `total` units for the price of `paid`
    NForPriceOfM {
        product_id: String,
        total: u32,
        paid: u32,
    },
}

impl RuleConfig {
    /// Build the rule, validating its settings
    pub fn build(&self) -> CheckoutResult<BoxedPricingRule> {
        let rule: BoxedPricingRule = match self {
            RuleConfig::FlatUnitPrice => Arc::new(FlatUnitPrice),
            RuleConfig::BuyXGetYFree {
                product_id,
                buy,
                free,
            } => Arc::new(BuyXGetYFree::new(product_id.as_str(), *buy, *free)?),
            RuleConfig::NForPriceOfM {
                product_id,
                total,
                paid,
            } => Arc::new(NForPriceOfM::new(product_id.as_str(), *total, *paid)?),
        };
        Ok(rule)
    }
}

/// Catalog plus ordered promotion chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Products and their unit prices
    #[serde(default)]
    pub products: Vec<Product>,

    /// Promotions, applied in this order
    #[serde(default)]
    pub rules: Vec<RuleConfig>,

    /// Treatment of products missing from the catalog
    #[serde(default)]
    pub missing_product_policy: MissingProductPolicy,
}

impl PricingConfig {
    /// The store's standard setup: A at 20, B at 50, C at 30, and
    /// "buy 3 get 2 free" on B.
    pub fn builtin() -> Self {
        let product = |id: &str, unit_price| Product {
            id: id.to_string(),
            unit_price,
        };
        Self {
            products: vec![product("A", 20), product("B", 50), product("C", 30)],
            rules: vec![RuleConfig::BuyXGetYFree {
                product_id: "B".to_string(),
                buy: 3,
                free: 2,
            }],
            missing_product_policy: MissingProductPolicy::Lenient,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> CheckoutResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Build the catalog; products with an empty id are dropped
    pub fn build_catalog(&self) -> Catalog {
        Catalog::from_products(self.products.iter().cloned())
    }

    /// Build the rule chain, reporting the first invalid rule
    pub fn build_rules(&self) -> CheckoutResult<Vec<BoxedPricingRule>> {
        self.rules
            .iter()
            .enumerate()
            .map(|(position, rule)| {
                rule.build().map_err(|err| {
                    CheckoutError::Configuration(format!("rule #{}: {}", position + 1, err))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
missing_product_policy = "strict"

[[products]]
id = "A"
unit_price = 20

[[products]]
id = "B"
unit_price = 50

[[rules]]
kind = "n_for_price_of_m"
product_id = "B"
total = 5
paid = 3

[[rules]]
kind = "flat_unit_price"
"#;

    #[test]
    fn test_from_toml() {
        let config = PricingConfig::from_toml(SAMPLE).unwrap();

        assert_eq!(config.products.len(), 2);
        assert_eq!(config.missing_product_policy, MissingProductPolicy::Strict);
        assert_eq!(
            config.rules[0],
            RuleConfig::NForPriceOfM {
                product_id: "B".into(),
                total: 5,
                paid: 3
            }
        );
        assert_eq!(config.rules[1], RuleConfig::FlatUnitPrice);

        let rules = config.build_rules().unwrap();
        assert_eq!(rules[0].name(), "5 for the price of 3 (B)");
        assert_eq!(config.build_catalog().len(), 2);
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = PricingConfig::from_toml("").unwrap();
        assert!(config.products.is_empty());
        assert!(config.rules.is_empty());
        assert_eq!(config.missing_product_policy, MissingProductPolicy::Lenient);
    }

    #[test]
    fn test_bad_toml_is_configuration_error() {
        let err = PricingConfig::from_toml("[[rules]]\nkind = \"half_price\"\n").unwrap_err();
        assert!(matches!(err, CheckoutError::Configuration(_)));
    }

    #[test]
    fn test_invalid_rule_reports_position() {
        let config = PricingConfig {
            rules: vec![
                RuleConfig::FlatUnitPrice,
                RuleConfig::NForPriceOfM {
                    product_id: "B".into(),
                    total: 3,
                    paid: 3,
                },
            ],
            ..PricingConfig::default()
        };

        match config.build_rules() {
            Err(CheckoutError::Configuration(message)) => assert!(message.starts_with("rule #2")),
            other => panic!("unexpected result: {:?}", other.map(|rules| rules.len())),
        }
    }

    #[test]
    fn test_builtin() {
        let config = PricingConfig::builtin();
        let catalog = config.build_catalog();

        assert_eq!(catalog.len(), 3);
        assert_eq!(config.build_rules().unwrap().len(), 1);
    }
}
