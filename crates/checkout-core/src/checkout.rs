//! # Checkout
//!
//! Single entry point used by the command-line shell: token string in,
//! total out. Every call scans a fresh cart with a fresh scanner over the
//! same catalog and rule chain.

use crate::cart::Cart;
use crate::config::PricingConfig;
use crate::error::CheckoutResult;
use crate::product::{Catalog, MissingProductPolicy};
use crate::receipt::Receipt;
use crate::rule::BoxedPricingRule;
use crate::scanner::Scanner;
use tracing::{info, instrument};

/// Catalog and promotions of one store
#[derive(Clone)]
pub struct Checkout {
    catalog: Catalog,
    rules: Vec<BoxedPricingRule>,
    policy: MissingProductPolicy,
}

impl Checkout {
    /// Create a checkout over `catalog` with an ordered rule chain
    pub fn new(catalog: Catalog, rules: Vec<BoxedPricingRule>) -> Self {
        Self {
            catalog,
            rules,
            policy: MissingProductPolicy::Lenient,
        }
    }

    /// Build catalog and rules from configuration
    pub fn from_config(config: &PricingConfig) -> CheckoutResult<Self> {
        let checkout = Self::new(config.build_catalog(), config.build_rules()?)
            .with_policy(config.missing_product_policy);
        info!(
            products = checkout.catalog.len(),
            rules = checkout.rules.len(),
            "checkout configured"
        );
        Ok(checkout)
    }

    /// Builder: set the missing product policy
    pub fn with_policy(mut self, policy: MissingProductPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mutable access, e.g. to replace the catalog between checkouts
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn rules(&self) -> &[BoxedPricingRule] {
        &self.rules
    }

    pub fn policy(&self) -> MissingProductPolicy {
        self.policy
    }

    /// Total price of the cart described by `tokens`
    #[instrument(skip(self))]
    pub fn checkout(&self, tokens: &str) -> CheckoutResult<u64> {
        let mut cart = Cart::from_tokens(tokens);
        self.scanner().scan_items(&mut cart)
    }

    /// Itemised receipt for the cart described by `tokens`
    #[instrument(skip(self))]
    pub fn checkout_receipt(&self, tokens: &str) -> CheckoutResult<Receipt> {
        let mut cart = Cart::from_tokens(tokens);
        self.scanner().scan_with_receipt(&mut cart)
    }

    fn scanner(&self) -> Scanner<'_> {
        let mut scanner = Scanner::new(&self.catalog).with_policy(self.policy);
        scanner.set_rules(self.rules.clone());
        scanner
    }
}
