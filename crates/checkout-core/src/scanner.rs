//! # Price Scanner
//!
//! Runs an ordered chain of pricing rules over one cart and sums what they
//! charge. Each rule only sees quantity left unclaimed by the rules before
//! it; list order is the whole conflict-resolution story.
//!
//! After the configured rules, a [`FlatUnitPrice`] pass always runs so that
//! every priceable unit is charged exactly once, whether or not the chain
//! already ended with a flat rule (if it did, the pass finds nothing left).

use crate::cart::Cart;
use crate::error::{checked_total, require_id, CheckoutError, CheckoutResult};
use crate::product::{InventoryLookup, MissingProductPolicy, Product};
use crate::receipt::{Receipt, ReceiptLine};
use crate::rule::{BoxedPricingRule, FlatUnitPrice, PricingRule};
use tracing::debug;

/// Rule chain orchestrator.
///
/// Borrows the catalog lookup and owns the rule chain. Carts are supplied
/// per scan and mutated in place.
pub struct Scanner<'a> {
    lookup: &'a dyn InventoryLookup,
    rules: Vec<BoxedPricingRule>,
    policy: MissingProductPolicy,
}

impl<'a> Scanner<'a> {
    /// Create a scanner with no promotional rules: everything is priced at
    /// unit price.
    pub fn new(lookup: &'a dyn InventoryLookup) -> Self {
        Self {
            lookup,
            rules: Vec::new(),
            policy: lookup.missing_product_policy(),
        }
    }

    /// Create a scanner with an ordered, non-empty rule chain
    pub fn with_rules(
        lookup: &'a dyn InventoryLookup,
        rules: Vec<BoxedPricingRule>,
    ) -> CheckoutResult<Self> {
        if rules.is_empty() {
            return Err(CheckoutError::invalid("price rules cannot be empty"));
        }
        let mut scanner = Self::new(lookup);
        scanner.rules = rules;
        Ok(scanner)
    }

    /// Builder: set the missing product policy
    pub fn with_policy(mut self, policy: MissingProductPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the rule chain. An empty chain falls back to unit pricing.
    pub fn set_rules(&mut self, rules: Vec<BoxedPricingRule>) {
        self.rules = rules;
    }

    /// The configured rule chain, in application order
    pub fn rules(&self) -> &[BoxedPricingRule] {
        &self.rules
    }

    pub fn policy(&self) -> MissingProductPolicy {
        self.policy
    }

    /// Price every item in `cart`, claiming quantity as rules apply.
    ///
    /// On return every item whose product is in the catalog has quantity 0.
    pub fn scan_items(&self, cart: &mut Cart) -> CheckoutResult<u64> {
        let lines = self.apply_rules(cart)?;
        checked_total(lines.iter().map(|line| line.subtotal))
    }

    /// Same as [`Scanner::scan_items`], itemised per rule
    pub fn scan_with_receipt(&self, cart: &mut Cart) -> CheckoutResult<Receipt> {
        let items = cart.items();
        let lines = self.apply_rules(cart)?;
        let unpriced = cart
            .items()
            .into_iter()
            .filter(|item| item.quantity > 0)
            .collect();
        Receipt::new(items, lines, unpriced)
    }

    fn apply_rules(&self, cart: &mut Cart) -> CheckoutResult<Vec<ReceiptLine>> {
        let mut lines = Vec::with_capacity(self.rules.len() + 1);
        for rule in &self.rules {
            lines.push(self.apply(rule.as_ref(), cart)?);
        }
        lines.push(self.apply(&FlatUnitPrice, cart)?);
        Ok(lines)
    }

    fn apply(&self, rule: &dyn PricingRule, cart: &mut Cart) -> CheckoutResult<ReceiptLine> {
        let subtotal = rule.process(cart, self)?;
        let name = rule.name();
        debug!(rule = %name, subtotal, "applied price rule");
        Ok(ReceiptLine {
            rule: name,
            subtotal,
        })
    }
}

impl InventoryLookup for Scanner<'_> {
    fn get_product(&self, id: &str) -> CheckoutResult<Option<&Product>> {
        require_id("id", id)?;
        self.lookup.get_product(id)
    }

    fn missing_product_policy(&self) -> MissingProductPolicy {
        self.policy
    }
}
