//! # Cart Types
//!
//! The cart maps product ids to the quantity still waiting to be priced.
//! Pricing rules claim quantity by writing a smaller value back through
//! [`Cart::set_item_quantity`]; a fully scanned cart holds only zeros.

use crate::error::{require_id, CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A point-in-time view of one cart entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID
    pub product_id: String,

    /// Quantity not yet claimed by a pricing rule
    pub quantity: u32,
}

impl CartItem {
    /// Create an item, rejecting an empty product id
    pub fn new(product_id: impl Into<String>, quantity: u32) -> CheckoutResult<Self> {
        let product_id = product_id.into();
        require_id("productId", &product_id)?;
        Ok(Self {
            product_id,
            quantity,
        })
    }
}

/// A checkout in progress
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    quantities: BTreeMap<String, u32>,
}

impl Cart {
    /// Build a cart from a token string where every character is one unit of
    /// the product with that id.
    ///
    /// `"ABBACBBAB"` holds three `A`, five `B` and one `C`. An empty string is
    /// an empty cart.
    pub fn from_tokens(tokens: &str) -> Self {
        let mut quantities = BTreeMap::new();
        for token in tokens.chars() {
            *quantities.entry(token.to_string()).or_insert(0) += 1;
        }
        tracing::trace!(distinct = quantities.len(), "cart built from tokens");
        Self { quantities }
    }

    /// Build a cart from `(product id, quantity)` pairs, summing repeated ids
    pub fn from_items<I, S>(items: I) -> CheckoutResult<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut quantities = BTreeMap::new();
        for (product_id, quantity) in items {
            let product_id = product_id.into();
            require_id("productId", &product_id)?;
            let entry = quantities.entry(product_id).or_insert(0u32);
            *entry = entry.checked_add(quantity).ok_or_else(|| {
                CheckoutError::invalid("quantity overflows a single cart item")
            })?;
        }
        Ok(Self { quantities })
    }

    /// Get the item for `product_id`, if the cart holds one
    pub fn get_item(&self, product_id: &str) -> CheckoutResult<Option<CartItem>> {
        require_id("productId", product_id)?;
        Ok(self.quantities.get(product_id).map(|&quantity| CartItem {
            product_id: product_id.to_string(),
            quantity,
        }))
    }

    /// Snapshot of every item, ordered by product id.
    ///
    /// The returned items are copies: changing them has no effect on the cart.
    pub fn items(&self) -> Vec<CartItem> {
        self.quantities
            .iter()
            .map(|(product_id, &quantity)| CartItem {
                product_id: product_id.clone(),
                quantity,
            })
            .collect()
    }

    /// Overwrite the quantity of an item already in the cart.
    ///
    /// Returns `Ok(false)` without touching the cart when no item for
    /// `product_id` exists; this never inserts a new entry.
    pub fn set_item_quantity(&mut self, product_id: &str, quantity: u32) -> CheckoutResult<bool> {
        require_id("productId", product_id)?;
        match self.quantities.get_mut(product_id) {
            Some(current) => {
                *current = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Sum of all unclaimed quantities
    pub fn total_quantity(&self) -> u64 {
        self.quantities.values().map(|&q| u64::from(q)).sum()
    }

    /// True when the cart holds no items at all
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// True when every item has been claimed down to zero
    pub fn is_fully_claimed(&self) -> bool {
        self.quantities.values().all(|&q| q == 0)
    }
}
