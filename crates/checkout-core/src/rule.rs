//! # Pricing Rules
//!
//! A pricing rule claims quantity from the cart and returns the price of
//! what it claimed. Rules carry configuration only, so one instance can be
//! reused across any number of carts.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     PricingRule (trait)                     │
//! │  ├── process(cart, lookup) -> subtotal                      │
//! │  └── name()                                                 │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!          ┌─────────────────┼─────────────────┐
//!          │                 │                 │
//!  ┌───────┴───────┐ ┌───────┴───────┐ ┌───────┴───────┐
//!  │ FlatUnitPrice │ │ BuyXGetYFree  │ │ NForPriceOfM  │
//!  └───────────────┘ └───────────────┘ └───────────────┘
//! ```
//!
//! When the product a rule targets is missing from the lookup, the rule
//! follows the lookup's [`MissingProductPolicy`](crate::MissingProductPolicy):
//! skip it (price 0, cart untouched) or fail.

use crate::cart::Cart;
use crate::error::{checked_total, require_id, CheckoutError, CheckoutResult};
use crate::product::{resolve_unit_price, InventoryLookup};
use std::sync::Arc;

/// Unit of pricing behaviour applied by the scanner.
pub trait PricingRule: Send + Sync {
    /// Claim quantity from `cart` and return the price of the claimed units.
    ///
    /// # Arguments
    /// * `cart` - Cart being scanned. Claimed quantity is written back with
    ///   `Cart::set_item_quantity`.
    /// * `lookup` - Product information finder used for unit prices.
    fn process(&self, cart: &mut Cart, lookup: &dyn InventoryLookup) -> CheckoutResult<u64>;

    /// Human readable description (for logging and receipts)
    fn name(&self) -> String;
}

/// Type alias for a shared pricing rule (dynamic dispatch)
pub type BoxedPricingRule = Arc<dyn PricingRule>;

/// Charges the unit price for every remaining unit of every priceable item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatUnitPrice;

impl FlatUnitPrice {
    pub fn new() -> Self {
        FlatUnitPrice
    }
}

impl PricingRule for FlatUnitPrice {
    fn process(&self, cart: &mut Cart, lookup: &dyn InventoryLookup) -> CheckoutResult<u64> {
        let mut total = 0u64;

        for item in cart.items() {
            if item.quantity == 0 {
                continue;
            }
            let Some(unit_price) = resolve_unit_price(lookup, &item.product_id)? else {
                continue;
            };
            let subtotal = price_units(&item.product_id, u64::from(item.quantity), unit_price)?;
            total = checked_total([total, subtotal])?;
            cart.set_item_quantity(&item.product_id, 0)?;
            tracing::trace!(
                product_id = %item.product_id,
                quantity = item.quantity,
                unit_price,
                "claimed at unit price"
            );
        }

        Ok(total)
    }

    fn name(&self) -> String {
        "unit price".to_string()
    }
}

/// Buy `buy` units of a product and get `free` more for nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyXGetYFree {
    product_id: String,
    buy: u32,
    free: u32,
}

impl BuyXGetYFree {
    /// Create the rule. `buy` and `free` must both be at least 1.
    pub fn new(product_id: impl Into<String>, buy: u32, free: u32) -> CheckoutResult<Self> {
        let product_id = product_id.into();
        require_id("productId", &product_id)?;
        if buy < 1 {
            return Err(CheckoutError::invalid("quantity to buy cannot be less than 1"));
        }
        if free < 1 {
            return Err(CheckoutError::invalid("quantity free cannot be less than 1"));
        }
        Ok(Self {
            product_id,
            buy,
            free,
        })
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Units claimed by one application of the promotion
    pub fn group_size(&self) -> u64 {
        u64::from(self.buy) + u64::from(self.free)
    }
}

impl PricingRule for BuyXGetYFree {
    fn process(&self, cart: &mut Cart, lookup: &dyn InventoryLookup) -> CheckoutResult<u64> {
        claim_bundles(
            cart,
            lookup,
            &self.product_id,
            self.group_size(),
            u64::from(self.buy),
        )
    }

    fn name(&self) -> String {
        format!("buy {} get {} free ({})", self.buy, self.free, self.product_id)
    }
}

/// Take `total` units of a product for the price of `paid` units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NForPriceOfM {
    product_id: String,
    total: u32,
    paid: u32,
}

impl NForPriceOfM {
    /// Create the rule. Requires `total >= 2` and `1 <= paid < total`.
    pub fn new(product_id: impl Into<String>, total: u32, paid: u32) -> CheckoutResult<Self> {
        let product_id = product_id.into();
        require_id("productId", &product_id)?;
        if total < 2 {
            return Err(CheckoutError::invalid("total quantity cannot be less than 2"));
        }
        if paid < 1 {
            return Err(CheckoutError::invalid("paid quantity cannot be less than 1"));
        }
        if paid >= total {
            return Err(CheckoutError::invalid(
                "paid quantity cannot be greater than total quantity minus 1",
            ));
        }
        Ok(Self {
            product_id,
            total,
            paid,
        })
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }
}

impl PricingRule for NForPriceOfM {
    fn process(&self, cart: &mut Cart, lookup: &dyn InventoryLookup) -> CheckoutResult<u64> {
        claim_bundles(
            cart,
            lookup,
            &self.product_id,
            u64::from(self.total),
            u64::from(self.paid),
        )
    }

    fn name(&self) -> String {
        format!("{} for the price of {} ({})", self.total, self.paid, self.product_id)
    }
}

/// Claim as many whole bundles of `product_id` as the cart holds, charging
/// `paid_per_bundle` units per bundle. Units short of a full bundle stay in
/// the cart for later rules.
fn claim_bundles(
    cart: &mut Cart,
    lookup: &dyn InventoryLookup,
    product_id: &str,
    bundle_size: u64,
    paid_per_bundle: u64,
) -> CheckoutResult<u64> {
    let Some(item) = cart.get_item(product_id)? else {
        return Ok(0);
    };
    // nothing to claim, and no write either
    if item.quantity == 0 {
        return Ok(0);
    }
    let Some(unit_price) = resolve_unit_price(lookup, product_id)? else {
        return Ok(0);
    };

    let quantity = u64::from(item.quantity);
    let bundles = quantity / bundle_size;
    // remainder is below the original quantity, so it fits back into a u32
    let remaining = (quantity % bundle_size) as u32;
    // bundles and paid_per_bundle both fit in a u32
    let subtotal = price_units(product_id, bundles * paid_per_bundle, unit_price)?;

    cart.set_item_quantity(product_id, remaining)?;
    tracing::trace!(product_id, bundles, remaining, "claimed promotional bundles");

    Ok(subtotal)
}

fn price_units(product_id: &str, units: u64, unit_price: u64) -> CheckoutResult<u64> {
    units.checked_mul(unit_price).ok_or_else(|| {
        CheckoutError::PriceOverflow(format!(
            "{} units of {} at {} exceeds u64::MAX",
            units, product_id, unit_price
        ))
    })
}
