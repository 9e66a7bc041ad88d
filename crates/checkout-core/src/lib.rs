//! # checkout-core
//!
//! Cart, catalog and pricing rule engine for the checkout scanner.
//!
//! This crate provides:
//! - `Product`, `Catalog` and the `InventoryLookup` trait
//! - `Cart` and `CartItem`, the quantities still waiting to be priced
//! - `PricingRule` and its variants `FlatUnitPrice`, `BuyXGetYFree`, `NForPriceOfM`
//! - `Scanner`, which applies an ordered rule chain plus a unit price fallback
//! - `Checkout` and `PricingConfig`, the configured entry point
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use checkout_core::{BoxedPricingRule, Cart, Catalog, NForPriceOfM, Product, Scanner};
//! use std::sync::Arc;
//!
//! let catalog = Catalog::from_products(vec![
//!     Product::new("A", 20)?,
//!     Product::new("B", 50)?,
//!     Product::new("C", 30)?,
//! ]);
//! let rules: Vec<BoxedPricingRule> = vec![Arc::new(NForPriceOfM::new("B", 5, 3)?)];
//! let scanner = Scanner::with_rules(&catalog, rules)?;
//!
//! let mut cart = Cart::from_tokens("ABBACBBAB");
//! assert_eq!(scanner.scan_items(&mut cart)?, 240);
//! # Ok::<(), checkout_core::CheckoutError>(())
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod product;
pub mod receipt;
pub mod rule;
pub mod scanner;

// Re-exports for convenience
pub use cart::{Cart, CartItem};
pub use checkout::Checkout;
pub use config::{PricingConfig, RuleConfig};
pub use error::{CheckoutError, CheckoutResult};
pub use product::{Catalog, CatalogIndex, InventoryLookup, MissingProductPolicy, Product};
pub use receipt::{Receipt, ReceiptLine};
pub use rule::{BoxedPricingRule, BuyXGetYFree, FlatUnitPrice, NForPriceOfM, PricingRule};
pub use scanner::Scanner;
