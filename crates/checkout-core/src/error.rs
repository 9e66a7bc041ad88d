//! # Checkout Error Types
//!
//! Typed error handling for the checkout pricing engine.
//! All fallible operations return `Result<T, CheckoutError>`.
//!
//! A product or cart item that cannot be found is *not* an error: lookups
//! return `Option` and the rules treat absence as "nothing to claim".

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Caller misuse: empty identifiers, out-of-range rule settings, etc.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A product being priced is no longer in the catalog (strict mode only)
    #[error("Product not in catalog: {product_id}")]
    ProductNotInCatalog { product_id: String },

    /// Pricing configuration could not be loaded or describes invalid rules
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A price or total does not fit in a `u64`
    #[error("Price overflow: {0}")]
    PriceOverflow(String),
}

impl CheckoutError {
    /// Shorthand for building an `InvalidArgument` error
    pub fn invalid(message: impl Into<String>) -> Self {
        CheckoutError::InvalidArgument(message.into())
    }
}

impl From<toml::de::Error> for CheckoutError {
    fn from(err: toml::de::Error) -> Self {
        CheckoutError::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(err: serde_json::Error) -> Self {
        CheckoutError::Serialization(err.to_string())
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Rejects an empty identifier, naming the offending field in the error.
pub(crate) fn require_id(field: &str, value: &str) -> CheckoutResult<()> {
    if value.is_empty() {
        return Err(CheckoutError::invalid(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Adds up subtotals, failing instead of wrapping past `u64::MAX`.
pub(crate) fn checked_total(subtotals: impl IntoIterator<Item = u64>) -> CheckoutResult<u64> {
    subtotals.into_iter().try_fold(0u64, |total, subtotal| {
        total.checked_add(subtotal).ok_or_else(|| {
            CheckoutError::PriceOverflow(format!("{} + {} exceeds u64::MAX", total, subtotal))
        })
    })
}
