//! # Product Types
//!
//! Product catalog types for the checkout scanner.
//! Prices are whole numbers in the smallest currency unit.

use crate::error::{require_id, CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier (e.g., "A")
    pub id: String,

    /// Price of a single unit
    pub unit_price: u64,
}

impl Product {
    /// Create a new product, rejecting an empty id
    pub fn new(id: impl Into<String>, unit_price: u64) -> CheckoutResult<Self> {
        let id = id.into();
        require_id("product id", &id)?;
        Ok(Self { id, unit_price })
    }

    /// Products deserialized or built field by field may carry an empty id
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
    }
}

/// What to do when a product being priced is missing from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingProductPolicy {
    /// Skip the product: it is priced at zero and left unclaimed
    #[default]
    Lenient,
    /// Fail the scan with `CheckoutError::ProductNotInCatalog`
    Strict,
}

/// Product information finder.
///
/// Implemented by [`Catalog`] and by the scanner, which hands itself to each
/// pricing rule so that rules share the scanner's lookup semantics.
pub trait InventoryLookup {
    /// Get the product whose id matches `id`.
    ///
    /// Fails with `InvalidArgument` if `id` is empty. A missing product is
    /// `Ok(None)`, never an error.
    fn get_product(&self, id: &str) -> CheckoutResult<Option<&Product>>;

    /// How pricing rules should treat a product missing from this lookup
    fn missing_product_policy(&self) -> MissingProductPolicy {
        MissingProductPolicy::Lenient
    }
}

/// Immutable id -> product index backing a [`Catalog`]
#[derive(Debug, Default)]
pub struct CatalogIndex {
    products: Vec<Product>,
    by_id: HashMap<String, usize>,
}

impl CatalogIndex {
    fn build(products: impl IntoIterator<Item = Product>) -> Self {
        let mut index = CatalogIndex::default();
        for product in products {
            if !product.is_valid() {
                tracing::trace!("skipping product with empty id");
                continue;
            }
            match index.by_id.get(&product.id) {
                // last one wins, first position is kept
                Some(&slot) => index.products[slot] = product,
                None => {
                    index.by_id.insert(product.id.clone(), index.products.len());
                    index.products.push(product);
                }
            }
        }
        index
    }

    /// Find a product by id
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).map(|&slot| &self.products[slot])
    }

    /// All products in insertion order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Product catalog (inventory).
///
/// Read-mostly; [`Catalog::set_products`] swaps in a freshly built index in a
/// single assignment, so a reader never sees a half-populated catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    index: Arc<CatalogIndex>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding `products`
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            index: Arc::new(CatalogIndex::build(products)),
        }
    }

    /// Replace every entry of the catalog.
    ///
    /// Duplicate ids overwrite earlier ones and products with an empty id are
    /// skipped. An empty input leaves the catalog empty.
    pub fn set_products(&mut self, products: impl IntoIterator<Item = Product>) {
        let index = CatalogIndex::build(products);
        tracing::debug!(products = index.len(), "replacing catalog contents");
        self.index = Arc::new(index);
    }

    /// All products in insertion order
    pub fn products(&self) -> &[Product] {
        self.index.products()
    }

    /// The current index; unaffected by later calls to `set_products`
    pub fn snapshot(&self) -> Arc<CatalogIndex> {
        Arc::clone(&self.index)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl InventoryLookup for Catalog {
    fn get_product(&self, id: &str) -> CheckoutResult<Option<&Product>> {
        require_id("id", id)?;
        Ok(self.index.get(id))
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Catalog::from_products(iter)
    }
}

/// Resolve the unit price of `product_id`, applying the lookup's missing
/// product policy. `Ok(None)` means the product should be skipped.
pub(crate) fn resolve_unit_price(
    lookup: &dyn InventoryLookup,
    product_id: &str,
) -> CheckoutResult<Option<u64>> {
    if let Some(product) = lookup.get_product(product_id)? {
        return Ok(Some(product.unit_price));
    }
    match lookup.missing_product_policy() {
        MissingProductPolicy::Lenient => {
            tracing::warn!(product_id, "product not in catalog, pricing at zero");
            Ok(None)
        }
        MissingProductPolicy::Strict => Err(CheckoutError::ProductNotInCatalog {
            product_id: product_id.to_string(),
        }),
    }
}
