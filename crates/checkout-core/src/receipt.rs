//! # Receipt Types
//!
//! Itemised result of a scan: what the cart held, what each rule charged,
//! and anything no rule could price.

use crate::cart::CartItem;
use crate::error::{checked_total, CheckoutResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subtotal charged by one pricing rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Rule description (see `PricingRule::name`)
    pub rule: String,

    /// Amount charged by the rule
    pub subtotal: u64,
}

/// Result of scanning one cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique receipt ID (generated)
    pub id: Uuid,

    /// Cart contents before scanning
    pub items: Vec<CartItem>,

    /// One line per applied rule, in application order
    pub lines: Vec<ReceiptLine>,

    /// Items left unpriced because their product is not in the catalog
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unpriced: Vec<CartItem>,

    /// Sum of all line subtotals
    pub total: u64,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Receipt {
    /// Create a receipt, computing the total from `lines`.
    ///
    /// Fails with `PriceOverflow` if the subtotals do not fit in a `u64`.
    pub fn new(
        items: Vec<CartItem>,
        lines: Vec<ReceiptLine>,
        unpriced: Vec<CartItem>,
    ) -> CheckoutResult<Self> {
        let total = checked_total(lines.iter().map(|line| line.subtotal))?;
        Ok(Self {
            id: Uuid::new_v4(),
            items,
            lines,
            unpriced,
            total,
            created_at: Utc::now(),
        })
    }

    /// Number of units in the scanned cart
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Check if every unit was priced
    pub fn is_complete(&self) -> bool {
        self.unpriced.is_empty()
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> CheckoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
