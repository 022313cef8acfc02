//! # Cart Module
//!
//! Transient, per-checkout aggregation of requested line items.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐                    │
//! │  │  Empty   │────►│  Lines   │────►│   Checkout   │                    │
//! │  │  Cart    │     │  Added   │     │ (engine, tx) │                    │
//! │  └──────────┘     └──────────┘     └──────────────┘                    │
//! │                        │                  │                             │
//! │                   add_line           commit succeeds → caller clears   │
//! │                   remove_line        commit fails    → cart unchanged  │
//! │                        │                                                │
//! │  A cart exists only during one interactive checkout. It has no         │
//! │  persistent identity and is never written to the database.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Checking: Two Layers
//! Stock is checked here at add time for immediate cashier feedback, but
//! the *authoritative* check happens inside the checkout transaction -
//! other carts may have drawn down the same stock pool in between.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart.
///
/// ## Price Freezing
/// `unit_price_cents` is snapshotted from the catalog when the product is
/// first added. Merging more quantity onto an existing line never refreshes
/// the price - the customer pays what was quoted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID (UUID).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity requested. Always > 0.
    pub quantity: i64,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new cart line from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line subtotal (unit price × quantity).
    #[inline]
    pub fn subtotal_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges
///   quantities additively instead of appending)
/// - Every line's quantity is > 0
/// - `total_cents() == Σ line.subtotal_cents()` exactly
#[derive(Debug, Clone, Serialize, Deserialize, Default, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart. Order is insertion order; irrelevant to total.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart or merges quantity if already present.
    ///
    /// ## Behavior
    /// - `quantity ≤ 0` → `InvalidQuantity`
    /// - new line: `quantity > product.stock` → `InsufficientStock`
    /// - existing line: `existing + quantity > product.stock` →
    ///   `InsufficientStock`, and the existing line is left unchanged
    /// - merge is additive; the frozen unit price is never replaced
    ///
    /// ## User Workflow
    /// ```text
    /// Cashier taps "Espresso" (stock 3)
    ///      │
    ///      ▼
    /// add_line(espresso, 2) ──► line { qty: 2 }          ✓
    /// add_line(espresso, 1) ──► line { qty: 3 } (merged) ✓
    /// add_line(espresso, 1) ──► InsufficientStock        ✗ (3 + 1 > 3)
    /// ```
    pub fn add_line(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                requested: quantity,
            });
        }

        // Merge onto an existing line if the product is already in the cart.
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
        {
            let merged = line.quantity + quantity;
            if merged > product.stock {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                    requested: merged,
                });
            }
            line.quantity = merged;
            return Ok(());
        }

        if quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Removes a line by product ID. No-op (not an error) if absent.
    pub fn remove_line(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Calculates the cart total. Pure; no side effects.
    pub fn total_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.subtotal_cents()).sum()
    }

    /// Returns the total as Money.
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents())
    }

    /// Returns the number of distinct lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total_cents: cart.total_cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_product(id: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            category_id: "cat-1".to_string(),
            price_cents,
            stock,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 10);

        cart.add_line(&product, 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_cents(), 1998);
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 10);

        cart.add_line(&product, 2).unwrap();
        cart.add_line(&product, 3).unwrap();

        assert_eq!(cart.line_count(), 1); // still one line
        assert_eq!(cart.lines[0].quantity, 5);
        assert_eq!(cart.total_cents(), 999 * 5);
    }

    #[test]
    fn test_merge_keeps_snapshotted_price() {
        let mut cart = Cart::new();
        let product = test_product("1", 1000, 10);
        cart.add_line(&product, 1).unwrap();

        // Price changes in the catalog after the first add.
        let mut repriced = product.clone();
        repriced.price_cents = 2000;
        cart.add_line(&repriced, 1).unwrap();

        // Merge is additive on quantity; the original price stands.
        assert_eq!(cart.lines[0].unit_price_cents, 1000);
        assert_eq!(cart.total_cents(), 2000);
    }

    #[test]
    fn test_add_zero_or_negative_quantity_rejected() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 10);

        assert!(matches!(
            cart.add_line(&product, 0),
            Err(CoreError::InvalidQuantity { requested: 0 })
        ));
        assert!(matches!(
            cart.add_line(&product, -3),
            Err(CoreError::InvalidQuantity { requested: -3 })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_beyond_stock_rejected() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 3);

        assert!(matches!(
            cart.add_line(&product, 4),
            Err(CoreError::InsufficientStock {
                available: 3,
                requested: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_merge_beyond_stock_leaves_first_line_unchanged() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 3);

        cart.add_line(&product, 2).unwrap();
        let err = cart.add_line(&product, 2).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 3,
                requested: 4,
                ..
            }
        ));
        // First add is intact.
        assert_eq!(cart.lines[0].quantity, 2);
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("1", 1500, 10), 2).unwrap();
        cart.add_line(&test_product("2", 700, 10), 3).unwrap();

        let expected: i64 = cart.lines.iter().map(|l| l.subtotal_cents()).sum();
        assert_eq!(cart.total_cents(), expected);
        assert_eq!(cart.total_cents(), 1500 * 2 + 700 * 3);
    }

    #[test]
    fn test_remove_line_and_absent_noop() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 10);
        cart.add_line(&product, 2).unwrap();

        cart.remove_line("1");
        assert!(cart.is_empty());

        // Removing again is a no-op, not an error.
        cart.remove_line("1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("1", 999, 10), 2).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_cents(), 0);
    }
}
