//! # Cart Module
//!
//! The shopper's cart: an insertion-ordered collection of lines, one per
//! product, with derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                               │
//! │                                                                     │
//! │  Shopper Gesture          Store Operation        Cart Change        │
//! │  ───────────────          ───────────────        ───────────        │
//! │                                                                     │
//! │  "Add to Cart" ─────────► add_product() ───────► merge or push      │
//! │                                                                     │
//! │  "+" on a line ─────────► increase_quantity() ─► quantity += 1      │
//! │                                                                     │
//! │  "-" on a line ─────────► decrease_quantity() ─► quantity -= 1,     │
//! │                                                  removed at zero    │
//! │                                                                     │
//! │  "Remove" ──────────────► remove_product() ────► line deleted       │
//! │                                                                     │
//! │  Settlement ────────────► clear() ─────────────► all lines deleted  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_cart_size, validate_quantity};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One product's accumulated quantity in the cart.
///
/// ## Snapshot Pattern
/// Name and unit price are copied from the product when the line is
/// created. The catalog is immutable today, but freezing the data at add
/// time means cart rendering and totals never reach back into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog product id this line refers to.
    pub product_id: u32,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart; always >= 1 while the line exists.
    pub quantity: i64,

    /// When this line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new cart line from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price_cents: product.unit_price_cents,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges)
/// - `quantity >= 1` for every line (a line that reaches 0 is removed)
/// - Line order is insertion order
/// - At most MAX_CART_LINES distinct lines, MAX_LINE_QUANTITY per line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart, in insertion order.
    lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a quantity of a product, merging into an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases
    /// - Product not in cart: a new line is appended
    ///
    /// ## Errors
    /// - `QuantityTooLarge` if the merged quantity would exceed the cap
    /// - `CartTooLarge` if a new line would exceed the line cap
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(line) = self.line_mut(product.id) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        validate_cart_size(self.lines.len()).map_err(|_| CoreError::CartTooLarge {
            max: MAX_CART_LINES,
        })?;

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Decrements a line's quantity by one; the line is removed at zero.
    ///
    /// Returns `true` if the cart changed. An absent line is a silent
    /// no-op (decrementing what is not there is already done).
    pub fn decrease(&mut self, product_id: u32) -> bool {
        match self.line_mut(product_id) {
            Some(line) if line.quantity > 1 => {
                line.quantity -= 1;
                true
            }
            Some(_) => {
                // quantity == 1: the line disappears rather than sit at zero
                self.remove(product_id)
            }
            None => false,
        }
    }

    /// Deletes the line for a product id if present.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove(&mut self, product_id: u32) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != initial_len
    }

    /// Deletes all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Returns the line for a product id, if any.
    pub fn line(&self, product_id: u32) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: u32) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }

    /// All lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Cart total: Σ(unit price × quantity). Zero for an empty cart.
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |sum, l| sum + l.line_total())
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// When the cart was created or last cleared.
    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cart Totals View
// =============================================================================

/// Cart totals summary for adapter display.
#[derive(Debug, Clone, Serialize, Deserialize)]
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
            total_cents: cart.total().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cherry() -> Product {
        Product::new(1, "Cherry", 200, "images/cherry.jpg")
    }

    fn orange() -> Product {
        Product::new(2, "Orange", 300, "images/orange.jpg")
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_add_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add(&cherry(), 1).unwrap();
        cart.add(&cherry(), 1).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line(1).unwrap().quantity, 2);
        assert_eq!(cart.total(), Money::from_cents(400));
    }

    #[test]
    fn test_total_across_products() {
        let mut cart = Cart::new();
        cart.add(&cherry(), 2).unwrap();
        cart.add(&orange(), 1).unwrap();

        // 2×$2.00 + 1×$3.00 = $7.00
        assert_eq!(cart.total(), Money::from_cents(700));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_decrease_removes_line_at_zero() {
        let mut cart = Cart::new();
        cart.add(&cherry(), 1).unwrap();

        assert!(cart.decrease(1));
        assert!(cart.line(1).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrease_keeps_line_above_zero() {
        let mut cart = Cart::new();
        cart.add(&cherry(), 3).unwrap();

        assert!(cart.decrease(1));
        assert_eq!(cart.line(1).unwrap().quantity, 2);
    }

    #[test]
    fn test_decrease_absent_line_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.decrease(99));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&cherry(), 2).unwrap();

        assert!(cart.remove(1));
        assert!(cart.is_empty());
        assert!(!cart.remove(1)); // already gone
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&cherry(), 1).unwrap();
        cart.add(&orange(), 1).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&orange(), 1).unwrap();
        cart.add(&cherry(), 1).unwrap();
        cart.add(&orange(), 1).unwrap(); // merge, order unchanged

        let ids: Vec<u32> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_quantity_cap() {
        let mut cart = Cart::new();
        cart.add(&cherry(), crate::MAX_LINE_QUANTITY).unwrap();

        let err = cart.add(&cherry(), 1).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        // failed add left the line untouched
        assert_eq!(cart.line(1).unwrap().quantity, crate::MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_line_cap() {
        let mut cart = Cart::new();
        for id in 0..crate::MAX_CART_LINES as u32 {
            let product = Product::new(id, format!("Product {}", id), 100, "images/p.jpg");
            cart.add(&product, 1).unwrap();
        }

        let overflow = Product::new(9999, "Overflow", 100, "images/p.jpg");
        let err = cart.add(&overflow, 1).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let mut cart = Cart::new();
        assert!(cart.add(&cherry(), 0).is_err());
        assert!(cart.add(&cherry(), -1).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_totals_view() {
        let mut cart = Cart::new();
        cart.add(&cherry(), 2).unwrap();
        cart.add(&orange(), 1).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.total_cents, 700);
    }
}
