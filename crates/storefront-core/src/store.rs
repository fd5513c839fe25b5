//! # Store Module
//!
//! The storefront façade: one value owning the catalog, the cart, the
//! checkout accumulator, and the registered change listeners.
//!
//! ## Why a Store Value?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Store Ownership                                │
//! │                                                                     │
//! │   ┌───────────────────────── Store ──────────────────────────┐     │
//! │   │                                                          │     │
//! │   │  Catalog (read-only)   Cart (mutable)   Checkout         │     │
//! │   │  ┌────────────────┐   ┌─────────────┐  ┌─────────────┐   │     │
//! │   │  │ Cherry   $2.00 │   │ lines       │  │ tendered    │   │     │
//! │   │  │ Orange   $3.00 │   │ total()     │  │ pay()       │   │     │
//! │   │  │ ...            │   └─────────────┘  └─────────────┘   │     │
//! │   │  └────────────────┘                                      │     │
//! │   │                                                          │     │
//! │   │  listeners: invoked synchronously after each mutation    │     │
//! │   └──────────────────────────────────────────────────────────┘     │
//! │                                                                     │
//! │   No globals: callers instantiate as many independent stores as    │
//! │   they need (one per shopper, one per test).                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The store is plain owned data with `&mut self` operations. There is
//! exactly one logical actor (the shopper), so no lock wrapper is baked
//! in; an embedder with concurrent surfaces can wrap the store itself.

use std::fmt;

use tracing::{debug, info};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::checkout::{Checkout, PaymentOutcome};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// A synchronous change listener.
///
/// Invoked after every state-changing mutation with a view of the cart,
/// so adapters can re-render without reaching back into the store (which
/// is mutably borrowed while the listener runs).
pub type ChangeListener = Box<dyn FnMut(&Cart)>;

// =============================================================================
// Store
// =============================================================================

/// The storefront: catalog, cart, checkout, and change listeners.
pub struct Store {
    catalog: Catalog,
    cart: Cart,
    checkout: Checkout,
    listeners: Vec<ChangeListener>,
}

impl Store {
    /// Creates a store over the given catalog with an empty cart.
    pub fn new(catalog: Catalog) -> Self {
        Store {
            catalog,
            cart: Cart::new(),
            checkout: Checkout::new(),
            listeners: Vec::new(),
        }
    }

    /// Creates a store over the built-in sample catalog.
    pub fn with_sample_catalog() -> Self {
        Store::new(Catalog::sample())
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    /// Registers a change listener.
    ///
    /// Listeners fire synchronously after every mutation that changed
    /// state. Zero registered listeners makes notification a no-op.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Cart) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.cart);
        }
    }

    // -------------------------------------------------------------------------
    // Read Access
    // -------------------------------------------------------------------------

    /// The product catalog.
    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current cart.
    #[inline]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart total: Σ(unit price × quantity). Pure, no side effects.
    #[inline]
    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    /// Cash tendered so far toward the current transaction.
    #[inline]
    pub fn tendered(&self) -> Money {
        self.checkout.tendered()
    }

    // -------------------------------------------------------------------------
    // Cart Operations
    // -------------------------------------------------------------------------

    /// Adds one unit of a product to the cart.
    ///
    /// An existing line is incremented; otherwise a new line with
    /// quantity 1 is created.
    ///
    /// ## Errors
    /// `UnknownProduct` if the id is not in the catalog. The cart and
    /// accumulator are unchanged on any error.
    pub fn add_product(&mut self, product_id: u32) -> CoreResult<()> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or(CoreError::UnknownProduct { product_id })?;

        self.cart.add(product, 1)?;
        debug!(product_id, "Product added to cart");
        self.notify();
        Ok(())
    }

    /// Increments a product's line quantity by one.
    ///
    /// Alias of [`Store::add_product`]: a missing line is created, the
    /// operations are interchangeable.
    #[inline]
    pub fn increase_quantity(&mut self, product_id: u32) -> CoreResult<()> {
        self.add_product(product_id)
    }

    /// Decrements a product's line quantity by one; the line is removed
    /// when it reaches zero. Silent no-op for an absent line.
    pub fn decrease_quantity(&mut self, product_id: u32) {
        if self.cart.decrease(product_id) {
            debug!(product_id, "Quantity decreased");
            self.notify();
        }
    }

    /// Deletes a product's line unconditionally. Silent no-op if absent.
    pub fn remove_product(&mut self, product_id: u32) {
        if self.cart.remove(product_id) {
            debug!(product_id, "Product removed from cart");
            self.notify();
        }
    }

    /// Deletes all cart lines. Idempotent: an already-empty cart stays
    /// empty and no notification fires.
    pub fn empty_cart(&mut self) {
        if !self.cart.is_empty() {
            self.cart.clear();
            debug!("Cart emptied");
            self.notify();
        }
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Tenders cash toward the current cart.
    ///
    /// Settlement (tender >= total) clears the cart, resets the
    /// accumulator, and issues a receipt; underpayment carries the tender
    /// forward. See [`Checkout::pay`] for the reconciliation rules.
    pub fn pay(&mut self, amount: Money) -> CoreResult<PaymentOutcome> {
        let outcome = self.checkout.pay(&mut self.cart, amount)?;

        match &outcome {
            PaymentOutcome::Settled { receipt } => {
                info!(
                    receipt_id = %receipt.id,
                    total = %receipt.total(),
                    change = %receipt.change(),
                    "Transaction settled"
                );
                self.notify();
            }
            PaymentOutcome::Balance {
                remaining_cents,
                tendered_cents,
            } => {
                debug!(
                    remaining = %Money::from_cents(*remaining_cents),
                    tendered = %Money::from_cents(*tendered_cents),
                    "Underpaid, tender carried forward"
                );
            }
        }

        Ok(outcome)
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .field("checkout", &self.checkout)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn store() -> Store {
        Store::with_sample_catalog()
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(store().cart_total(), Money::zero());
    }

    #[test]
    fn test_add_twice_yields_one_line_quantity_two() {
        let mut store = store();
        store.add_product(1).unwrap();
        store.add_product(1).unwrap();

        assert_eq!(store.cart().line_count(), 1);
        assert_eq!(store.cart().line(1).unwrap().quantity, 2);
    }

    #[test]
    fn test_fruit_stand_total() {
        // Cherry $2 ×2 + Orange $3 ×1 = $7
        let mut store = store();
        store.add_product(1).unwrap();
        store.add_product(1).unwrap();
        store.add_product(2).unwrap();

        assert_eq!(store.cart_total(), Money::from_cents(700));
    }

    #[test]
    fn test_increase_creates_missing_line() {
        let mut store = store();
        store.increase_quantity(3).unwrap();

        assert_eq!(store.cart().line(3).unwrap().quantity, 1);
    }

    #[test]
    fn test_decrease_to_zero_removes_line() {
        let mut store = store();
        store.add_product(1).unwrap();
        store.decrease_quantity(1);

        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_unknown_id_leaves_state_unchanged() {
        let mut store = store();
        store.add_product(1).unwrap();

        let err = store.add_product(99).unwrap_err();
        assert!(matches!(err, CoreError::UnknownProduct { product_id: 99 }));

        store.remove_product(99);
        store.decrease_quantity(99);

        assert_eq!(store.cart().line_count(), 1);
        assert_eq!(store.cart_total(), Money::from_cents(200));
        assert_eq!(store.tendered(), Money::zero());
    }

    #[test]
    fn test_quantities_never_reach_zero() {
        // Arbitrary operation sequence: every surviving line has qty >= 1
        let mut store = store();
        store.add_product(1).unwrap();
        store.add_product(2).unwrap();
        store.increase_quantity(2).unwrap();
        store.decrease_quantity(1);
        store.decrease_quantity(2);
        store.add_product(3).unwrap();
        store.remove_product(3);
        store.decrease_quantity(3);

        for line in store.cart().lines() {
            assert!(line.quantity >= 1);
        }
    }

    #[test]
    fn test_underpay_then_settle() {
        let mut store = store();
        store.add_product(1).unwrap();
        store.add_product(1).unwrap();
        store.add_product(2).unwrap();

        // pay(5) against a $7 total: balance of $2 remains
        let outcome = store.pay(Money::from_cents(500)).unwrap();
        assert_eq!(outcome.diff(), Money::from_cents(-200));
        assert_eq!(store.tendered(), Money::from_cents(500));
        assert_eq!(store.cart_total(), Money::from_cents(700));

        // pay(2) completes the transaction exactly
        let outcome = store.pay(Money::from_cents(200)).unwrap();
        assert_eq!(outcome.diff(), Money::zero());
        assert!(store.cart().is_empty());
        assert_eq!(store.tendered(), Money::zero());
    }

    #[test]
    fn test_overpay_returns_change() {
        let mut store = store();
        store.add_product(1).unwrap();
        store.add_product(1).unwrap();
        store.add_product(2).unwrap();

        let outcome = store.pay(Money::from_cents(1000)).unwrap();
        assert_eq!(outcome.diff(), Money::from_cents(300));
        assert!(store.cart().is_empty());
        assert_eq!(store.tendered(), Money::zero());
    }

    #[test]
    fn test_rejected_tender_preserves_state() {
        let mut store = store();
        store.add_product(1).unwrap();

        assert!(store.pay(Money::from_cents(-100)).is_err());
        assert_eq!(store.tendered(), Money::zero());
        assert_eq!(store.cart_total(), Money::from_cents(200));
    }

    #[test]
    fn test_listeners_fire_on_mutations() {
        let mut store = store();
        let fired = Rc::new(Cell::new(0u32));

        let counter = Rc::clone(&fired);
        store.subscribe(move |_cart| counter.set(counter.get() + 1));

        store.add_product(1).unwrap(); // 1
        store.increase_quantity(1).unwrap(); // 2
        store.decrease_quantity(1); // 3
        store.decrease_quantity(1); // 4 (line removed)
        assert_eq!(fired.get(), 4);
    }

    #[test]
    fn test_listener_sees_cart_state() {
        let mut store = store();
        let seen_total = Rc::new(Cell::new(0i64));

        let total = Rc::clone(&seen_total);
        store.subscribe(move |cart| total.set(cart.total().cents()));

        store.add_product(2).unwrap();
        assert_eq!(seen_total.get(), 300);
    }

    #[test]
    fn test_no_notification_for_noops() {
        let mut store = store();
        let fired = Rc::new(Cell::new(0u32));

        let counter = Rc::clone(&fired);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        store.empty_cart(); // already empty
        store.decrease_quantity(1); // no line
        store.remove_product(1); // no line
        let _ = store.add_product(99); // unknown id

        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_empty_cart_is_idempotent() {
        let mut store = store();
        store.add_product(1).unwrap();

        store.empty_cart();
        assert!(store.cart().is_empty());

        store.empty_cart();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_settlement_notifies_listeners() {
        let mut store = store();
        store.add_product(1).unwrap();

        let fired = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&fired);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        // underpayment does not change the cart: no notification
        store.pay(Money::from_cents(100)).unwrap();
        assert_eq!(fired.get(), 0);

        // settlement clears the cart: one notification
        store.pay(Money::from_cents(100)).unwrap();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_independent_stores() {
        // No hidden globals: two stores never interfere
        let mut a = store();
        let mut b = store();

        a.add_product(1).unwrap();
        b.add_product(2).unwrap();

        assert_eq!(a.cart_total(), Money::from_cents(200));
        assert_eq!(b.cart_total(), Money::from_cents(300));
    }
}
