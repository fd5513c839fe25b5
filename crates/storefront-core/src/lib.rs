//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │            Presentation Adapter (apps/terminal)               │  │
//! │  │    renders catalog + cart, forwards shopper gestures          │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │  method calls / change listener    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │              ★ storefront-core (THIS CRATE) ★                 │  │
//! │  │                                                               │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────┐ ┌──────────┐ ┌────────┐  │  │
//! │  │  │ catalog │ │  money  │ │  cart  │ │ checkout │ │ store  │  │  │
//! │  │  │ Product │ │  Money  │ │  Cart  │ │ Checkout │ │ Store  │  │  │
//! │  │  │ Catalog │ │ (cents) │ │CartLine│ │ Receipt  │ │(façade)│  │  │
//! │  │  └─────────┘ └─────────┘ └────────┘ └──────────┘ └────────┘  │  │
//! │  │                                                               │  │
//! │  │  NO I/O • NO RENDERING • PURE FUNCTIONS OVER OWNED STATE      │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The static product list
//! - [`cart`] - Cart lines and derived totals
//! - [`checkout`] - Tender accumulation, settlement, receipts
//! - [`store`] - The owning façade with change notification
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every operation is deterministic over owned state
//! 2. **No I/O**: rendering, input, and persistence live in adapters
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: typed errors, never strings or panics
//! 5. **No Globals**: the [`store::Store`] is instantiated by the caller
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Money, Store};
//!
//! let mut store = Store::with_sample_catalog();
//!
//! store.add_product(1)?; // Cherry $2.00
//! store.add_product(1)?;
//! store.add_product(2)?; // Orange $3.00
//! assert_eq!(store.cart_total(), Money::from_cents(700));
//!
//! // Underpay: balance carried, cart intact
//! let outcome = store.pay(Money::from_cents(500))?;
//! assert_eq!(outcome.diff(), Money::from_cents(-200));
//!
//! // Finish paying: settled with exact change
//! let outcome = store.pay(Money::from_cents(200))?;
//! assert!(outcome.is_settled());
//! assert!(store.cart().is_empty());
//! # Ok::<(), storefront_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`.

pub use cart::{Cart, CartLine, CartTotals};
pub use catalog::{Catalog, Product};
pub use checkout::{Checkout, PaymentOutcome, Receipt, ReceiptLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use store::{ChangeListener, Store};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// Prevents runaway carts; generous compared to the catalog sizes this
/// core is built for.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
