//! # Checkout Module
//!
//! Reconciles accumulated cash tender against the cart total.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Checkout State Machine                          │
//! │                                                                     │
//! │             pay(amount), tendered < total                           │
//! │            ┌──────────────────────────────┐                         │
//! │            │                              │                         │
//! │            ▼                              │                         │
//! │   ┌──────────────────┐          (tender accumulates)                │
//! │   │ AWAITING_PAYMENT │──────────────────────────────┐               │
//! │   └──────────────────┘                              │               │
//! │            ▲               pay(amount),             ▼               │
//! │            │               tendered >= total   ┌─────────┐          │
//! │            └───────────────────────────────────│ SETTLED │          │
//! │              accumulator resets, cart clears,  └─────────┘          │
//! │              receipt issued with change due                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Underpayment is not an error: the tender carries over so the shopper
//! can keep feeding cash until the total is covered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_tender_cents;

// =============================================================================
// Receipt
// =============================================================================

/// One line item on a settled receipt, frozen from the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

/// Proof of settlement, produced when tender covers the cart total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Receipt identifier (UUID v4).
    pub id: String,

    /// When settlement happened.
    pub settled_at: DateTime<Utc>,

    /// The purchased lines, frozen at settlement.
    pub lines: Vec<ReceiptLine>,

    /// Cart total that was settled.
    pub total_cents: i64,

    /// Total cash tendered across all attempts for this transaction.
    pub tendered_cents: i64,

    /// Change due back to the shopper (zero for exact payment).
    pub change_cents: i64,
}

impl Receipt {
    fn from_cart(cart: &Cart, tendered: Money, change: Money) -> Self {
        Receipt {
            id: Uuid::new_v4().to_string(),
            settled_at: Utc::now(),
            lines: cart
                .lines()
                .iter()
                .map(|l| ReceiptLine {
                    name: l.name.clone(),
                    quantity: l.quantity,
                    unit_price_cents: l.unit_price_cents,
                    line_total_cents: l.line_total().cents(),
                })
                .collect(),
            total_cents: cart.total().cents(),
            tendered_cents: tendered.cents(),
            change_cents: change.cents(),
        }
    }

    /// Change due as Money.
    #[inline]
    pub fn change(&self) -> Money {
        Money::from_cents(self.change_cents)
    }

    /// Settled total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Payment Outcome
// =============================================================================

/// The result of a `pay` attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum PaymentOutcome {
    /// Tender covered the total: cart cleared, accumulator reset.
    #[serde(rename_all = "camelCase")]
    Settled { receipt: Receipt },

    /// Tender fell short: state preserved, balance remains.
    #[serde(rename_all = "camelCase")]
    Balance {
        /// Amount still owed (positive).
        remaining_cents: i64,
        /// Cash accumulated so far toward this transaction.
        tendered_cents: i64,
    },
}

impl PaymentOutcome {
    /// The signed reconciliation difference: positive change due, zero for
    /// exact payment, negative for a remaining balance.
    pub fn diff(&self) -> Money {
        match self {
            PaymentOutcome::Settled { receipt } => receipt.change(),
            PaymentOutcome::Balance { remaining_cents, .. } => Money::from_cents(-remaining_cents),
        }
    }

    /// Whether this attempt settled the transaction.
    #[inline]
    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentOutcome::Settled { .. })
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// The tender accumulator for the current transaction.
///
/// ## Invariants
/// - `tendered` is never negative (tenders must be positive; settlement
///   resets it to zero)
/// - Underpaid attempts leave the cart untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    tendered_cents: i64,
}

impl Checkout {
    /// Creates a fresh checkout with nothing tendered.
    pub fn new() -> Self {
        Checkout { tendered_cents: 0 }
    }

    /// Cash tendered so far toward the current transaction.
    #[inline]
    pub fn tendered(&self) -> Money {
        Money::from_cents(self.tendered_cents)
    }

    /// Applies a tender against the cart.
    ///
    /// ## Effect
    /// Accumulator += amount, then `diff = accumulator − cart total`:
    /// - `diff >= 0`: settlement. A receipt is issued, the accumulator
    ///   resets and the cart is cleared.
    /// - `diff < 0`: the accumulator keeps the tender, the cart is
    ///   untouched, and the remaining balance is reported.
    ///
    /// ## Errors
    /// `InvalidTender` for zero or negative amounts; the accumulator and
    /// cart are left unchanged.
    pub fn pay(&mut self, cart: &mut Cart, amount: Money) -> CoreResult<PaymentOutcome> {
        validate_tender_cents(amount.cents()).map_err(|e| CoreError::InvalidTender {
            reason: e.to_string(),
        })?;

        self.tendered_cents += amount.cents();
        let diff = self.tendered() - cart.total();

        if diff.is_negative() {
            return Ok(PaymentOutcome::Balance {
                remaining_cents: diff.abs().cents(),
                tendered_cents: self.tendered_cents,
            });
        }

        let receipt = Receipt::from_cart(cart, self.tendered(), diff);
        self.tendered_cents = 0;
        cart.clear();

        Ok(PaymentOutcome::Settled { receipt })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
