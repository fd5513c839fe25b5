//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  storefront-core errors (this file)                                 │
//! │  ├── CoreError        - Cart/checkout rule violations               │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  Adapter layers translate these into whatever their surface needs   │
//! │  (the terminal app prints them; a serialized API would map codes).  │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → adapter message                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, limits, amounts)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout business-rule errors.
///
/// A failed operation never mutates the store: callers observing an error
/// can rely on cart and tender state being exactly as before the call.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The product id is not in the catalog.
    ///
    /// The original demo swallowed unknown ids silently; reporting them as
    /// a typed error keeps the same observable state (nothing changes) while
    /// letting adapters tell the user what happened.
    #[error("Unknown product id: {product_id}")]
    UnknownProduct { product_id: u32 },

    /// Cart has reached the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity would exceed the per-line maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Tendered amount is not a positive sum of cash.
    ///
    /// Negative tenders would silently drain the accumulator, so they are
    /// rejected outright rather than tolerated.
    #[error("Invalid tender: {reason}")]
    InvalidTender { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when catalog data or operation inputs do not meet requirements,
/// before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., duplicate product id in a catalog).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
