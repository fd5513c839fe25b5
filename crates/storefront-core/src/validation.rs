//! # Validation Module
//!
//! Input validation utilities for the storefront core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Adapter (terminal / future UI)                            │
//! │  ├── Parses user text into typed values (ids, Money)                │
//! │  └── Immediate feedback on unparseable input                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │  ├── Catalog data checked once at construction                      │
//! │  └── Operation inputs checked before state changes                  │
//! │                                                                     │
//! │  Failed validation never mutates cart or tender state.              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Cherry").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a product image reference.
///
/// Image references are opaque to the core (the adapter decides how to
/// resolve them), so only emptiness and length are checked.
pub fn validate_image_ref(image_ref: &str) -> ValidationResult<()> {
    let image_ref = image_ref.trim();

    if image_ref.is_empty() {
        return Err(ValidationError::Required {
            field: "image_ref".to_string(),
        });
    }

    if image_ref.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "image_ref".to_string(),
            max: 500,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0) - zero-quantity lines never exist
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// Zero is allowed (free items); negative prices are not.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a tendered cash amount in cents.
///
/// ## Rules
/// - Must be positive (> 0); zero or negative tenders are rejected
pub fn validate_tender_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "tender amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of distinct lines) before adding a new line.
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
