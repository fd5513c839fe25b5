//! # Catalog Module
//!
//! The static set of purchasable products.
//!
//! A catalog is validated once at construction and read-only afterwards:
//! product ids are unique, names are non-empty, prices are non-negative.
//! Cart lines snapshot product data when added, so an immutable catalog
//! guarantees cart math never shifts under the shopper.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_image_ref, validate_price_cents, validate_product_name};

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: u32,

    /// Display name shown in product listings and on cart lines.
    pub name: String,

    /// Unit price in cents (smallest currency unit).
    pub unit_price_cents: i64,

    /// Reference to the product image; opaque to the core, resolved by
    /// whatever surface renders the catalog.
    pub image_ref: String,
}

impl Product {
    /// Creates a product. Fields are validated when the catalog is built,
    /// not here, so literals stay ergonomic.
    pub fn new(id: u32, name: impl Into<String>, unit_price_cents: i64, image_ref: impl Into<String>) -> Self {
        Product {
            id,
            name: name.into(),
            unit_price_cents,
            image_ref: image_ref.into(),
        }
    }

    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The validated, read-only product list.
///
/// ## Invariants
/// - Product ids are unique
/// - Every product passed name/price/image validation
///
/// Lookups are linear scans; catalogs at this scale are a handful of
/// entries and a HashMap would buy nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from a list of products, validating each entry.
    ///
    /// ## Errors
    /// - `ValidationError::Duplicate` for a repeated product id
    /// - `ValidationError::Required` / `TooLong` for bad names or image refs
    /// - `ValidationError::OutOfRange` for negative prices
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        for (idx, product) in products.iter().enumerate() {
            validate_product_name(&product.name)?;
            validate_image_ref(&product.image_ref)?;
            validate_price_cents(product.unit_price_cents)?;

            if products[..idx].iter().any(|p| p.id == product.id) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.to_string(),
                }
                .into());
            }
        }

        debug!(products = products.len(), "Catalog built");
        Ok(Catalog { products })
    }

    /// The built-in demo catalog: the original fruit stand.
    pub fn sample() -> Self {
        Catalog {
            products: vec![
                Product::new(1, "Cherry", 200, "images/cherry.jpg"),
                Product::new(2, "Orange", 300, "images/orange.jpg"),
                Product::new(3, "Strawberry", 400, "images/strawberry.jpg"),
            ],
        }
    }

    /// Looks up a product by id.
    pub fn get(&self, product_id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Checks whether a product id exists in the catalog.
    #[inline]
    pub fn contains(&self, product_id: u32) -> bool {
        self.get(product_id).is_some()
    }

    /// Iterates over all products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products in the catalog.
    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
