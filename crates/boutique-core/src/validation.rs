//! # Validation Module
//!
//! Input validation utilities for Boutique.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  ├── Size/color pickers, quantity steppers                             │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: boutique-store command helpers                               │
//! │  ├── validate_selection, validate_quantity before dispatch             │
//! │  └── THIS MODULE                                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Hydration                                                    │
//! │  └── validate_cart_line / validate_product decide which persisted      │
//! │      entries are replayed and which are dropped                        │
//! │                                                                         │
//! │  The reducer itself trusts its input and never fails.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use boutique_core::validation::{validate_quantity, validate_selection};
//!
//! assert!(validate_quantity(2).is_ok());
//! assert!(validate_selection("M", "").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartLine, Product};
use crate::MAX_RATING;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - No upper bound: the storefront never capped quantities
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free gifts)
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a rating.
///
/// ## Rules
/// - Must be a finite number
/// - Must be between 0 and 5 inclusive
pub fn validate_rating(rating: f64) -> ValidationResult<()> {
    if !rating.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "rating".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: MAX_RATING as i64,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a size/color selection before it reaches the cart.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product modal: "Add to cart"                                           │
/// │                                                                         │
/// │  validate_selection(size, color) ← THIS FUNCTION                        │
/// │       │                                                                 │
/// │       ├── size empty?  → InvalidSelection { missing: "size" }          │
/// │       ├── color empty? → InvalidSelection { missing: "color" }         │
/// │       └── OK → dispatch AddToCart                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_selection(size: &str, color: &str) -> ValidationResult<()> {
    if size.trim().is_empty() {
        return Err(ValidationError::InvalidSelection {
            missing: "size".to_string(),
        });
    }

    if color.trim().is_empty() {
        return Err(ValidationError::InvalidSelection {
            missing: "color".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a product record.
///
/// ## Rules
/// - `id` and `name` must not be blank
/// - `price` and `original_price` must be non-negative
/// - `rating` must be within 0..=5
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    validate_price("price", product.price)?;
    if let Some(original) = product.original_price {
        validate_price("originalPrice", original)?;
    }

    validate_rating(product.rating)
}

/// Validates a persisted cart line before it is replayed.
///
/// Only checks what a live add would need: a sound product and a positive
/// quantity. The selection is not checked, matching the reducer.
pub fn validate_cart_line(line: &CartLine) -> ValidationResult<()> {
    validate_product(&line.product)?;
    validate_quantity(line.quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================
