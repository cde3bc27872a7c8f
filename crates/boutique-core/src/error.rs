//! # Error Types
//!
//! Domain-specific error types for boutique-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  boutique-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  boutique-store errors (separate crate)                                │
//! │  └── StoreError       - Storage, config and command failures           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → UI                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! The reducer itself never fails. Unknown actions, removals of absent keys
//! and duplicate wishlist adds all return the state unchanged. These types
//! are used by the validators, the filter parsers and the store crate's
//! command helpers.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sort order name that the query engine does not know.
    ///
    /// ## When This Occurs
    /// - The UI sends `sortBy: "popular"` from a newer build
    /// - A hand-edited filter payload has a typo
    #[error("Unknown sort order: '{0}'. Valid options: featured, price-low, price-high, newest, rating")]
    UnknownSortOrder(String),

    /// A price range whose bounds are inverted or negative.
    #[error("Invalid price range: {min} to {max}")]
    InvalidPriceRange { min: Money, max: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input or persisted data doesn't meet
/// requirements. Hydration uses them to decide which persisted entries to
/// drop.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., NaN rating).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Add-to-cart attempted without a resolved size or color.
    ///
    /// ## User Workflow
    /// ```text
    /// Product modal: size = "", color = "Black"
    ///      │
    ///      ▼
    /// "Add to cart" pressed
    ///      │
    ///      ▼
    /// InvalidSelection { missing: "size" }
    ///      │
    ///      ▼
    /// UI keeps the modal open and highlights the size picker
    /// ```
    #[error("Select a {missing} before adding to cart")]
    InvalidSelection { missing: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidPriceRange {
            min: Money::from_cents(50000),
            max: Money::from_cents(1000),
        };
        assert_eq!(err.to_string(), "Invalid price range: $500.00 to $10.00");

        let err = CoreError::UnknownSortOrder("popular".to_string());
        assert!(err.to_string().starts_with("Unknown sort order: 'popular'"));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::InvalidSelection {
            missing: "size".to_string(),
        };
        assert_eq!(err.to_string(), "Select a size before adding to cart");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
