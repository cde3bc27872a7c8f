//! # boutique-core: Pure Shopping-State Logic for Boutique
//!
//! This crate is the **heart** of the Boutique storefront. It contains the
//! cart/wishlist reducer and the catalog query engine as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Boutique Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI (external)                     │   │
//! │  │   Catalog grid ──► Filters ──► Product modal ──► Cart drawer    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch(Action) / state()             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 boutique-store (Store container)                │   │
//! │  │      dispatch, observers, hydration, durable storage            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ boutique-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   state   │  │   cart    │  │   query   │  │ validation│  │   │
//! │  │   │  reduce   │  │ CartLine  │  │  filter   │  │   rules   │  │   │
//! │  │   │  Action   │  │  totals   │  │  sort     │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, CartLineKey)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart and wishlist collections, cart totals and shipping
//! - [`filters`] - FilterSpec, FilterPatch, SortBy, PriceRange
//! - [`query`] - The catalog query engine (filter → sort → paginate)
//! - [`state`] - ShoppingState, Action and the reducer
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use boutique_core::{reduce, Action, Money, Product, ShoppingState};
//!
//! let dress = Product::new("A", "Silk Dress", Money::from_cents(5000))
//!     .with_sizes(["S", "M"])
//!     .with_colors(["Black"]);
//!
//! let state = ShoppingState::default();
//! let add = |qty| Action::AddToCart {
//!     product: dress.clone(),
//!     size: "M".into(),
//!     color: "Black".into(),
//!     quantity: qty,
//! };
//!
//! let state = reduce(&state, add(1));
//! let state = reduce(&state, add(2));
//!
//! // Same composite key: one line, quantities summed
//! assert_eq!(state.cart.lines().len(), 1);
//! assert_eq!(state.cart.item_count(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod filters;
pub mod money;
pub mod query;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use boutique_core::Money` instead of
// `use boutique_core::money::Money`

pub use cart::{Cart, CartTotals, ShippingPolicy, Wishlist};
pub use error::{CoreError, CoreResult, ValidationError};
pub use filters::{FilterPatch, FilterSpec, PriceRange, SortBy};
pub use money::Money;
pub use query::{query, QueryResult};
pub use state::{next_state, reduce, Action, ShoppingState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category name that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// The fixed category list shown in the storefront navigation.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    ALL_CATEGORIES,
    "Dresses",
    "Tops",
    "Bottoms",
    "Outerwear",
    "Shoes",
    "Accessories",
];

/// Products shown per catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Upper bound of the default price filter ($1,000.00).
pub const DEFAULT_MAX_PRICE: Money = Money::from_cents(100_000);

/// Orders at or above this subtotal ship free ($100.00).
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(10_000);

/// Flat shipping charged below the free-shipping threshold ($10.00).
pub const FLAT_SHIPPING_RATE: Money = Money::from_cents(1_000);

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;
