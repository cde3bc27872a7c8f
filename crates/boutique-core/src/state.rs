//! # Shopping State and Reducer
//!
//! The authoritative shopping state and the pure function that applies an
//! [`Action`] to it.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Reducer Flow                                    │
//! │                                                                         │
//! │   UI event                                                              │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │   Action ──────► next_state(&state, action)                             │
//! │                      │                                                  │
//! │                      ├── Some(new) → fully-formed replacement state    │
//! │                      └── None      → nothing changed (no-op, unknown   │
//! │                                       kind, absent key, duplicate)     │
//! │                                                                         │
//! │   reduce() = next_state() falling back to a clone of the input.        │
//! │                                                                         │
//! │   NEVER fails. NEVER mutates the input. No partially-applied state     │
//! │   is ever observable.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Actions travel as `{ "type": "ADD_TO_CART", "payload": { ... } }`.
//! Any `type` this build does not know decodes to [`Action::Unknown`],
//! which the reducer ignores.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cart::{Cart, CartTotals, ShippingPolicy, Wishlist};
use crate::filters::{FilterPatch, FilterSpec};
use crate::query::{query, QueryResult};
use crate::types::{CartLine, CartLineKey, Product};
use crate::DEFAULT_CATEGORIES;

// =============================================================================
// Shopping State
// =============================================================================

/// Everything the storefront renders from.
///
/// ## Sharing
/// `products` is behind an `Arc` because the catalog is set once and then
/// carried unchanged through every cart/wishlist transition; cloning the
/// state must not copy it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingState {
    pub cart: Cart,
    pub wishlist: Wishlist,
    pub products: Arc<Vec<Product>>,
    pub categories: Vec<String>,
    pub filters: FilterSpec,
}

impl Default for ShoppingState {
    /// Empty cart, wishlist and catalog; default filters; the fixed
    /// storefront categories.
    fn default() -> Self {
        ShoppingState {
            cart: Cart::new(),
            wishlist: Wishlist::new(),
            products: Arc::new(Vec::new()),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            filters: FilterSpec::default(),
        }
    }
}

impl ShoppingState {
    /// Total units in the cart.
    pub fn cart_item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Distinct cart lines.
    pub fn cart_line_count(&self) -> usize {
        self.cart.line_count()
    }

    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    pub fn is_in_wishlist(&self, product_id: &str) -> bool {
        self.wishlist.contains(product_id)
    }

    pub fn find_line(&self, key: &CartLineKey) -> Option<&CartLine> {
        self.cart.find(key)
    }

    pub fn cart_totals(&self, policy: &ShippingPolicy) -> CartTotals {
        self.cart.totals(policy)
    }

    /// Runs the catalog query with the current filters.
    pub fn visible_products(&self, page: usize, page_size: usize) -> QueryResult {
        query(&self.products, &self.filters, page, page_size)
    }

    fn with_cart(&self, cart: Cart) -> Self {
        ShoppingState {
            cart,
            ..self.clone()
        }
    }

    fn with_wishlist(&self, wishlist: Wishlist) -> Self {
        ShoppingState {
            wishlist,
            ..self.clone()
        }
    }
}

// =============================================================================
// Actions
// =============================================================================

/// A request to change the shopping state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Add `quantity` units of a size/color selection.
    AddToCart {
        product: Product,
        size: String,
        color: String,
        quantity: i64,
    },

    RemoveFromCart(CartLineKey),

    /// Set a line's quantity. Zero or below removes the line.
    UpdateCartQuantity { key: CartLineKey, quantity: i64 },

    ClearCart,

    AddToWishlist(Product),

    /// Remove by product id.
    RemoveFromWishlist(String),

    /// Replace the catalog wholesale.
    SetProducts(Vec<Product>),

    /// Shallow-merge into the current filters.
    SetFilters(FilterPatch),

    /// Any action kind this build does not recognize.
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Every `type` tag this build understands.
    pub const KNOWN_KINDS: [&'static str; 8] = [
        "ADD_TO_CART",
        "REMOVE_FROM_CART",
        "UPDATE_CART_QUANTITY",
        "CLEAR_CART",
        "ADD_TO_WISHLIST",
        "REMOVE_FROM_WISHLIST",
        "SET_PRODUCTS",
        "SET_FILTERS",
    ];

    /// The wire `type` tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddToCart { .. } => "ADD_TO_CART",
            Action::RemoveFromCart(_) => "REMOVE_FROM_CART",
            Action::UpdateCartQuantity { .. } => "UPDATE_CART_QUANTITY",
            Action::ClearCart => "CLEAR_CART",
            Action::AddToWishlist(_) => "ADD_TO_WISHLIST",
            Action::RemoveFromWishlist(_) => "REMOVE_FROM_WISHLIST",
            Action::SetProducts(_) => "SET_PRODUCTS",
            Action::SetFilters(_) => "SET_FILTERS",
            Action::Unknown => "UNKNOWN",
        }
    }

    /// Decodes an action from a JSON value sent by the UI.
    ///
    /// An unrecognized `type` decodes to [`Action::Unknown`] whatever its
    /// payload looks like. A recognized `type` with a malformed payload is an
    /// error.
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::Action;
    /// use serde_json::json;
    ///
    /// let action = Action::from_json(json!({ "type": "APPLY_COUPON", "payload": "SAVE10" }));
    /// assert_eq!(action.unwrap(), Action::Unknown);
    /// ```
    pub fn from_json(value: serde_json::Value) -> Result<Action, serde_json::Error> {
        let known = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|kind| Action::KNOWN_KINDS.contains(&kind));

        if known {
            serde_json::from_value(value)
        } else {
            Ok(Action::Unknown)
        }
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// Applies `action` to `state`.
///
/// Returns `None` when the action changes nothing, so callers can skip
/// re-rendering and persistence.
pub fn next_state(state: &ShoppingState, action: Action) -> Option<ShoppingState> {
    match action {
        Action::AddToCart {
            product,
            size,
            color,
            quantity,
        } => state
            .cart
            .with_added(&product, &size, &color, quantity)
            .map(|cart| state.with_cart(cart)),

        Action::RemoveFromCart(key) => state.cart.without(&key).map(|cart| state.with_cart(cart)),

        Action::UpdateCartQuantity { key, quantity } => state
            .cart
            .with_quantity(&key, quantity)
            .map(|cart| state.with_cart(cart)),

        Action::ClearCart => state.cart.cleared().map(|cart| state.with_cart(cart)),

        Action::AddToWishlist(product) => state
            .wishlist
            .with_added(&product)
            .map(|wishlist| state.with_wishlist(wishlist)),

        Action::RemoveFromWishlist(product_id) => state
            .wishlist
            .without(&product_id)
            .map(|wishlist| state.with_wishlist(wishlist)),

        Action::SetProducts(products) => {
            if *state.products == products {
                return None;
            }
            Some(ShoppingState {
                products: Arc::new(products),
                ..state.clone()
            })
        }

        Action::SetFilters(patch) => {
            let filters = state.filters.apply(patch);
            if filters == state.filters {
                return None;
            }
            Some(ShoppingState {
                filters,
                ..state.clone()
            })
        }

        Action::Unknown => None,
    }
}

/// Applies `action` to `state`, returning the input unchanged for no-ops.
pub fn reduce(state: &ShoppingState, action: Action) -> ShoppingState {
    next_state(state, action).unwrap_or_else(|| state.clone())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SortBy;
    use crate::money::Money;
    use proptest::prelude::*;
    use serde_json::json;

    fn product(id: &str, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(price_cents))
            .with_sizes(["S", "M"])
            .with_colors(["Black"])
    }

    fn add(p: &Product, size: &str, qty: i64) -> Action {
        Action::AddToCart {
            product: p.clone(),
            size: size.to_string(),
            color: "Black".to_string(),
            quantity: qty,
        }
    }

    #[test]
    fn test_add_twice_merges_into_one_line() {
        let a = product("A", 5000);
        let state = reduce(&ShoppingState::default(), add(&a, "M", 1));
        let state = reduce(&state, add(&a, "M", 2));

        assert_eq!(state.cart_line_count(), 1);
        assert_eq!(state.cart_item_count(), 3);
    }

    #[test]
    fn test_remove_absent_key_is_unchanged() {
        let state = reduce(&ShoppingState::default(), add(&product("A", 5000), "M", 1));
        let action = Action::RemoveFromCart(CartLineKey::new("A", "S", "Black"));

        assert!(next_state(&state, action.clone()).is_none());
        assert_eq!(reduce(&state, action), state);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let state = reduce(&ShoppingState::default(), add(&product("A", 5000), "M", 2));
        let state = reduce(
            &state,
            Action::UpdateCartQuantity {
                key: CartLineKey::new("A", "M", "Black"),
                quantity: 0,
            },
        );
        assert!(state.cart.is_empty());
    }

    #[test]
    fn test_add_non_positive_quantity_is_a_noop() {
        let state = ShoppingState::default();
        assert!(next_state(&state, add(&product("A", 5000), "M", 0)).is_none());
    }

    #[test]
    fn test_clear_cart_is_idempotent() {
        let state = reduce(&ShoppingState::default(), add(&product("A", 5000), "M", 1));
        let cleared = reduce(&state, Action::ClearCart);
        assert!(cleared.cart.is_empty());
        assert!(next_state(&cleared, Action::ClearCart).is_none());
    }

    #[test]
    fn test_wishlist_add_and_remove() {
        let a = product("A", 5000);
        let state = reduce(&ShoppingState::default(), Action::AddToWishlist(a.clone()));
        assert!(state.is_in_wishlist("A"));

        assert!(next_state(&state, Action::AddToWishlist(a)).is_none());
        assert!(next_state(&state, Action::RemoveFromWishlist("B".into())).is_none());

        let state = reduce(&state, Action::RemoveFromWishlist("A".into()));
        assert_eq!(state.wishlist_count(), 0);
    }

    #[test]
    fn test_set_products_and_filters() {
        let catalog = vec![product("1", 9000), product("2", 3000)];
        let state = reduce(&ShoppingState::default(), Action::SetProducts(catalog.clone()));
        assert_eq!(state.products.len(), 2);
        assert!(next_state(&state, Action::SetProducts(catalog)).is_none());

        let state = reduce(
            &state,
            Action::SetFilters(FilterPatch::sort_by(SortBy::PriceLow)),
        );
        let page = state.visible_products(1, 12);
        assert_eq!(page.items[0].id, "2");
        assert_eq!(state.filters.category, "All");
    }

    #[test]
    fn test_transitions_leave_input_untouched() {
        let before = reduce(&ShoppingState::default(), add(&product("A", 5000), "M", 1));
        let snapshot = before.clone();

        let _ = reduce(&before, add(&product("B", 2000), "S", 4));
        let _ = reduce(&before, Action::ClearCart);

        assert_eq!(before, snapshot);
    }

    #[test]
    fn test_unknown_action_is_ignored() {
        let state = ShoppingState::default();
        assert!(next_state(&state, Action::Unknown).is_none());

        let parsed: Action = serde_json::from_value(json!({ "type": "APPLY_COUPON" })).unwrap();
        assert_eq!(parsed, Action::Unknown);

        let lenient =
            Action::from_json(json!({ "type": "APPLY_COUPON", "payload": { "code": "X" } }));
        assert_eq!(lenient.unwrap(), Action::Unknown);
    }

    #[test]
    fn test_action_wire_shape() {
        let action = Action::from_json(json!({
            "type": "UPDATE_CART_QUANTITY",
            "payload": {
                "key": { "productId": "A", "size": "M", "color": "Black" },
                "quantity": 5
            }
        }))
        .unwrap();

        assert_eq!(action.kind(), "UPDATE_CART_QUANTITY");
        assert_eq!(
            action,
            Action::UpdateCartQuantity {
                key: CartLineKey::new("A", "M", "Black"),
                quantity: 5
            }
        );

        let clear = serde_json::to_value(&Action::ClearCart).unwrap();
        assert_eq!(clear["type"], "CLEAR_CART");

        // Known kind with a broken payload is an error, not Unknown
        assert!(Action::from_json(json!({ "type": "REMOVE_FROM_WISHLIST", "payload": 7 })).is_err());
    }

    #[test]
    fn test_kind_matches_wire_tag() {
        let a = product("A", 5000);
        let actions = vec![
            add(&a, "M", 1),
            Action::RemoveFromCart(CartLineKey::new("A", "M", "Black")),
            Action::UpdateCartQuantity {
                key: CartLineKey::new("A", "M", "Black"),
                quantity: 2,
            },
            Action::ClearCart,
            Action::AddToWishlist(a.clone()),
            Action::RemoveFromWishlist("A".into()),
            Action::SetProducts(vec![a]),
            Action::SetFilters(FilterPatch::default()),
        ];

        for action in actions {
            let value = serde_json::to_value(&action).unwrap();
            assert_eq!(value["type"], action.kind());
            assert!(Action::KNOWN_KINDS.contains(&action.kind()));
        }
    }

    proptest! {
        #[test]
        fn prop_same_key_adds_sum_into_one_line(
            quantities in proptest::collection::vec(1i64..50, 1..12),
        ) {
            let a = product("A", 1999);
            let state = quantities
                .iter()
                .fold(ShoppingState::default(), |s, &q| reduce(&s, add(&a, "M", q)));

            prop_assert_eq!(state.cart.line_count(), 1);
            prop_assert_eq!(state.cart.lines()[0].quantity, quantities.iter().sum::<i64>());
        }

        #[test]
        fn prop_wishlist_add_is_idempotent(id in "[a-z]{1,6}", cents in 0i64..100_000) {
            let p = product(&id, cents);
            let once = reduce(&ShoppingState::default(), Action::AddToWishlist(p.clone()));
            let twice = reduce(&once, Action::AddToWishlist(p));

            prop_assert_eq!(once.wishlist, twice.wishlist);
        }
    }
}
