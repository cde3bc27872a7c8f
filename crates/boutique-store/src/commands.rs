//! # UI Commands
//!
//! The checks the storefront's components run before dispatching, gathered
//! in one place so every UI enforces them the same way.
//!
//! ## Cart Drawer Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Drawer Commands                                 │
//! │                                                                         │
//! │  ┌──────────┐  quick_add /      ┌──────────┐  set_line_quantity         │
//! │  │  Empty   │  add_selection    │ In Cart  │  increment / decrement     │
//! │  │  Cart    │──────────────────►│          │◄──────────┐                │
//! │  └──────────┘                   └────┬─────┘           │                │
//! │       ▲                              │                 │                │
//! │       │         qty reaches 0        │  qty >= 1       │                │
//! │       └──────── (RemoveFromCart) ◄───┴─────────────────┘                │
//! │                                                                         │
//! │  cart_view() renders lines + totals at any point                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use boutique_core::validation::{validate_quantity, validate_selection};
use boutique_core::{
    Action, CartLine, CartLineKey, CartTotals, Money, Product, ShippingPolicy, ShoppingState,
    ValidationError,
};
use serde::Serialize;
use tracing::debug;

use crate::error::StoreResult;
use crate::store::Store;

// =============================================================================
// Cart Quantity Commands
// =============================================================================

/// Sets a line's quantity, removing the line when `quantity <= 0`.
pub fn set_line_quantity(store: &mut Store, key: &CartLineKey, quantity: i64) -> Arc<ShoppingState> {
    debug!(line = %key, quantity, "set_line_quantity command");

    if quantity <= 0 {
        store.dispatch(Action::RemoveFromCart(key.clone()))
    } else {
        store.dispatch(Action::UpdateCartQuantity {
            key: key.clone(),
            quantity,
        })
    }
}

/// The "+" button. Does nothing for a line that is not in the cart.
pub fn increment_line(store: &mut Store, key: &CartLineKey) -> Arc<ShoppingState> {
    step_line(store, key, 1)
}

/// The "−" button. Removes the line when it drops to zero.
pub fn decrement_line(store: &mut Store, key: &CartLineKey) -> Arc<ShoppingState> {
    step_line(store, key, -1)
}

fn step_line(store: &mut Store, key: &CartLineKey, delta: i64) -> Arc<ShoppingState> {
    let state = store.state();
    match state.find_line(key) {
        Some(line) => set_line_quantity(store, key, line.quantity.saturating_add(delta)),
        None => state,
    }
}

// =============================================================================
// Add Commands
// =============================================================================

/// Adds a chosen size/color selection from the product modal.
///
/// ## Errors
/// - `InvalidSelection` when size or color is empty
/// - `MustBePositive` when `quantity <= 0`
pub fn add_selection(
    store: &mut Store,
    product: &Product,
    size: &str,
    color: &str,
    quantity: i64,
) -> StoreResult<Arc<ShoppingState>> {
    validate_selection(size, color)?;
    validate_quantity(quantity)?;

    debug!(product_id = %product.id, size, color, quantity, "add_selection command");

    Ok(store.dispatch(Action::AddToCart {
        product: product.clone(),
        size: size.to_string(),
        color: color.to_string(),
        quantity,
    }))
}

/// The product card's "Add to cart" button: one unit of the first listed
/// size and color.
pub fn quick_add(store: &mut Store, product: &Product) -> StoreResult<Arc<ShoppingState>> {
    let (size, color) = product.default_selection().ok_or_else(|| {
        let missing = if product.sizes.is_empty() { "size" } else { "color" };
        ValidationError::InvalidSelection {
            missing: missing.to_string(),
        }
    })?;

    add_selection(store, product, size, color, 1)
}

// =============================================================================
// Wishlist Commands
// =============================================================================

/// The heart button: removes the product if saved, saves it otherwise.
pub fn toggle_wishlist(store: &mut Store, product: &Product) -> Arc<ShoppingState> {
    if store.state().is_in_wishlist(&product.id) {
        store.dispatch(Action::RemoveFromWishlist(product.id.clone()))
    } else {
        store.dispatch(Action::AddToWishlist(product.clone()))
    }
}

// =============================================================================
// Cart View
// =============================================================================

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartViewLine {
    pub key: CartLineKey,
    #[serde(flatten)]
    pub line: CartLine,
    pub line_total: Money,
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartViewLine>,
    pub totals: CartTotals,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Builds the cart drawer contents from a snapshot.
pub fn cart_view(state: &ShoppingState, policy: &ShippingPolicy) -> CartView {
    CartView {
        lines: state
            .cart
            .lines()
            .iter()
            .map(|line| CartViewLine {
                key: line.key(),
                line: line.clone(),
                line_total: line.line_total(),
            })
            .collect(),
        totals: state.cart_totals(policy),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn dress() -> Product {
        Product::new("A", "Wrap Dress", Money::from_cents(5000))
            .with_sizes(["S", "M"])
            .with_colors(["Black", "Red"])
    }

    fn key() -> CartLineKey {
        CartLineKey::new("A", "M", "Black")
    }

    #[test]
    fn test_set_line_quantity_removes_at_zero() {
        let mut store = Store::new();
        add_selection(&mut store, &dress(), "M", "Black", 2).unwrap();

        let state = set_line_quantity(&mut store, &key(), 5);
        assert_eq!(state.cart.item_count(), 5);

        let state = set_line_quantity(&mut store, &key(), 0);
        assert!(state.cart.is_empty());
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut store = Store::new();
        add_selection(&mut store, &dress(), "M", "Black", 1).unwrap();

        increment_line(&mut store, &key());
        assert_eq!(store.state().cart.item_count(), 2);

        decrement_line(&mut store, &key());
        let state = decrement_line(&mut store, &key());
        assert!(state.cart.is_empty());

        // Absent line: untouched
        let state = increment_line(&mut store, &key());
        assert!(state.cart.is_empty());
    }

    #[test]
    fn test_add_selection_requires_size_and_color() {
        let mut store = Store::new();

        let err = add_selection(&mut store, &dress(), "", "Black", 1).unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::InvalidSelection {
                missing: "size".to_string()
            })
        );

        let err = add_selection(&mut store, &dress(), "M", "Black", 0).unwrap_err();
        assert!(matches!(err, StoreError::Core(_)));
        assert!(store.state().cart.is_empty());
    }

    #[test]
    fn test_quick_add_uses_first_options() {
        let mut store = Store::new();
        let state = quick_add(&mut store, &dress()).unwrap();

        let line = &state.cart.lines()[0];
        assert_eq!(line.selected_size, "S");
        assert_eq!(line.selected_color, "Black");
        assert_eq!(line.quantity, 1);

        let bare = Product::new("B", "Gift Card", Money::from_cents(2500));
        let err = quick_add(&mut store, &bare).unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::InvalidSelection {
                missing: "size".to_string()
            })
        );
    }

    #[test]
    fn test_toggle_wishlist() {
        let mut store = Store::new();

        assert!(toggle_wishlist(&mut store, &dress()).is_in_wishlist("A"));
        assert!(!toggle_wishlist(&mut store, &dress()).is_in_wishlist("A"));
    }

    #[test]
    fn test_cart_view() {
        let mut store = Store::new();
        add_selection(&mut store, &dress(), "M", "Black", 1).unwrap();
        add_selection(&mut store, &dress(), "S", "Red", 1).unwrap();

        let view = cart_view(&store.state(), &ShippingPolicy::default());
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].key, key());
        assert_eq!(view.lines[0].line_total, Money::from_cents(5000));
        assert_eq!(view.totals.subtotal, Money::from_cents(10000));
        assert_eq!(view.totals.shipping, Money::zero());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["lines"][0]["selectedSize"], "M");
        assert_eq!(json["lines"][0]["lineTotal"], 50.0);
        assert_eq!(json["totals"]["total"], 100.0);
    }
}
