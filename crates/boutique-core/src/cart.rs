//! # Cart and Wishlist
//!
//! The two user-owned collections of the shopping state, plus cart totals.
//!
//! ## Immutable Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart / Wishlist Operations                           │
//! │                                                                         │
//! │  Reducer arm              Collection method        Result               │
//! │  ───────────              ─────────────────        ──────               │
//! │                                                                         │
//! │  AddToCart ─────────────► cart.with_added() ─────► Some(new cart)      │
//! │  RemoveFromCart ────────► cart.without() ────────► Some / None         │
//! │  UpdateCartQuantity ────► cart.with_quantity() ──► Some / None         │
//! │  ClearCart ─────────────► cart.cleared() ────────► Some / None         │
//! │  AddToWishlist ─────────► wishlist.with_added() ─► Some / None         │
//! │  RemoveFromWishlist ────► wishlist.without() ────► Some / None         │
//! │                                                                         │
//! │  NOTE: Every method takes &self and builds a fresh collection.          │
//! │        `None` means "nothing changed", so the reducer can keep the      │
//! │        previous state and observers are not notified.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one cart line per [`CartLineKey`]; adding an existing key sums
//!   quantities
//! - Every cart line has quantity ≥ 1
//! - At most one wishlist entry per product id
//! - Insertion order is preserved in both collections

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLine, CartLineKey, Product};
use crate::{FLAT_SHIPPING_RATE, FREE_SHIPPING_THRESHOLD};

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered list of [`CartLine`]s.
///
/// Serializes as a bare JSON array of flat line objects, the exact shape of
/// the durable cart entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<CartLine>);

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart(Vec::new())
    }

    /// Returns the cart with `quantity` units of the selection added.
    ///
    /// ## Behavior
    /// - Key already present: that line's quantity grows by `quantity`,
    ///   keeping its position and its original product snapshot
    /// - Key not present: a new line is appended
    /// - `quantity <= 0`: `None` (nothing to add)
    pub fn with_added(
        &self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> Option<Cart> {
        if quantity <= 0 {
            return None;
        }

        let mut lines = self.0.clone();
        match lines
            .iter_mut()
            .find(|line| line.matches_parts(&product.id, size, color))
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => lines.push(CartLine::new(product.clone(), size, color, quantity)),
        }

        Some(Cart(lines))
    }

    /// Returns the cart without the line for `key`, or `None` if absent.
    pub fn without(&self, key: &CartLineKey) -> Option<Cart> {
        if self.find(key).is_none() {
            return None;
        }

        Some(Cart(
            self.0
                .iter()
                .filter(|line| !line.matches(key))
                .cloned()
                .collect(),
        ))
    }

    /// Returns the cart with the line for `key` set to `quantity`.
    ///
    /// A quantity of zero or below removes the line. Returns `None` when the
    /// key is absent or the quantity is already `quantity`.
    pub fn with_quantity(&self, key: &CartLineKey, quantity: i64) -> Option<Cart> {
        if quantity <= 0 {
            return self.without(key);
        }

        let current = self.find(key)?;
        if current.quantity == quantity {
            return None;
        }

        let lines = self
            .0
            .iter()
            .map(|line| {
                if line.matches(key) {
                    CartLine {
                        quantity,
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect();

        Some(Cart(lines))
    }

    /// Returns an empty cart, or `None` if this one is already empty.
    pub fn cleared(&self) -> Option<Cart> {
        if self.is_empty() {
            None
        } else {
            Some(Cart::new())
        }
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.0
    }

    /// Looks up a line by its composite key.
    pub fn find(&self, key: &CartLineKey) -> Option<&CartLine> {
        self.0.iter().find(|line| line.matches(key))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.0.len()
    }

    /// Total units across all lines (the cart badge number). Saturates at
    /// `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.0
            .iter()
            .fold(0i64, |count, line| count.saturating_add(line.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money {
        self.0.iter().map(CartLine::line_total).sum()
    }

    /// Computes the totals shown in the cart drawer.
    pub fn totals(&self, policy: &ShippingPolicy) -> CartTotals {
        let subtotal = self.subtotal();
        let shipping = if self.is_empty() {
            Money::zero()
        } else {
            policy.shipping_for(subtotal)
        };

        CartTotals {
            line_count: self.line_count(),
            item_count: self.item_count(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Cart(lines)
    }
}

// =============================================================================
// Wishlist
// =============================================================================

/// The wishlist: saved products, unique by id, in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist(Vec<Product>);

impl Wishlist {
    pub fn new() -> Self {
        Wishlist(Vec::new())
    }

    /// Returns the wishlist with `product` appended, or `None` if a product
    /// with the same id is already saved.
    pub fn with_added(&self, product: &Product) -> Option<Wishlist> {
        if self.contains(&product.id) {
            return None;
        }

        let mut entries = self.0.clone();
        entries.push(product.clone());
        Some(Wishlist(entries))
    }

    /// Returns the wishlist without `product_id`, or `None` if absent.
    pub fn without(&self, product_id: &str) -> Option<Wishlist> {
        if !self.contains(product_id) {
            return None;
        }

        Some(Wishlist(
            self.0
                .iter()
                .filter(|p| p.id != product_id)
                .cloned()
                .collect(),
        ))
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.0.iter().any(|p| p.id == product_id)
    }

    pub fn entries(&self) -> &[Product] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Shipping & Totals
// =============================================================================

/// Flat-rate shipping with a free-shipping threshold.
///
/// ## Rule
/// ```text
/// subtotal >= free_threshold  →  shipping = 0
/// otherwise                   →  shipping = flat_rate
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    pub free_threshold: Money,
    pub flat_rate: Money,
}

impl ShippingPolicy {
    pub const fn new(free_threshold: Money, flat_rate: Money) -> Self {
        ShippingPolicy {
            free_threshold,
            flat_rate,
        }
    }

    /// Shipping charged on a non-empty cart with this subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_threshold {
            Money::zero()
        } else {
            self.flat_rate
        }
    }
}

impl Default for ShippingPolicy {
    /// Free at $100.00, otherwise $10.00.
    fn default() -> Self {
        ShippingPolicy::new(FREE_SHIPPING_THRESHOLD, FLAT_SHIPPING_RATE)
    }
}

/// Cart totals summary for the cart drawer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct lines.
    pub line_count: usize,

    /// Units across all lines.
    pub item_count: i64,

    #[ts(as = "f64")]
    pub subtotal: Money,

    #[ts(as = "f64")]
    pub shipping: Money,

    #[ts(as = "f64")]
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(price_cents))
            .with_sizes(["S", "M", "L"])
            .with_colors(["Black", "White"])
    }

    #[test]
    fn test_add_same_key_sums_quantity() {
        let a = product("A", 5000);
        let cart = Cart::new().with_added(&a, "M", "Black", 1).unwrap();
        let cart = cart.with_added(&a, "M", "Black", 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_add_different_selection_is_new_line() {
        let a = product("A", 5000);
        let cart = Cart::new().with_added(&a, "M", "Black", 1).unwrap();
        let cart = cart.with_added(&a, "L", "Black", 1).unwrap();
        let cart = cart.with_added(&a, "M", "White", 1).unwrap();

        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_non_positive_quantity_is_rejected() {
        let a = product("A", 5000);
        assert!(Cart::new().with_added(&a, "M", "Black", 0).is_none());
        assert!(Cart::new().with_added(&a, "M", "Black", -2).is_none());
    }

    #[test]
    fn test_existing_line_keeps_its_snapshot() {
        let a = product("A", 5000);
        let cart = Cart::new().with_added(&a, "M", "Black", 1).unwrap();

        let repriced = Product {
            price: Money::from_cents(9900),
            ..a
        };
        let cart = cart.with_added(&repriced, "M", "Black", 1).unwrap();

        assert_eq!(cart.lines()[0].product.price.cents(), 5000);
        assert_eq!(cart.subtotal().cents(), 10000);
    }

    #[test]
    fn test_without_absent_key_is_none() {
        let cart = Cart::new()
            .with_added(&product("A", 5000), "M", "Black", 1)
            .unwrap();

        assert!(cart.without(&CartLineKey::new("A", "S", "Black")).is_none());
        assert!(cart.without(&CartLineKey::new("Z", "M", "Black")).is_none());

        let emptied = cart.without(&CartLineKey::new("A", "M", "Black")).unwrap();
        assert!(emptied.is_empty());
    }

    #[test]
    fn test_with_quantity() {
        let key = CartLineKey::new("A", "M", "Black");
        let cart = Cart::new()
            .with_added(&product("A", 5000), "M", "Black", 1)
            .unwrap();

        let updated = cart.with_quantity(&key, 4).unwrap();
        assert_eq!(updated.find(&key).map(|l| l.quantity), Some(4));

        // Same quantity: nothing changes
        assert!(updated.with_quantity(&key, 4).is_none());

        // Zero or negative removes the line
        assert!(updated.with_quantity(&key, 0).unwrap().is_empty());
        assert!(updated.with_quantity(&key, -1).unwrap().is_empty());

        // Absent key
        assert!(cart
            .with_quantity(&CartLineKey::new("B", "M", "Black"), 2)
            .is_none());
    }

    #[test]
    fn test_cleared() {
        assert!(Cart::new().cleared().is_none());

        let cart = Cart::new()
            .with_added(&product("A", 5000), "M", "Black", 1)
            .unwrap();
        assert!(cart.cleared().unwrap().is_empty());
    }

    #[test]
    fn test_totals_free_shipping_at_threshold() {
        let cart = Cart::new()
            .with_added(&product("A", 5000), "M", "Black", 2)
            .unwrap();
        let totals = cart.totals(&ShippingPolicy::default());

        assert_eq!(totals.subtotal, Money::from_cents(10000));
        assert_eq!(totals.shipping, Money::zero());
        assert_eq!(totals.total, Money::from_cents(10000));
    }

    #[test]
    fn test_totals_flat_shipping_below_threshold() {
        let cart = Cart::new()
            .with_added(&product("A", 3000), "M", "Black", 1)
            .unwrap();
        let totals = cart.totals(&ShippingPolicy::default());

        assert_eq!(totals.subtotal, Money::from_cents(3000));
        assert_eq!(totals.shipping, Money::from_cents(1000));
        assert_eq!(totals.total, Money::from_cents(4000));
        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.item_count, 1);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let half = i64::MAX / 2 + 1;
        let cart = Cart::new()
            .with_added(&product("A", 5000), "M", "Black", half)
            .and_then(|c| c.with_added(&product("B", 5000), "M", "Black", half))
            .unwrap();
        assert_eq!(cart.item_count(), i64::MAX);

        let cart = Cart::new()
            .with_added(&product("A", 5000), "M", "Black", i64::MAX)
            .and_then(|c| c.with_added(&product("B", 3000), "M", "Black", 1))
            .unwrap();
        let totals = cart.totals(&ShippingPolicy::default());

        assert_eq!(totals.item_count, i64::MAX);
        assert_eq!(totals.subtotal, Money::from_cents(i64::MAX));
        assert_eq!(totals.shipping, Money::zero());
        assert_eq!(totals.total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_empty_cart_ships_free() {
        let totals = Cart::new().totals(&ShippingPolicy::default());
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_wishlist_is_unique_by_id() {
        let a = product("A", 5000);
        let list = Wishlist::new().with_added(&a).unwrap();

        assert!(list.with_added(&a).is_none());
        assert!(list.contains("A"));
        assert_eq!(list.len(), 1);

        assert!(list.without("B").is_none());
        assert!(list.without("A").unwrap().is_empty());
    }

    #[test]
    fn test_cart_serializes_as_bare_array() {
        let cart = Cart::new()
            .with_added(&product("A", 5000), "M", "Black", 2)
            .unwrap();
        let value = serde_json::to_value(&cart).unwrap();

        assert!(value.is_array());
        assert_eq!(value[0]["id"], "A");
        assert_eq!(value[0]["quantity"], 2);
    }
}
