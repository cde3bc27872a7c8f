//! # Persistence and Hydration
//!
//! Keeps the durable cart/wishlist entries in step with the store, and
//! rebuilds the store from them at startup.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  key "fashion-cart"      → [ { ...product fields, "quantity": 2,       │
//! │                                "selectedSize": "M",                     │
//! │                                "selectedColor": "Black" }, ... ]        │
//! │                                                                         │
//! │  key "fashion-wishlist"  → [ { ...product fields }, ... ]              │
//! │                                                                         │
//! │  Plain JSON arrays of flat objects. No envelope, no version field.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Hydration
//! ```text
//! storage ──► parse entry as array ──► for each item:
//!                  │                       ├── parses + validates → replay
//!                  │                       │   AddToCart / AddToWishlist
//!                  │                       └── otherwise → drop, warn!
//!                  │
//!                  └── unreadable / not an array → treat entry as absent
//! ```
//! Items are replayed through the reducer rather than restored raw, so the
//! composite-key merge and quantity rules apply exactly as for live adds.

use boutique_core::validation::{validate_cart_line, validate_product};
use boutique_core::{reduce, Action, CartLine, Product, ShoppingState};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::storage::StorageBackend;
use crate::store::StateObserver;

/// Default key of the persisted cart.
pub const DEFAULT_CART_KEY: &str = "fashion-cart";

/// Default key of the persisted wishlist.
pub const DEFAULT_WISHLIST_KEY: &str = "fashion-wishlist";

// =============================================================================
// Storage Keys
// =============================================================================

/// The two storage keys the store persists under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub cart: String,
    pub wishlist: String,
}

impl StorageKeys {
    pub fn new(cart: impl Into<String>, wishlist: impl Into<String>) -> Self {
        StorageKeys {
            cart: cart.into(),
            wishlist: wishlist.into(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        StorageKeys::new(DEFAULT_CART_KEY, DEFAULT_WISHLIST_KEY)
    }
}

// =============================================================================
// Persistence Observer
// =============================================================================

/// Writes the cart and/or wishlist whenever a transition changes them.
///
/// Best-effort: a failed write is logged and forgotten. The in-memory state
/// is never rolled back.
pub struct PersistenceObserver<S> {
    storage: S,
    keys: StorageKeys,
}

impl<S: StorageBackend> PersistenceObserver<S> {
    pub fn new(storage: S, keys: StorageKeys) -> Self {
        PersistenceObserver { storage, keys }
    }

    fn write<T: serde::Serialize>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(Into::into)
            .and_then(|json| self.storage.set(key, &json));

        match result {
            Ok(()) => debug!(key = %key, "Persisted"),
            Err(e) => warn!(key = %key, error = %e, "Failed to persist, keeping in-memory state"),
        }
    }
}

impl<S: StorageBackend> StateObserver for PersistenceObserver<S> {
    fn on_transition(&mut self, previous: &ShoppingState, next: &ShoppingState) {
        if previous.cart != next.cart {
            self.write(&self.keys.cart, &next.cart);
        }

        if previous.wishlist != next.wishlist {
            self.write(&self.keys.wishlist, &next.wishlist);
        }
    }
}

/// Writes both collections of `state` unconditionally.
pub fn save_snapshot(
    storage: &dyn StorageBackend,
    keys: &StorageKeys,
    state: &ShoppingState,
) -> StoreResult<()> {
    storage.set(&keys.cart, &serde_json::to_string(&state.cart)?)?;
    storage.set(&keys.wishlist, &serde_json::to_string(&state.wishlist)?)?;
    Ok(())
}

// =============================================================================
// Hydration
// =============================================================================

/// What hydration restored and what it threw away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrationReport {
    pub restored_lines: usize,
    pub dropped_lines: usize,
    pub restored_wishlist: usize,
    pub dropped_wishlist: usize,
}

impl HydrationReport {
    /// True if any persisted item was discarded.
    pub fn dropped_any(&self) -> bool {
        self.dropped_lines > 0 || self.dropped_wishlist > 0
    }
}

/// Replays persisted cart lines and wishlist products onto a copy of `base`.
///
/// Never fails and never touches `base`.
pub fn hydrate_state(
    base: &ShoppingState,
    storage: &dyn StorageBackend,
    keys: &StorageKeys,
) -> (ShoppingState, HydrationReport) {
    let mut state = base.clone();
    let mut report = HydrationReport::default();

    for item in load_array(storage, &keys.cart) {
        match parse_line(item) {
            Some(line) => {
                report.restored_lines += 1;
                state = reduce(
                    &state,
                    Action::AddToCart {
                        product: line.product,
                        size: line.selected_size,
                        color: line.selected_color,
                        quantity: line.quantity,
                    },
                );
            }
            None => report.dropped_lines += 1,
        }
    }

    for item in load_array(storage, &keys.wishlist) {
        match parse_product(item) {
            Some(product) => {
                report.restored_wishlist += 1;
                state = reduce(&state, Action::AddToWishlist(product));
            }
            None => report.dropped_wishlist += 1,
        }
    }

    (state, report)
}

/// Reads `key` as a JSON array. Anything else counts as "nothing stored".
fn load_array(storage: &dyn StorageBackend, key: &str) -> Vec<Value> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key = %key, error = %e, "Persisted entry unreadable, treating as absent");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!(key = %key, "Persisted entry is not an array, treating as absent");
            Vec::new()
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Persisted entry unparseable, treating as absent");
            Vec::new()
        }
    }
}

fn parse_line(item: Value) -> Option<CartLine> {
    let line: CartLine = serde_json::from_value(item)
        .map_err(|e| warn!(error = %e, "Dropping malformed cart line"))
        .ok()?;

    validate_cart_line(&line)
        .map_err(|e| warn!(product_id = %line.product.id, error = %e, "Dropping invalid cart line"))
        .ok()?;

    Some(line)
}

fn parse_product(item: Value) -> Option<Product> {
    let product: Product = serde_json::from_value(item)
        .map_err(|e| warn!(error = %e, "Dropping malformed wishlist entry"))
        .ok()?;

    validate_product(&product)
        .map_err(|e| warn!(product_id = %product.id, error = %e, "Dropping invalid wishlist entry"))
        .ok()?;

    Some(product)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::MemoryStorage;
    use crate::store::Store;
    use boutique_core::{CartLineKey, Money};
    use std::sync::Arc;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(cents))
            .with_sizes(["S", "M"])
            .with_colors(["Black", "Navy-Blue"])
    }

    fn add(p: Product, size: &str, color: &str, qty: i64) -> Action {
        Action::AddToCart {
            product: p,
            size: size.into(),
            color: color.into(),
            quantity: qty,
        }
    }

    /// Backend whose writes always fail, e.g. a full disk.
    struct FailingStorage;

    impl StorageBackend for FailingStorage {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::StorageUnavailable("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::StorageUnavailable("quota exceeded".into()))
        }
    }

    fn persisted_store(storage: Arc<MemoryStorage>) -> Store {
        let mut store = Store::new();
        store.subscribe(PersistenceObserver::new(storage, StorageKeys::default()));
        store
    }

    #[test]
    fn test_observer_writes_changed_collections() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = persisted_store(Arc::clone(&storage));

        store.dispatch(add(product("A", 5000), "M", "Black", 2));
        assert!(storage.get(DEFAULT_CART_KEY).unwrap().is_some());
        assert!(storage.get(DEFAULT_WISHLIST_KEY).unwrap().is_none());

        store.dispatch(Action::AddToWishlist(product("B", 3000)));
        let wishlist: Vec<Product> =
            serde_json::from_str(&storage.get(DEFAULT_WISHLIST_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_failed_write_keeps_in_memory_state() {
        let mut store = Store::new();
        store.subscribe(PersistenceObserver::new(FailingStorage, StorageKeys::default()));

        store.dispatch(add(product("A", 5000), "M", "Black", 2));
        let state = store.dispatch(Action::AddToWishlist(product("B", 3000)));

        assert_eq!(state.cart.item_count(), 2);
        assert!(state.is_in_wishlist("B"));
        assert_eq!(store.state().cart.line_count(), 1);
        assert_eq!(*store.state(), *state);
    }

    #[test]
    fn test_round_trip_through_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = persisted_store(Arc::clone(&storage));

        store.dispatch(add(product("A", 5000), "M", "Black", 2));
        store.dispatch(add(product("A", 5000), "S", "Navy-Blue", 1));
        store.dispatch(add(product("B", 1999), "M", "Black", 4));
        store.dispatch(Action::AddToWishlist(product("C", 8900)));
        let original = store.state();

        let mut fresh = Store::new();
        let report = fresh.hydrate(storage.as_ref(), &StorageKeys::default());

        assert_eq!(report.restored_lines, 3);
        assert!(!report.dropped_any());
        let restored = fresh.state();
        fn keys(s: &ShoppingState) -> Vec<(CartLineKey, i64)> {
            s.cart.lines().iter().map(|l| (l.key(), l.quantity)).collect()
        }
        assert_eq!(keys(&restored), keys(&original));
        assert_eq!(restored.wishlist, original.wishlist);
    }

    #[test]
    fn test_malformed_items_are_dropped() {
        let storage = MemoryStorage::new();
        storage
            .set(
                DEFAULT_CART_KEY,
                r#"[
                    {"id":"A","name":"Dress","price":50,"inStock":true,"quantity":2,"selectedSize":"M","selectedColor":"Black"},
                    {"id":"B","name":"Broken","inStock":true,"quantity":1,"selectedSize":"M","selectedColor":"Black"},
                    {"id":"C","name":"Zero","price":10,"inStock":true,"quantity":0,"selectedSize":"M","selectedColor":"Black"},
                    "garbage",
                    {"id":"A","name":"Dress","price":50,"inStock":true,"quantity":1,"selectedSize":"M","selectedColor":"Black"}
                ]"#,
            )
            .unwrap();
        storage
            .set(DEFAULT_WISHLIST_KEY, r#"[{"id":"W","name":"Scarf","price":20,"inStock":true,"rating":9}]"#)
            .unwrap();

        let (state, report) =
            hydrate_state(&ShoppingState::default(), &storage, &StorageKeys::default());

        assert_eq!(report.restored_lines, 2);
        assert_eq!(report.dropped_lines, 3);
        assert_eq!(report.dropped_wishlist, 1);
        // Duplicate keys merge during replay
        assert_eq!(state.cart.line_count(), 1);
        assert_eq!(state.cart.item_count(), 3);
        assert!(state.wishlist.is_empty());
    }

    #[test]
    fn test_unparseable_entry_is_absent() {
        let storage = MemoryStorage::new();
        storage.set(DEFAULT_CART_KEY, "{not json").unwrap();
        storage.set(DEFAULT_WISHLIST_KEY, r#"{"id":"1"}"#).unwrap();

        let mut store = Store::new();
        let report = store.hydrate(&storage, &StorageKeys::default());

        assert_eq!(report, HydrationReport::default());
        assert_eq!(*store.state(), ShoppingState::default());
    }

    #[test]
    fn test_hydration_rewrites_normalized_entries() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                DEFAULT_CART_KEY,
                r#"[
                    {"id":"A","name":"Dress","price":50,"inStock":true,"quantity":1,"selectedSize":"M","selectedColor":"Black"},
                    {"id":"A","name":"Dress","price":50,"inStock":true,"quantity":1,"selectedSize":"M","selectedColor":"Black"}
                ]"#,
            )
            .unwrap();

        let mut store = persisted_store(Arc::clone(&storage));
        store.hydrate(storage.as_ref(), &StorageKeys::default());

        let lines: Vec<CartLine> =
            serde_json::from_str(&storage.get(DEFAULT_CART_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn test_save_snapshot() {
        let storage = MemoryStorage::new();
        let state = reduce(&ShoppingState::default(), add(product("A", 5000), "M", "Black", 1));

        save_snapshot(&storage, &StorageKeys::default(), &state).unwrap();

        assert_eq!(storage.get(DEFAULT_WISHLIST_KEY).unwrap().as_deref(), Some("[]"));
        assert!(storage.get(DEFAULT_CART_KEY).unwrap().unwrap().contains("\"selectedSize\":\"M\""));
    }
}
