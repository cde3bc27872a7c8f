//! # Store Container
//!
//! Owns the authoritative [`ShoppingState`] and applies actions to it.
//!
//! ## Dispatch and Observers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store::dispatch                                  │
//! │                                                                         │
//! │  dispatch(action)                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next_state(&current, action)          (boutique-core, pure)            │
//! │       │                                                                 │
//! │       ├── None ──────────► keep current Arc, notify nobody             │
//! │       │                                                                 │
//! │       └── Some(next) ────► swap Arc (single assignment)                │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                  for each observer (subscription order):                │
//! │                      observer.on_transition(&previous, &next)           │
//! │                                                                         │
//! │  Readers holding an earlier Arc keep a complete old snapshot; they     │
//! │  never see a half-applied action.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! There is no global store. Construct one at startup and pass `&mut Store`
//! (or wrap it in whatever the UI layer uses) to the code that needs it.

use std::fmt;
use std::sync::Arc;

use boutique_core::{next_state, Action, QueryResult, ShoppingState};
use tracing::{debug, info};

use crate::persistence::{hydrate_state, HydrationReport, StorageKeys};
use crate::storage::StorageBackend;

// =============================================================================
// State Observer
// =============================================================================

/// Hook run synchronously after every state transition.
///
/// Observers see the previous and next snapshot and must not fail: anything
/// that can go wrong (disk, network) is the observer's to log and absorb.
pub trait StateObserver: Send {
    fn on_transition(&mut self, previous: &ShoppingState, next: &ShoppingState);
}

impl<F> StateObserver for F
where
    F: FnMut(&ShoppingState, &ShoppingState) + Send,
{
    fn on_transition(&mut self, previous: &ShoppingState, next: &ShoppingState) {
        self(previous, next)
    }
}

// =============================================================================
// Store
// =============================================================================

/// The action-driven state container.
pub struct Store {
    state: Arc<ShoppingState>,
    observers: Vec<Box<dyn StateObserver>>,
}

impl Store {
    /// Creates a store holding the empty initial state.
    pub fn new() -> Self {
        Self::with_state(ShoppingState::default())
    }

    /// Creates a store starting from `state`.
    pub fn with_state(state: ShoppingState) -> Self {
        Store {
            state: Arc::new(state),
            observers: Vec::new(),
        }
    }

    /// Registers an observer. Observers run in subscription order.
    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Current read-only snapshot.
    pub fn state(&self) -> Arc<ShoppingState> {
        Arc::clone(&self.state)
    }

    /// Applies `action` and returns the resulting snapshot.
    ///
    /// Never fails. Actions that change nothing (unknown kinds, absent keys,
    /// duplicate wishlist adds) return the current snapshot and run no
    /// observers.
    pub fn dispatch(&mut self, action: Action) -> Arc<ShoppingState> {
        let kind = action.kind();

        match next_state(&self.state, action) {
            Some(next) => {
                debug!(action = kind, "State changed");
                self.install(next);
            }
            None => debug!(action = kind, "Action left state unchanged"),
        }

        self.state()
    }

    /// Rebuilds cart and wishlist from durable storage.
    ///
    /// The hydrated state is assembled off to the side and installed in one
    /// step, then observers run once. A storage that yields nothing usable
    /// leaves the state exactly as it was.
    pub fn hydrate(&mut self, storage: &dyn StorageBackend, keys: &StorageKeys) -> HydrationReport {
        let (hydrated, report) = hydrate_state(&self.state, storage, keys);

        info!(
            restored_lines = report.restored_lines,
            dropped_lines = report.dropped_lines,
            restored_wishlist = report.restored_wishlist,
            dropped_wishlist = report.dropped_wishlist,
            "Hydrated shopping state"
        );

        if hydrated != *self.state {
            self.install(hydrated);
        }

        report
    }

    /// Runs the catalog query over the current products and filters.
    pub fn query(&self, page: usize, page_size: usize) -> QueryResult {
        self.state.visible_products(page, page_size)
    }

    fn install(&mut self, next: ShoppingState) {
        let previous = std::mem::replace(&mut self.state, Arc::new(next));
        for observer in &mut self.observers {
            observer.on_transition(&previous, &self.state);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
