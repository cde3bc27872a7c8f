//! # boutique-store: Store Container and Persistence for Boutique
//!
//! This crate wraps the pure `boutique-core` reducer with everything that
//! touches the outside world: the dispatching store, durable cart/wishlist
//! storage, hydration at startup, configuration and logging.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Layer Architecture                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 Session (wiring, config-driven)                  │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │     Store      │  │  Persistence   │  │   StorageBackend       │    │
//! │  │                │  │                │  │                        │    │
//! │  │ dispatch()     │─►│ observer:      │─►│ Memory / File /        │    │
//! │  │ state()        │  │ write on change│  │ WriteBehind            │    │
//! │  │ observers      │  │ hydrate_state  │  │                        │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  commands: UI pre-checks (selection, quantity, wishlist toggle)        │
//! │  catalog:  JSON product files                                          │
//! │  config:   boutique.toml + BOUTIQUE_* environment                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use std::sync::Arc;
//! use boutique_store::{commands, MemoryStorage, Session, StoreConfig};
//! use boutique_core::{Money, Product};
//!
//! let mut session = Session::in_memory(Arc::new(MemoryStorage::new()), &StoreConfig::default());
//! let tee = Product::new("1", "Linen Tee", Money::from_cents(3000))
//!     .with_sizes(["M"])
//!     .with_colors(["White"]);
//!
//! commands::quick_add(session.store_mut(), &tee).unwrap();
//! assert_eq!(session.cart_view().totals.total, Money::from_cents(4000));
//! ```

use tracing_subscriber::EnvFilter;

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod persistence;
pub mod session;
pub mod storage;
pub mod store;
pub mod write_behind;

pub use catalog::{load_catalog, save_catalog};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use persistence::{hydrate_state, HydrationReport, PersistenceObserver, StorageKeys};
pub use session::Session;
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use store::{StateObserver, Store};
pub use write_behind::WriteBehindStorage;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,boutique=debug";

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - WARN: Dropped persisted items, failed storage writes
/// - INFO: Session lifecycle, hydration summary
/// - DEBUG: Every dispatch with its action kind
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
