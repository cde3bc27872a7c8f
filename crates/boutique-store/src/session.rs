//! # Shopping Session
//!
//! Wires a [`Store`] to durable storage according to a [`StoreConfig`].
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session::open(&config)                                                 │
//! │                                                                         │
//! │  1. FileStorage::open(data_dir)                                        │
//! │  2. write_behind? → WriteBehindStorage::spawn(file storage)            │
//! │  3. Store::new()                    (empty initial state)              │
//! │  4. subscribe(PersistenceObserver)  (cart/wishlist → storage)          │
//! │  5. hydrate(storage)                (replay persisted items; the       │
//! │                                      observer rewrites them once,      │
//! │                                      normalized)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With write-behind enabled, call [`Session::flush`] before shutdown so
//! queued writes reach disk.

use std::sync::Arc;

use boutique_core::{Action, QueryResult, ShippingPolicy, ShoppingState};
use tracing::info;

use crate::commands::{cart_view, CartView};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::persistence::{HydrationReport, PersistenceObserver};
use crate::storage::{FileStorage, StorageBackend};
use crate::store::Store;
use crate::write_behind::WriteBehindStorage;

/// A store bound to its storage, shipping policy and page size.
pub struct Session {
    store: Store,
    storage: Arc<dyn StorageBackend>,
    write_behind: Option<Arc<WriteBehindStorage>>,
    shipping: ShippingPolicy,
    page_size: usize,
    hydration: HydrationReport,
}

impl Session {
    /// Opens file-backed storage and hydrates a fresh store from it.
    ///
    /// ## Errors
    /// - `InvalidConfig` if no data directory is configured or derivable
    /// - `Io` if the data directory cannot be created
    /// - `StorageUnavailable` if write-behind is enabled outside a tokio
    ///   runtime (it is off by default)
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let data_dir = config
            .data_dir()
            .ok_or_else(|| StoreError::InvalidConfig("no data directory available".into()))?;
        let files = FileStorage::open(&data_dir)?;

        let session = if config.storage.write_behind {
            let queued = Arc::new(WriteBehindStorage::spawn(files)?);
            let storage: Arc<dyn StorageBackend> = queued.clone();
            Self::with_storage(storage, config, Some(queued))
        } else {
            Self::with_storage(Arc::new(files), config, None)
        };
        info!(?data_dir, write_behind = config.storage.write_behind, "Session opened");
        Ok(session)
    }

    /// Builds a session over any backend (tests, in-memory sessions).
    pub fn in_memory(storage: Arc<dyn StorageBackend>, config: &StoreConfig) -> Self {
        Self::with_storage(storage, config, None)
    }

    fn with_storage(
        storage: Arc<dyn StorageBackend>,
        config: &StoreConfig,
        write_behind: Option<Arc<WriteBehindStorage>>,
    ) -> Self {
        let keys = config.storage_keys();

        let mut store = Store::new();
        store.subscribe(PersistenceObserver::new(Arc::clone(&storage), keys.clone()));
        let hydration = store.hydrate(storage.as_ref(), &keys);

        Session {
            store,
            storage,
            write_behind,
            shipping: config.shipping_policy(),
            page_size: config.page_size(),
            hydration,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn state(&self) -> Arc<ShoppingState> {
        self.store.state()
    }

    pub fn dispatch(&mut self, action: Action) -> Arc<ShoppingState> {
        self.store.dispatch(action)
    }

    /// Cart drawer contents under the configured shipping policy.
    pub fn cart_view(&self) -> CartView {
        cart_view(&self.store.state(), &self.shipping)
    }

    /// One catalog page at the configured page size.
    pub fn page(&self, page: usize) -> QueryResult {
        self.store.query(page, self.page_size)
    }

    /// What startup hydration restored and dropped.
    pub fn hydration(&self) -> HydrationReport {
        self.hydration
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Waits for queued writes. A no-op without write-behind.
    pub async fn flush(&self) -> StoreResult<()> {
        match &self.write_behind {
            Some(queue) => queue.flush().await,
            None => Ok(()),
        }
    }
}
