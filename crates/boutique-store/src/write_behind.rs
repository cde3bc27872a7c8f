//! # Write-Behind Storage
//!
//! Wraps any [`StorageBackend`] so writes are queued and applied by a
//! background worker instead of on the dispatch path.
//!
//! ## Queue Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Write-Behind Queue                                 │
//! │                                                                         │
//! │  Store::dispatch                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PersistenceObserver ──► set(key, json) ──► mpsc (unbounded) ──┐       │
//! │       (returns immediately)                                     │       │
//! │                                                                 ▼       │
//! │                                          ┌──────────────────────────┐  │
//! │                                          │ worker (spawn_blocking)  │  │
//! │                                          │                          │  │
//! │                                          │  Set    → inner.set()    │  │
//! │                                          │  Remove → inner.remove() │  │
//! │                                          │  Flush  → ack oneshot    │  │
//! │                                          │                          │  │
//! │                                          │  failures: warn!, drop   │  │
//! │                                          └──────────────────────────┘  │
//! │                                                                         │
//! │  Commands are applied in order, so the last write for a key wins.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reads
//! `get` goes straight to the inner backend. While writes are still queued
//! it can return the previous value; call [`WriteBehindStorage::flush`]
//! first when that matters.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::storage::StorageBackend;

// =============================================================================
// Queue Commands
// =============================================================================

enum Command {
    Set { key: String, value: String },
    Remove { key: String },
    Flush(oneshot::Sender<()>),
}

// =============================================================================
// Write-Behind Storage
// =============================================================================

/// A storage backend whose writes never block the caller.
pub struct WriteBehindStorage {
    inner: Arc<dyn StorageBackend>,
    tx: mpsc::UnboundedSender<Command>,
}

impl WriteBehindStorage {
    /// Starts the background writer on the current tokio runtime.
    ///
    /// ## Errors
    /// `StorageUnavailable` when called outside a tokio runtime.
    pub fn spawn<B>(backend: B) -> StoreResult<Self>
    where
        B: StorageBackend + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            StoreError::StorageUnavailable("write-behind storage needs a tokio runtime".into())
        })?;

        let inner: Arc<dyn StorageBackend> = Arc::new(backend);
        let (tx, rx) = mpsc::unbounded_channel();

        let worker_backend = Arc::clone(&inner);
        runtime.spawn_blocking(move || run_worker(worker_backend, rx));

        Ok(WriteBehindStorage { inner, tx })
    }

    /// Waits until every write queued before this call has been applied.
    pub async fn flush(&self) -> StoreResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.enqueue(Command::Flush(ack_tx))?;

        ack_rx
            .await
            .map_err(|_| StoreError::StorageUnavailable("write-behind worker stopped".into()))
    }

    fn enqueue(&self, command: Command) -> StoreResult<()> {
        self.tx
            .send(command)
            .map_err(|_| StoreError::StorageUnavailable("write-behind worker stopped".into()))
    }
}

impl StorageBackend for WriteBehindStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.enqueue(Command::Set {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.enqueue(Command::Remove {
            key: key.to_string(),
        })
    }
}

/// Drains the queue until every sender is dropped.
fn run_worker(backend: Arc<dyn StorageBackend>, mut rx: mpsc::UnboundedReceiver<Command>) {
    debug!("Write-behind worker started");

    while let Some(command) = rx.blocking_recv() {
        match command {
            Command::Set { key, value } => {
                if let Err(e) = backend.set(&key, &value) {
                    warn!(key = %key, error = %e, "Write-behind set failed, dropping write");
                }
            }
            Command::Remove { key } => {
                if let Err(e) = backend.remove(&key) {
                    warn!(key = %key, error = %e, "Write-behind remove failed");
                }
            }
            Command::Flush(ack) => {
                // The flusher may have given up waiting.
                let _ = ack.send(());
            }
        }
    }

    info!("Write-behind worker stopped");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    struct BrokenStorage;

    impl StorageBackend for BrokenStorage {
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

    #[tokio::test]
    async fn test_writes_land_after_flush() {
        let memory = Arc::new(MemoryStorage::new());
        let storage = WriteBehindStorage::spawn(Arc::clone(&memory)).unwrap();

        storage.set("fashion-cart", "[1]").unwrap();
        storage.set("fashion-cart", "[1,2]").unwrap();
        storage.set("fashion-wishlist", "[]").unwrap();
        storage.remove("fashion-wishlist").unwrap();
        storage.flush().await.unwrap();

        assert_eq!(memory.get("fashion-cart").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(memory.get("fashion-wishlist").unwrap(), None);
        assert_eq!(storage.get("fashion-cart").unwrap().as_deref(), Some("[1,2]"));
    }

    #[tokio::test]
    async fn test_backend_failures_are_swallowed() {
        let storage = WriteBehindStorage::spawn(BrokenStorage).unwrap();

        assert!(storage.set("fashion-cart", "[]").is_ok());
        assert!(storage.remove("fashion-cart").is_ok());
        assert!(storage.flush().await.is_ok());
    }

    #[test]
    fn test_spawn_outside_runtime_fails() {
        let result = WriteBehindStorage::spawn(MemoryStorage::new());
        assert!(matches!(result, Err(StoreError::StorageUnavailable(_))));
    }
}
