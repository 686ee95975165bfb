//! The in-memory store - sole owner of the item collection.

use crate::config::StoreConfig;
use crate::telemetry;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use todo_store_core::{
    ItemId, ItemRepository, Mutation, Projection, Result, Revision, Snapshot, StoreError, TodoItem,
};
use tokio::sync::{Mutex, MutexGuard, watch};

/// The store - single source of truth for the item collection
///
/// The store manages:
/// 1. The latest [`Snapshot`], published through a `watch` channel
/// 2. A FIFO turn lock that serializes every mutation
///
/// Reads never take the turn lock: they clone the `Arc` of the latest
/// snapshot. Writers wait for their turn, build the next snapshot from the
/// current one and publish it without awaiting in between, so no reader can
/// observe a half-applied mutation.
///
/// Cloning a `TodoStore` yields another handle to the same collection.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use todo_store_core::{ItemRepository, TodoItem};
/// use todo_store_runtime::TodoStore;
///
/// # async fn example() -> Result<(), todo_store_core::StoreError> {
/// let store = TodoStore::new();
/// let milk = TodoItem::new("Buy milk", Utc::now());
///
/// store.save(milk.clone()).await?;
/// assert_eq!(store.find_by_id(Some(milk.id)).current(), Some(milk.clone()));
///
/// store.delete(&milk.id).await?;
/// assert!(store.current_items().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TodoStore {
    inner: Arc<Inner>,
}

struct Inner {
    snapshots: watch::Sender<Snapshot>,
    turn: Mutex<()>,
    config: StoreConfig,
}

impl TodoStore {
    /// Create an empty store with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a store with custom configuration
    ///
    /// Seed items from [`StoreConfig::initial_items`] are applied as saves,
    /// so the first published revision equals the number of seed items.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        let initial = Snapshot::from_items(config.initial_items.iter().cloned());
        tracing::debug!(
            items = initial.len(),
            revision = %initial.revision(),
            "Creating store"
        );
        let (snapshots, _) = watch::channel(initial);

        Self {
            inner: Arc::new(Inner {
                snapshots,
                turn: Mutex::new(()),
                config,
            }),
        }
    }

    /// Configuration this store was created with
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Latest committed snapshot
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.inner.snapshots.borrow().clone()
    }

    /// Read the latest snapshot via a closure
    ///
    /// ```ignore
    /// let open = store.read(|s| s.items().iter().filter(|i| !i.completed).count());
    /// ```
    pub fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Snapshot) -> T,
    {
        let snapshot = self.snapshot();
        f(&snapshot)
    }

    /// Revision of the latest committed snapshot
    #[must_use]
    pub fn revision(&self) -> Revision {
        self.inner.snapshots.borrow().revision()
    }

    /// Number of live projections subscribed to this store
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.snapshots.receiver_count()
    }

    /// Apply a mutation and publish the resulting snapshot
    ///
    /// Waits for this mutation's turn (FIFO with respect to other callers),
    /// then replaces the whole collection in one step. Every projection can
    /// observe the new snapshot by the time this returns.
    ///
    /// Dropping the returned future before it obtains its turn means the
    /// mutation is never applied.
    ///
    /// # Returns
    ///
    /// The revision of the published snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if a queue timeout is configured and
    /// the turn was not obtained in time. The mutation is not applied.
    #[tracing::instrument(
        skip(self, mutation),
        name = "store_commit",
        fields(kind = mutation.kind(), item_id = %mutation.item_id())
    )]
    pub async fn commit(&self, mutation: Mutation) -> Result<Revision> {
        let _turn = self.acquire_turn().await?;
        tracing::trace!("Acquired mutation turn");

        let start = std::time::Instant::now();
        let next = self.inner.snapshots.borrow().apply(&mutation);
        let revision = next.revision();
        let len = next.len();
        self.inner.snapshots.send_replace(next);

        metrics::counter!(telemetry::MUTATIONS_TOTAL, "kind" => mutation.kind()).increment(1);
        metrics::histogram!(telemetry::COMMIT_DURATION).record(start.elapsed().as_secs_f64());
        // Note: Precision loss acceptable for metrics (item counts < 2^52)
        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!(telemetry::ITEMS).set(len as f64);

        tracing::debug!(%revision, items = len, "Committed mutation");
        Ok(revision)
    }

    async fn acquire_turn(&self) -> Result<MutexGuard<'_, ()>> {
        let Some(limit) = self.inner.config.queue_timeout else {
            return Ok(self.inner.turn.lock().await);
        };

        tokio::time::timeout(limit, self.inner.turn.lock())
            .await
            .map_err(|_| {
                tracing::warn!(timeout_ms = limit.as_millis(), "Timed out waiting for mutation turn");
                metrics::counter!(telemetry::MUTATIONS_TIMED_OUT).increment(1);
                StoreError::Timeout(limit)
            })
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoStore")
            .field("revision", &self.revision())
            .field("items", &self.inner.snapshots.borrow().len())
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl ItemRepository for TodoStore {
    fn snapshots(&self) -> Projection<Snapshot> {
        Projection::new(self.inner.snapshots.subscribe(), Snapshot::clone)
    }

    fn current_items(&self) -> Arc<[TodoItem]> {
        self.inner.snapshots.borrow().shared_items()
    }

    fn save(&self, item: TodoItem) -> impl Future<Output = Result<()>> + Send {
        let store = self.clone();

        async move {
            store.commit(Mutation::Save(item)).await?;
            Ok(())
        }
    }

    fn delete(&self, id: &ItemId) -> impl Future<Output = Result<()>> + Send {
        let store = self.clone();
        let id = *id;

        async move {
            store.commit(Mutation::Delete(id)).await?;
            Ok(())
        }
    }
}
