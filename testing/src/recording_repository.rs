//! Recording repository for testing motors in isolation
//!
//! [`RecordingRepository`] stands in for the store behind a motor. It records
//! every mutation it is asked to apply, in the order it receives them, and
//! leaves its published collection alone so tests control exactly what the
//! motor observes.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on a poisoned lock

use std::future::Future;
use std::sync::{Arc, Mutex};
use todo_store_core::{ItemId, ItemRepository, Mutation, Projection, Result, Snapshot, TodoItem};
use tokio::sync::watch;

/// Repository double that records mutations instead of applying them.
///
/// Clones share the same recording and the same published collection.
///
/// # Example
///
/// ```
/// use todo_store_testing::{fixtures, RecordingRepository};
/// use todo_store_core::{ItemRepository, Mutation};
///
/// # async fn example() -> Result<(), todo_store_core::StoreError> {
/// let milk = fixtures::item("Buy milk");
/// let repo = RecordingRepository::with_items([milk.clone()]);
///
/// repo.delete(&milk.id).await?;
///
/// assert_eq!(repo.recorded(), vec![Mutation::Delete(milk.id)]);
/// // The collection is unchanged
/// assert_eq!(repo.current_items().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RecordingRepository {
    recorded: Arc<Mutex<Vec<Mutation>>>,
    snapshots: Arc<watch::Sender<Snapshot>>,
    open: Arc<watch::Sender<bool>>,
}

impl RecordingRepository {
    /// Create a repository publishing an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::with_items([])
    }

    /// Create a repository publishing `items`
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
        let (snapshots, _) = watch::channel(Snapshot::from_items(items));
        let (open, _) = watch::channel(true);

        Self {
            recorded: Arc::new(Mutex::new(Vec::new())),
            snapshots: Arc::new(snapshots),
            open: Arc::new(open),
        }
    }

    /// Mutations received so far, in arrival order
    #[must_use]
    pub fn recorded(&self) -> Vec<Mutation> {
        self.recorded.lock().unwrap().clone()
    }

    /// Forget recorded mutations (for test isolation)
    pub fn clear(&self) {
        self.recorded.lock().unwrap().clear();
    }

    /// Publish `mutation` to observers as if a real store had applied it
    ///
    /// Not recorded.
    pub fn publish(&self, mutation: &Mutation) {
        let next = self.snapshots.borrow().apply(mutation);
        self.snapshots.send_replace(next);
    }

    /// Hold every `save` and `delete` until [`resume`](Self::resume)
    ///
    /// Held calls are recorded only once they are released.
    pub fn pause(&self) {
        self.open.send_replace(false);
    }

    /// Release held calls
    pub fn resume(&self) {
        self.open.send_replace(true);
    }

    async fn record(&self, mutation: Mutation) -> Result<()> {
        let mut open = self.open.subscribe();
        // The sender lives in `self`, so this only ends once the gate opens
        let _ = open.wait_for(|open| *open).await;

        tracing::trace!(kind = mutation.kind(), "Recording mutation");
        self.recorded.lock().unwrap().push(mutation);
        Ok(())
    }
}

impl Default for RecordingRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRepository for RecordingRepository {
    fn snapshots(&self) -> Projection<Snapshot> {
        Projection::new(self.snapshots.subscribe(), Snapshot::clone)
    }

    fn save(&self, item: TodoItem) -> impl Future<Output = Result<()>> + Send {
        let repo = self.clone();
        async move { repo.record(Mutation::Save(item)).await }
    }

    fn delete(&self, id: &ItemId) -> impl Future<Output = Result<()>> + Send {
        let repo = self.clone();
        let id = *id;
        async move { repo.record(Mutation::Delete(id)).await }
    }
}
