//! The seam between screens and the store.
//!
//! Motors depend on [`ItemRepository`] rather than on the concrete store so
//! tests can substitute a recording double.

use crate::error::Result;
use crate::item::{ItemId, TodoItem};
use crate::observable::Projection;
use crate::snapshot::Snapshot;
use std::future::Future;
use std::sync::Arc;

/// Read and write access to the item collection.
///
/// # Contract
///
/// - `current_items` never blocks and starts out empty.
/// - `save` replaces the entry with the same id in place, or appends.
/// - `delete` removes the entry with the id; a missing id is a no-op.
/// - Mutations are applied one at a time, in the order they obtain their
///   turn, and each is visible to every projection before the call returns.
pub trait ItemRepository: Send + Sync {
    /// Subscribes to the full snapshot.
    fn snapshots(&self) -> Projection<Snapshot>;

    /// Latest committed collection.
    fn current_items(&self) -> Arc<[TodoItem]> {
        self.snapshots().current().shared_items()
    }

    /// Observable of the full collection.
    fn items(&self) -> Projection<Arc<[TodoItem]>> {
        self.snapshots().map(|snapshot| snapshot.shared_items())
    }

    /// Saves an item (replace by id, or append).
    ///
    /// # Errors
    ///
    /// Implementation-specific; see the implementing type.
    fn save(&self, item: TodoItem) -> impl Future<Output = Result<()>> + Send;

    /// Deletes the item with this id, if any.
    ///
    /// # Errors
    ///
    /// Implementation-specific; see the implementing type.
    fn delete(&self, id: &ItemId) -> impl Future<Output = Result<()>> + Send;

    /// Live projection of one item; `None` id never matches.
    fn find_by_id(&self, id: Option<ItemId>) -> Projection<Option<TodoItem>> {
        self.snapshots()
            .map(move |snapshot| snapshot.find_optional(id.as_ref()).cloned())
    }
}
