//! Per-screen presentation state derived from the store.

use crate::item::{ItemId, TodoItem};
use crate::snapshot::Snapshot;
use std::sync::Arc;

/// State of the roster (list) screen: the whole collection, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterViewState {
    /// All items, in store order
    pub items: Arc<[TodoItem]>,
}

impl RosterViewState {
    /// Wraps a collection.
    #[must_use]
    pub const fn new(items: Arc<[TodoItem]>) -> Self {
        Self { items }
    }

    /// Derives the roster state from a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::new(snapshot.shared_items())
    }

    /// True when the "nothing to do" indicator should be shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of completed items.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }
}

impl Default for RosterViewState {
    fn default() -> Self {
        Self::new(Arc::from(Vec::new()))
    }
}

/// State of a single-item screen (display or edit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemViewState {
    /// The item, or `None` when creating a new one or the id is unknown
    pub item: Option<TodoItem>,
}

impl ItemViewState {
    /// Wraps an optional item.
    #[must_use]
    pub const fn new(item: Option<TodoItem>) -> Self {
        Self { item }
    }

    /// Derives the state for `id` from a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot, id: Option<&ItemId>) -> Self {
        Self::new(snapshot.find_optional(id).cloned())
    }

    /// True when no item is shown, so the screen acts as "create new".
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.item.is_none()
    }
}
