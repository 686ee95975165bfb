//! Store configuration.

use std::time::Duration;
use todo_store_core::TodoItem;

/// Configuration for [`TodoStore`](crate::TodoStore) instances
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use todo_store_core::ItemRepository;
/// use todo_store_runtime::{StoreConfig, TodoStore};
///
/// let config = StoreConfig::default().with_queue_timeout(Duration::from_secs(2));
/// let store = TodoStore::with_config(config);
/// assert!(store.current_items().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Items the store starts with, applied in order with save semantics
    /// (a repeated id replaces the earlier entry).
    pub initial_items: Vec<TodoItem>,
    /// Longest a mutation may wait for its turn before giving up with
    /// [`StoreError::Timeout`](todo_store_core::StoreError::Timeout).
    /// `None` waits forever.
    pub queue_timeout: Option<Duration>,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(initial_items: Vec<TodoItem>, queue_timeout: Option<Duration>) -> Self {
        Self {
            initial_items,
            queue_timeout,
        }
    }

    /// Set the items the store starts with
    #[must_use]
    pub fn with_initial_items(mut self, items: impl IntoIterator<Item = TodoItem>) -> Self {
        self.initial_items = items.into_iter().collect();
        self
    }

    /// Set the queue timeout
    #[must_use]
    pub const fn with_queue_timeout(mut self, timeout: Duration) -> Self {
        self.queue_timeout = Some(timeout);
        self
    }
}
