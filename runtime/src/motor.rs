//! Screen motors: what each screen observes and which mutations it fires.
//!
//! A motor pairs the projection a screen renders with a [`Dispatcher`] for
//! that screen's mutations. Mutations are fire-and-forget: the screen reacts
//! to the projection, not to the call. Dropping a motor (the screen going
//! away) cancels any of its mutations that have not been applied yet.

use crate::dispatcher::Dispatcher;
use todo_store_core::{
    Clock, ItemDraft, ItemId, ItemRepository, ItemViewState, Mutation, Projection, Result,
    RosterViewState, Snapshot, TodoItem,
};

/// Motor for the roster (list) screen.
#[derive(Debug)]
pub struct RosterMotor<R> {
    repository: R,
    dispatcher: Dispatcher,
}

impl<R> RosterMotor<R>
where
    R: ItemRepository + Clone + 'static,
{
    /// Create a motor over `repository`.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(repository: R) -> Self {
        let dispatcher = Dispatcher::spawn(repository.clone());
        Self {
            repository,
            dispatcher,
        }
    }

    /// Live roster state, recomputed on every store change.
    #[must_use]
    pub fn states(&self) -> Projection<RosterViewState> {
        self.repository
            .snapshots()
            .map(|snapshot: Snapshot| RosterViewState::from_snapshot(&snapshot))
    }

    /// Queue a save.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`](todo_store_core::StoreError::Closed)
    /// if the dispatcher has stopped.
    pub fn save(&self, item: TodoItem) -> Result<()> {
        self.dispatcher.dispatch(Mutation::Save(item))
    }

    /// Queue a save of `item` with its completion flag flipped.
    ///
    /// # Errors
    ///
    /// See [`save`](Self::save).
    pub fn toggle(&self, item: &TodoItem) -> Result<()> {
        self.save(item.toggled())
    }

    /// Wait until every mutation queued so far has been applied.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::flush`].
    pub async fn flush(&self) -> Result<()> {
        self.dispatcher.flush().await
    }
}

/// Motor for a single-item screen (display or edit).
///
/// Created with the id of the item to show, or `None` to create a new item.
#[derive(Debug)]
pub struct ItemMotor<R> {
    repository: R,
    id: Option<ItemId>,
    dispatcher: Dispatcher,
}

impl<R> ItemMotor<R>
where
    R: ItemRepository + Clone + 'static,
{
    /// Create a motor for the item with `id` (or for a new item).
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(repository: R, id: Option<ItemId>) -> Self {
        let dispatcher = Dispatcher::spawn(repository.clone());
        Self {
            repository,
            id,
            dispatcher,
        }
    }

    /// Id this motor was created for.
    #[must_use]
    pub const fn id(&self) -> Option<&ItemId> {
        self.id.as_ref()
    }

    /// True when there is an existing item to delete.
    #[must_use]
    pub const fn can_delete(&self) -> bool {
        self.id.is_some()
    }

    /// Live state of the item, recomputed on every store change.
    #[must_use]
    pub fn states(&self) -> Projection<ItemViewState> {
        let id = self.id;
        self.repository
            .snapshots()
            .map(move |snapshot: Snapshot| ItemViewState::from_snapshot(&snapshot, id.as_ref()))
    }

    /// Queue a save.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`](todo_store_core::StoreError::Closed)
    /// if the dispatcher has stopped.
    pub fn save(&self, item: TodoItem) -> Result<()> {
        self.dispatcher.dispatch(Mutation::Save(item))
    }

    /// Queue deletion of `item` (by id).
    ///
    /// # Errors
    ///
    /// See [`save`](Self::save).
    pub fn delete(&self, item: &TodoItem) -> Result<()> {
        self.dispatcher.dispatch(Mutation::Delete(item.id))
    }

    /// Build an item from `draft` and queue its save.
    ///
    /// Edits the item currently shown, keeping its id and creation time, or
    /// creates a new item when none is shown.
    ///
    /// # Returns
    ///
    /// The item that was queued for saving.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidItem`](todo_store_core::StoreError::InvalidItem) if the draft fails validation
    /// - [`StoreError::Closed`](todo_store_core::StoreError::Closed) if the dispatcher has stopped
    #[tracing::instrument(skip(self, draft, clock), fields(item_id = ?self.id))]
    pub fn submit(&self, draft: &ItemDraft, clock: &dyn Clock) -> Result<TodoItem> {
        let shown = self.states().current().item;
        let item = draft.apply(shown.as_ref(), clock)?;
        tracing::debug!(new = shown.is_none(), "Submitting item");

        self.save(item.clone())?;
        Ok(item)
    }

    /// Wait until every mutation queued so far has been applied.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::flush`].
    pub async fn flush(&self) -> Result<()> {
        self.dispatcher.flush().await
    }
}
