//! Immutable collection snapshots and the mutations that produce them.
//!
//! A [`Snapshot`] is the whole ordered item collection at one point in time.
//! It is never modified: [`Snapshot::apply`] builds the next snapshot from
//! the previous one, so anyone still holding an older snapshot keeps a
//! consistent view.

use crate::item::{ItemId, TodoItem};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Position of a snapshot in the store's history.
///
/// Revisions start at 0 for the empty collection and increase by one for
/// every committed mutation.
///
/// # Examples
///
/// ```
/// use todo_store_core::snapshot::Revision;
///
/// let r0 = Revision::INITIAL;
/// assert!(r0.is_initial());
/// assert_eq!(r0.next(), Revision::new(1));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Revision(u64);

impl Revision {
    /// The revision of a freshly created store.
    pub const INITIAL: Self = Self(0);

    /// Create a new `Revision` with the given value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the revision number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Get the next revision (current + 1).
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Check if this is the initial revision (0).
    #[must_use]
    pub const fn is_initial(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Revision {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Revision> for u64 {
    fn from(revision: Revision) -> Self {
        revision.0
    }
}

/// A change to the collection.
///
/// Mutations are the unit of work queued on the store's sequencing context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    /// Replace the item with the same id in place, or append it.
    Save(TodoItem),
    /// Remove the item with this id, if present.
    Delete(ItemId),
}

impl Mutation {
    /// Short label used in logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Save(_) => "save",
            Self::Delete(_) => "delete",
        }
    }

    /// Id of the item this mutation targets.
    #[must_use]
    pub const fn item_id(&self) -> &ItemId {
        match self {
            Self::Save(item) => &item.id,
            Self::Delete(id) => id,
        }
    }
}

/// The whole item collection at one revision.
///
/// Cloning is cheap: the items are shared behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    revision: Revision,
    items: Arc<[TodoItem]>,
}

impl Snapshot {
    /// The empty collection at [`Revision::INITIAL`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            revision: Revision::INITIAL,
            items: Arc::from(Vec::new()),
        }
    }

    /// Revision of this snapshot.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// The ordered items.
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Shared handle to the ordered items.
    #[must_use]
    pub fn shared_items(&self) -> Arc<[TodoItem]> {
        Arc::clone(&self.items)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the collection holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn find(&self, id: &ItemId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Looks up an item by an optional id; `None` never matches.
    #[must_use]
    pub fn find_optional(&self, id: Option<&ItemId>) -> Option<&TodoItem> {
        id.and_then(|id| self.find(id))
    }

    /// Checks if an item with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.find(id).is_some()
    }

    /// Builds the snapshot that follows this one once `mutation` is applied.
    ///
    /// - `Save` of a known id replaces that entry at its position.
    /// - `Save` of an unknown id appends the item.
    /// - `Delete` drops every entry with the id; an unknown id leaves the
    ///   items as they are.
    ///
    /// The returned snapshot always carries the next revision.
    #[must_use]
    pub fn apply(&self, mutation: &Mutation) -> Self {
        let items: Vec<TodoItem> = match mutation {
            Mutation::Save(saved) if self.contains(&saved.id) => self
                .items
                .iter()
                .map(|item| if item.id == saved.id { saved.clone() } else { item.clone() })
                .collect(),
            Mutation::Save(saved) => self
                .items
                .iter()
                .cloned()
                .chain(std::iter::once(saved.clone()))
                .collect(),
            Mutation::Delete(id) => self.items.iter().filter(|item| item.id != *id).cloned().collect(),
        };

        Self {
            revision: self.revision.next(),
            items: Arc::from(items),
        }
    }

    /// Builds a snapshot by saving every item in order, starting from empty.
    ///
    /// Duplicate ids collapse into one entry holding the last value, at the
    /// position of the first occurrence.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
        items
            .into_iter()
            .fold(Self::empty(), |snapshot, item| snapshot.apply(&Mutation::Save(item)))
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(description: &str) -> TodoItem {
        TodoItem::new(description, Utc::now())
    }

    fn descriptions(snapshot: &Snapshot) -> Vec<&str> {
        snapshot.items().iter().map(|i| i.description.as_str()).collect()
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = Snapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert!(snapshot.revision().is_initial());
    }

    #[test]
    fn save_appends_new_items_in_order() {
        let (a, b, c) = (item("a"), item("b"), item("c"));
        let snapshot = Snapshot::empty()
            .apply(&Mutation::Save(a.clone()))
            .apply(&Mutation::Save(b.clone()))
            .apply(&Mutation::Save(c.clone()));

        assert_eq!(snapshot.items(), &[a, b, c]);
        assert_eq!(snapshot.revision(), Revision::new(3));
    }

    #[test]
    fn save_replaces_in_place() {
        let (a, b, c) = (item("a"), item("b"), item("c"));
        let before = Snapshot::from_items([a.clone(), b.clone(), c.clone()]);
        let after = before.apply(&Mutation::Save(b.clone().with_description("B")));

        assert_eq!(after.len(), 3);
        assert_eq!(descriptions(&after), vec!["a", "B", "c"]);
        assert_eq!(after.items()[1].id, b.id);
    }

    #[test]
    fn apply_leaves_previous_snapshot_untouched() {
        let a = item("a");
        let before = Snapshot::from_items([a.clone()]);
        let after = before.apply(&Mutation::Save(a.toggled()));

        assert!(!before.items()[0].completed);
        assert!(after.items()[0].completed);
        assert_eq!(after.revision(), before.revision().next());
    }

    #[test]
    fn delete_removes_matching_id() {
        let (a, b) = (item("a"), item("b"));
        let snapshot = Snapshot::from_items([a.clone(), b.clone()]).apply(&Mutation::Delete(a.id));

        assert_eq!(snapshot.items(), &[b]);
        assert!(snapshot.find(&a.id).is_none());
    }

    #[test]
    fn delete_unknown_id_keeps_items_but_advances_revision() {
        let snapshot = Snapshot::from_items([item("a")]);
        let after = snapshot.apply(&Mutation::Delete(ItemId::new()));

        assert_eq!(after.items(), snapshot.items());
        assert_eq!(after.revision(), snapshot.revision().next());
    }

    #[test]
    fn from_items_collapses_duplicate_ids() {
        let a = item("a");
        let snapshot = Snapshot::from_items([a.clone(), item("b"), a.clone().with_description("A")]);

        assert_eq!(descriptions(&snapshot), vec!["A", "b"]);
    }

    #[test]
    fn find_optional_with_none_is_absent() {
        let snapshot = Snapshot::from_items([item("a")]);
        assert!(snapshot.find_optional(None).is_none());
    }

    #[test]
    fn mutation_kind_and_target() {
        let a = item("a");
        assert_eq!(Mutation::Save(a.clone()).kind(), "save");
        assert_eq!(Mutation::Delete(a.id).kind(), "delete");
        assert_eq!(Mutation::Save(a.clone()).item_id(), &a.id);
    }

    #[test]
    fn revision_arithmetic() {
        assert_eq!(Revision::from(41_u64).next().value(), 42);
        assert_eq!(u64::from(Revision::new(7)), 7);
        assert_eq!(format!("{}", Revision::new(3)), "3");
        assert!(Revision::new(1) > Revision::INITIAL);
    }
}
