//! The to-do item and its identifier.
//!
//! Items are immutable values: every edit produces a new [`TodoItem`] that
//! keeps the original `id` and `created_on`, so "updating" an item always
//! means saving a replacement for the entry with the same id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error type for `ItemId` parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid item ID: {0}")]
pub struct ParseItemIdError(String);

/// Unique identifier for a to-do item.
///
/// Generated once when the item is created and never changed afterwards.
/// It is the only key used to decide whether two values describe the same
/// underlying item.
///
/// # Examples
///
/// ```
/// use todo_store_core::item::ItemId;
///
/// let id = ItemId::new();
/// let parsed: ItemId = id.to_string().parse().unwrap();
/// assert_eq!(parsed, id);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Creates a new random `ItemId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an `ItemId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ParseItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| ParseItemIdError(format!("{s:?}: {e}")))
    }
}

impl From<Uuid> for ItemId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// A single to-do entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: ItemId,
    /// What needs doing
    pub description: String,
    /// Whether the item has been done
    pub completed: bool,
    /// Free-form notes, if any
    pub notes: Option<String>,
    /// When the item was created
    pub created_on: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a new, not yet completed item with a fresh id.
    #[must_use]
    pub fn new(description: impl Into<String>, created_on: DateTime<Utc>) -> Self {
        Self::with_id(ItemId::new(), description, created_on)
    }

    /// Creates a new item with an explicit id.
    #[must_use]
    pub fn with_id(id: ItemId, description: impl Into<String>, created_on: DateTime<Utc>) -> Self {
        Self {
            id,
            description: description.into(),
            completed: false,
            notes: None,
            created_on,
        }
    }

    /// Returns a copy with the description replaced.
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    /// Returns a copy with the completion flag replaced.
    #[must_use]
    pub fn with_completed(self, completed: bool) -> Self {
        Self { completed, ..self }
    }

    /// Returns a copy with the notes replaced.
    #[must_use]
    pub fn with_notes(self, notes: Option<String>) -> Self {
        Self { notes, ..self }
    }

    /// Returns a copy with the completion flag flipped.
    #[must_use]
    pub fn toggled(&self) -> Self {
        self.clone().with_completed(!self.completed)
    }

    /// True when both values describe the same underlying item.
    ///
    /// List renderers use this to keep row identity across updates.
    #[must_use]
    pub fn is_same_item(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// True when nothing a list row displays has changed.
    ///
    /// Only `id`, `completed` and `description` are compared; notes and the
    /// creation time are not shown in a row.
    #[must_use]
    pub fn has_same_contents(&self, other: &Self) -> bool {
        self.id == other.id
            && self.completed == other.completed
            && self.description == other.description
    }
}
