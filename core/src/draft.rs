//! User-editable fields of an item, before they are validated.
//!
//! An edit screen works on an [`ItemDraft`]. Submitting it either creates a
//! brand-new item (nothing was being displayed) or produces a replacement for
//! the displayed item that keeps its id and creation time.

use crate::environment::Clock;
use crate::error::{ItemError, MAX_DESCRIPTION_LEN};
use crate::item::TodoItem;
use serde::{Deserialize, Serialize};

/// Editable fields of a to-do item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    /// Description as typed
    pub description: String,
    /// Completion checkbox
    pub completed: bool,
    /// Notes as typed; blank notes are stored as `None`
    pub notes: String,
}

impl ItemDraft {
    /// Creates a draft with just a description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Pre-fills a draft from an existing item.
    #[must_use]
    pub fn from_item(item: &TodoItem) -> Self {
        Self {
            description: item.description.clone(),
            completed: item.completed,
            notes: item.notes.clone().unwrap_or_default(),
        }
    }

    /// Sets the completion checkbox.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Checks the draft without building anything.
    ///
    /// # Errors
    ///
    /// - [`ItemError::EmptyDescription`] if the description is blank
    /// - [`ItemError::DescriptionTooLong`] if the trimmed description exceeds [`MAX_DESCRIPTION_LEN`] characters
    pub fn validate(&self) -> Result<(), ItemError> {
        if self.description.trim().is_empty() {
            return Err(ItemError::EmptyDescription);
        }

        let len = self.description.trim().chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(ItemError::DescriptionTooLong {
                len,
                max: MAX_DESCRIPTION_LEN,
            });
        }

        Ok(())
    }

    /// Builds the item to save.
    ///
    /// With no `existing` item a new one is created with a fresh id and
    /// `clock.now()` as its creation time. Otherwise the existing item is
    /// copied with the edited fields replaced.
    ///
    /// # Errors
    ///
    /// Returns the [`ItemError`] reported by [`validate`](Self::validate).
    pub fn apply(&self, existing: Option<&TodoItem>, clock: &dyn Clock) -> Result<TodoItem, ItemError> {
        self.validate()?;

        let notes = Some(self.notes.trim())
            .filter(|notes| !notes.is_empty())
            .map(str::to_string);

        let base = match existing {
            Some(item) => item.clone(),
            None => TodoItem::new(String::new(), clock.now()),
        };

        Ok(base
            .with_description(self.description.trim())
            .with_completed(self.completed)
            .with_notes(notes))
    }
}
