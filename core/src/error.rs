//! Error types shared by the store, its projections and the motors.

use std::time::Duration;
use thiserror::Error;

/// Maximum number of characters accepted in an item description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Validation errors raised when building an item from user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// The description is empty once surrounding whitespace is removed.
    #[error("Item description cannot be empty")]
    EmptyDescription,

    /// The description exceeds [`MAX_DESCRIPTION_LEN`] characters.
    #[error("Item description too long ({len} characters, max {max})")]
    DescriptionTooLong {
        /// Length of the rejected description, in characters
        len: usize,
        /// Maximum accepted length
        max: usize,
    },
}

/// Errors that can occur while mutating or observing the store.
///
/// Saving and deleting valid items never fails under the default
/// configuration; every variant here is tied to an explicit lifecycle or
/// configuration condition.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store (or the dispatcher worker) is gone.
    ///
    /// Returned by [`Projection::changed`](crate::observable::Projection::changed)
    /// once every store handle has been dropped, and by a dispatcher whose
    /// worker task has stopped.
    #[error("Store is closed")]
    Closed,

    /// A mutation waited longer than the configured queue timeout for its turn.
    ///
    /// The mutation was not applied.
    #[error("Timed out after {0:?} waiting for a mutation turn")]
    Timeout(Duration),

    /// The item could not be built from the submitted draft.
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] ItemError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
