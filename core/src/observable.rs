//! Live, derived views over the store's snapshots.
//!
//! A [`Projection`] pairs a subscription to the store's snapshot channel with
//! a pure derivation `Fn(&Snapshot) -> T`. It holds no copy of the data: the
//! value is recomputed from the latest snapshot whenever it is read.
//!
//! # Delivery
//!
//! - A new projection can read the latest value immediately.
//! - [`Projection::changed`] resolves once per newly observed snapshot, in
//!   commit order. Revisions seen by one projection never go backwards.
//! - Delivery is conflating: an observer that is slower than the writers
//!   skips intermediate snapshots but always ends on the latest one.
//!   Compare [`Projection::revision`] values to detect skipped revisions.
//!
//! # Example
//!
//! ```ignore
//! let mut open = store.items().map(|items| {
//!     items.iter().filter(|item| !item.completed).count()
//! });
//!
//! println!("{} open items", open.current());
//! while let Ok(count) = open.changed().await {
//!     println!("{count} open items");
//! }
//! ```

use crate::error::{Result, StoreError};
use crate::snapshot::{Revision, Snapshot};
use futures::Stream;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Type alias for projection derivation functions
type Derive<T> = Arc<dyn Fn(&Snapshot) -> T + Send + Sync>;

/// A continuously updated, read-only value derived from the store.
pub struct Projection<T> {
    source: watch::Receiver<Snapshot>,
    derive: Derive<T>,
    seen: Revision,
}

impl<T> Projection<T> {
    /// Creates a projection over a snapshot subscription.
    pub fn new<F>(source: watch::Receiver<Snapshot>, derive: F) -> Self
    where
        F: Fn(&Snapshot) -> T + Send + Sync + 'static,
    {
        let seen = source.borrow().revision();
        Self {
            source,
            derive: Arc::new(derive),
            seen,
        }
    }

    /// Derives the value from the latest snapshot.
    ///
    /// Never blocks on writers beyond the instant needed to clone the
    /// snapshot handle.
    #[must_use]
    pub fn current(&self) -> T {
        let snapshot = self.source.borrow().clone();
        (self.derive)(&snapshot)
    }

    /// Derives the value from the latest snapshot and marks it as seen, so
    /// the next [`changed`](Self::changed) waits for a newer one.
    pub fn current_and_mark_seen(&mut self) -> T {
        let snapshot = self.source.borrow_and_update().clone();
        self.seen = snapshot.revision();
        (self.derive)(&snapshot)
    }

    /// Revision of the snapshot last marked seen.
    ///
    /// This is the revision the value returned by the last
    /// [`changed`](Self::changed) or
    /// [`current_and_mark_seen`](Self::current_and_mark_seen) was derived
    /// from, even if newer snapshots have been published since.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.seen
    }

    /// Revision of the latest published snapshot.
    #[must_use]
    pub fn latest_revision(&self) -> Revision {
        self.source.borrow().revision()
    }

    /// Waits for the next snapshot and returns the recomputed value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`] once the store has been dropped and no
    /// unseen snapshot remains.
    pub async fn changed(&mut self) -> Result<T> {
        self.source.changed().await.map_err(|_| StoreError::Closed)?;
        Ok(self.current_and_mark_seen())
    }

    /// True when a snapshot newer than the last one marked seen is waiting.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`] once the store has been dropped.
    pub fn has_changed(&self) -> Result<bool> {
        self.source.has_changed().map_err(|_| StoreError::Closed)
    }

    /// Composes a further pure derivation on top of this projection.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Projection<U>
    where
        T: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let derive = self.derive;
        Projection {
            source: self.source,
            derive: Arc::new(move |snapshot: &Snapshot| f(derive(snapshot))),
            seen: self.seen,
        }
    }

    /// Turns the projection into a stream.
    ///
    /// The stream yields the current value first, then one value per
    /// observed snapshot, and ends when the store is dropped.
    pub fn into_stream(mut self) -> impl Stream<Item = T> + Send
    where
        T: Send + 'static,
    {
        async_stream::stream! {
            yield self.current_and_mark_seen();
            while let Ok(value) = self.changed().await {
                yield value;
            }
        }
    }
}

impl<T> Clone for Projection<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            derive: Arc::clone(&self.derive),
            seen: self.seen,
        }
    }
}

impl<T> fmt::Debug for Projection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection")
            .field("seen", &self.seen)
            .field("latest", &self.latest_revision())
            .finish_non_exhaustive()
    }
}
