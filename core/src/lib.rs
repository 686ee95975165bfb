//! # Todo Store Core
//!
//! Domain types and observable building blocks for the todo store.
//!
//! This crate is runtime-agnostic: it defines what an item is, how the
//! collection evolves, and how screens derive their state from it. The
//! concrete store and the mutation dispatcher live in `todo-store-runtime`.
//!
//! ## Core Concepts
//!
//! - **Item**: an immutable [`TodoItem`] identified by its [`ItemId`]
//! - **Snapshot**: the whole ordered collection at one [`Revision`]
//! - **Mutation**: a save or delete, applied with [`Snapshot::apply`]
//! - **Projection**: a live value derived from the latest snapshot
//! - **Repository**: the [`ItemRepository`] seam screens depend on
//!
//! ## Example
//!
//! ```
//! use todo_store_core::{Mutation, Snapshot, TodoItem};
//! use chrono::Utc;
//!
//! let milk = TodoItem::new("Buy milk", Utc::now());
//! let snapshot = Snapshot::empty()
//!     .apply(&Mutation::Save(milk.clone()))
//!     .apply(&Mutation::Save(milk.toggled()));
//!
//! assert_eq!(snapshot.len(), 1);
//! assert!(snapshot.items()[0].completed);
//!
//! let snapshot = snapshot.apply(&Mutation::Delete(milk.id));
//! assert!(snapshot.is_empty());
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

pub mod draft;
pub mod environment;
pub mod error;
pub mod item;
pub mod observable;
pub mod repository;
pub mod snapshot;
pub mod view_state;

pub use draft::ItemDraft;
pub use environment::{Clock, SystemClock};
pub use error::{ItemError, Result, StoreError};
pub use item::{ItemId, ParseItemIdError, TodoItem};
pub use observable::Projection;
pub use repository::ItemRepository;
pub use snapshot::{Mutation, Revision, Snapshot};
pub use view_state::{ItemViewState, RosterViewState};
