//! # Todo Store Runtime
//!
//! Runtime implementation of the todo store.
//!
//! ## Core Components
//!
//! - **Store**: [`TodoStore`] owns the item collection, serializes mutations
//!   and publishes every committed snapshot
//! - **Dispatcher**: [`Dispatcher`] applies fire-and-forget mutations on a
//!   single worker task, in queue order
//! - **Motors**: [`RosterMotor`] and [`ItemMotor`] expose the state a screen
//!   renders and the mutations it may fire
//!
//! ## Example
//!
//! ```no_run
//! use chrono::Utc;
//! use todo_store_core::{ItemRepository, TodoItem};
//! use todo_store_runtime::{RosterMotor, TodoStore};
//!
//! # async fn example() -> Result<(), todo_store_core::StoreError> {
//! let store = TodoStore::new();
//! let roster = RosterMotor::new(store.clone());
//! let mut states = roster.states();
//!
//! roster.save(TodoItem::new("Buy milk", Utc::now()))?;
//!
//! let state = states.changed().await?;
//! assert_eq!(state.len(), 1);
//! # Ok(())
//! # }
//! ```

/// Store configuration
pub mod config;

/// Single-writer mutation queue
pub mod dispatcher;

/// Screen motors
pub mod motor;

/// The in-memory store
pub mod store;

/// Metric names and descriptions
pub mod telemetry;

pub use config::StoreConfig;
pub use dispatcher::Dispatcher;
pub use motor::{ItemMotor, RosterMotor};
pub use store::TodoStore;

// Re-export the error type so callers need not depend on the core crate
pub use todo_store_core::StoreError;
