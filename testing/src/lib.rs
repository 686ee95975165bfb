//! # Todo Store Testing
//!
//! Testing utilities and helpers for the todo store.
//!
//! This crate provides:
//! - A fixed clock and item fixtures for deterministic tests
//! - [`RecordingRepository`], a test double that records mutations
//! - [`MutationTest`], a Given-When-Then harness for snapshot transitions
//! - proptest strategies for items and mutation scripts
//!
//! ## Example
//!
//! ```ignore
//! use todo_store_testing::{fixtures, RecordingRepository};
//! use todo_store_runtime::ItemMotor;
//!
//! #[tokio::test]
//! async fn delete_passes_through() {
//!     let milk = fixtures::item("Buy milk");
//!     let repo = RecordingRepository::with_items([milk.clone()]);
//!     let motor = ItemMotor::new(repo.clone(), Some(milk.id));
//!
//!     motor.delete(&milk).unwrap();
//!     motor.flush().await.unwrap();
//!
//!     assert_eq!(repo.recorded(), vec![Mutation::Delete(milk.id)]);
//! }
//! ```

use chrono::{DateTime, TimeZone, Utc};
use todo_store_core::environment::Clock;


/// Recording repository test double
pub mod recording_repository;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, TimeZone, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_store_testing::mocks::FixedClock;
    /// use todo_store_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// The instant every fixture uses: 2025-01-01 00:00:00 UTC
    #[must_use]
    pub fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_time())
    }
}

/// Item and store fixtures
pub mod fixtures {
    use super::mocks::test_time;
    use todo_store_core::{ItemId, TodoItem};
    use todo_store_runtime::{StoreConfig, TodoStore};
    use uuid::Uuid;

    /// A new, open item created at the fixed test time.
    #[must_use]
    pub fn item(description: &str) -> TodoItem {
        TodoItem::new(description, test_time())
    }

    /// One open item per description, in order.
    #[must_use]
    pub fn items(descriptions: &[&str]) -> Vec<TodoItem> {
        descriptions.iter().map(|description| item(description)).collect()
    }

    /// A stable id derived from a small number, for readable assertions.
    #[must_use]
    pub fn id(n: u128) -> ItemId {
        ItemId::from_uuid(Uuid::from_u128(n))
    }

    /// A store that starts out holding `items`.
    #[must_use]
    pub fn store_with(items: impl IntoIterator<Item = TodoItem>) -> TodoStore {
        TodoStore::with_config(StoreConfig::default().with_initial_items(items))
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use super::fixtures::id;
    use super::mocks::test_time;
    use proptest::prelude::*;
    use todo_store_core::{Mutation, TodoItem};

    /// Number of distinct ids scripts draw from, so saves and deletes collide.
    pub const ID_POOL: u128 = 6;

    /// Non-blank descriptions.
    pub fn arb_description() -> impl Strategy<Value = String> {
        "[a-z][a-z ]{0,15}"
    }

    /// Items with ids drawn from [`ID_POOL`].
    pub fn arb_item() -> impl Strategy<Value = TodoItem> {
        (
            1..=ID_POOL,
            arb_description(),
            any::<bool>(),
            proptest::option::of("[a-z]{1,8}"),
        )
            .prop_map(|(n, description, completed, notes)| {
                TodoItem::with_id(id(n), description, test_time())
                    .with_completed(completed)
                    .with_notes(notes)
            })
    }

    /// A save or a delete over the shared id pool.
    pub fn arb_mutation() -> impl Strategy<Value = Mutation> {
        prop_oneof![
            3 => arb_item().prop_map(Mutation::Save),
            1 => (1..=ID_POOL).prop_map(|n| Mutation::Delete(id(n))),
        ]
    }

    /// Sequences of up to `max_len` mutations.
    pub fn arb_mutation_script(max_len: usize) -> impl Strategy<Value = Vec<Mutation>> {
        proptest::collection::vec(arb_mutation(), 0..=max_len)
    }
}

/// Install a test-friendly tracing subscriber.
///
/// Honours `RUST_LOG` and defaults to `warn`. Safe to call from every test;
/// only the first call installs anything.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use mutation_test::MutationTest;
pub use recording_repository::RecordingRepository;
