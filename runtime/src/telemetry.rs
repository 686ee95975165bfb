//! Metric names recorded by the store and the dispatcher.
//!
//! Metrics are emitted through the `metrics` facade; nothing is recorded
//! until the application installs a recorder (for example the Prometheus
//! exporter used by the demo).

use metrics::{Unit, describe_counter, describe_gauge, describe_histogram};

/// Committed mutations, labelled by `kind` (`save` or `delete`).
pub const MUTATIONS_TOTAL: &str = "todo_store.mutations.total";

/// Mutations that gave up waiting for their turn.
pub const MUTATIONS_TIMED_OUT: &str = "todo_store.mutations.timed_out";

/// Number of items in the latest snapshot.
pub const ITEMS: &str = "todo_store.items";

/// Time spent building and publishing a snapshot.
pub const COMMIT_DURATION: &str = "todo_store.commit.duration_seconds";

/// Dispatched mutations the repository rejected, labelled by `kind`.
pub const DISPATCH_FAILED: &str = "todo_store.dispatch.failed";

/// Register descriptions for every store metric with the installed recorder.
pub fn describe() {
    describe_counter!(MUTATIONS_TOTAL, "Committed store mutations");
    describe_counter!(
        MUTATIONS_TIMED_OUT,
        "Mutations that timed out waiting for their turn"
    );
    describe_gauge!(ITEMS, "Items in the latest snapshot");
    describe_histogram!(
        COMMIT_DURATION,
        Unit::Seconds,
        "Time spent building and publishing a snapshot"
    );
    describe_counter!(DISPATCH_FAILED, "Dispatched mutations that failed");
}
