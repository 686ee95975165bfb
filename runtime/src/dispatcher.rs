//! Single-writer mutation queue.
//!
//! Screens fire mutations and move on; the [`Dispatcher`] owns one worker
//! task that applies them to the repository strictly in the order they
//! were queued. Dropping the dispatcher cancels whatever is still queued.

use crate::telemetry;
use std::fmt;
use todo_store_core::{ItemRepository, Mutation, Result, StoreError};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Work items processed by the worker, in queue order.
enum Job {
    Apply(Mutation),
    Barrier(oneshot::Sender<()>),
}

/// Handle to a worker task that applies mutations one at a time.
///
/// # Example
///
/// ```ignore
/// let dispatcher = Dispatcher::spawn(store.clone());
/// dispatcher.dispatch(Mutation::Save(item))?;
/// dispatcher.dispatch(Mutation::Delete(other.id))?;
///
/// // Both mutations are applied, in that order
/// dispatcher.flush().await?;
/// ```
pub struct Dispatcher {
    queue: mpsc::UnboundedSender<Job>,
    worker: JoinHandle<()>,
}

impl Dispatcher {
    /// Start the worker task for `repository`.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn<R>(repository: R) -> Self
    where
        R: ItemRepository + 'static,
    {
        let (queue, jobs) = mpsc::unbounded_channel();
        let worker = tokio::spawn(
            run_worker(repository, jobs).instrument(tracing::debug_span!("mutation_dispatcher")),
        );

        Self { queue, worker }
    }

    /// Queue a mutation without waiting for it to be applied.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`] if the worker task has panicked. The
    /// worker otherwise lives as long as the dispatcher: repository errors
    /// are logged and skipped, never fatal.
    pub fn dispatch(&self, mutation: Mutation) -> Result<()> {
        tracing::trace!(kind = mutation.kind(), item_id = %mutation.item_id(), "Queueing mutation");
        self.queue
            .send(Job::Apply(mutation))
            .map_err(|_| StoreError::Closed)
    }

    /// Wait until every mutation queued before this call has been applied.
    ///
    /// A mutation the repository rejected counts as applied here.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`] if the worker task has panicked.
    pub async fn flush(&self) -> Result<()> {
        let (done, applied) = oneshot::channel();
        self.queue
            .send(Job::Barrier(done))
            .map_err(|_| StoreError::Closed)?;
        applied.await.map_err(|_| StoreError::Closed)
    }

    /// True once the worker task is gone.
    ///
    /// Only a panic inside the repository can end the worker while the
    /// dispatcher is still alive.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.queue.is_closed()
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        // Queued mutations are discarded, not applied.
        self.worker.abort();
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

async fn run_worker<R>(repository: R, mut jobs: mpsc::UnboundedReceiver<Job>)
where
    R: ItemRepository,
{
    tracing::debug!("Dispatcher worker started");

    while let Some(job) = jobs.recv().await {
        match job {
            Job::Apply(mutation) => apply(&repository, mutation).await,
            Job::Barrier(done) => {
                let _ = done.send(());
            },
        }
    }

    tracing::debug!("Dispatcher queue closed, worker exiting");
}

async fn apply<R>(repository: &R, mutation: Mutation)
where
    R: ItemRepository,
{
    let kind = mutation.kind();
    let result = match mutation {
        Mutation::Save(item) => repository.save(item).await,
        Mutation::Delete(id) => repository.delete(&id).await,
    };

    if let Err(error) = result {
        tracing::warn!(kind, %error, "Dispatched mutation was not applied");
        metrics::counter!(telemetry::DISPATCH_FAILED, "kind" => kind).increment(1);
    }
}
