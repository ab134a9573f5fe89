use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

use super::dispatch::WorkItem;
use super::outcome::Outcome;

/// Shared consumer end of the dispatch queue. Workers take turns holding the lock while they
/// wait for the next item.
pub(crate) type WorkQueue = Arc<Mutex<mpsc::Receiver<WorkItem>>>;

async fn next_item(queue: &WorkQueue) -> Option<WorkItem> {
    queue.lock().await.recv().await
}

/// One long-lived member of the fixed pool. The pool size is the concurrency bound: a worker runs
/// at most one attempt at a time and only starts the next after reporting the previous outcome.
pub(crate) async fn worker<F, Fut>(
    id: usize,
    queue: WorkQueue,
    outcomes: mpsc::Sender<Outcome>,
    cancel: CancellationToken,
    attempt: F,
) where
    F: Fn(CancellationToken) -> Fut,
    Fut: Future<Output = Outcome>,
{
    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            item = next_item(&queue) => item,
        };

        let Some(item) = next else {
            return;
        };

        let outcome = attempt(cancel.clone()).await;
        tracing::trace!(worker = id, seq = item.seq, ok = outcome.is_success(), "attempt done");
        if outcomes.send(outcome).await.is_err() {
            return;
        }
    }

    // Items the dispatcher queued before it saw the cancellation were already handed out; each
    // still owes exactly one outcome, without touching the network.
    while let Some(item) = next_item(&queue).await {
        tracing::trace!(worker = id, seq = item.seq, "attempt skipped after cancellation");
        if outcomes.send(Outcome::cancelled()).await.is_err() {
            return;
        }
    }
}
