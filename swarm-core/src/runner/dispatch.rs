use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// One intended attempt. `seq` is the 0-based dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WorkItem {
    pub(crate) seq: u64,
}

/// Feeds `total` work items into the bounded queue, preferring cancellation over enqueueing.
///
/// Returns how many items were handed to the queue. The queue closes when this returns (the
/// sender is dropped), which is what lets idle workers exit.
pub(crate) async fn dispatch(
    total: u64,
    queue: mpsc::Sender<WorkItem>,
    cancel: CancellationToken,
) -> u64 {
    let mut dispatched = 0u64;

    while dispatched < total {
        let item = WorkItem { seq: dispatched };
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!(dispatched, total, "dispatch stopped by cancellation");
                break;
            }
            res = queue.send(item) => {
                if res.is_err() {
                    // Every worker is gone; nothing would ever pick the item up.
                    break;
                }
            }
        }
        dispatched += 1;
    }

    dispatched
}
