use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::aggregate::Aggregator;
use super::config::RunConfig;
use super::dispatch::dispatch;
use super::error::{Error, Result};
use super::executor::RequestExecutor;
use super::outcome::Outcome;
use super::progress::ProgressFn;
use super::summary::RunSummary;
use super::worker::worker;

/// Upper bound on pool size; a larger `concurrency` still runs, just no wider than this.
const MAX_WORKERS: u64 = 1 << 20;

/// Checks the run shape and returns the pool size to use.
fn worker_count(total_requests: u64, concurrency: u64) -> Result<usize> {
    if total_requests == 0 {
        return Err(Error::InvalidArgument { name: "requests" });
    }
    if concurrency == 0 {
        return Err(Error::InvalidArgument {
            name: "concurrency",
        });
    }

    let workers = concurrency.min(total_requests);
    if workers > MAX_WORKERS {
        tracing::warn!(
            requested = workers,
            max = MAX_WORKERS,
            "concurrency capped at the worker pool limit"
        );
    }
    Ok(usize::try_from(workers.min(MAX_WORKERS)).unwrap_or(usize::MAX))
}

/// Forwards `handle`'s result, cancelling the run as soon as the task fails.
fn supervise<T: Send + 'static>(
    handle: JoinHandle<T>,
    cancel: CancellationToken,
) -> JoinHandle<Result<T>> {
    tokio::spawn(async move {
        handle.await.map_err(|err| {
            tracing::error!(error = %err, "run task failed, cancelling the rest");
            cancel.cancel();
            Error::from(err)
        })
    })
}

/// Issues `cfg.requests` GET requests against `cfg.url`, at most `cfg.concurrency` at a time.
///
/// Firing `cancel` stops dispatch and aborts in-flight requests; the run still returns a summary.
/// Only invalid arguments (and internal task failures) are reported as errors.
pub async fn run(
    cancel: &CancellationToken,
    cfg: &RunConfig,
    progress: Option<ProgressFn>,
) -> Result<RunSummary> {
    // Validate before building the client so a bad run shape never touches the network.
    worker_count(cfg.requests, cfg.concurrency)?;

    let executor = Arc::new(RequestExecutor::from_config(cfg));
    tracing::info!(
        url = executor.url(),
        requests = cfg.requests,
        concurrency = cfg.concurrency,
        timeout = ?cfg.timeout,
        "starting run"
    );

    run_with(
        cancel,
        cfg.requests,
        cfg.concurrency,
        progress,
        move |cancel| {
            let executor = executor.clone();
            async move { executor.execute(&cancel).await }
        },
    )
    .await
}

/// Runs the dispatch/execute/aggregate pipeline with a caller-supplied attempt function.
///
/// `attempt` is called once per dispatched work item with the run's cancellation token and must
/// return that item's outcome.
pub async fn run_with<F, Fut>(
    cancel: &CancellationToken,
    total_requests: u64,
    concurrency: u64,
    progress: Option<ProgressFn>,
    attempt: F,
) -> Result<RunSummary>
where
    F: Fn(CancellationToken) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Outcome> + Send + 'static,
{
    let workers = worker_count(total_requests, concurrency)?;
    let started = Instant::now();

    // Also cancelled when a task fails, so the others stop before the error is returned.
    let cancel = cancel.child_token();

    let (work_tx, work_rx) = mpsc::channel(workers);
    let (outcome_tx, outcome_rx) = mpsc::channel::<Outcome>(workers);

    let aggregator = tokio::spawn(Aggregator::new(total_requests, progress).drain(outcome_rx));

    let queue = Arc::new(Mutex::new(work_rx));
    let mut handles = Vec::with_capacity(workers);
    for id in 0..workers {
        let handle = tokio::spawn(worker(
            id,
            queue.clone(),
            outcome_tx.clone(),
            cancel.clone(),
            attempt.clone(),
        ));
        handles.push(supervise(handle, cancel.clone()));
    }
    // The aggregator stops once the last worker drops its sender.
    drop(outcome_tx);
    drop(queue);

    let dispatcher = supervise(
        tokio::spawn(dispatch(total_requests, work_tx, cancel.clone())),
        cancel.clone(),
    );

    let dispatched = dispatcher.await??;
    for h in handles {
        h.await??;
    }
    let aggregator = aggregator.await?;

    let cancelled = cancel.is_cancelled();
    let summary = aggregator.finish(started.elapsed(), cancelled);

    if cancelled {
        tracing::warn!(
            dispatched,
            requested = total_requests,
            attempted = summary.total_attempted,
            "run cancelled"
        );
    }
    tracing::info!(
        attempted = summary.total_attempted,
        succeeded = summary.succeeded,
        failed = summary.failed,
        elapsed = ?summary.elapsed,
        "run finished"
    );

    Ok(summary)
}
