use std::time::Duration;

use hdrhistogram::Histogram;
use tokio::sync::mpsc;

use super::outcome::Outcome;
use super::progress::{ProgressFn, ProgressUpdate};
use super::summary::{LatencySummary, RunSummary};

/// Sole owner of the run's summary while the run is in progress. Producers only ever talk to it
/// through the outcome channel, so none of this needs locking.
pub(crate) struct Aggregator {
    summary: RunSummary,
    latency_us: Histogram<u64>,
    expected: u64,
    progress: Option<ProgressFn>,
}

fn new_hist() -> Histogram<u64> {
    // Auto-resizing, 3 significant figures.
    Histogram::<u64>::new(3).unwrap_or_else(|err| panic!("failed to init histogram: {err}"))
}

impl Aggregator {
    pub(crate) fn new(expected: u64, progress: Option<ProgressFn>) -> Self {
        Self {
            summary: RunSummary::default(),
            latency_us: new_hist(),
            expected,
            progress,
        }
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        let s = &mut self.summary;
        s.total_attempted += 1;
        s.total_duration = s.total_duration.saturating_add(outcome.duration);

        match outcome.result {
            Ok(status) => {
                s.succeeded += 1;
                *s.status_codes.entry(status).or_insert(0) += 1;
            }
            Err(_) => s.failed += 1,
        }

        self.record_latency(outcome.duration);

        if let Some(progress) = &self.progress {
            progress(ProgressUpdate {
                completed: self.summary.total_attempted,
                total: self.expected,
                succeeded: self.summary.succeeded,
                failed: self.summary.failed,
            });
        }
    }

    fn record_latency(&mut self, elapsed: Duration) {
        let us = elapsed.as_micros();
        if us == 0 {
            return;
        }
        let _ = self.latency_us.record(u64::try_from(us).unwrap_or(u64::MAX));
    }

    /// Folds outcomes until every producer has dropped its sender.
    pub(crate) async fn drain(mut self, mut outcomes: mpsc::Receiver<Outcome>) -> Self {
        while let Some(outcome) = outcomes.recv().await {
            self.record(outcome);
        }
        self
    }

    pub(crate) fn finish(self, elapsed: Duration, cancelled: bool) -> RunSummary {
        let h = &self.latency_us;

        #[allow(clippy::len_zero)]
        let latency = if h.len() == 0 {
            None
        } else {
            Some(LatencySummary {
                count: h.len(),
                min_us: h.min(),
                mean_us: h.mean(),
                p50_us: h.value_at_quantile(0.50),
                p90_us: h.value_at_quantile(0.90),
                p99_us: h.value_at_quantile(0.99),
                max_us: h.max(),
            })
        };

        RunSummary {
            elapsed,
            cancelled,
            latency,
            ..self.summary
        }
    }
}
