use std::sync::Arc;

/// Running totals reported after each folded outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub completed: u64,
    /// Requested attempts; `completed` stays below it when the run is cancelled.
    pub total: u64,
    pub succeeded: u64,
    pub failed: u64,
}

/// Called from the aggregation task, so it must be cheap and must not block.
pub type ProgressFn = Arc<dyn Fn(ProgressUpdate) + Send + Sync + 'static>;
