use std::collections::BTreeMap;
use std::time::Duration;

/// Latency distribution over every attempt that spent measurable time on the network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
    pub count: u64,
    pub min_us: u64,
    pub mean_us: f64,
    pub p50_us: u64,
    pub p90_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Aggregate result of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Outcomes received; always `succeeded + failed`.
    pub total_attempted: u64,
    pub succeeded: u64,
    pub failed: u64,
    /// Status code -> count, for succeeded attempts only.
    pub status_codes: BTreeMap<u16, u64>,
    /// Sum of every outcome's duration, failed attempts included.
    pub total_duration: Duration,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
    /// Whether the run's cancellation signal fired before it finished.
    pub cancelled: bool,
    pub latency: Option<LatencySummary>,
}

impl RunSummary {
    /// `total_duration / total_attempted`, or zero when nothing was attempted.
    #[must_use]
    pub fn mean_latency(&self) -> Duration {
        match u32::try_from(self.total_attempted) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total_duration / n,
            Err(_) => Duration::from_secs_f64(
                self.total_duration.as_secs_f64() / self.total_attempted as f64,
            ),
        }
    }

    /// Attempts per second of wall-clock run time.
    #[must_use]
    pub fn requests_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_attempted as f64 / secs
        } else {
            0.0
        }
    }
}
