#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// The run finished but one or more attempts failed.
    AttemptsFailed = 10,

    /// Invalid CLI/config/options (bad flags, invalid durations, zero requests or concurrency).
    InvalidInput = 30,

    /// Internal/runtime error (runtime setup failures, panicked tasks).
    RuntimeError = 40,

    /// The run was interrupted by SIGINT/SIGTERM. The summary is still printed.
    Interrupted = 130,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Interruption wins over failed attempts: cancelled work is itself counted as failed.
    #[must_use]
    pub fn from_summary(summary: &swarm_core::runner::RunSummary) -> Self {
        if summary.cancelled {
            Self::Interrupted
        } else if summary.failed > 0 {
            Self::AttemptsFailed
        } else {
            Self::Success
        }
    }
}
