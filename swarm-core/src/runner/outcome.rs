use std::time::Duration;

use swarm_http::HttpTransportErrorKind;

/// Why a single attempt did not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptError {
    /// The request could not be built (malformed URL, unsupported scheme, bad header).
    #[error("request construction failed ({kind}): {message}")]
    RequestConstruction {
        kind: HttpTransportErrorKind,
        message: String,
    },

    /// The request was sent but the exchange failed, including per-request timeouts.
    #[error("transport failure ({kind}): {message}")]
    Transport {
        kind: HttpTransportErrorKind,
        message: String,
    },

    #[error("run cancelled")]
    Cancelled,
}

impl AttemptError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<swarm_http::Error> for AttemptError {
    fn from(err: swarm_http::Error) -> Self {
        let kind = err.transport_error_kind();
        let message = err.to_string();
        if kind.is_request_construction() {
            Self::RequestConstruction { kind, message }
        } else {
            Self::Transport { kind, message }
        }
    }
}

/// Result of one attempt. A status code and an error never coexist: any HTTP status, including
/// 4xx and 5xx, is a completed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Time from just before the request was issued until it completed or failed. Zero when the
    /// attempt never started.
    pub duration: Duration,
    pub result: Result<u16, AttemptError>,
}

impl Outcome {
    pub fn completed(status: u16, duration: Duration) -> Self {
        Self {
            duration,
            result: Ok(status),
        }
    }

    pub fn failed(err: AttemptError, duration: Duration) -> Self {
        Self {
            duration,
            result: Err(err),
        }
    }

    /// An attempt that was stopped by cancellation before it started.
    pub fn cancelled() -> Self {
        Self::failed(AttemptError::Cancelled, Duration::ZERO)
    }

    pub fn status(&self) -> Option<u16> {
        self.result.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&AttemptError> {
        self.result.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
