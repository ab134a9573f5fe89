use std::time::Duration;

use swarm_http::ClientConfig;

/// Per-request ceiling, independent of run cancellation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Absolute `http://` or `https://` URL every attempt targets.
    pub url: String,
    /// Total number of attempts to dispatch.
    pub requests: u64,
    /// Maximum number of attempts in flight at any instant.
    pub concurrency: u64,
    pub timeout: Duration,
    pub connect_timeout: Option<Duration>,
    pub pool_idle_timeout: Option<Duration>,
}

impl RunConfig {
    pub fn new(url: impl Into<String>, requests: u64, concurrency: u64) -> Self {
        Self {
            url: url.into(),
            requests,
            concurrency,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            pool_idle_timeout: Some(DEFAULT_POOL_IDLE_TIMEOUT),
        }
    }

    /// Connection pool sized so every worker can keep one idle connection to the target.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let idle_per_host = self.concurrency.min(self.requests).max(1);
        ClientConfig {
            connect_timeout: self.connect_timeout,
            pool_idle_timeout: self.pool_idle_timeout,
            pool_max_idle_per_host: usize::try_from(idle_per_host).unwrap_or(usize::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_defaults() {
        let cfg = RunConfig::new("http://127.0.0.1/", 10, 3);
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
        assert_eq!(cfg.connect_timeout, Some(DEFAULT_CONNECT_TIMEOUT));
        assert_eq!(cfg.pool_idle_timeout, Some(DEFAULT_POOL_IDLE_TIMEOUT));
    }

    #[test]
    fn pool_is_sized_by_effective_concurrency() {
        assert_eq!(
            RunConfig::new("http://x/", 10, 3).client_config().pool_max_idle_per_host,
            3
        );
        assert_eq!(
            RunConfig::new("http://x/", 2, 64).client_config().pool_max_idle_per_host,
            2
        );
        assert_eq!(
            RunConfig::new("http://x/", 0, 0).client_config().pool_max_idle_per_host,
            1
        );
    }
}
