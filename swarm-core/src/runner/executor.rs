use std::sync::Arc;
use std::time::{Duration, Instant};

use swarm_http::{HttpClient, HttpRequest};
use tokio_util::sync::CancellationToken;

use super::config::RunConfig;
use super::outcome::{AttemptError, Outcome};

pub const USER_AGENT: &str = concat!("swarm/", env!("CARGO_PKG_VERSION"));

/// Issues single GET attempts against one target over a shared connection pool.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: HttpClient,
    url: Arc<str>,
    timeout: Duration,
}

impl RequestExecutor {
    pub fn new(client: HttpClient, url: impl Into<Arc<str>>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(cfg: &RunConfig) -> Self {
        Self::new(
            HttpClient::new(cfg.client_config()),
            cfg.url.as_str(),
            cfg.timeout,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Runs one attempt. Never fails: every error is folded into the returned [`Outcome`].
    pub async fn execute(&self, cancel: &CancellationToken) -> Outcome {
        if cancel.is_cancelled() {
            return Outcome::cancelled();
        }

        let req = HttpRequest::get(&self.url)
            .with_timeout(self.timeout)
            .with_header("user-agent", USER_AGENT);

        let started = Instant::now();

        // Dropping the request future on cancellation tears down its connection.
        let res = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Outcome::failed(AttemptError::Cancelled, started.elapsed());
            }
            res = self.client.request(req) => res,
        };
        let duration = started.elapsed();

        match res {
            Ok(res) => Outcome::completed(res.status, duration),
            Err(err) => {
                let err = AttemptError::from(err);
                tracing::debug!(url = %self.url, error = %err, "attempt failed");
                match err {
                    AttemptError::RequestConstruction { .. } => {
                        Outcome::failed(err, Duration::ZERO)
                    }
                    _ => Outcome::failed(err, duration),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancelled_before_start_never_connects() {
        // Nothing listens on TEST-NET-1; a connect attempt would take the full connect timeout.
        let executor = RequestExecutor::new(
            HttpClient::default(),
            "http://192.0.2.1:81/",
            Duration::from_secs(30),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = executor.execute(&cancel).await;
        assert_eq!(outcome, Outcome::cancelled());
    }

    #[tokio::test]
    async fn cancelled_mid_request_keeps_elapsed_time() -> anyhow::Result<()> {
        let server = swarm_testserver::TestServer::start().await?;
        let executor = RequestExecutor::new(
            HttpClient::default(),
            server.urls().hang.as_str(),
            Duration::from_secs(30),
        );

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let outcome = executor.execute(&cancel).await;
        server.abort().await;

        assert_eq!(outcome.result, Err(AttemptError::Cancelled));
        assert!(
            outcome.duration >= Duration::from_millis(90),
            "in-flight attempt lost its elapsed time: {:?}",
            outcome.duration
        );
        assert!(outcome.duration < Duration::from_secs(5));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_url_has_zero_duration() {
        let executor =
            RequestExecutor::new(HttpClient::default(), "not a url", Duration::from_secs(1));

        let outcome = executor.execute(&CancellationToken::new()).await;
        assert_eq!(outcome.duration, Duration::ZERO);
        assert!(matches!(
            outcome.error(),
            Some(AttemptError::RequestConstruction { .. })
        ));
    }
}
