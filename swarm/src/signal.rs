use swarm_core::CancellationToken;
use tokio::task::JoinHandle;

/// Cancels `cancel` on the first SIGINT (or SIGTERM on unix).
///
/// The task exits on its own if `cancel` fires for any other reason.
pub(crate) fn spawn_shutdown_listener(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let signal = tokio::select! {
            () = cancel.cancelled() => return,
            name = wait_for_signal() => name,
        };
        tracing::warn!("received {signal}, shutting down gracefully...");
        cancel.cancel();
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(err) => {
            tracing::warn!(error = %err, "failed to install SIGTERM handler");
            return ctrl_c().await;
        }
    };

    tokio::select! {
        name = ctrl_c() => name,
        _ = term.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
