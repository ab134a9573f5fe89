pub mod runner;

pub use swarm_http::{ClientConfig, HttpClient, HttpTransportErrorKind};
pub use tokio_util::sync::CancellationToken;
