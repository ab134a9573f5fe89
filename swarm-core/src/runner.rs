mod aggregate;
mod config;
mod dispatch;
mod error;
mod executor;
mod outcome;
mod progress;
mod run;
mod summary;
mod worker;

pub use config::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_POOL_IDLE_TIMEOUT, DEFAULT_TIMEOUT, RunConfig,
};
pub use error::{Error, Result};
pub use executor::{RequestExecutor, USER_AGENT};
pub use outcome::{AttemptError, Outcome};
pub use progress::{ProgressFn, ProgressUpdate};
pub use run::{run, run_with};
pub use summary::{LatencySummary, RunSummary};
