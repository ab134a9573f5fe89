pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a whole run. Failures of individual attempts never surface here; they are
/// counted in the summary instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: `{name}` must be a positive integer")]
    InvalidArgument { name: &'static str },

    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
