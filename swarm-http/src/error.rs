use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum HttpTransportErrorKind {
    InvalidUrl,
    UnsupportedScheme,
    RequestBuild,
    HeaderName,
    HeaderValue,
    Request,
    Timeout,
    BodyRead,
}

impl HttpTransportErrorKind {
    /// Failures that happen before anything is written to the network.
    #[must_use]
    pub fn is_request_construction(self) -> bool {
        matches!(
            self,
            Self::InvalidUrl
                | Self::UnsupportedScheme
                | Self::RequestBuild
                | Self::HeaderName
                | Self::HeaderValue
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("only http:// and https:// URLs are supported: {0}")]
    UnsupportedScheme(String),

    #[error("http request build failed: {0}")]
    RequestBuild(#[from] http::Error),

    #[error("invalid http header name: {0}")]
    HeaderName(#[from] http::header::InvalidHeaderName),

    #[error("invalid http header value: {0}")]
    HeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("http request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("http request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to read response body: {0}")]
    BodyRead(#[from] hyper::Error),
}

impl Error {
    #[must_use]
    pub fn transport_error_kind(&self) -> HttpTransportErrorKind {
        match self {
            Self::InvalidUrl(_) => HttpTransportErrorKind::InvalidUrl,
            Self::UnsupportedScheme(_) => HttpTransportErrorKind::UnsupportedScheme,
            Self::RequestBuild(_) => HttpTransportErrorKind::RequestBuild,
            Self::HeaderName(_) => HttpTransportErrorKind::HeaderName,
            Self::HeaderValue(_) => HttpTransportErrorKind::HeaderValue,
            Self::Request(_) => HttpTransportErrorKind::Request,
            Self::Timeout(_) => HttpTransportErrorKind::Timeout,
            Self::BodyRead(_) => HttpTransportErrorKind::BodyRead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_kinds_are_separated_from_transport_kinds() {
        assert!(HttpTransportErrorKind::InvalidUrl.is_request_construction());
        assert!(HttpTransportErrorKind::UnsupportedScheme.is_request_construction());
        assert!(HttpTransportErrorKind::HeaderValue.is_request_construction());
        assert!(!HttpTransportErrorKind::Request.is_request_construction());
        assert!(!HttpTransportErrorKind::Timeout.is_request_construction());
        assert!(!HttpTransportErrorKind::BodyRead.is_request_construction());
    }

    #[test]
    fn kind_renders_snake_case() {
        assert_eq!(HttpTransportErrorKind::UnsupportedScheme.to_string(), "unsupported_scheme");
        assert_eq!(
            Error::Timeout(Duration::from_secs(1)).transport_error_kind(),
            HttpTransportErrorKind::Timeout
        );
    }
}
