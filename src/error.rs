use thiserror::Error;

/// Failure of a single upstream request.
///
/// Every variant is recoverable at the granularity of one fetch attempt:
/// the discovery engine logs it, counts the attempt and moves on to the
/// next strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream returned HTTP {status}")]
    Http { status: u16 },
    #[error("upstream reported error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("upstream transport failure: {0}")]
    Transport(String),
    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),
    #[error("upstream returned no usable records")]
    EmptyResult,
}

impl UpstreamError {
    /// True for 4xx responses, which mean the requested resource does not exist
    /// or the request itself was rejected.
    pub fn is_client_error(&self) -> bool {
        matches!(self, UpstreamError::Http { status } if (400..500).contains(status))
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return UpstreamError::Timeout;
        }
        if let Some(status) = err.status() {
            return UpstreamError::Http {
                status: status.as_u16(),
            };
        }
        if err.is_decode() {
            return UpstreamError::MalformedPayload(err.to_string());
        }
        UpstreamError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::MalformedPayload(err.to_string())
    }
}

/// Failure of a direct lookup by track id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("track {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
