use thiserror::Error;

/// Why a page could not be turned into text.
///
/// The validator treats every variant the same way (empty content); the
/// distinction exists for logs and for callers using a fetcher directly.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported scheme '{scheme}' in url '{url}'")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("request to '{url}' failed: {reason}")]
    Request { url: String, reason: String },

    #[error("request to '{url}' timed out")]
    Timeout { url: String },

    #[error("'{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read body of '{url}': {reason}")]
    Body { url: String, reason: String },

    #[error("failed to build http client: {reason}")]
    ClientBuild { reason: String },
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}
