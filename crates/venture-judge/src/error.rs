//! Judge error types.

use thiserror::Error;

/// Failures talking to a judge. A verdict the caller dislikes (e.g.
/// `INCOMPLETE`) is never an error; these only describe a judge that could
/// not answer.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The endpoint returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The call did not finish within the configured bound.
    #[error("judge call timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The judge answered, but not in a shape we can use.
    #[error("malformed judge output: {0}")]
    Malformed(String),

    /// No endpoint or credentials configured.
    #[error("judge is not configured")]
    NotConfigured,
}

impl JudgeError {
    /// Whether retrying the same call later could plausibly succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited { .. } | Self::Timeout { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Malformed(_) | Self::NotConfigured => false,
        }
    }

    /// Map a transport error, folding reqwest timeouts into [`Self::Timeout`].
    #[must_use]
    pub fn from_transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { secs: timeout_secs }
        } else {
            Self::Http(err)
        }
    }
}
