//! Error types for content API and metadata requests.

/// Error from a content API or external page request.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// Transport failure reported without a `ureq` error.
    #[error("transport error: {0}")]
    Transport(String),

    /// HTTP response error (server returned non-2xx status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Response body was not a valid content envelope.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// URL is not an absolute http(s) URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ContentError {
    /// Whether the request may succeed if retried.
    ///
    /// Network failures and 502/503/504 responses are transient; everything
    /// else is permanent.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpRequest(_) | Self::Transport(_) => true,
            Self::HttpResponse { status, .. } => matches!(status, 502..=504),
            Self::Json(_) | Self::InvalidUrl(_) => false,
        }
    }
}
