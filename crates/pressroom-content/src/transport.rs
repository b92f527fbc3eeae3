//! Blocking HTTP transport used by the content client and metadata extractor.

use std::sync::Arc;
use std::time::Duration;

use ureq::Agent;

use crate::error::ContentError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as UTF-8.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests.
///
/// Non-2xx statuses are returned as [`HttpResponse`] values, not errors;
/// only failures to complete the exchange are errors.
pub trait HttpTransport: Send + Sync {
    /// Send a GET request with the given headers.
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ContentError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ContentError> {
        (**self).get(url, headers)
    }
}

/// [`HttpTransport`] backed by a `ureq` agent.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport whose requests fail after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ContentError> {
        let mut request = self.agent.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.call()?;
        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        let body = if status >= 400 {
            body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned())
        } else {
            body_reader.read_to_string()?
        };

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let ok = HttpResponse {
            status: 204,
            body: String::new(),
        };
        let redirect = HttpResponse {
            status: 301,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}
