//! Content API client.
//!
//! Blocking client for the CMS REST API. Transient failures are retried
//! with backoff; the high-level fetch methods never return errors and
//! degrade to empty results instead, so a CMS outage renders as empty
//! sections rather than failed pages.

mod collections;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use pressroom_config::ContentConfig;
use tracing::{debug, warn};

use crate::envelope::Envelope;
use crate::error::ContentError;
use crate::query::Query;
use crate::retry::RetryPolicy;
use crate::transport::{HttpTransport, UreqTransport};

/// Characters escaped in a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Content API client.
pub struct ContentClient {
    transport: Box<dyn HttpTransport>,
    api_url: String,
    authorization: Option<String>,
    retry: RetryPolicy,
}

impl ContentClient {
    /// Create a client from the `[content]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidUrl`] if `base_url` is not an http(s) URL.
    pub fn new(config: &ContentConfig) -> Result<Self, ContentError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ContentError::InvalidUrl(config.base_url.clone()));
        }
        Ok(Self::with_transport(
            config,
            UreqTransport::new(config.timeout()),
        ))
    }

    /// Create a client that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(config: &ContentConfig, transport: impl HttpTransport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            api_url: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                config.api_prefix.trim_end_matches('/')
            ),
            authorization: config.api_token.as_ref().map(|t| format!("Bearer {t}")),
            retry: RetryPolicy::from_config(&config.retry),
        }
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// API root, e.g. `https://cms.example.com/api`.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Build the request URL for `segments` under the API root.
    fn endpoint(&self, segments: &[&str], query: &Query) -> String {
        let mut url = self.api_url.clone();
        for segment in segments {
            url.push('/');
            url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
        }
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.to_string());
        }
        url
    }

    /// Fetch and parse an envelope, retrying transient failures.
    ///
    /// `segments` are joined below the API root and escaped individually,
    /// so `["articles", "42"]` requests `{api_url}/articles/42`.
    pub fn try_fetch(&self, segments: &[&str], query: &Query) -> Result<Envelope, ContentError> {
        let url = self.endpoint(segments, query);
        let mut attempt = 0;

        loop {
            match self.fetch_once(&url) {
                Ok(envelope) => return Ok(envelope),
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries() => {
                    let delay = self.retry.delay(attempt);
                    attempt += 1;
                    warn!(
                        "Content request to {} failed ({}), retry {}/{} in {:?}",
                        url,
                        err,
                        attempt,
                        self.retry.max_retries(),
                        delay
                    );
                    std::thread::sleep(delay);
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn fetch_once(&self, url: &str) -> Result<Envelope, ContentError> {
        debug!("GET {}", url);

        let mut headers = vec![("Accept", "application/json")];
        if let Some(auth) = &self.authorization {
            headers.push(("Authorization", auth.as_str()));
        }

        let response = self.transport.get(url, &headers)?;
        if !response.is_success() {
            return Err(ContentError::HttpResponse {
                status: response.status,
                body: response.body,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}
