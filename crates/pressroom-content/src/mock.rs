//! Scripted transport for testing.
//!
//! Provides [`MockTransport`] for exercising clients without network access.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::ContentError;
use crate::transport::{HttpResponse, HttpTransport};

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Full request URL.
    pub url: String,
    /// Header name/value pairs in the order they were sent.
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of the first header named `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Transport that replays scripted responses in order and records requests.
///
/// Once the script is exhausted every request fails with a transport error.
///
/// # Example
///
/// ```ignore
/// use pressroom_content::MockTransport;
///
/// let transport = MockTransport::new()
///     .with_response(503, "")
///     .with_response(200, r#"{"data": []}"#);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Create a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
        self
    }

    /// Queue a transport failure.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Err(message.into()));
        self
    }

    /// Requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ContentError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_owned(),
            headers: headers
                .iter()
                .map(|(n, v)| ((*n).to_owned(), (*v).to_owned()))
                .collect(),
        });

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ContentError::Transport(message)),
            None => Err(ContentError::Transport("no scripted response".to_owned())),
        }
    }
}
