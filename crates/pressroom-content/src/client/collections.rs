//! Collection and single-entry reads that degrade to empty results.

use tracing::{error, info, warn};

use super::ContentClient;
use crate::envelope::{Collection, Entry};
use crate::error::ContentError;
use crate::query::Query;

impl ContentClient {
    /// Fetch a collection, e.g. `articles`.
    ///
    /// Failures are logged and yield an empty collection.
    pub fn fetch_collection(&self, collection: &str, query: &Query) -> Collection {
        match self.try_fetch(&[collection], query) {
            Ok(envelope) => {
                let collection_result = envelope.into_collection();
                info!(
                    "Fetched {} entries from {}",
                    collection_result.len(),
                    collection
                );
                collection_result
            }
            Err(err) => {
                report_failure(collection, &err);
                Collection::default()
            }
        }
    }

    /// Fetch one entry by id (or document id).
    ///
    /// Failures, including 404, are logged and yield `None`.
    pub fn fetch_single(&self, collection: &str, id: &str, query: &Query) -> Option<Entry> {
        match self.try_fetch(&[collection, id], query) {
            Ok(envelope) => envelope.into_single(),
            Err(err) => {
                report_failure(&format!("{collection}/{id}"), &err);
                None
            }
        }
    }

    /// First entry of `collection` whose `field` equals `value`.
    ///
    /// Used for slug lookups on reader pages.
    pub fn find_by(
        &self,
        collection: &str,
        field: &str,
        value: &str,
        query: &Query,
    ) -> Option<Entry> {
        let query = query.clone().filter(field, "eq", value);
        self.fetch_collection(collection, &query)
            .into_iter()
            .next()
    }
}

/// Log a failed content request with a hint at the likely cause.
fn report_failure(resource: &str, err: &ContentError) {
    match err {
        ContentError::HttpResponse {
            status: 401 | 403,
            body,
        } => warn!(
            "Content API denied access to {resource}: {body}. Check that content.api_token is \
             set and that its role may read this collection"
        ),
        ContentError::HttpResponse { status: 404, .. } => warn!(
            "Content API has no {resource}. Check the collection name (plural API id) and that \
             the entries are published"
        ),
        ContentError::HttpResponse { status, body } if *status >= 500 => {
            error!("Content API failed for {resource} with HTTP {status}: {body}");
        }
        ContentError::Json(e) => {
            warn!("Content API returned a malformed envelope for {resource}: {e}");
        }
        other => warn!("Content request for {resource} failed: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::tests::client;
    use crate::mock::MockTransport;
    use crate::query::Query;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fetch_collection_normalizes_entries() {
        let transport = Arc::new(MockTransport::new().with_response(
            200,
            r#"{
                "data": [
                    {"id": 1, "attributes": {"title": "Wrapped"}},
                    {"id": 2, "documentId": "b2", "title": "Flat"}
                ],
                "meta": {"pagination": {"page": 1}}
            }"#,
        ));
        let collection = client(&transport).fetch_collection("articles", &Query::new());

        let titles: Vec<_> = collection
            .iter()
            .filter_map(|e| e.str_field("title"))
            .collect();
        assert_eq!(titles, vec!["Wrapped", "Flat"]);
        assert!(collection.meta.is_some());
    }

    #[test]
    fn test_fetch_collection_empty_on_client_error() {
        let transport = Arc::new(MockTransport::new().with_response(403, "Forbidden"));
        let collection = client(&transport).fetch_collection("petitions", &Query::new());
        assert!(collection.is_empty());
        assert!(collection.meta.is_none());
    }

    #[test]
    fn test_fetch_collection_empty_after_exhausted_retries() {
        let transport = Arc::new(MockTransport::new().with_failure("timed out"));
        let collection = client(&transport).fetch_collection("podcasts", &Query::new());
        assert!(collection.is_empty());
        // One attempt plus two retries, the last two hitting an empty script.
        assert_eq!(transport.requests().len(), 3);
    }

    #[test]
    fn test_fetch_single_by_id() {
        let transport = Arc::new(
            MockTransport::new()
                .with_response(200, r#"{"data": {"id": 42, "attributes": {"title": "Ep. 42"}}}"#),
        );
        let entry = client(&transport)
            .fetch_single("videos", "42", &Query::new().populate("*"))
            .unwrap();

        assert_eq!(entry.id, Some(42));
        assert_eq!(
            transport.requests()[0].url,
            "https://cms.example.com/api/videos/42?populate%5B0%5D=%2A"
        );
    }

    #[test]
    fn test_fetch_single_none_on_404() {
        let transport = Arc::new(MockTransport::new().with_response(404, "{}"));
        assert!(
            client(&transport)
                .fetch_single("courses", "999", &Query::new())
                .is_none()
        );
    }

    #[test]
    fn test_find_by_adds_filter() {
        let transport = Arc::new(
            MockTransport::new().with_response(200, r#"{"data": [{"id": 3, "slug": "budget"}]}"#),
        );
        let entry = client(&transport)
            .find_by("articles", "slug", "budget", &Query::new())
            .unwrap();

        assert_eq!(entry.id, Some(3));
        assert_eq!(
            transport.requests()[0].url,
            "https://cms.example.com/api/articles?filters%5Bslug%5D%5B%24eq%5D=budget"
        );
    }

    #[test]
    fn test_find_by_no_match() {
        let transport = Arc::new(MockTransport::new().with_response(200, r#"{"data": []}"#));
        assert!(
            client(&transport)
                .find_by("newsletters", "slug", "nope", &Query::new())
                .is_none()
        );
    }
}
