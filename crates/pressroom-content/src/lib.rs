//! Content API client and link metadata extraction for Pressroom.
//!
//! This crate provides:
//! - [`ContentClient`]: reads collections and entries from the CMS REST API,
//!   normalizing both envelope shapes into [`Entry`] values and retrying
//!   transient failures
//! - [`MetadataExtractor`]: fetches external pages for link previews
//! - [`HttpTransport`]: the seam both use for HTTP, with [`MockTransport`]
//!   for tests (behind the `mock` feature flag)
//!
//! Reader pages should never fail because the CMS did: the high-level
//! fetch methods log problems and return empty results. Use
//! [`ContentClient::try_fetch`] when the error itself matters.
//!
//! # Example
//!
//! ```ignore
//! use pressroom_config::ContentConfig;
//! use pressroom_content::{ContentClient, Query};
//!
//! let client = ContentClient::new(&ContentConfig::default())?;
//! let articles = client.fetch_collection(
//!     "articles",
//!     &Query::new().populate("cover").sort("publishedAt:desc"),
//! );
//! for article in articles.iter() {
//!     println!("{}", article.str_field("title").unwrap_or("(untitled)"));
//! }
//! ```

mod client;
mod envelope;
mod error;
mod metadata;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod query;
mod retry;
mod transport;

pub use client::ContentClient;
pub use envelope::{Collection, Data, Entry, Envelope};
pub use error::ContentError;
pub use metadata::{LinkMetadata, MetadataExtractor, parse_metadata};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockTransport, RecordedRequest};
pub use query::Query;
pub use retry::RetryPolicy;
pub use transport::{HttpResponse, HttpTransport, UreqTransport};
