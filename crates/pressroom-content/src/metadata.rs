//! Link preview metadata scraped from external pages.
//!
//! A single GET with a short timeout, then regex extraction of `<title>`
//! and Open Graph `<meta>` tags. No retries; any failure yields empty
//! metadata.

use std::sync::LazyLock;

use pressroom_config::MetadataConfig;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::ContentError;
use crate::transport::{HttpTransport, UreqTransport};

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title>").unwrap());

static META_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());

/// `name="value"` or `name='value'` inside a tag.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Best-effort preview of an external page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkMetadata {
    /// `og:title`, falling back to `<title>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `og:description`, falling back to `<meta name="description">`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `og:image`, as found in the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// `og:site_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
}

impl LinkMetadata {
    /// Whether nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.site_name.is_none()
    }
}

/// Extract [`LinkMetadata`] from an HTML document.
///
/// The first occurrence of each tag wins. Values are trimmed, whitespace
/// runs collapsed and HTML entities decoded; empty values count as absent.
///
/// # Examples
///
/// ```
/// use pressroom_content::parse_metadata;
///
/// let html = r#"<head><title>Fallback</title>
///     <meta property="og:title" content="Council passes budget">
///     <meta content="Daily Ledger" property="og:site_name"></head>"#;
/// let meta = parse_metadata(html);
/// assert_eq!(meta.title.as_deref(), Some("Council passes budget"));
/// assert_eq!(meta.site_name.as_deref(), Some("Daily Ledger"));
/// ```
#[must_use]
pub fn parse_metadata(html: &str) -> LinkMetadata {
    let mut og_title = None;
    let mut og_description = None;
    let mut description = None;
    let mut image = None;
    let mut site_name = None;

    for tag in META_TAG_RE.find_iter(html) {
        let Some((key, content)) = meta_property(tag.as_str()) else {
            continue;
        };
        let slot = match key.as_str() {
            "og:title" => &mut og_title,
            "og:description" => &mut og_description,
            "description" => &mut description,
            "og:image" | "og:image:url" => &mut image,
            "og:site_name" => &mut site_name,
            _ => continue,
        };
        if slot.is_none() {
            *slot = clean(&content);
        }
    }

    let page_title = TITLE_RE
        .captures(html)
        .and_then(|caps| clean(&caps[1]));

    LinkMetadata {
        title: og_title.or(page_title),
        description: og_description.or(description),
        image,
        site_name,
    }
}

/// `(property-or-name, content)` of a `<meta>` tag, key lowercased.
fn meta_property(tag: &str) -> Option<(String, String)> {
    let mut key = None;
    let mut content = None;

    for caps in ATTR_RE.captures_iter(tag) {
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        match caps[1].to_ascii_lowercase().as_str() {
            "property" | "name" if key.is_none() => key = Some(value.to_ascii_lowercase()),
            "content" => content = Some(value.to_owned()),
            _ => {}
        }
    }

    Some((key?, content?))
}

fn clean(raw: &str) -> Option<String> {
    let decoded = html_escape::decode_html_entities(raw);
    let collapsed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Fetches external pages and extracts [`LinkMetadata`].
pub struct MetadataExtractor {
    transport: Box<dyn HttpTransport>,
    user_agent: String,
}

impl MetadataExtractor {
    /// Create an extractor from the `[metadata]` section.
    #[must_use]
    pub fn new(config: &MetadataConfig) -> Self {
        Self::with_transport(config, UreqTransport::new(config.timeout()))
    }

    /// Create an extractor that fetches through `transport`.
    #[must_use]
    pub fn with_transport(config: &MetadataConfig, transport: impl HttpTransport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Fetch `url` and extract its metadata.
    ///
    /// Returns empty metadata on any failure.
    pub fn fetch(&self, url: &str) -> LinkMetadata {
        match self.try_fetch(url) {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!("Metadata fetch for {} failed: {}", url, err);
                LinkMetadata::default()
            }
        }
    }

    fn try_fetch(&self, url: &str) -> Result<LinkMetadata, ContentError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ContentError::InvalidUrl(url.to_owned()));
        }

        let headers = [
            ("User-Agent", self.user_agent.as_str()),
            ("Accept", "text/html,application/xhtml+xml"),
        ];
        let response = self.transport.get(url, &headers)?;
        if !response.is_success() {
            return Err(ContentError::HttpResponse {
                status: response.status,
                body: response.body,
            });
        }

        Ok(parse_metadata(&response.body))
    }
}
