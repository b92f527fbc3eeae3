//! Query parameters for content API requests.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in query keys and values (everything but unreserved).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Ordered list of query parameters.
///
/// Builders produce the bracketed keys the CMS expects
/// (`populate[0]=cover`, `filters[slug][$eq]=hello`, `sort[0]=date:desc`).
/// Anything else can be passed verbatim with [`Query::param`].
///
/// # Examples
///
/// ```
/// use pressroom_content::Query;
///
/// let query = Query::new()
///     .populate("cover")
///     .filter("slug", "eq", "hello-world")
///     .sort("publishedAt:desc");
/// assert_eq!(
///     query.to_string(),
///     "populate%5B0%5D=cover&filters%5Bslug%5D%5B%24eq%5D=hello-world&sort%5B0%5D=publishedAt%3Adesc"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// Create an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Populate a relation or media field (`*` populates everything).
    #[must_use]
    pub fn populate(self, field: &str) -> Self {
        let index = self.count_prefix("populate[");
        self.param(format!("populate[{index}]"), field)
    }

    /// Filter on `field` with operator `op` (without the `$` prefix).
    ///
    /// Dotted fields filter through relations: `author.slug` becomes
    /// `filters[author][slug][$eq]`.
    #[must_use]
    pub fn filter(self, field: &str, op: &str, value: impl Into<String>) -> Self {
        let path: String = field.split('.').map(|seg| format!("[{seg}]")).collect();
        self.param(format!("filters{path}[${op}]"), value)
    }

    /// Sort by a `field` or `field:asc|desc` spec. Later calls are tie-breakers.
    #[must_use]
    pub fn sort(self, spec: &str) -> Self {
        let index = self.count_prefix("sort[");
        self.param(format!("sort[{index}]"), spec)
    }

    /// Whether no parameters were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameters in insertion order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn count_prefix(&self, prefix: &str) -> usize {
        self.params.iter().filter(|(k, _)| k.starts_with(prefix)).count()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                utf8_percent_encode(key, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(query: &Query) -> Vec<(&str, &str)> {
        query.params().collect()
    }

    #[test]
    fn test_empty_query() {
        let query = Query::new();
        assert!(query.is_empty());
        assert_eq!(query.to_string(), "");
    }

    #[test]
    fn test_populate_indexes() {
        let query = Query::new().populate("cover").populate("author");
        assert_eq!(
            pairs(&query),
            vec![("populate[0]", "cover"), ("populate[1]", "author")]
        );
    }

    #[test]
    fn test_filter_simple_and_nested() {
        let query = Query::new()
            .filter("slug", "eq", "my-post")
            .filter("category.slug", "in", "news");
        assert_eq!(
            pairs(&query),
            vec![
                ("filters[slug][$eq]", "my-post"),
                ("filters[category][slug][$in]", "news")
            ]
        );
    }

    #[test]
    fn test_sort_indexes_independent_of_populate() {
        let query = Query::new()
            .populate("*")
            .sort("date:desc")
            .sort("title");
        assert_eq!(
            pairs(&query),
            vec![("populate[0]", "*"), ("sort[0]", "date:desc"), ("sort[1]", "title")]
        );
    }

    #[test]
    fn test_raw_param_preserved() {
        let query = Query::new().param("pagination[pageSize]", "12");
        assert_eq!(query.to_string(), "pagination%5BpageSize%5D=12");
    }

    #[test]
    fn test_values_are_encoded() {
        let query = Query::new().filter("title", "containsi", "café & co");
        assert_eq!(
            query.to_string(),
            "filters%5Btitle%5D%5B%24containsi%5D=caf%C3%A9%20%26%20co"
        );
    }
}
