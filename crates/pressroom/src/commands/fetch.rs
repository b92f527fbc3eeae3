//! `pressroom fetch` command implementation.
//!
//! Reads a collection (or one entry of it) from the content API and prints
//! the normalized result as JSON.

use clap::Args;
use pressroom_content::{ContentClient, Query};
use serde_json::Value;

use crate::context::AppContext;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the fetch command.
#[derive(Args)]
pub(crate) struct FetchArgs {
    /// Collection to read, e.g. `articles`.
    collection: String,

    /// Fetch a single entry by id or document id.
    #[arg(long, conflicts_with = "slug")]
    id: Option<String>,

    /// Fetch the first entry whose `slug` field matches.
    #[arg(long)]
    slug: Option<String>,

    /// Relation to populate (repeatable; `*` populates everything).
    #[arg(long)]
    populate: Vec<String>,

    /// Equality filter as FIELD=VALUE (repeatable; dotted fields allowed).
    #[arg(long, value_parser = parse_pair)]
    filter: Vec<(String, String)>,

    /// Sort spec such as `publishedAt:desc` (repeatable).
    #[arg(long)]
    sort: Vec<String>,

    /// Extra raw query parameter as KEY=VALUE (repeatable).
    #[arg(long, value_parser = parse_pair)]
    param: Vec<(String, String)>,

    /// Fail on request errors instead of printing an empty result.
    #[arg(long)]
    strict: bool,
}

impl FetchArgs {
    /// Execute the fetch command.
    ///
    /// # Errors
    ///
    /// Returns an error if output cannot be written, or in `--strict` mode
    /// if the request fails.
    pub(crate) fn execute(self, ctx: &AppContext, output: &Output) -> Result<(), CliError> {
        let query = self.query();
        let client = &ctx.content;

        let result = if self.strict {
            self.fetch_strict(client, &query)?
        } else if let Some(id) = &self.id {
            serde_json::to_value(client.fetch_single(&self.collection, id, &query))?
        } else if let Some(slug) = &self.slug {
            serde_json::to_value(client.find_by(&self.collection, "slug", slug, &query))?
        } else {
            let collection = client.fetch_collection(&self.collection, &query);
            if collection.is_empty() {
                output.warning(&format!("No entries returned for {}", self.collection));
            }
            serde_json::to_value(collection)?
        };

        output.result(&serde_json::to_string_pretty(&result)?)?;
        Ok(())
    }

    fn fetch_strict(&self, client: &ContentClient, query: &Query) -> Result<Value, CliError> {
        let value = match (&self.id, &self.slug) {
            (Some(id), _) => {
                let envelope = client.try_fetch(&[self.collection.as_str(), id.as_str()], query)?;
                serde_json::to_value(envelope.into_single())?
            }
            (None, Some(slug)) => {
                let query = query.clone().filter("slug", "eq", slug.as_str());
                let envelope = client.try_fetch(&[self.collection.as_str()], &query)?;
                serde_json::to_value(envelope.into_single())?
            }
            (None, None) => {
                let envelope = client.try_fetch(&[self.collection.as_str()], query)?;
                serde_json::to_value(envelope.into_collection())?
            }
        };
        Ok(value)
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        for field in &self.populate {
            query = query.populate(field);
        }
        for (field, value) in &self.filter {
            query = query.filter(field, "eq", value.as_str());
        }
        for spec in &self.sort {
            query = query.sort(spec);
        }
        for (key, value) in &self.param {
            query = query.param(key.as_str(), value.as_str());
        }
        query
    }
}

/// Parse a `KEY=VALUE` argument. The value may itself contain `=`.
fn parse_pair(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{arg}`"))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in `{arg}`"));
    }
    Ok((key.trim().to_owned(), value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args() -> FetchArgs {
        FetchArgs {
            collection: "articles".to_owned(),
            id: None,
            slug: None,
            populate: Vec::new(),
            filter: Vec::new(),
            sort: Vec::new(),
            param: Vec::new(),
            strict: false,
        }
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("category.slug=city-hall"),
            Ok(("category.slug".to_owned(), "city-hall".to_owned()))
        );
    }

    #[test]
    fn test_parse_pair_value_with_equals() {
        assert_eq!(
            parse_pair("title=a=b"),
            Ok(("title".to_owned(), "a=b".to_owned()))
        );
    }

    #[test]
    fn test_parse_pair_allows_empty_value() {
        assert_eq!(parse_pair("tag="), Ok(("tag".to_owned(), String::new())));
    }

    #[test]
    fn test_parse_pair_rejects_missing_separator() {
        assert!(parse_pair("slug").is_err());
        assert!(parse_pair("=value").is_err());
    }

    #[test]
    fn test_query_from_args() {
        let args = FetchArgs {
            populate: vec!["cover".to_owned()],
            filter: vec![("section".to_owned(), "local".to_owned())],
            sort: vec!["publishedAt:desc".to_owned()],
            param: vec![("pagination[pageSize]".to_owned(), "5".to_owned())],
            ..args()
        };
        let query = args.query();
        let params: Vec<_> = query.params().collect();

        assert_eq!(
            params,
            vec![
                ("populate[0]", "cover"),
                ("filters[section][$eq]", "local"),
                ("sort[0]", "publishedAt:desc"),
                ("pagination[pageSize]", "5"),
            ]
        );
    }

    #[test]
    fn test_empty_args_empty_query() {
        assert!(args().query().is_empty());
    }
}
