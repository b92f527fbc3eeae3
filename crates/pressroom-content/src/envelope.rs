//! Response envelopes and their normalization into [`Entry`] values.
//!
//! The CMS answers with `{ "data": ..., "meta": ... }`. Depending on the
//! schema version an item is either wrapped:
//!
//! ```json
//! { "id": 1, "attributes": { "title": "Hello" } }
//! ```
//!
//! or flat:
//!
//! ```json
//! { "id": 1, "documentId": "k3x9", "title": "Hello" }
//! ```
//!
//! Both shapes are folded into one [`Entry`] during deserialization, so
//! nothing downstream has to care which one the backend produced.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw `{ data, meta }` response.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// Payload: a list, a single item, or nothing.
    #[serde(default)]
    pub data: Data,
    /// Pagination and other response metadata, passed through untouched.
    #[serde(default)]
    pub meta: Option<Value>,
}

/// `data` member of an envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
pub enum Data {
    /// Collection response.
    Many(Vec<Entry>),
    /// Single-item response.
    One(Entry),
    /// `null` or absent.
    #[default]
    Empty,
}

impl Data {
    /// Flatten into a list of entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        match self {
            Self::Many(entries) => entries,
            Self::One(entry) => vec![entry],
            Self::Empty => Vec::new(),
        }
    }
}

impl Envelope {
    /// Convert into a [`Collection`], keeping `meta`.
    #[must_use]
    pub fn into_collection(self) -> Collection {
        Collection {
            entries: self.data.into_entries(),
            meta: self.meta,
        }
    }

    /// The single item of the response (or the first item of a list).
    #[must_use]
    pub fn into_single(self) -> Option<Entry> {
        self.data.into_entries().into_iter().next()
    }
}

/// Normalized list response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Collection {
    /// Items in response order.
    pub entries: Vec<Entry>,
    /// Response metadata, if the backend sent any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl Collection {
    /// Whether the collection has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl IntoIterator for Collection {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// The two item shapes the backend emits.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemShape {
    Wrapped {
        #[serde(default)]
        id: Option<Value>,
        #[serde(default, rename = "documentId")]
        document_id: Option<String>,
        attributes: Map<String, Value>,
    },
    Flat(Map<String, Value>),
}

/// One content item with its identifiers split from its fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ItemShape", rename_all = "camelCase")]
pub struct Entry {
    /// Numeric database id.
    pub id: Option<u64>,
    /// Stable document id (newer schema versions only).
    pub document_id: Option<String>,
    /// Content fields.
    pub fields: Map<String, Value>,
}

impl From<ItemShape> for Entry {
    fn from(shape: ItemShape) -> Self {
        match shape {
            ItemShape::Wrapped {
                id,
                document_id,
                attributes,
            } => Self {
                id: id.as_ref().and_then(numeric_id),
                document_id,
                fields: attributes,
            },
            ItemShape::Flat(mut fields) => {
                let id = fields.remove("id").as_ref().and_then(numeric_id);
                let document_id = match fields.remove("documentId") {
                    Some(Value::String(s)) => Some(s),
                    _ => None,
                };
                Self {
                    id,
                    document_id,
                    fields,
                }
            }
        }
    }
}

/// Ids arrive as numbers, occasionally as numeric strings.
fn numeric_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

impl Entry {
    /// Raw field value.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String field value. Missing, null and non-string values are `None`.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Related entries stored under `key`.
    ///
    /// Accepts a nested envelope (`{ "data": ... }`), a list of items, or a
    /// single item. Anything unrecognized yields an empty list.
    #[must_use]
    pub fn relation(&self, key: &str) -> Vec<Entry> {
        let Some(value) = self.fields.get(key) else {
            return Vec::new();
        };
        let inner = match value {
            Value::Object(map) => map.get("data").unwrap_or(value),
            other => other,
        };
        Data::deserialize(inner)
            .map(Data::into_entries)
            .unwrap_or_default()
    }

    /// Deserialize the entry into a typed struct.
    ///
    /// `id` and `documentId` are visible to the target type alongside the
    /// content fields.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let mut object = self.fields.clone();
        if let Some(id) = self.id {
            object.insert("id".to_owned(), Value::from(id));
        }
        if let Some(document_id) = &self.document_id {
            object.insert("documentId".to_owned(), Value::from(document_id.as_str()));
        }
        serde_json::from_value(Value::Object(object))
    }
}
