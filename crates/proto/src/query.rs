use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Number of records requested when the caller doesn't say otherwise.
pub const DEFAULT_QUERY_LIMIT: u32 = 25;

/// Record fields the backend can sort query results by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Sort by chunk identifier.
    ChunkId,
    /// Sort by document identifier.
    DocId,
    /// Sort by the object key of the source document.
    SourceKey,
    /// Sort by security clearance label.
    SecurityClearance,
}

impl SortField {
    /// All sortable fields.
    pub const ALL: [SortField; 4] = [
        SortField::ChunkId,
        SortField::DocId,
        SortField::SourceKey,
        SortField::SecurityClearance,
    ];

    /// Returns the wire name of the field.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::ChunkId => "chunk_id",
            SortField::DocId => "doc_id",
            SortField::SourceKey => "source_key",
            SortField::SecurityClearance => "security_clearance",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                let allowed = SortField::ALL.map(|field| field.as_str());
                ParseSortError(format!(
                    "sort field must be one of: {}",
                    allowed.join(", ")
                ))
            })
    }
}

/// Direction of a sorted query.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the wire name of the order.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ParseSortError(
                "sort order must be 'asc' or 'desc'".to_owned(),
            )),
        }
    }
}

/// Error returned when parsing [`SortField`] or [`SortOrder`] fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSortError(String);

impl Display for ParseSortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for ParseSortError {}

/// The body posted to `/query`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    /// Phrase to search for.
    pub phrase: String,
    /// Restricts the search to one document. Empty means all documents.
    pub doc_id: String,
    /// Maximum number of records to return.
    pub limit: u32,
    /// Field to sort by. Unsorted when `None`.
    #[serde(serialize_with = "serialize_sort_field")]
    pub sort_by: Option<SortField>,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl QueryRequest {
    /// Creates a request for `phrase` with default options.
    #[inline]
    pub fn with_phrase<S: Into<String>>(phrase: S) -> Self {
        Self {
            phrase: phrase.into(),
            ..Default::default()
        }
    }

    /// Restricts the search to one document.
    #[inline]
    pub fn with_doc_id<S: Into<String>>(mut self, doc_id: S) -> Self {
        self.doc_id = doc_id.into();
        self
    }

    /// Sets the record limit.
    #[inline]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sorts the results.
    #[inline]
    pub fn sorted_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_by = Some(field);
        self.sort_order = order;
        self
    }
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            phrase: String::new(),
            doc_id: String::new(),
            limit: DEFAULT_QUERY_LIMIT,
            sort_by: None,
            sort_order: SortOrder::default(),
        }
    }
}

// The backend reads an empty `sort_by` as "unsorted".
fn serialize_sort_field<S: Serializer>(
    field: &Option<SortField>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(field.map(|f| f.as_str()).unwrap_or_default())
}

/// A successful `/query` reply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryReply {
    /// Number of records found.
    pub count: u64,
    /// The GraphQL the backend ran, verbatim.
    pub graphql_query: Option<String>,
    /// The matching records, if the body carried any.
    pub records: Option<Value>,
}

impl QueryReply {
    /// Extracts a reply from a successful response body.
    pub fn from_body(body: &Value) -> Self {
        let records = body.get("records").cloned();
        let count = body
            .get("count")
            .and_then(Value::as_u64)
            .or_else(|| {
                records.as_ref()?.as_array().map(|r| r.len() as u64)
            })
            .unwrap_or_default();
        Self {
            count,
            graphql_query: graphql_query(body).map(ToOwned::to_owned),
            records,
        }
    }
}

/// Returns the `graphql_query` string of a `/query` body, if any.
pub fn graphql_query(body: &Value) -> Option<&str> {
    body.get("graphql_query").and_then(Value::as_str)
}
