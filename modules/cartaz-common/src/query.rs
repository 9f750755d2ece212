//! Repository query description.
//!
//! A `RepositoryQuery` is plain data. The engine only assembles it; execution
//! semantics belong to the `ContentRepository` implementation: term filters
//! AND across kinds and OR within one kind's id list, meta filters all AND.

use serde::{Deserialize, Serialize};

use crate::record::RecordType;
use crate::value::FieldValue;

/// OR within `term_ids`, AND against other filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermFilter {
    pub taxonomy: String,
    pub term_ids: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaOp {
    Eq,
    GtEq,
    LtEq,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaFilter {
    pub key: String,
    pub op: MetaOp,
    pub value: FieldValue,
    /// Compare as calendar dates, not strings. Required for start-date
    /// bounds; `"2025-10-02" < "2025-9-1"` as strings.
    pub as_date: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueryOrder {
    /// Typed date ordering on the event start-date field.
    StartDate,
    #[default]
    CreatedDate,
    Title,
    /// Unspecified order; implementations may shuffle or not.
    Random,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryQuery {
    pub record_type: RecordType,
    pub term_filters: Vec<TermFilter>,
    pub meta_filters: Vec<MetaFilter>,
    /// Case-insensitive substring match on the record title.
    pub search: Option<String>,
    pub order: QueryOrder,
    pub limit: Option<usize>,
}

impl RepositoryQuery {
    pub fn for_type(record_type: RecordType) -> Self {
        Self {
            record_type,
            term_filters: Vec::new(),
            meta_filters: Vec::new(),
            search: None,
            order: QueryOrder::default(),
            limit: None,
        }
    }
}
