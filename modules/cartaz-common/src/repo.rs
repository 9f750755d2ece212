//! ContentRepository — the seam to the external content store.
//!
//! The engine never owns Event/Venue/Performer records; it reads them through
//! this trait and writes back exactly one derived value (venue coordinates).
//! Keys are opaque strings — no storage backend is assumed.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::query::RepositoryQuery;
use crate::record::{Record, RecordType};
use crate::value::FieldValue;

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetch a record by type and id. `Ok(None)` for unknown ids.
    async fn get_record(&self, record_type: RecordType, id: i64) -> Result<Option<Record>>;

    /// Execute a query. Term filters AND across kinds, OR within a kind.
    async fn list_records(&self, query: &RepositoryQuery) -> Result<Vec<Record>>;

    /// Write a single field back onto a record.
    async fn set_field(
        &self,
        record_type: RecordType,
        id: i64,
        key: &str,
        value: FieldValue,
    ) -> Result<()>;
}

// Arc blanket — lets tests share the repository for assertions.
#[async_trait]
impl<R: ContentRepository + ?Sized> ContentRepository for Arc<R> {
    async fn get_record(&self, record_type: RecordType, id: i64) -> Result<Option<Record>> {
        (**self).get_record(record_type, id).await
    }

    async fn list_records(&self, query: &RepositoryQuery) -> Result<Vec<Record>> {
        (**self).list_records(query).await
    }

    async fn set_field(
        &self,
        record_type: RecordType,
        id: i64,
        key: &str,
        value: FieldValue,
    ) -> Result<()> {
        (**self).set_field(record_type, id, key, value).await
    }
}
