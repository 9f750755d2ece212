//! In-memory ContentRepository for tests. No backend required.
//!
//! Executes the documented query semantics honestly (AND across filter kinds,
//! OR within a kind's term list, typed date comparison) so integration tests
//! exercise the same contract a production store would honor. `Random` order
//! is deliberately deterministic here — insertion order — to keep tests
//! reproducible; the trait only promises "unspecified order".

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::keys;
use crate::query::{MetaFilter, MetaOp, QueryOrder, RepositoryQuery};
use crate::record::{Record, RecordType};
use crate::repo::ContentRepository;
use crate::value::{parse_date, FieldValue};

#[derive(Default)]
pub struct MemoryRepository {
    records: Mutex<HashMap<(RecordType, i64), Record>>,
    insertion: Mutex<Vec<(RecordType, i64)>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: Record) {
        let key = (record.record_type, record.id);
        let mut records = self.records.lock().unwrap();
        if records.insert(key, record).is_none() {
            self.insertion.lock().unwrap().push(key);
        }
    }

    /// Snapshot of one record, for test assertions after write-backs.
    pub fn snapshot(&self, record_type: RecordType, id: i64) -> Option<Record> {
        self.records.lock().unwrap().get(&(record_type, id)).cloned()
    }

    fn matches(&self, record: &Record, query: &RepositoryQuery) -> bool {
        if !record.is_published() {
            return false;
        }
        for tf in &query.term_filters {
            let ids = record.term_ids(&tf.taxonomy);
            if !tf.term_ids.iter().any(|id| ids.contains(id)) {
                return false;
            }
        }
        for mf in &query.meta_filters {
            if !meta_matches(record, mf) {
                return false;
            }
        }
        if let Some(search) = &query.search {
            if !record
                .title
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

fn meta_matches(record: &Record, filter: &MetaFilter) -> bool {
    let actual = record.field(&filter.key);
    if filter.as_date {
        let (Some(a), Some(b)) = (parse_date(actual), parse_date(&filter.value)) else {
            return false;
        };
        return apply_op(filter.op, a, b);
    }
    match filter.op {
        MetaOp::Eq => {
            actual == &filter.value
                || matches!((actual.as_f64(), filter.value.as_f64()), (Some(a), Some(b)) if a == b)
        }
        MetaOp::GtEq | MetaOp::LtEq => {
            let (Some(a), Some(b)) = (actual.as_f64(), filter.value.as_f64()) else {
                return false;
            };
            apply_op(filter.op, a, b)
        }
    }
}

fn apply_op<T: PartialOrd>(op: MetaOp, a: T, b: T) -> bool {
    match op {
        MetaOp::Eq => a == b,
        MetaOp::GtEq => a >= b,
        MetaOp::LtEq => a <= b,
    }
}

fn start_date(record: &Record) -> Option<NaiveDate> {
    keys::EVENT_START_DATE
        .iter()
        .map(|k| record.field(k))
        .find(|v| !v.is_empty())
        .and_then(parse_date)
}

#[async_trait]
impl ContentRepository for MemoryRepository {
    async fn get_record(&self, record_type: RecordType, id: i64) -> Result<Option<Record>> {
        Ok(self.snapshot(record_type, id))
    }

    async fn list_records(&self, query: &RepositoryQuery) -> Result<Vec<Record>> {
        let records = self.records.lock().unwrap();
        let order = self.insertion.lock().unwrap();

        let mut hits: Vec<Record> = order
            .iter()
            .filter(|(t, _)| *t == query.record_type)
            .filter_map(|key| records.get(key))
            .filter(|r| self.matches(r, query))
            .cloned()
            .collect();

        match query.order {
            QueryOrder::StartDate => {
                // Dateless records sort last; the sort is stable.
                hits.sort_by_key(|r| (start_date(r).is_none(), start_date(r)));
            }
            QueryOrder::CreatedDate => {
                hits.sort_by_key(|r| std::cmp::Reverse(r.created_at));
            }
            QueryOrder::Title => {
                hits.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
            }
            QueryOrder::Random => {}
        }

        if let Some(limit) = query.limit {
            hits.truncate(limit);
        }
        Ok(hits)
    }

    async fn set_field(
        &self,
        record_type: RecordType,
        id: i64,
        key: &str,
        value: FieldValue,
    ) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.get_mut(&(record_type, id)) else {
            bail!("no {record_type} record with id {id}");
        };
        record.fields.insert(key.to_string(), value);
        Ok(())
    }
}
