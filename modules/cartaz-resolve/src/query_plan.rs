//! Event query planning.
//!
//! Pure translation of a caller-facing `EventFilter` into a `RepositoryQuery`.
//! Each recognized filter contributes one predicate; term-set filters AND
//! across kinds and OR within a kind's list (repository semantics — nothing
//! is executed here).

use chrono::NaiveDate;

use cartaz_common::{
    keys, FieldValue, MetaFilter, MetaOp, QueryOrder, RecordType, RepositoryQuery, TermFilter,
};

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub categories: Vec<i64>,
    pub event_types: Vec<i64>,
    pub sounds: Vec<i64>,
    pub seasons: Vec<i64>,
    pub featured_only: bool,
    /// Start date ≥ today, compared as a typed date.
    pub upcoming_only: bool,
    pub search: Option<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub order: QueryOrder,
    pub limit: Option<usize>,
}

pub fn plan_query(filter: &EventFilter, today: NaiveDate) -> RepositoryQuery {
    let mut query = RepositoryQuery::for_type(RecordType::Event);

    let term_kinds = [
        (keys::TAX_CATEGORY, &filter.categories),
        (keys::TAX_EVENT_TYPE, &filter.event_types),
        (keys::TAX_SOUND, &filter.sounds),
        (keys::TAX_SEASON, &filter.seasons),
    ];
    for (taxonomy, term_ids) in term_kinds {
        if !term_ids.is_empty() {
            query.term_filters.push(TermFilter {
                taxonomy: taxonomy.to_string(),
                term_ids: term_ids.clone(),
            });
        }
    }

    if filter.featured_only {
        query.meta_filters.push(MetaFilter {
            key: keys::EVENT_FEATURED.to_string(),
            op: MetaOp::Eq,
            value: FieldValue::Id(1),
            as_date: false,
        });
    }

    if filter.upcoming_only {
        query.meta_filters.push(date_bound(MetaOp::GtEq, today));
    }

    if let Some((from, to)) = filter.date_range {
        query.meta_filters.push(date_bound(MetaOp::GtEq, from));
        query.meta_filters.push(date_bound(MetaOp::LtEq, to));
    }

    query.search = filter.search.clone();
    query.order = filter.order;
    query.limit = filter.limit;
    query
}

fn date_bound(op: MetaOp, date: NaiveDate) -> MetaFilter {
    MetaFilter {
        key: keys::EVENT_START_DATE[0].to_string(),
        op,
        value: FieldValue::text(date.format("%Y-%m-%d").to_string()),
        as_date: true,
    }
}
