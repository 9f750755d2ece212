//! Record envelope for content-repository rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Event,
    Venue,
    Performer,
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordType::Event => write!(f, "event"),
            RecordType::Venue => write!(f, "venue"),
            RecordType::Performer => write!(f, "performer"),
        }
    }
}

/// Visibility status. Resolvers treat anything but `Published` as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Published,
    Draft,
    Hidden,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub record_type: RecordType,
    pub title: String,
    pub status: RecordStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Opaque string keys. Current and legacy schema generations coexist in
    /// the same map; the resolvers bridge them.
    pub fields: HashMap<String, FieldValue>,
    /// Term references grouped by taxonomy (category, event type, sound, season).
    pub terms: HashMap<String, Vec<i64>>,
}

impl Record {
    pub fn new(id: i64, record_type: RecordType, title: impl Into<String>) -> Self {
        Self {
            id,
            record_type,
            title: title.into(),
            status: RecordStatus::Published,
            created_at: chrono::Utc::now(),
            fields: HashMap::new(),
            terms: HashMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_terms(mut self, taxonomy: impl Into<String>, term_ids: Vec<i64>) -> Self {
        self.terms.insert(taxonomy.into(), term_ids);
        self
    }

    /// Field lookup returning the `Empty` sentinel for missing keys.
    pub fn field(&self, key: &str) -> &FieldValue {
        self.fields.get(key).unwrap_or(FieldValue::EMPTY)
    }

    pub fn is_published(&self) -> bool {
        self.status == RecordStatus::Published
    }

    pub fn term_ids(&self, taxonomy: &str) -> &[i64] {
        self.terms.get(taxonomy).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_is_empty_sentinel() {
        let r = Record::new(1, RecordType::Event, "Show");
        assert!(r.field("nope").is_empty());
    }

    #[test]
    fn builder_sets_fields_and_terms() {
        let r = Record::new(2, RecordType::Venue, "Circo Voador")
            .with_field("city", "Rio de Janeiro")
            .with_terms("category", vec![3, 4]);
        assert_eq!(r.field("city").as_text(), Some("Rio de Janeiro"));
        assert_eq!(r.term_ids("category"), &[3, 4]);
        assert!(r.term_ids("sound").is_empty());
    }
}
