//! FieldValue — the value domain of repository fields.
//!
//! Repository fields are heterogeneous: strings, numbers, id references,
//! lists of any of those. Resolution code never branches on "null vs empty
//! string vs missing key" — all of those collapse into the explicit `Empty`
//! sentinel, which is what the fallback cascades test against.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    Id(i64),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
    #[default]
    Empty,
}

impl FieldValue {
    /// Shared `'static` empty sentinel, for APIs that hand out references.
    pub const EMPTY: &'static FieldValue = &FieldValue::Empty;

    /// Blank text and empty lists count as empty — a field holding `""` is
    /// indistinguishable from a field that was never set.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Id(_) | FieldValue::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Id(i) => Some(*i as f64),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Numeric identity: `Id(5)`, `Number(5.0)` and `Text("5")` all resolve
    /// to id 5. Legacy fields stored references as strings.
    pub fn as_id(&self) -> Option<i64> {
        match self {
            FieldValue::Id(i) => Some(*i),
            FieldValue::Number(n) if n.fract() == 0.0 => Some(*n as i64),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// First element of a list, or the scalar itself. Legacy relation fields
    /// sometimes arrive as single-element lists.
    pub fn first(&self) -> &FieldValue {
        match self {
            FieldValue::List(items) => items.first().unwrap_or(FieldValue::EMPTY),
            other => other,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Id(i)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// Parse a date field. Current records store ISO `YYYY-MM-DD`; some legacy
/// ones store `DD/MM/YYYY`. Anything else is "unknown", never an error.
pub fn parse_date(value: &FieldValue) -> Option<chrono::NaiveDate> {
    let text = value.as_text()?.trim();
    chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| chrono::NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .ok()
}
