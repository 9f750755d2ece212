//! Ordered-candidate field lookup.

use cartaz_common::{FieldValue, Record};

/// Try each candidate key in order and return the first non-empty value, or
/// the `Empty` sentinel if none match. Pure and deterministic — the value of
/// a later candidate never affects the result once an earlier one is
/// non-empty. This is the single place where legacy key names are bridged;
/// call sites pass a candidate list instead of chaining fallback branches.
pub fn resolve_field<'a>(record: &'a Record, candidates: &[&str]) -> &'a FieldValue {
    for key in candidates {
        let value = record.field(key);
        if !value.is_empty() {
            return value;
        }
    }
    FieldValue::EMPTY
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartaz_common::RecordType;

    fn record() -> Record {
        Record::new(1, RecordType::Event, "Show")
            .with_field("current", "new-value")
            .with_field("legacy", "old-value")
            .with_field("blank", "   ")
    }

    #[test]
    fn first_non_empty_candidate_wins() {
        let r = record();
        assert_eq!(
            resolve_field(&r, &["current", "legacy"]).as_text(),
            Some("new-value")
        );
    }

    #[test]
    fn empty_candidates_are_skipped() {
        let r = record();
        assert_eq!(
            resolve_field(&r, &["missing", "blank", "legacy"]).as_text(),
            Some("old-value")
        );
    }

    #[test]
    fn later_candidates_do_not_affect_selection() {
        let r = record();
        let with_later = resolve_field(&r, &["current", "legacy"]);
        let without_later = resolve_field(&r, &["current"]);
        assert_eq!(with_later, without_later);
    }

    #[test]
    fn no_match_returns_empty_sentinel() {
        let r = record();
        assert!(resolve_field(&r, &["missing", "also-missing"]).is_empty());
    }
}
