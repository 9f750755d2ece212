//! Lineup normalization.
//!
//! Raw lineup data arrives in two shapes: a structured timetable of
//! `{dj, start, end}` rows (where `dj` is a performer id or a literal name)
//! or a single legacy free-text performer field. Both shapes are resolved
//! once at the boundary into the canonical list: deduplicated by resolved
//! name, sorted by start time with unknown starts last.

use serde::{Deserialize, Serialize};
use tracing::warn;

use cartaz_common::{keys, ContentRepository, Record, RecordType};

use crate::field::resolve_field;

// ---------------------------------------------------------------------------
// Raw shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPerformer {
    Id(i64),
    Name(String),
}

/// One timetable row as stored. Any sub-field may be missing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSlot {
    pub dj: Option<RawPerformer>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Raw lineup shape, decided once when reading the event record.
#[derive(Debug, Clone)]
pub enum Lineup {
    Structured(Vec<RawSlot>),
    LegacySingleName(String),
    Empty,
}

impl Lineup {
    pub fn from_record(event: &Record) -> Self {
        if let Some(json) = event.field(keys::EVENT_TIMETABLE).as_text() {
            match serde_json::from_str::<Vec<RawSlot>>(json) {
                Ok(slots) if !slots.is_empty() => return Lineup::Structured(slots),
                Ok(_) => {}
                Err(error) => {
                    warn!(event_id = event.id, error = %error, "Unparseable timetable, skipping");
                }
            }
        }
        match event.field(keys::EVENT_LEGACY_DJ).as_text() {
            Some(name) => Lineup::LegacySingleName(name.trim().to_string()),
            None => Lineup::Empty,
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical slots
// ---------------------------------------------------------------------------

/// Start/end are zero-padded `"HH:MM"` strings; empty means unknown. End
/// defaults to start when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSlot {
    pub name: String,
    pub start: String,
    pub end: String,
}

/// Normalize a raw time to zero-padded `"HH:MM"`. Anything unparseable is
/// unknown, not an error.
fn normalize_hhmm(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, ':');
    let (Some(h), Some(m)) = (parts.next(), parts.next()) else {
        return String::new();
    };
    match (h.trim().parse::<u32>(), m.trim().parse::<u32>()) {
        (Ok(h), Ok(m)) if h < 24 && m < 60 => format!("{h:02}:{m:02}"),
        _ => String::new(),
    }
}

pub struct LineupResolver<R> {
    repo: R,
}

impl<R: ContentRepository> LineupResolver<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn resolve(&self, event: &Record) -> Vec<PerformanceSlot> {
        let mut slots = Vec::new();

        match Lineup::from_record(event) {
            Lineup::Structured(raw_slots) => {
                for raw in raw_slots {
                    if let Some(slot) = self.resolve_slot(raw).await {
                        slots.push(slot);
                    }
                }
                // The legacy single-performer field may still be set alongside
                // the timetable; it joins as one more slot with unknown times.
                if let Some(name) = event.field(keys::EVENT_LEGACY_DJ).as_text() {
                    slots.push(PerformanceSlot {
                        name: name.trim().to_string(),
                        start: String::new(),
                        end: String::new(),
                    });
                }
            }
            Lineup::LegacySingleName(name) => {
                slots.push(PerformanceSlot {
                    name,
                    start: String::new(),
                    end: String::new(),
                });
            }
            Lineup::Empty => {}
        }

        dedup_by_name(&mut slots);

        // Stable: unknown starts sort last, keeping their relative input order.
        slots.sort_by(|a, b| {
            (a.start.is_empty(), a.start.as_str()).cmp(&(b.start.is_empty(), b.start.as_str()))
        });
        slots
    }

    /// Rows without a resolvable performer are dropped silently.
    async fn resolve_slot(&self, raw: RawSlot) -> Option<PerformanceSlot> {
        let name = match raw.dj? {
            RawPerformer::Id(id) => self.performer_name(id).await?,
            // Legacy rows sometimes store the performer id as a string.
            RawPerformer::Name(text) => match text.trim().parse::<i64>() {
                Ok(id) => self.performer_name(id).await?,
                Err(_) => {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        return None;
                    }
                    trimmed.to_string()
                }
            },
        };

        let start = normalize_hhmm(raw.start.as_deref());
        let end = normalize_hhmm(raw.end.as_deref());
        let end = if end.is_empty() { start.clone() } else { end };
        Some(PerformanceSlot { name, start, end })
    }

    async fn performer_name(&self, id: i64) -> Option<String> {
        match self.repo.get_record(RecordType::Performer, id).await {
            Ok(Some(performer)) if performer.is_published() => {
                let name = resolve_field(&performer, &[keys::PERFORMER_STAGE_NAME])
                    .as_text()
                    .unwrap_or(&performer.title)
                    .trim()
                    .to_string();
                (!name.is_empty()).then_some(name)
            }
            Ok(_) => None,
            Err(error) => {
                warn!(performer_id = id, error = %error, "Performer fetch failed, dropping slot");
                None
            }
        }
    }
}

/// Case-sensitive exact-name dedup keeping the first occurrence.
fn dedup_by_name(slots: &mut Vec<PerformanceSlot>) {
    let mut seen = std::collections::HashSet::new();
    slots.retain(|slot| seen.insert(slot.name.clone()));
}

// ---------------------------------------------------------------------------
// Display boundary
// ---------------------------------------------------------------------------

/// Pure data for the lineup display boundary: the first `max_visible` names
/// plus how many were cut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupDisplay {
    pub visible_names: Vec<String>,
    pub overflow_count: usize,
}

impl LineupDisplay {
    /// First-name-bold summary line, e.g. `**Marina Lima**, DJ Convidado +2 more`.
    pub fn headline(&self) -> String {
        let mut out = String::new();
        for (i, name) in self.visible_names.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if i == 0 {
                out.push_str(&format!("**{name}**"));
            } else {
                out.push_str(name);
            }
        }
        if self.overflow_count > 0 {
            out.push_str(&format!(" +{} more", self.overflow_count));
        }
        out
    }
}

pub fn display_window(slots: &[PerformanceSlot], max_visible: usize) -> LineupDisplay {
    let visible_names: Vec<String> = slots
        .iter()
        .take(max_visible)
        .map(|s| s.name.clone())
        .collect();
    LineupDisplay {
        overflow_count: slots.len().saturating_sub(max_visible),
        visible_names,
    }
}
