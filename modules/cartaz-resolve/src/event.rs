//! Full event resolution facade.
//!
//! Pulls every effective field of an event through the candidate chains and
//! attaches the resolved venue and canonical lineup. This is the record shape
//! templates and widgets consume.

use chrono::NaiveDate;
use serde::Serialize;

use cartaz_common::{keys, parse_date, ContentRepository, Record};

use crate::field::resolve_field;
use crate::lineup::{LineupResolver, PerformanceSlot};
use crate::venue::{image_scan, Venue, VenueResolver};

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedEvent {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// `None` when the stored date is absent or malformed.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: String,
    pub end_time: String,
    pub banner: String,
    pub ticket_url: String,
    pub coupon_code: String,
    pub images: Vec<String>,
    pub final_image: String,
    pub featured: bool,
    /// Term ids the event is tagged with, per taxonomy. Consumers render
    /// these as badges and links without another repository round trip.
    pub categories: Vec<i64>,
    pub event_types: Vec<i64>,
    pub sounds: Vec<i64>,
    pub seasons: Vec<i64>,
    pub venue: Venue,
    pub lineup: Vec<PerformanceSlot>,
}

pub struct EventResolver<R> {
    venues: VenueResolver<R>,
    lineups: LineupResolver<R>,
}

impl<R: ContentRepository + Clone> EventResolver<R> {
    pub fn new(repo: R) -> Self {
        Self {
            venues: VenueResolver::new(repo.clone()),
            lineups: LineupResolver::new(repo),
        }
    }

    pub async fn resolve(&self, event: &Record) -> ResolvedEvent {
        ResolvedEvent {
            id: event.id,
            title: event.title.clone(),
            description: text(event, &[keys::EVENT_DESCRIPTION]),
            start_date: parse_date(resolve_field(event, &keys::EVENT_START_DATE)),
            end_date: parse_date(resolve_field(event, &keys::EVENT_END_DATE)),
            start_time: text(event, &keys::EVENT_START_TIME),
            end_time: text(event, &keys::EVENT_END_TIME),
            banner: text(event, &[keys::EVENT_BANNER]),
            ticket_url: text(event, &[keys::EVENT_TICKET_URL]),
            coupon_code: text(event, &[keys::EVENT_COUPON_CODE]),
            images: image_scan(event, keys::event_image_key),
            final_image: text(event, &[keys::EVENT_FINAL_IMAGE]),
            featured: is_truthy(event),
            categories: event.term_ids(keys::TAX_CATEGORY).to_vec(),
            event_types: event.term_ids(keys::TAX_EVENT_TYPE).to_vec(),
            sounds: event.term_ids(keys::TAX_SOUND).to_vec(),
            seasons: event.term_ids(keys::TAX_SEASON).to_vec(),
            venue: self.venues.resolve(event).await,
            lineup: self.lineups.resolve(event).await,
        }
    }
}

fn text(record: &Record, candidates: &[&str]) -> String {
    resolve_field(record, candidates)
        .as_text()
        .unwrap_or("")
        .trim()
        .to_string()
}

/// The featured flag was stored as `"1"`, `1` or `"true"` over the years.
fn is_truthy(event: &Record) -> bool {
    let value = event.field(keys::EVENT_FEATURED);
    value.as_id() == Some(1)
        || matches!(value.as_text(), Some(t) if matches!(t.trim(), "true" | "yes"))
}
