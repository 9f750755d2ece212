//! Meta-key catalog for current and legacy schema generations.
//!
//! The store went through several schema revisions and old records were never
//! migrated, so every logical field carries an ordered candidate list: current
//! key first, legacy keys after. Resolution tries them in order and takes the
//! first non-empty hit. Call sites reference these constants instead of
//! re-encoding the fallback chain.

/// Linked venue id on an event. The legacy `local` field may hold a
/// single-element list instead of a scalar.
pub const EVENT_VENUE_ID: [&str; 2] = ["event_venue", "local"];

/// Free-text `"name | region"` label used before venues became records.
pub const EVENT_LOCATION_LABEL: &str = "event_location";

pub const EVENT_START_DATE: [&str; 2] = ["event_start_date", "start_date"];
pub const EVENT_END_DATE: [&str; 2] = ["event_end_date", "end_date"];
pub const EVENT_START_TIME: [&str; 2] = ["event_start_time", "start_time"];
pub const EVENT_END_TIME: [&str; 2] = ["event_end_time", "end_time"];

pub const EVENT_DESCRIPTION: &str = "description";
pub const EVENT_BANNER: &str = "banner";
pub const EVENT_TICKET_URL: &str = "ticket_url";
pub const EVENT_COUPON_CODE: &str = "coupon_code";
pub const EVENT_FINAL_IMAGE: &str = "final_image";
pub const EVENT_FEATURED: &str = "featured";

/// Structured timetable rows, stored as JSON `[{"dj": .., "start": .., "end": ..}]`.
pub const EVENT_TIMETABLE: &str = "timetable";
/// Single free-text performer name from before the timetable existed.
pub const EVENT_LEGACY_DJ: &str = "dj_name";

/// Event-level coordinates, the last fallback when the venue has none.
pub const EVENT_LATITUDE: [&str; 2] = ["event_latitude", "map_lat"];
pub const EVENT_LONGITUDE: [&str; 2] = ["event_longitude", "map_lng"];

pub const VENUE_NAME: &str = "venue_name";
pub const VENUE_ADDRESS: &str = "address";
pub const VENUE_CITY: &str = "city";
pub const VENUE_REGION: &str = "region";
pub const VENUE_LATITUDE: [&str; 2] = ["latitude", "geo_lat"];
pub const VENUE_LONGITUDE: [&str; 2] = ["longitude", "geo_lng"];

pub const PERFORMER_STAGE_NAME: &str = "stage_name";

/// Promotional image slots are fixed-index, 1-based, at most five. A gap in
/// the index sequence terminates the scan — the slots are not sparse.
pub const MAX_IMAGES: usize = 5;

pub fn event_image_key(index: usize) -> String {
    format!("event_image_{index}")
}

pub fn venue_image_key(index: usize) -> String {
    format!("venue_image_{index}")
}

// Taxonomy names used by term filters.
pub const TAX_CATEGORY: &str = "category";
pub const TAX_EVENT_TYPE: &str = "event_type";
pub const TAX_SOUND: &str = "sound";
pub const TAX_SEASON: &str = "season";
