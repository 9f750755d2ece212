//! Venue resolution cascade.
//!
//! An event may link a venue record (current or legacy key), or carry only a
//! free-text `"name | region"` label from before venues became records. Every
//! failure along the cascade degrades to an emptier venue — the caller always
//! receives a `Venue` value, never an error.

use serde::{Deserialize, Serialize};
use tracing::warn;

use cartaz_common::{keys, ContentRepository, FieldValue, Record, RecordType};

use crate::field::resolve_field;

/// Resolved geographic coordinates. Only constructed when both components
/// are present and non-zero, so a venue can never carry a latitude without a
/// longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Zero is the storage convention for "unresolved", so a 0.0 component
    /// means no coordinates at all.
    pub fn resolve(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng))
                if lat != 0.0 && lng != 0.0 && lat.is_finite() && lng.is_finite() =>
            {
                Some(Self { lat, lng })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Venue {
    /// `None` when the venue only exists as a free-text label on the event.
    pub id: Option<i64>,
    pub name: String,
    pub region: String,
    pub address: String,
    pub city: String,
    pub images: Vec<String>,
    pub coordinates: Option<Coordinates>,
}

pub struct VenueResolver<R> {
    repo: R,
}

impl<R: ContentRepository> VenueResolver<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn resolve(&self, event: &Record) -> Venue {
        match self.linked_venue(event).await {
            Some(venue_record) => Self::from_venue_record(event, &venue_record),
            None => Self::from_location_label(event),
        }
    }

    /// Fetch the linked venue record, if any. Unknown ids, fetch failures and
    /// non-published records all collapse into `None`.
    async fn linked_venue(&self, event: &Record) -> Option<Record> {
        // The legacy key may hold a single-element list.
        let id = resolve_field(event, &keys::EVENT_VENUE_ID).first().as_id()?;
        if id <= 0 {
            return None;
        }
        match self.repo.get_record(RecordType::Venue, id).await {
            Ok(Some(record)) if record.is_published() => Some(record),
            Ok(_) => None,
            Err(error) => {
                warn!(venue_id = id, error = %error, "Venue fetch failed, degrading to label");
                None
            }
        }
    }

    fn from_venue_record(event: &Record, venue: &Record) -> Venue {
        let name = resolve_field(venue, &[keys::VENUE_NAME])
            .as_text()
            .unwrap_or(&venue.title)
            .trim()
            .to_string();

        let lat = resolve_field(venue, &keys::VENUE_LATITUDE).as_f64();
        let lng = resolve_field(venue, &keys::VENUE_LONGITUDE).as_f64();
        let coordinates = Coordinates::resolve(lat, lng).or_else(|| {
            // Venue-level resolution came up short; two more legacy variants
            // live on the event itself.
            Coordinates::resolve(
                resolve_field(event, &keys::EVENT_LATITUDE).as_f64(),
                resolve_field(event, &keys::EVENT_LONGITUDE).as_f64(),
            )
        });

        Venue {
            id: Some(venue.id),
            name,
            region: text_of(venue.field(keys::VENUE_REGION)),
            address: text_of(venue.field(keys::VENUE_ADDRESS)),
            city: text_of(venue.field(keys::VENUE_CITY)),
            images: image_scan(venue, keys::venue_image_key),
            coordinates,
        }
    }

    /// `"Fundição Progresso | Lapa"` → name + region, nothing else.
    fn from_location_label(event: &Record) -> Venue {
        let label = text_of(event.field(keys::EVENT_LOCATION_LABEL));
        let mut parts = label.splitn(2, '|');
        let name = parts.next().unwrap_or("").trim().to_string();
        let region = parts.next().unwrap_or("").trim().to_string();
        Venue {
            name,
            region,
            ..Venue::default()
        }
    }
}

/// Fixed-index image slots 1..=5; the first empty index ends the scan.
pub(crate) fn image_scan(record: &Record, key_for: fn(usize) -> String) -> Vec<String> {
    let mut images = Vec::new();
    for index in 1..=keys::MAX_IMAGES {
        match record.field(&key_for(index)).as_text() {
            Some(url) => images.push(url.trim().to_string()),
            None => break,
        }
    }
    images
}

fn text_of(value: &FieldValue) -> String {
    value.as_text().unwrap_or("").trim().to_string()
}
