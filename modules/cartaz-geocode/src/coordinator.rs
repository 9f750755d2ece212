//! Save-triggered coordinate resolution.
//!
//! Invoked explicitly from the venue write path:
//! `repo.save(venue); coordinator.ensure_coordinates(&venue)`. One provider
//! call per triggering save, gated by the already-resolved check, and no
//! automatic retry — re-saving with cleared coordinates is the retry.

use tracing::{debug, info, warn};

use cartaz_common::{keys, ContentRepository, FieldValue, Record, RecordType};
use cartaz_resolve::resolve_field;

use crate::client::Geocoder;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocodeOutcome {
    /// Both coordinates already set; no provider call was made.
    AlreadyResolved,
    /// The venue has no city, so there is nothing useful to ask for.
    NotGeocodable,
    /// Transport failure or non-2xx from the provider.
    ProviderUnavailable,
    /// The provider answered but had no usable candidate.
    NoMatch,
    /// Coordinates were found but writing them back failed; the venue is
    /// still unresolved and the next save retries.
    PersistFailed,
    Resolved { lat: f64, lng: f64 },
}

pub struct GeocodeCoordinator<R, G> {
    repo: R,
    geocoder: G,
    country: String,
}

impl<R: ContentRepository, G: Geocoder> GeocodeCoordinator<R, G> {
    pub fn new(repo: R, geocoder: G, country: impl Into<String>) -> Self {
        Self {
            repo,
            geocoder,
            country: country.into(),
        }
    }

    /// Fill in missing coordinates for a just-saved venue. Never fatal: every
    /// failure mode is logged and the triggering save still succeeds.
    pub async fn ensure_coordinates(&self, venue: &Record) -> GeocodeOutcome {
        if has_coordinates(venue) {
            return GeocodeOutcome::AlreadyResolved;
        }

        let Some(city) = venue.field(keys::VENUE_CITY).as_text() else {
            debug!(venue_id = venue.id, "Venue has no city, skipping geocode");
            return GeocodeOutcome::NotGeocodable;
        };

        let query = [
            venue.field(keys::VENUE_ADDRESS).as_text().unwrap_or(""),
            city,
            self.country.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        let hits = match self.geocoder.search(&query).await {
            Ok(hits) => hits,
            Err(error) => {
                warn!(venue_id = venue.id, query = query.as_str(), error = %error,
                    "Geocoding provider unavailable");
                return GeocodeOutcome::ProviderUnavailable;
            }
        };

        let Some(hit) = hits.first() else {
            warn!(venue_id = venue.id, query = query.as_str(), "No geocoding results");
            return GeocodeOutcome::NoMatch;
        };

        if let Err(error) = self.persist(venue.id, hit.lat, hit.lng).await {
            warn!(venue_id = venue.id, error = %error,
                "Failed to persist coordinates (will retry on next save)");
            return GeocodeOutcome::PersistFailed;
        }

        info!(venue_id = venue.id, lat = hit.lat, lng = hit.lng, "Venue geocoded");
        GeocodeOutcome::Resolved {
            lat: hit.lat,
            lng: hit.lng,
        }
    }

    async fn persist(&self, venue_id: i64, lat: f64, lng: f64) -> anyhow::Result<()> {
        self.repo
            .set_field(
                RecordType::Venue,
                venue_id,
                keys::VENUE_LATITUDE[0],
                FieldValue::Number(lat),
            )
            .await?;
        self.repo
            .set_field(
                RecordType::Venue,
                venue_id,
                keys::VENUE_LONGITUDE[0],
                FieldValue::Number(lng),
            )
            .await
    }
}

/// Resolved means both components present and non-zero, under either schema
/// generation. Zero is the storage convention for "unresolved".
fn has_coordinates(venue: &Record) -> bool {
    let lat = resolve_field(venue, &keys::VENUE_LATITUDE).as_f64();
    let lng = resolve_field(venue, &keys::VENUE_LONGITUDE).as_f64();
    matches!((lat, lng), (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_coordinates_count_as_unresolved() {
        let venue = Record::new(1, RecordType::Venue, "V")
            .with_field("latitude", 0.0)
            .with_field("longitude", 0.0);
        assert!(!has_coordinates(&venue));
    }

    #[test]
    fn legacy_coordinate_keys_satisfy_the_gate() {
        let venue = Record::new(1, RecordType::Venue, "V")
            .with_field("geo_lat", -22.9)
            .with_field("geo_lng", -43.2);
        assert!(has_coordinates(&venue));
    }

    #[test]
    fn half_set_coordinates_do_not_satisfy_the_gate() {
        let venue = Record::new(1, RecordType::Venue, "V").with_field("latitude", -22.9);
        assert!(!has_coordinates(&venue));
    }
}
