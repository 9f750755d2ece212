//! Geocoding fallback for venue coordinates.
//!
//! Venues saved with an address but no coordinates get exactly one provider
//! lookup per save. Already-resolved venues are never touched, and no
//! provider failure is ever fatal to the save that triggered the lookup.

pub mod client;
pub mod coordinator;

pub use client::{GeocodeConfig, GeocodeHit, Geocoder, NominatimClient};
pub use coordinator::{GeocodeCoordinator, GeocodeOutcome};
