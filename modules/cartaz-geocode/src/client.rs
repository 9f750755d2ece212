//! Geocoding provider client.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Provider connection settings. Constructed explicitly and passed in, which
/// keeps endpoint and timeout substitutable in tests.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    pub endpoint: String,
    /// Country literal appended to every query (the catalog is single-country).
    pub country: String,
    /// Identifying client tag; Nominatim requires one.
    pub user_agent: String,
    pub timeout: Duration,
}

impl GeocodeConfig {
    pub fn from_config(config: &cartaz_common::Config) -> Self {
        Self {
            endpoint: config.geocode_endpoint.clone(),
            country: config.geocode_country.clone(),
            user_agent: config.geocode_user_agent.clone(),
            timeout: Duration::from_secs(config.geocode_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeHit {
    pub lat: f64,
    pub lng: f64,
}

/// One forward-geocoding lookup. Implementations return candidates in
/// provider relevance order; callers use only the first.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeHit>>;
}

// Arc blanket — lets tests share the provider for assertions.
#[async_trait]
impl<G: Geocoder + ?Sized> Geocoder for Arc<G> {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeHit>> {
        (**self).search(query).await
    }
}

#[derive(Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

pub struct NominatimClient {
    http: reqwest::Client,
    config: GeocodeConfig,
}

impl NominatimClient {
    pub fn new(config: GeocodeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeHit>> {
        let resp = self
            .http
            .get(&self.config.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .header("User-Agent", &self.config.user_agent)
            .send()
            .await?
            .error_for_status()?;

        let results: Vec<NominatimResult> = resp.json().await?;
        Ok(results
            .into_iter()
            .filter_map(|r| parse_hit(&r.lat, &r.lon))
            .collect())
    }
}

/// Nominatim returns lat/lon as strings; unparseable candidates are dropped.
fn parse_hit(lat: &str, lon: &str) -> Option<GeocodeHit> {
    Some(GeocodeHit {
        lat: lat.trim().parse().ok()?,
        lng: lon.trim().parse().ok()?,
    })
}
