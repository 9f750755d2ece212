//! Application configuration loaded from environment variables.
//!
//! Components never read the environment themselves — they receive the
//! relevant values at construction time, which keeps the geocoding endpoint
//! and timeout substitutable in tests.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    // Geocoding provider
    pub geocode_endpoint: String,
    pub geocode_country: String,
    pub geocode_user_agent: String,
    pub geocode_timeout_secs: u64,

    // Calendar widget
    pub calendar_max_events_per_day: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocode_endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            geocode_country: "Brasil".to_string(),
            geocode_user_agent: "cartaz/0.1".to_string(),
            geocode_timeout_secs: 10,
            calendar_max_events_per_day: 3,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults above for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            geocode_endpoint: env_or("GEOCODE_ENDPOINT", defaults.geocode_endpoint),
            geocode_country: env_or("GEOCODE_COUNTRY", defaults.geocode_country),
            geocode_user_agent: env_or("GEOCODE_USER_AGENT", defaults.geocode_user_agent),
            geocode_timeout_secs: env_parsed("GEOCODE_TIMEOUT_SECS", defaults.geocode_timeout_secs),
            calendar_max_events_per_day: env_parsed(
                "CALENDAR_MAX_EVENTS_PER_DAY",
                defaults.calendar_max_events_per_day,
            ),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
