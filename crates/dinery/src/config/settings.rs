//! Environment driven settings for the collaborators around the query engine.

use std::time::Duration;

use tracing::{debug, warn};

pub const DEFAULT_LISTINGS_URL: &str = "http://localhost:8000/restaurants";
pub const DEFAULT_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5000;

const LISTINGS_URL_VAR: &str = "DINERY_LISTINGS_URL";
const PLACES_URL_VAR: &str = "DINERY_PLACES_URL";
const PLACES_KEY_VAR: &str = "DINERY_PLACES_KEY";
const LOOKUP_TIMEOUT_VAR: &str = "DINERY_LOOKUP_TIMEOUT_MS";

/// Places text-search settings. Only present when an API key is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacesSettings {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Public listings endpoint.
    pub listings_url: String,
    /// Zip-code lookup; `None` disables it.
    pub places: Option<PlacesSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listings_url: DEFAULT_LISTINGS_URL.to_string(),
            places: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let listings_url = lookup(LISTINGS_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LISTINGS_URL.to_string());

        let timeout_ms = lookup(LOOKUP_TIMEOUT_VAR).map_or(DEFAULT_LOOKUP_TIMEOUT_MS, |raw| {
            raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid {LOOKUP_TIMEOUT_VAR}, using default");
                DEFAULT_LOOKUP_TIMEOUT_MS
            })
        });

        let places = lookup(PLACES_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .map(|api_key| PlacesSettings {
                endpoint: lookup(PLACES_URL_VAR)
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_PLACES_URL.to_string()),
                api_key,
                timeout: Duration::from_millis(timeout_ms),
            });
        if places.is_none() {
            debug!("{PLACES_KEY_VAR} not set, zip-code lookup disabled");
        }

        Self {
            listings_url,
            places,
        }
    }
}
