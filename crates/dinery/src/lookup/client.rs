use reqwest::{Client, header};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

use super::{LookupError, PlaceResult, Result};
use crate::config::{DEFAULT_LOOKUP_TIMEOUT_MS, DEFAULT_PLACES_URL, PlacesSettings};

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<RawPlace>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    #[serde(default)]
    open_now: Option<bool>,
}

impl From<RawPlace> for PlaceResult {
    fn from(raw: RawPlace) -> Self {
        Self {
            name: raw.name,
            formatted_address: raw.formatted_address,
            rating: raw.rating,
            open_now: raw.opening_hours.and_then(|h| h.open_now),
        }
    }
}

/// Decode a text-search response body.
///
/// `OK` and `ZERO_RESULTS` statuses (or no status at all) are successes; any
/// other status is reported as a service error.
pub fn parse_places_response(body: serde_json::Value) -> Result<Vec<PlaceResult>> {
    let response: TextSearchResponse =
        serde_json::from_value(body).map_err(|e| LookupError::Service {
            status: "INVALID_RESPONSE".to_string(),
            message: e.to_string(),
        })?;

    match response.status.as_deref() {
        None | Some("OK" | "ZERO_RESULTS") => {
            Ok(response.results.into_iter().map(PlaceResult::from).collect())
        }
        Some(status) => Err(LookupError::Service {
            status: status.to_string(),
            message: response.error_message.unwrap_or_default(),
        }),
    }
}

#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl PlacesClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout: Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
        }
    }

    /// Client for the default text-search endpoint.
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_PLACES_URL, api_key)
    }

    pub fn from_settings(settings: &PlacesSettings) -> Self {
        Self::new(&settings.endpoint, &settings.api_key).with_timeout(settings.timeout)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Search for restaurants in a zip code.
    #[instrument(name = "Places search", skip(self), level = "info")]
    pub async fn search_zip(&self, zip: u32) -> Result<Vec<PlaceResult>> {
        let query = format!("restaurants in {zip:05}");
        info!(endpoint = %self.endpoint, "Querying places");

        let request = async {
            let response = self
                .client
                .get(&self.endpoint)
                .header(header::ACCEPT, "application/json")
                .query(&[("query", query.as_str()), ("key", self.api_key.as_str())])
                .send()
                .await?
                .error_for_status()?;
            response.json::<serde_json::Value>().await
        };

        // Covers the body as well as the headers.
        let body = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| LookupError::Timeout(self.timeout))??;
        parse_places_response(body)
    }
}
