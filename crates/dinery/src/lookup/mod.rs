//! Zip-code places lookup.
//!
//! When a search term is a zip code the directory can ask a places text-search
//! service for restaurants in that area. The lookup runs beside the primary
//! query and never alters its results: any failure, timeout or cancellation
//! simply yields no places.

mod client;

pub use client::{PlacesClient, parse_places_response};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Places service returned status {status}: {message}")]
    Service { status: String, message: String },
    #[error("Lookup timed out after {0:?}")]
    Timeout(Duration),
    #[error("No async runtime available to run the lookup")]
    NoRuntime,
}

pub type Result<T> = std::result::Result<T, LookupError>;

/// One place from a text-search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    pub formatted_address: String,
    pub rating: Option<f64>,
    pub open_now: Option<bool>,
}

/// A zip-code lookup running in the background. Dropping it aborts the task.
#[derive(Debug)]
pub struct ZipLookup {
    zip: u32,
    handle: JoinHandle<Result<Vec<PlaceResult>>>,
}

impl ZipLookup {
    /// Start looking up places for `zip` on the current tokio runtime.
    pub fn spawn(client: PlacesClient, zip: u32) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| LookupError::NoRuntime)?;
        debug!(zip, "Spawning zip lookup");
        let handle = runtime.spawn(async move { client.search_zip(zip).await });
        Ok(Self::from_handle(zip, handle))
    }

    fn from_handle(zip: u32, handle: JoinHandle<Result<Vec<PlaceResult>>>) -> Self {
        Self { zip, handle }
    }

    pub fn zip(&self) -> u32 {
        self.zip
    }

    /// Abort the lookup. Awaiting [`ZipLookup::results`] afterwards yields nothing.
    pub fn cancel(&self) {
        debug!(zip = self.zip, "Cancelling zip lookup");
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the places. Failures are logged and read as an empty list.
    pub async fn results(mut self) -> Vec<PlaceResult> {
        match (&mut self.handle).await {
            Ok(Ok(places)) => {
                debug!(zip = self.zip, count = places.len(), "Zip lookup finished");
                places
            }
            Ok(Err(e)) => {
                warn!(zip = self.zip, error = %e, "Zip lookup failed");
                Vec::new()
            }
            Err(e) if e.is_cancelled() => {
                warn!(zip = self.zip, "Zip lookup cancelled");
                Vec::new()
            }
            Err(e) => {
                warn!(zip = self.zip, error = %e, "Zip lookup task failed");
                Vec::new()
            }
        }
    }
}

impl Drop for ZipLookup {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_client() -> PlacesClient {
        PlacesClient::new("http://127.0.0.1:9/textsearch", "test-key")
            .with_timeout(Duration::from_millis(500))
    }

    #[test]
    fn test_spawn_without_runtime() {
        let result = ZipLookup::spawn(unreachable_client(), 10001);
        assert!(matches!(result, Err(LookupError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_failed_lookup_yields_no_places() {
        let lookup = ZipLookup::spawn(unreachable_client(), 10001).unwrap();
        assert_eq!(lookup.zip(), 10001);
        assert!(lookup.results().await.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_lookup_yields_no_places() {
        let lookup = ZipLookup::spawn(unreachable_client(), 10001).unwrap();
        lookup.cancel();
        assert!(lookup.results().await.is_empty());
    }

    #[tokio::test]
    async fn test_dropping_lookup_aborts_task() {
        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok::<_, LookupError>(Vec::<PlaceResult>::new())
        });
        let abort = handle.abort_handle();
        drop(ZipLookup::from_handle(10001, handle));

        for _ in 0..100 {
            if abort.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(abort.is_finished());
    }
}
