use reqwest::{Client, header};
use tracing::{info, instrument};

use super::{Result, json::decode_listings_value};
use crate::{DataError, RestaurantRecord};

/// Fetch the restaurant collection from the listings endpoint on a private runtime.
///
/// Must not be called from async code; use [`fetch_remote_listings`] there.
#[instrument(name = "Download listings", skip(bearer), level = "info")]
pub fn download_listings(url: &str, bearer: Option<&str>) -> Result<Vec<RestaurantRecord>> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(DataError::InsideAsyncRuntime);
    }
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let client = Client::new();
        fetch_listings(&client, url, bearer).await
    })
}

/// Async counterpart of [`download_listings`] with a fresh client.
pub async fn fetch_remote_listings(url: &str, bearer: Option<&str>) -> Result<Vec<RestaurantRecord>> {
    fetch_listings(&Client::new(), url, bearer).await
}

/// Fetch the restaurant collection once. Non-success statuses are errors.
pub async fn fetch_listings(
    client: &Client,
    url: &str,
    bearer: Option<&str>,
) -> Result<Vec<RestaurantRecord>> {
    info!(url, "Fetching listings");
    let mut request = client
        .get(url)
        .header(header::ACCEPT, "application/json");
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?.error_for_status()?;
    let payload: serde_json::Value = response.json().await?;
    decode_listings_value(payload)
}
