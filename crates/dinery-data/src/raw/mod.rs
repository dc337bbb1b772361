use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{DataError, RestaurantRecord, test_data::TestDataConfig};

pub mod csv;
#[cfg(feature = "remote")]
pub mod fetch;
pub mod json;

pub use super::error::Result;

const LISTINGS_JSON: &str = "restaurants.json";
const LISTINGS_CSV: &str = "restaurants.csv";

/// Where a restaurant collection comes from.
#[derive(Debug, Clone)]
pub enum ListingSource {
    /// JSON listings payload on disk (envelope or bare array).
    Json(PathBuf),
    /// CSV dump of the restaurant table.
    Csv(PathBuf),
    /// Snapshot under `<data dir>/raw`, JSON preferred over CSV.
    DataDir,
    /// The listings endpoint. `bearer` is attached as an `Authorization` header.
    Remote { url: String, bearer: Option<String> },
    /// Generated fixtures.
    TestData(TestDataConfig),
}

impl ListingSource {
    /// Short description for logs. Never includes the bearer token.
    pub fn describe(&self) -> String {
        match self {
            Self::Json(path) => format!("json:{}", path.display()),
            Self::Csv(path) => format!("csv:{}", path.display()),
            Self::DataDir => "data-dir".to_string(),
            Self::Remote { url, .. } => format!("remote:{url}"),
            Self::TestData(config) => format!("test-data:{}", config.listings),
        }
    }

    /// Pick a file source from the path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json(path.to_path_buf())),
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Self::Csv(path.to_path_buf())),
            _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Load a restaurant collection, preserving the order the source returns.
#[instrument(name = "Load listings", skip_all, level = "info", fields(source = %source.describe()))]
pub fn load_listings(source: &ListingSource) -> Result<Vec<RestaurantRecord>> {
    let t_load = std::time::Instant::now();
    let listings = match source {
        ListingSource::Json(path) => json::read_listings(path)?,
        ListingSource::Csv(path) => csv::read_listings(path)?,
        ListingSource::DataDir => get_raw_listings()?,
        ListingSource::Remote { url, bearer } => load_remote(url, bearer.as_deref())?,
        ListingSource::TestData(config) => {
            let (json_file, _csv_file) = crate::test_data::create_test_data(config)?;
            json::read_listings(json_file.path())?
        }
    };
    info!(
        count = listings.len(),
        elapsed = ?t_load.elapsed(),
        "Listings loaded"
    );
    Ok(listings)
}

/// Read the listings snapshot from the data directory.
#[instrument(name = "Get raw listings", skip_all, level = "info")]
pub fn get_raw_listings() -> Result<Vec<RestaurantRecord>> {
    let raw_dir = crate::get_data_dir().join("raw");
    info!("Checking for listings snapshot in: {}", raw_dir.display());

    let json_path = raw_dir.join(LISTINGS_JSON);
    if json_path.exists() {
        return json::read_listings(&json_path);
    }
    let csv_path = raw_dir.join(LISTINGS_CSV);
    if csv_path.exists() {
        return csv::read_listings(&csv_path);
    }

    warn!("Listings snapshot not found");
    Err(DataError::ListingsFileNotFound(raw_dir.display().to_string()))
}

#[cfg(feature = "remote")]
fn load_remote(url: &str, bearer: Option<&str>) -> Result<Vec<RestaurantRecord>> {
    fetch::download_listings(url, bearer)
}

#[cfg(not(feature = "remote"))]
fn load_remote(url: &str, _bearer: Option<&str>) -> Result<Vec<RestaurantRecord>> {
    warn!(url, "Remote feature is disabled. Cannot fetch listings.");
    Err(DataError::RemoteDisabled)
}
