//! Listing data model and ingestion for the dinery restaurant directory.
//!
//! This crate owns everything that happens before a query runs: decoding the
//! restaurant collection handed over by the listings service, tolerant
//! coercion of loosely typed fields, menu decoding, and deterministic fixtures
//! for tests.
use once_cell::sync::Lazy;
use std::path::PathBuf;
use tracing::warn;

mod coerce;
mod error;
pub mod listing;
pub mod menu;
pub mod raw;
pub mod test_data;

pub use error::{DataError, Result};
pub use listing::RestaurantRecord;
pub use menu::{Menu, MenuCategory, MenuItem};
pub use raw::{ListingSource, load_listings};
pub use test_data::{TestDataConfig, create_test_data};

static TEST_DATA_DIR: Lazy<tempfile::TempDir> = Lazy::new(|| {
    tempfile::TempDir::new().expect("Failed to create global temporary test data directory")
});

pub const DATA_DIR_DEFAULT: &str = "./dinery_data";

/// Centralized function to determine if we should use test data.
pub fn should_use_test_data() -> bool {
    let is_test_environment = cfg!(test) || cfg!(doctest);

    let explicit_test_data = std::env::var("DINERY_USE_TEST_DATA")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    is_test_environment || explicit_test_data
}

/// Global data directory path that automatically determines the appropriate location.
pub static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    if should_use_test_data() {
        let temp_dir = TEST_DATA_DIR.path().to_path_buf();
        warn!(temp_dir = ?temp_dir, "Using temporary data directory for tests");
        temp_dir
    } else if let Ok(dir) = std::env::var("DINERY_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        system_data_dir().unwrap_or_else(|| PathBuf::from(DATA_DIR_DEFAULT))
    }
});

/// Directory holding listing snapshots (`<data dir>/raw/restaurants.{json,csv}`).
pub fn get_data_dir() -> &'static PathBuf {
    &DATA_DIR
}

#[cfg(feature = "system-dirs")]
fn system_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "dinery").map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(not(feature = "system-dirs"))]
fn system_data_dir() -> Option<PathBuf> {
    None
}

#[cfg(test)]
pub(crate) mod tests_utils {
    use polars::prelude::*;

    pub fn assert_column_type(df: &DataFrame, column: &str, expected_type: &DataType) {
        let actual_type = df
            .column(column)
            .unwrap_or_else(|_| panic!("Column '{column}' not found"))
            .dtype();
        assert_eq!(
            actual_type, expected_type,
            "Column '{column}' has wrong type. Expected: {expected_type:?}, Got: {actual_type:?}"
        );
    }

    pub fn assert_no_nulls_in_column(df: &DataFrame, column: &str) {
        let null_count = df
            .column(column)
            .unwrap_or_else(|_| panic!("Column '{column}' not found"))
            .null_count();
        assert_eq!(
            null_count, 0,
            "Column '{column}' contains {null_count} null values"
        );
    }
}
