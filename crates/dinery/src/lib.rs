//! Dinery - Restaurant Listing Query Engine
//!
//! Dinery answers restaurant directory queries in memory. A collection of
//! listings is fetched once, then every search (free text or zip code, open
//! now, price bucket, minimum rating, ordering) runs as a pure function over
//! that collection.
//!
//! # Quick Start
//!
//! ```rust
//! use dinery::{Directory, ListingSource, PriceBucket, QuerySpec, TestDataConfig};
//! use chrono::NaiveTime;
//!
//! let directory = Directory::load(&ListingSource::TestData(TestDataConfig::sample()))?;
//! let evening = NaiveTime::from_hms_opt(19, 30, 0).unwrap();
//!
//! // Cheap places open right now, best rated first
//! let spec = QuerySpec::builder()
//!     .open_only(true)
//!     .price_bucket(PriceBucket::Budget)
//!     .build();
//!
//! for restaurant in directory.query(&spec, evening) {
//!     println!("{} ({})", restaurant.name, restaurant.rating);
//! }
//! # Ok::<(), dinery::error::DineryError>(())
//! ```
//!
//! # Features
//!
//! - **Free text and zip search** over names, addresses, descriptions and menus
//! - **Open now** evaluation from listed hours and the owner's status flag
//! - **Price buckets** derived from the average menu item price
//! - **Stable ordering** by rating, or received order for newest first
//! - **Zip-code places lookup** running beside the primary results (`places` feature)
//! - **Owner tooling** for validating new listings, edits, duplicates and reviews
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod classify;
mod config;
mod directory;
pub mod error;
#[cfg(feature = "places")]
pub mod lookup;
pub mod manage;
mod search;
pub mod session;

pub use classify::{
    ParsePriceBucketError, PriceBucket, TimeOfDay, classify_menu, classify_price, is_open_now,
    minutes_since_midnight, parse_time_of_day,
};
pub use config::{PlacesSettings, QuerySpecBuilder, Settings};
pub use dinery_data as data;
pub use dinery_data::{ListingSource, Menu, RestaurantRecord, TestDataConfig};
pub use directory::{Directory, ListingCard};
#[cfg(feature = "places")]
pub use directory::ListingView;
pub use search::{
    QuerySpec, SearchError, SearchTerm, SortBy, effective_rating, is_zip_term, matches_term,
    query, query_bulk, query_refs,
};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Dinery library.
///
/// Honours `RUST_LOG` when set, otherwise logs at `level`. Calling it again
/// is a no-op.
///
/// ```rust
/// use dinery::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), dinery::error::DineryError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::DineryError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("hyper_util=warn".parse()?)
            .add_directive("reqwest=warn".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
            .map_err(|e| error::DineryError::ConfigError(e.to_string()))?;
        Ok(())
    })
}
