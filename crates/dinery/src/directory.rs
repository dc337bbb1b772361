//! The restaurant directory facade.
//!
//! A [`Directory`] holds the collection fetched once from a listing source and
//! answers every query against it in memory. Queries never mutate the
//! collection.
//!
//! ```rust
//! use dinery::{Directory, ListingSource, QuerySpec, TestDataConfig};
//! use chrono::NaiveTime;
//!
//! let directory = Directory::load(&ListingSource::TestData(TestDataConfig::sample()))?;
//! let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
//!
//! let spec = QuerySpec::builder().term("10001").build();
//! let results = directory.query(&spec, noon);
//! assert_eq!(results[0].name, "Chelsea Bistro");
//! # Ok::<(), dinery::error::DineryError>(())
//! ```

use dinery_data::{ListingSource, RestaurantRecord, load_listings};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    classify::{PriceBucket, TimeOfDay, classify_price, is_open_now},
    error::Result,
    search::{QuerySpec, effective_rating, query, query_bulk, query_refs},
};

#[cfg(feature = "places")]
use crate::{
    lookup::{PlacesClient, ZipLookup},
    search::SearchTerm,
};

/// Values a listing card shows, derived from one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingCard {
    pub id: u32,
    pub name: String,
    pub price: PriceBucket,
    pub is_open: bool,
    pub rating: f64,
    pub hours: String,
}

impl ListingCard {
    /// The stored price label wins when it is a valid bucket; otherwise the
    /// bucket is classified from the menu.
    pub fn from_record(restaurant: &RestaurantRecord, now: TimeOfDay) -> Self {
        let price = restaurant
            .price_label
            .as_deref()
            .and_then(|label| label.parse().ok())
            .unwrap_or_else(|| classify_price(&restaurant.menu));

        Self {
            id: restaurant.id,
            name: restaurant.name.clone(),
            price,
            is_open: is_open_now(
                &restaurant.opentime,
                &restaurant.closetime,
                restaurant.status,
                now,
            ),
            rating: effective_rating(restaurant),
            hours: restaurant.hours(),
        }
    }
}

/// Primary results plus, for zip searches, the places lookup running beside them.
#[cfg(feature = "places")]
#[derive(Debug)]
pub struct ListingView {
    pub restaurants: Vec<RestaurantRecord>,
    pub nearby: Option<ZipLookup>,
}

#[derive(Debug, Clone, Default)]
pub struct Directory {
    listings: Vec<RestaurantRecord>,
}

impl Directory {
    /// Wrap an already fetched collection, kept in received order.
    pub fn from_records(listings: Vec<RestaurantRecord>) -> Self {
        Self { listings }
    }

    /// Fetch the collection once from `source`.
    #[instrument(name = "Load directory", level = "info", skip_all, fields(source = %source.describe()))]
    pub fn load(source: &ListingSource) -> Result<Self> {
        let t_load = std::time::Instant::now();
        let listings = load_listings(source)?;
        info!(
            listings = listings.len(),
            elapsed_seconds = ?t_load.elapsed(),
            "Directory loaded"
        );
        Ok(Self { listings })
    }

    /// Fetch the collection from the listings endpoint without blocking.
    ///
    /// [`Directory::load`] with a remote source refuses to run inside an async
    /// runtime; async callers use this instead.
    #[cfg(feature = "remote")]
    #[instrument(name = "Load remote directory", level = "info", skip(bearer))]
    pub async fn load_remote(url: &str, bearer: Option<&str>) -> Result<Self> {
        let listings = dinery_data::raw::fetch::fetch_remote_listings(url, bearer).await?;
        info!(listings = listings.len(), "Directory loaded");
        Ok(Self { listings })
    }

    pub fn listings(&self) -> &[RestaurantRecord] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&RestaurantRecord> {
        self.listings.iter().find(|r| r.id == id)
    }

    /// Listings belonging to one owner, for the business dashboard.
    pub fn owned_by(&self, owner: u64) -> Vec<&RestaurantRecord> {
        self.listings
            .iter()
            .filter(|r| r.owner == Some(owner))
            .collect()
    }

    pub fn query(&self, spec: &QuerySpec, now: TimeOfDay) -> Vec<RestaurantRecord> {
        query(&self.listings, spec, now)
    }

    pub fn query_refs(&self, spec: &QuerySpec, now: TimeOfDay) -> Vec<&RestaurantRecord> {
        query_refs(&self.listings, spec, now)
    }

    /// Query against the local wall clock.
    pub fn query_now(&self, spec: &QuerySpec) -> Vec<RestaurantRecord> {
        self.query(spec, chrono::Local::now().time())
    }

    pub fn query_bulk(&self, specs: &[QuerySpec], now: TimeOfDay) -> Vec<Vec<RestaurantRecord>> {
        query_bulk(&self.listings, specs, now)
    }

    /// Listing cards for a query, in result order.
    pub fn cards(&self, spec: &QuerySpec, now: TimeOfDay) -> Vec<ListingCard> {
        self.query_refs(spec, now)
            .into_iter()
            .map(|r| ListingCard::from_record(r, now))
            .collect()
    }

    /// Run a query and, when the term is a zip code and a places client is
    /// given, start the nearby lookup. The lookup needs a tokio runtime; without
    /// one it is skipped.
    #[cfg(feature = "places")]
    pub fn view(
        &self,
        spec: &QuerySpec,
        now: TimeOfDay,
        places: Option<&PlacesClient>,
    ) -> ListingView {
        let restaurants = self.query(spec, now);
        let zip = SearchTerm::parse(spec.term.as_deref()).zip();

        let nearby = match (zip, places) {
            (Some(zip), Some(client)) => ZipLookup::spawn(client.clone(), zip)
                .inspect_err(|e| tracing::warn!(zip, error = %e, "Zip lookup not started"))
                .ok(),
            _ => None,
        };

        ListingView {
            restaurants,
            nearby,
        }
    }
}

impl From<Vec<RestaurantRecord>> for Directory {
    fn from(listings: Vec<RestaurantRecord>) -> Self {
        Self::from_records(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SortBy;
    use chrono::NaiveTime;
    use dinery_data::{TestDataConfig, test_data::fixture_listings};

    fn at(h: u32, m: u32) -> TimeOfDay {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample() -> Directory {
        Directory::from_records(fixture_listings(&TestDataConfig::sample()))
    }

    #[test]
    fn test_load_test_data() {
        let directory = Directory::load(&ListingSource::TestData(TestDataConfig::minimal())).unwrap();
        assert_eq!(directory.len(), 3);
        assert!(!directory.is_empty());
    }

    #[test]
    fn test_get_and_owned_by() {
        let directory = sample();
        assert_eq!(directory.get(3).unwrap().name, "Chelsea Bistro");
        assert!(directory.get(999).is_none());

        let owned: Vec<u32> = directory.owned_by(100).iter().map(|r| r.id).collect();
        assert_eq!(owned, vec![1, 3, 5, 7, 9, 11]);
    }

    #[test]
    fn test_query_matches_free_function() {
        let directory = sample();
        let spec = QuerySpec::builder().sort_by(SortBy::DateAdded).build();
        assert_eq!(directory.query(&spec, at(12, 0)), directory.listings());
    }

    #[test]
    fn test_cards() {
        let directory = sample();
        let spec = QuerySpec::builder().term("harbor").build();
        let cards = directory.cards(&spec, at(13, 0));
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.id, 4);
        assert_eq!(card.price, PriceBucket::Premium);
        assert!(card.is_open);
        assert_eq!(card.hours, "12:00 - 21:00");
    }

    #[test]
    fn test_card_prefers_valid_stored_label() {
        let mut record = RestaurantRecord {
            menu: r#"[{"items":[{"price":5}]}]"#.into(),
            price_label: Some("$$$".into()),
            ..Default::default()
        };
        assert_eq!(ListingCard::from_record(&record, at(12, 0)).price, PriceBucket::Premium);

        record.price_label = Some("cheap".into());
        assert_eq!(ListingCard::from_record(&record, at(12, 0)).price, PriceBucket::Budget);
    }

    #[cfg(feature = "remote")]
    #[tokio::test]
    async fn test_remote_load_inside_runtime() {
        use crate::error::DineryError;
        use dinery_data::DataError;

        let source = ListingSource::Remote {
            url: "http://127.0.0.1:9/".to_string(),
            bearer: None,
        };
        assert!(matches!(
            Directory::load(&source),
            Err(DineryError::Data(DataError::InsideAsyncRuntime))
        ));
        assert!(matches!(
            Directory::load_remote("http://127.0.0.1:9/", None).await,
            Err(DineryError::Data(DataError::Http(_)))
        ));
    }

    #[cfg(feature = "places")]
    #[test]
    fn test_view_without_zip_or_client() {
        let directory = sample();
        let client = PlacesClient::new("http://127.0.0.1:9/", "k");

        let text = QuerySpec::builder().term("bistro").build();
        assert!(directory.view(&text, at(12, 0), Some(&client)).nearby.is_none());

        let zip = QuerySpec::builder().term("10001").build();
        let view = directory.view(&zip, at(12, 0), None);
        assert!(view.nearby.is_none());
        assert_eq!(view.restaurants.len(), 1);

        // No runtime here, so the lookup is skipped rather than failing the view.
        let view = directory.view(&zip, at(12, 0), Some(&client));
        assert!(view.nearby.is_none());
        assert_eq!(view.restaurants[0].id, 3);
    }

    #[cfg(feature = "places")]
    #[tokio::test]
    async fn test_view_starts_zip_lookup() {
        let directory = sample();
        let client = PlacesClient::new("http://127.0.0.1:9/", "k")
            .with_timeout(std::time::Duration::from_millis(200));
        let spec = QuerySpec::builder().term("10013").build();

        let view = directory.view(&spec, at(12, 0), Some(&client));
        let ids: Vec<u32> = view.restaurants.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 11]);

        let nearby = view.nearby.unwrap();
        assert_eq!(nearby.zip(), 10013);
        assert!(nearby.results().await.is_empty());
    }
}
