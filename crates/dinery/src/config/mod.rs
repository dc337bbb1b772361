mod settings;

pub use settings::{
    DEFAULT_LISTINGS_URL, DEFAULT_LOOKUP_TIMEOUT_MS, DEFAULT_PLACES_URL, PlacesSettings, Settings,
};

use crate::{
    classify::PriceBucket,
    search::{QuerySpec, SortBy},
};

const MAX_RATING: f64 = 5.0;

/// Builder for creating query specs with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct QuerySpecBuilder {
    spec: QuerySpec,
}

impl QuerySpecBuilder {
    /// Create a new builder with every filter inactive, sorted by rating
    pub fn new() -> Self {
        Self {
            spec: QuerySpec::default(),
        }
    }

    /// Listings open right now, best rated first
    pub fn open_now() -> Self {
        Self::new().open_only(true)
    }

    /// Only well rated listings
    pub fn top_rated() -> Self {
        Self::new().min_rating(4.5)
    }

    /// Cheapest bucket only
    pub fn budget() -> Self {
        Self::new().price_bucket(PriceBucket::Budget)
    }

    /// Received order, which the listings service returns newest first
    pub fn newest() -> Self {
        Self::new().sort_by(SortBy::DateAdded)
    }

    /// Set the search term. An empty term clears it.
    pub fn term(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.spec.term = (!term.is_empty()).then_some(term);
        self
    }

    pub fn open_only(mut self, enabled: bool) -> Self {
        self.spec.is_open_only = enabled;
        self
    }

    pub fn price_bucket(mut self, bucket: PriceBucket) -> Self {
        self.spec.price_bucket = Some(bucket);
        self
    }

    pub fn any_price(mut self) -> Self {
        self.spec.price_bucket = None;
        self
    }

    /// Set the minimum rating, clamped to `0.0..=5.0`. `NaN` disables the filter.
    pub fn min_rating(mut self, rating: f64) -> Self {
        self.spec.min_rating = if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, MAX_RATING)
        };
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.spec.sort_by = sort_by;
        self
    }

    /// Build the final spec
    pub fn build(self) -> QuerySpec {
        self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder() {
        let spec = QuerySpecBuilder::new().build();
        assert_eq!(spec, QuerySpec::default());
        assert_eq!(spec.sort_by, SortBy::Rating);
    }

    #[test]
    fn test_presets() {
        assert!(QuerySpecBuilder::open_now().build().is_open_only);
        assert_eq!(QuerySpecBuilder::top_rated().build().min_rating, 4.5);
        assert_eq!(
            QuerySpecBuilder::budget().build().price_bucket,
            Some(PriceBucket::Budget)
        );
        assert_eq!(QuerySpecBuilder::newest().build().sort_by, SortBy::DateAdded);
    }

    #[test]
    fn test_method_chaining() {
        let spec = QuerySpecBuilder::newest()
            .term("tacos")
            .open_only(true)
            .price_bucket(PriceBucket::Premium)
            .min_rating(3.0)
            .build();

        assert_eq!(spec.term.as_deref(), Some("tacos"));
        assert!(spec.is_open_only);
        assert_eq!(spec.price_bucket, Some(PriceBucket::Premium));
        assert_eq!(spec.min_rating, 3.0);
        assert_eq!(spec.sort_by, SortBy::DateAdded);
    }

    #[test]
    fn test_override_presets() {
        let spec = QuerySpecBuilder::budget().any_price().min_rating(1.0).build();
        assert_eq!(spec.price_bucket, None);
        assert_eq!(spec.min_rating, 1.0);
    }

    #[test]
    fn test_min_rating_is_clamped() {
        assert_eq!(QuerySpecBuilder::new().min_rating(7.5).build().min_rating, 5.0);
        assert_eq!(QuerySpecBuilder::new().min_rating(-2.0).build().min_rating, 0.0);
        assert_eq!(QuerySpecBuilder::new().min_rating(f64::NAN).build().min_rating, 0.0);
    }

    #[test]
    fn test_empty_term_is_cleared() {
        let spec = QuerySpecBuilder::new().term("ramen").term("").build();
        assert_eq!(spec.term, None);

        let spec = QuerySpecBuilder::new().term("  ").build();
        assert_eq!(spec.term.as_deref(), Some("  "));
    }
}
