use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{Result, SearchError};
use crate::{QuerySpecBuilder, classify::PriceBucket};

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Highest rating first, ties keep collection order.
    #[default]
    Rating,
    /// Collection order as received. The listings service already returns
    /// newest first, so no reordering happens here.
    DateAdded,
}

impl SortBy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::DateAdded => "date_added",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "rating" => Ok(Self::Rating),
            "date_added" => Ok(Self::DateAdded),
            other => Err(SearchError::InvalidSortKey(other.to_string())),
        }
    }
}

/// One search over the directory. Cheap to build, rebuilt on every input change.
///
/// Filters that are unset (`None`, `false`, `0.0`) are inactive.
///
/// # Examples
///
/// ```rust
/// use dinery::{PriceBucket, QuerySpec, SortBy};
///
/// let spec = QuerySpec::builder()
///     .term("noodle")
///     .open_only(true)
///     .price_bucket(PriceBucket::Moderate)
///     .min_rating(4.0)
///     .build();
///
/// assert_eq!(spec.sort_by, SortBy::Rating);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Free text, or a zip code when exactly five digits.
    pub term: Option<String>,
    /// Keep only listings open at the supplied time.
    pub is_open_only: bool,
    /// Keep only listings whose menu classifies into this bucket.
    pub price_bucket: Option<PriceBucket>,
    /// Keep listings rated at least this much. `0.0` disables the filter.
    pub min_rating: f64,
    pub sort_by: SortBy,
}

impl QuerySpec {
    pub fn builder() -> QuerySpecBuilder {
        QuerySpecBuilder::new()
    }

    /// Build a spec from raw filter form values.
    ///
    /// An empty `price_range` or `min_rating` leaves that filter inactive.
    pub fn from_params(
        term: Option<&str>,
        is_open: bool,
        price_range: &str,
        min_rating: &str,
        sort_by: &str,
    ) -> Result<Self> {
        let price_range = price_range.trim();
        let price_bucket = if price_range.is_empty() {
            None
        } else {
            Some(price_range.parse::<PriceBucket>()?)
        };

        let min_rating = min_rating.trim();
        let min_rating = if min_rating.is_empty() {
            0.0
        } else {
            min_rating
                .parse::<f64>()
                .map_err(|_| SearchError::InvalidRating(min_rating.to_string()))?
        };

        let mut builder = QuerySpecBuilder::new()
            .open_only(is_open)
            .min_rating(min_rating)
            .sort_by(sort_by.parse()?);
        if let Some(term) = term {
            builder = builder.term(term);
        }
        if let Some(bucket) = price_bucket {
            builder = builder.price_bucket(bucket);
        }
        Ok(builder.build())
    }

    /// Whether any narrowing filter is set.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.term.as_deref().is_some_and(|t| !t.is_empty())
            || self.is_open_only
            || self.price_bucket.is_some()
            || self.min_rating > 0.0
    }
}
