use dinery_data::RestaurantRecord;
use rayon::prelude::*;
use tracing::{debug, instrument, trace};

use super::{QuerySpec, SearchTerm, SortBy};
use crate::classify::{TimeOfDay, classify_price, is_open_now};

/// Rating used for comparisons. Non-finite values count as `0.0` and `-0.0`
/// is folded into `0.0` so the two tie.
#[must_use]
pub fn effective_rating(restaurant: &RestaurantRecord) -> f64 {
    if restaurant.rating.is_finite() {
        restaurant.rating + 0.0
    } else {
        0.0
    }
}

/// Run a query and borrow the matching listings in result order.
///
/// Stages, each narrowing the previous one: term, open now (evaluated at
/// `now`), price bucket, minimum rating, then ordering. The source slice is
/// only read.
#[instrument(name = "Listing query", level = "debug", skip_all, fields(total = restaurants.len()))]
pub fn query_refs<'a>(
    restaurants: &'a [RestaurantRecord],
    spec: &QuerySpec,
    now: TimeOfDay,
) -> Vec<&'a RestaurantRecord> {
    let term = SearchTerm::parse(spec.term.as_deref());
    let mut results: Vec<&RestaurantRecord> =
        restaurants.iter().filter(|r| term.matches(r)).collect();
    trace!(remaining = results.len(), ?term, "Term filter");

    if spec.is_open_only {
        results.retain(|r| is_open_now(&r.opentime, &r.closetime, r.status, now));
        trace!(remaining = results.len(), %now, "Open now filter");
    }

    if let Some(bucket) = spec.price_bucket {
        results.retain(|r| classify_price(&r.menu) == bucket);
        trace!(remaining = results.len(), %bucket, "Price bucket filter");
    }

    if spec.min_rating > 0.0 {
        results.retain(|r| effective_rating(r) >= spec.min_rating);
        trace!(remaining = results.len(), min_rating = spec.min_rating, "Rating filter");
    }

    match spec.sort_by {
        // `sort_by` is stable, so equal ratings keep collection order.
        SortBy::Rating => {
            results.sort_by(|a, b| effective_rating(b).total_cmp(&effective_rating(a)));
        }
        SortBy::DateAdded => {}
    }

    debug!(matched = results.len(), "Query complete");
    results
}

/// Run a query and return owned copies of the matching listings.
#[must_use]
pub fn query(
    restaurants: &[RestaurantRecord],
    spec: &QuerySpec,
    now: TimeOfDay,
) -> Vec<RestaurantRecord> {
    query_refs(restaurants, spec, now)
        .into_iter()
        .cloned()
        .collect()
}

/// Evaluate several independent queries over the same collection in parallel.
///
/// Output `i` is exactly `query(restaurants, &specs[i], now)`.
#[instrument(name = "Bulk listing query", level = "debug", skip_all, fields(queries = specs.len()))]
pub fn query_bulk(
    restaurants: &[RestaurantRecord],
    specs: &[QuerySpec],
    now: TimeOfDay,
) -> Vec<Vec<RestaurantRecord>> {
    specs
        .par_iter()
        .map(|spec| query(restaurants, spec, now))
        .collect()
}
