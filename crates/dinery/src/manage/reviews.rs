use dinery_data::RestaurantRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ListingError;
use crate::session::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Listing the review belongs to.
    pub rid: u32,
    pub user_id: u64,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

impl Review {
    pub fn new(
        rid: u32,
        user_id: u64,
        rating: u8,
        comment: impl Into<String>,
    ) -> Result<Self, ListingError> {
        if !(1..=5).contains(&rating) {
            return Err(ListingError::InvalidReviewRating(rating));
        }
        Ok(Self {
            rid,
            user_id,
            rating,
            comment: comment.into(),
        })
    }
}

/// Only diners review. Owners and admins are refused.
pub fn can_review(role: Role) -> Result<(), ListingError> {
    match role {
        Role::User => Ok(()),
        other => Err(ListingError::ReviewForbidden(other)),
    }
}

/// Mean rating rounded to one decimal place, `0.0` without reviews.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: f64 = reviews.iter().map(|r| f64::from(r.rating)).sum();
    let mean = sum / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Refresh a listing's rating from the reviews that belong to it.
pub fn apply_reviews(record: &mut RestaurantRecord, reviews: &[Review]) {
    let own: Vec<Review> = reviews
        .iter()
        .filter(|r| r.rid == record.id)
        .cloned()
        .collect();
    record.rating = average_rating(&own);
    debug!(id = record.id, reviews = own.len(), rating = record.rating, "Rating refreshed");
}
