//! Owner and admin side helpers: creating and editing listings, pruning
//! duplicates and folding reviews into ratings.

mod duplicates;
mod listing;
mod reviews;

pub use duplicates::remove_duplicates;
pub use listing::{ListingDraft, ListingUpdate, authorize_edit, validate_hours};
pub use reviews::{Review, apply_reviews, average_rating, can_review};

pub use error::ListingError;

mod error {
    use crate::session::Role;
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum ListingError {
        #[error("Invalid time format '{0}'. Use HH:MM format")]
        InvalidTimeFormat(String),
        #[error("Opening time {open} must be before closing time {close}")]
        OpenNotBeforeClose { open: String, close: String },
        #[error("Listing '{name}' at '{address}' already exists")]
        DuplicateListing { name: String, address: String },
        #[error("Listing {id} is not owned by user {user_id}")]
        NotOwner { id: u32, user_id: u64 },
        #[error("Role {0} cannot leave reviews")]
        ReviewForbidden(Role),
        #[error("Review rating must be between 1 and 5, got {0}")]
        InvalidReviewRating(u8),
    }
}
