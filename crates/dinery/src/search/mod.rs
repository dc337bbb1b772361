//! The listing query engine.
//!
//! A query narrows a restaurant collection through a fixed sequence of
//! independent predicates (term, open now, price bucket, minimum rating) and
//! then orders the survivors. Every stage is pure: the source collection is
//! never modified and the same inputs always produce the same ordered output.

pub use error::SearchError;
mod pipeline;
mod spec;
mod term;

pub(crate) use error::Result;
pub use pipeline::{effective_rating, query, query_bulk, query_refs};
pub use spec::{QuerySpec, SortBy};
pub use term::{SearchTerm, is_zip_term, matches_term};

mod error {
    use thiserror::Error;

    use crate::classify::ParsePriceBucketError;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum SearchError {
        #[error("Invalid sort key {0:?}, expected \"rating\" or \"date_added\"")]
        InvalidSortKey(String),
        #[error("Invalid price bucket: {0}")]
        InvalidPriceBucket(#[from] ParsePriceBucketError),
        #[error("Invalid minimum rating {0:?}")]
        InvalidRating(String),
    }
    pub type Result<T> = std::result::Result<T, SearchError>;
}
