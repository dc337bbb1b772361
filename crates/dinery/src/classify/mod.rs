//! Derived values computed from a single listing.
//!
//! Both helpers are total: they never fail, they degrade to a documented
//! default. Detail views call them directly; the query pipeline uses them as
//! predicates.

mod hours;
mod price;

pub use hours::{TimeOfDay, is_open_now, minutes_since_midnight, parse_time_of_day};
pub use price::{ParsePriceBucketError, PriceBucket, classify_menu, classify_price};
