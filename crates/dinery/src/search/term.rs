use dinery_data::RestaurantRecord;
use once_cell::sync::Lazy;
use regex::Regex;

static ZIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("zip pattern should compile"));

/// Whether `term` is exactly five ASCII digits and therefore a zip-code lookup.
#[must_use]
pub fn is_zip_term(term: &str) -> bool {
    ZIP_PATTERN.is_match(term)
}

/// A search term classified once per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// No term: every listing matches.
    Any,
    /// Five digit term: exact zip code equality.
    Zip(u32),
    /// Free text, already lowercased.
    Text(String),
}

impl SearchTerm {
    /// Classify a raw term. Absent and empty terms match everything; whitespace
    /// is searched for like any other text.
    #[must_use]
    pub fn parse(term: Option<&str>) -> Self {
        match term {
            None => Self::Any,
            Some("") => Self::Any,
            Some(t) if is_zip_term(t) => t.parse().map_or(Self::Any, Self::Zip),
            Some(t) => Self::Text(t.to_lowercase()),
        }
    }

    #[must_use]
    pub const fn zip(&self) -> Option<u32> {
        match self {
            Self::Zip(zip) => Some(*zip),
            _ => None,
        }
    }

    #[must_use]
    pub fn matches(&self, restaurant: &RestaurantRecord) -> bool {
        match self {
            Self::Any => true,
            Self::Zip(zip) => restaurant.zip == Some(*zip),
            Self::Text(needle) => {
                contains_lowercase(&restaurant.name, needle)
                    || contains_lowercase(&restaurant.address, needle)
                    || contains_lowercase(&restaurant.description, needle)
                    || menu_matches(restaurant, needle)
            }
        }
    }
}

/// Case-insensitive match of `term` against a listing.
///
/// Checks name, address and description, then menu item names and
/// descriptions. A menu that does not decode contributes no match.
#[must_use]
pub fn matches_term(restaurant: &RestaurantRecord, term: &str) -> bool {
    SearchTerm::parse(Some(term)).matches(restaurant)
}

fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn menu_matches(restaurant: &RestaurantRecord, needle: &str) -> bool {
    restaurant.menu().is_some_and(|menu| {
        menu.items().any(|item| {
            contains_lowercase(&item.name, needle) || contains_lowercase(&item.description, needle)
        })
    })
}
