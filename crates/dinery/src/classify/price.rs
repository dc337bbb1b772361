use std::{fmt, str::FromStr};

use dinery_data::Menu;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Coarse price category derived from the average menu item price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceBucket {
    /// Average below 10.
    #[serde(rename = "$")]
    Budget,
    /// Average from 10 up to, but not including, 20.
    #[serde(rename = "$$")]
    Moderate,
    /// Average of 20 or more.
    #[serde(rename = "$$$")]
    Premium,
}

impl PriceBucket {
    /// Bucket assigned when the menu cannot be priced.
    pub const DEFAULT: Self = Self::Moderate;

    const MODERATE_FLOOR: f64 = 10.0;
    const PREMIUM_FLOOR: f64 = 20.0;

    #[must_use]
    pub fn from_average(avg: f64) -> Self {
        if avg < Self::MODERATE_FLOOR {
            Self::Budget
        } else if avg < Self::PREMIUM_FLOOR {
            Self::Moderate
        } else {
            Self::Premium
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "$",
            Self::Moderate => "$$",
            Self::Premium => "$$$",
        }
    }
}

impl Default for PriceBucket {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown price bucket {0:?}, expected one of \"$\", \"$$\", \"$$$\"")]
pub struct ParsePriceBucketError(pub String);

impl FromStr for PriceBucket {
    type Err = ParsePriceBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "$" => Ok(Self::Budget),
            "$$" => Ok(Self::Moderate),
            "$$$" => Ok(Self::Premium),
            other => Err(ParsePriceBucketError(other.to_string())),
        }
    }
}

/// Classify a raw menu payload. Undecodable or item-less menus get [`PriceBucket::DEFAULT`].
#[must_use]
pub fn classify_price(menu_payload: &str) -> PriceBucket {
    match Menu::decode(menu_payload) {
        Ok(menu) => classify_menu(&menu),
        Err(e) => {
            debug!(error = %e, "Menu did not decode, using default price bucket");
            PriceBucket::DEFAULT
        }
    }
}

/// Classify an already decoded menu.
#[must_use]
pub fn classify_menu(menu: &Menu) -> PriceBucket {
    menu.average_price()
        .map_or(PriceBucket::DEFAULT, PriceBucket::from_average)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_with_prices(prices: &[f64]) -> String {
        let items: Vec<String> = prices
            .iter()
            .map(|p| format!(r#"{{"name": "dish", "description": "", "price": {p}}}"#))
            .collect();
        format!(r#"[{{"category": "All", "items": [{}]}}]"#, items.join(","))
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(classify_price(&menu_with_prices(&[9.99])), PriceBucket::Budget);
        assert_eq!(classify_price(&menu_with_prices(&[10.0])), PriceBucket::Moderate);
        assert_eq!(classify_price(&menu_with_prices(&[19.99])), PriceBucket::Moderate);
        assert_eq!(classify_price(&menu_with_prices(&[20.0])), PriceBucket::Premium);
    }

    #[test]
    fn test_average_spans_categories() {
        let payload = r#"[
            {"category": "Cheap", "items": [{"name": "a", "price": 2}, {"name": "b", "price": 4}]},
            {"category": "Dear", "items": [{"name": "c", "price": 54}]}
        ]"#;
        // (2 + 4 + 54) / 3 = 20
        assert_eq!(classify_price(payload), PriceBucket::Premium);
    }

    #[test]
    fn test_classify_price_is_total() {
        let inputs = [
            "",
            "   ",
            "not json",
            "[]",
            r#"[{"category": "Empty", "items": []}]"#,
            r#"{"Mains": {"items": [{"name": "x", "price": 50}]}}"#,
            "null",
            "\u{0}\u{1}",
        ];
        for input in inputs {
            assert_eq!(classify_price(input), PriceBucket::Moderate, "input {input:?}");
        }
    }

    #[test]
    fn test_parse_and_display() {
        for bucket in [PriceBucket::Budget, PriceBucket::Moderate, PriceBucket::Premium] {
            assert_eq!(bucket.to_string().parse::<PriceBucket>(), Ok(bucket));
        }
        assert!("$$$$".parse::<PriceBucket>().is_err());
        assert!("".parse::<PriceBucket>().is_err());
    }
}
