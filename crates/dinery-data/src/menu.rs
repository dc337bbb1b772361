//! Menu payloads.
//!
//! A menu travels as JSON text in the canonical array-of-categories shape:
//!
//! ```json
//! [{"category": "Mains", "items": [{"name": "Ramen", "description": "Pork broth", "price": 14.5}]}]
//! ```
//!
//! Any other shape (including the object-of-categories layout some older
//! producers emit) is a decode failure. Callers decide how to degrade.

use serde::{Deserialize, Serialize};

use crate::coerce;

/// A single dish on the menu.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub description: String,
    /// Non-negative price. Missing, negative or non-numeric prices read as `0.0`.
    #[serde(default, deserialize_with = "coerce::price")]
    pub price: f64,
}

/// A named group of items. `items` is required, the name is not.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuCategory {
    #[serde(default, deserialize_with = "coerce::text")]
    pub category: String,
    pub items: Vec<MenuItem>,
}

/// Ordered sequence of categories.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu {
    pub categories: Vec<MenuCategory>,
}

impl Menu {
    /// Decode a menu payload.
    pub fn decode(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Serialise back into the canonical payload text.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string())
    }

    /// Iterate over every item across all categories, in menu order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Mean item price, `None` when the menu has no items.
    #[must_use]
    pub fn average_price(&self) -> Option<f64> {
        let (total, count) = self
            .items()
            .fold((0.0_f64, 0_usize), |(total, count), item| {
                (total + item.price, count + 1)
            });
        (count > 0).then(|| total / count as f64)
    }
}
