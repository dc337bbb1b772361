use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{coerce, menu::Menu};

/// One restaurant's directory record.
///
/// Deserialisation is tolerant: numeric fields accept numbers or numeric text,
/// and unreadable values fall back to their zero value rather than failing the
/// whole collection. See the field docs for the exact rule applied to each one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RestaurantRecord {
    /// Unique listing id (`rid` on the wire).
    #[serde(alias = "rid")]
    pub id: u32,
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub address: String,
    /// Five digit zip code. Absent when missing or not numeric.
    #[serde(default, alias = "zip_code", deserialize_with = "coerce::zip")]
    pub zip: Option<u32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub description: String,
    /// Opening time as local `HH:MM` text.
    #[serde(default, deserialize_with = "coerce::text")]
    pub opentime: String,
    /// Closing time as local `HH:MM` text.
    #[serde(default, deserialize_with = "coerce::text")]
    pub closetime: String,
    /// Owner override: `1` listed open, `0` listed closed.
    #[serde(default, deserialize_with = "coerce::status")]
    pub status: i64,
    /// Rating in `0.0..=5.0`, read as a float even when sent as text.
    #[serde(default, deserialize_with = "coerce::rating")]
    pub rating: f64,
    /// Raw menu payload; decode with [`RestaurantRecord::menu`].
    #[serde(default, deserialize_with = "coerce::menu_payload")]
    pub menu: String,
    #[serde(default, deserialize_with = "coerce::optional_id")]
    pub owner: Option<u64>,
    #[serde(default, deserialize_with = "coerce::optional_id")]
    pub phone: Option<u64>,
    /// Price label stored alongside the listing (`price` on the wire).
    #[serde(default, alias = "price", skip_serializing_if = "Option::is_none")]
    pub price_label: Option<String>,
}

impl RestaurantRecord {
    /// Decode the menu payload. `None` when it is missing or malformed.
    #[must_use]
    pub fn menu(&self) -> Option<Menu> {
        Menu::decode(&self.menu).ok()
    }

    /// Whether the owner has marked this listing as open.
    #[must_use]
    pub fn is_listed_open(&self) -> bool {
        self.status != 0
    }

    /// Display form of the business hours, e.g. `09:00 - 17:00`.
    #[must_use]
    pub fn hours(&self) -> String {
        format!("{} - {}", self.opentime, self.closetime)
    }

    /// Returns basic identification info as a tuple (id, name).
    #[must_use]
    pub fn basic_info(&self) -> (u32, &str) {
        (self.id, &self.name)
    }
}

impl fmt::Display for RestaurantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RestaurantRecord {{ id: {}, name: \"{}\" }}",
            self.id, self.name
        )
    }
}
