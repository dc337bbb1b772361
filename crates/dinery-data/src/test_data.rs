use std::io::Write;

use polars::prelude::*;
use serde_json::json;
use tempfile::NamedTempFile;
use tracing::info;

use super::error::Result;
use crate::RestaurantRecord;

/// Configuration for test data generation
#[derive(Debug, Clone)]
pub struct TestDataConfig {
    /// Number of listings to generate
    pub listings: usize,
    /// Whether to use the full realistic fixture set or a bare minimum
    pub realistic_data: bool,
}

impl Default for TestDataConfig {
    fn default() -> Self {
        Self::sample()
    }
}

impl TestDataConfig {
    /// Minimal data for unit tests
    pub fn minimal() -> Self {
        Self {
            listings: 3,
            realistic_data: false,
        }
    }

    /// Sample data for integration tests, one pass over the whole fixture table
    pub fn sample() -> Self {
        Self {
            listings: FIXTURES.len(),
            realistic_data: true,
        }
    }
}

/// Menu shapes used by the fixtures.
#[derive(Debug, Clone, Copy)]
enum FixtureMenu {
    /// Canonical menu with these (item, price) pairs in one category.
    Items(&'static str, &'static [(&'static str, &'static str, f64)]),
    /// Valid JSON with no items.
    Empty,
    /// Not JSON at all.
    Malformed,
    /// Object-of-categories layout, which does not decode.
    ObjectShaped,
}

struct Fixture {
    name: &'static str,
    address: &'static str,
    zip: u32,
    opentime: &'static str,
    closetime: &'static str,
    description: &'static str,
    rating: f64,
    status: i64,
    menu: FixtureMenu,
}

/// The fixture table. Order matters: it is the "as received" order, newest first.
///
/// | id | bucket         | notes                               |
/// |----|----------------|-------------------------------------|
/// | 1  | `$`  (avg 8)   |                                     |
/// | 2  | `$`  (avg 8)   | rating 4.0                          |
/// | 3  | `$$` (avg 18)  | rating 4.0, zip 10001               |
/// | 4  | `$$$` (avg 28) | highest rating                      |
/// | 5  | `$$` (avg 15.5)| overnight hours 22:00-02:00         |
/// | 6  | `$$` (avg 10)  | owner marked closed                 |
/// | 7  | `$$` default   | malformed menu                      |
/// | 8  | `$$` default   | object-shaped menu, rating 4.0      |
/// | 9  | `$$` default   | empty menu                          |
/// | 10 | `$$$` (avg 47.67) |                                  |
/// | 11 | `$$` (avg 13)  | "pho" only appears in its menu      |
/// | 12 | `$` (avg 5.5)  |                                     |
static FIXTURES: [Fixture; 12] = [
    Fixture {
        name: "Golden Dumpling House",
        address: "12 Mott St, New York",
        zip: 10013,
        opentime: "10:00",
        closetime: "22:00",
        description: "Hand folded dumplings and noodle soups",
        rating: 4.5,
        status: 1,
        menu: FixtureMenu::Items(
            "Dumplings",
            &[
                ("Pork Dumplings", "Eight pieces, steamed", 6.5),
                ("Chive Dumplings", "Pan fried", 8.0),
                ("Wonton Soup", "Shrimp wontons in broth", 9.5),
            ],
        ),
    },
    Fixture {
        name: "Brooklyn Slice",
        address: "301 Bedford Ave, Brooklyn",
        zip: 11211,
        opentime: "11:00",
        closetime: "23:00",
        description: "New York style pizza by the slice",
        rating: 4.0,
        status: 1,
        menu: FixtureMenu::Items(
            "Pizza",
            &[
                ("Cheese Slice", "Classic", 3.5),
                ("Pepperoni Slice", "Cup and char", 4.5),
                ("Whole Pie", "Eight slices", 16.0),
            ],
        ),
    },
    Fixture {
        name: "Chelsea Bistro",
        address: "88 W 23rd St, New York",
        zip: 10001,
        opentime: "17:00",
        closetime: "23:00",
        description: "French bistro classics",
        rating: 4.0,
        status: 1,
        menu: FixtureMenu::Items(
            "Plats",
            &[
                ("Onion Soup", "Gruyere crust", 14.0),
                ("Moules Frites", "White wine and shallots", 18.0),
                ("Steak Frites", "Bavette, bearnaise", 22.0),
            ],
        ),
    },
    Fixture {
        name: "Harbor Oyster Bar",
        address: "40 Fulton St, New York",
        zip: 10038,
        opentime: "12:00",
        closetime: "21:00",
        description: "Raw bar and seafood",
        rating: 4.8,
        status: 1,
        menu: FixtureMenu::Items(
            "Raw Bar",
            &[
                ("Half Dozen Oysters", "East coast selection", 24.0),
                ("Lobster Roll", "Brown butter", 32.0),
                ("Crudo", "Daily catch", 28.0),
            ],
        ),
    },
    Fixture {
        name: "Midnight Ramen",
        address: "9 St Marks Pl, New York",
        zip: 10003,
        opentime: "22:00",
        closetime: "02:00",
        description: "Late night tonkotsu",
        rating: 4.2,
        status: 1,
        menu: FixtureMenu::Items(
            "Ramen",
            &[
                ("Tonkotsu", "Pork bone broth", 15.0),
                ("Spicy Miso", "Chili oil", 16.0),
            ],
        ),
    },
    Fixture {
        name: "Sunrise Cafe",
        address: "410 Lincoln Rd, Miami Beach",
        zip: 33139,
        opentime: "07:00",
        closetime: "15:00",
        description: "Breakfast all day",
        rating: 3.6,
        status: 0,
        menu: FixtureMenu::Items(
            "Breakfast",
            &[
                ("Pancakes", "Maple syrup", 9.0),
                ("Omelette", "Three eggs", 11.0),
            ],
        ),
    },
    Fixture {
        name: "Taco Stand",
        address: "77 Mission St, San Francisco",
        zip: 94105,
        opentime: "09:00",
        closetime: "17:00",
        description: "Street tacos and horchata",
        rating: 3.9,
        status: 1,
        menu: FixtureMenu::Malformed,
    },
    Fixture {
        name: "Garden Table",
        address: "15 Elm St, Portland",
        zip: 97205,
        opentime: "08:00",
        closetime: "20:00",
        description: "Seasonal vegetarian plates",
        rating: 4.0,
        status: 1,
        menu: FixtureMenu::ObjectShaped,
    },
    Fixture {
        name: "Corner Deli",
        address: "500 Grand St, New York",
        zip: 10002,
        opentime: "06:00",
        closetime: "18:00",
        description: "Sandwiches made to order",
        rating: 3.2,
        status: 1,
        menu: FixtureMenu::Empty,
    },
    Fixture {
        name: "Steak & Co",
        address: "1 Wall St, New York",
        zip: 10005,
        opentime: "17:00",
        closetime: "23:00",
        description: "Dry aged steaks",
        rating: 4.7,
        status: 1,
        menu: FixtureMenu::Items(
            "Steaks",
            &[
                ("Ribeye", "28 day dry aged", 45.0),
                ("Porterhouse", "For two", 60.0),
                ("Filet", "Eight ounces", 38.0),
            ],
        ),
    },
    Fixture {
        name: "Saigon Noodle",
        address: "230 Canal St, New York",
        zip: 10013,
        opentime: "10:00",
        closetime: "21:00",
        description: "Vietnamese soups and rice plates",
        rating: 4.3,
        status: 1,
        menu: FixtureMenu::Items(
            "Soups",
            &[
                ("Pho Tai", "Rare beef", 12.0),
                ("Bun Bo Hue", "Spicy lemongrass", 13.0),
                ("Com Tam", "Broken rice, grilled pork", 14.0),
            ],
        ),
    },
    Fixture {
        name: "Bagel Bros",
        address: "18 Court St, Brooklyn",
        zip: 11201,
        opentime: "06:00",
        closetime: "14:00",
        description: "Hand rolled bagels",
        rating: 4.1,
        status: 1,
        menu: FixtureMenu::Items(
            "Bagels",
            &[
                ("Plain Bagel", "Butter or cream cheese", 2.5),
                ("Lox Bagel", "Capers, red onion", 9.5),
                ("Egg Sandwich", "On any bagel", 4.5),
            ],
        ),
    },
];

fn menu_payload(menu: FixtureMenu) -> String {
    match menu {
        FixtureMenu::Items(category, items) => json!([{
            "category": category,
            "items": items
                .iter()
                .map(|(name, description, price)| json!({
                    "name": name,
                    "description": description,
                    "price": price,
                }))
                .collect::<Vec<_>>(),
        }])
        .to_string(),
        FixtureMenu::Empty => "[]".to_string(),
        FixtureMenu::Malformed => "{menu: tacos".to_string(),
        FixtureMenu::ObjectShaped => json!({
            "Plates": {"items": [{"name": "Grain Bowl", "description": "Farro", "price": 13}]}
        })
        .to_string(),
    }
}

/// Generate fixture listings with ids `1..=config.listings`.
///
/// Past the end of the fixture table the rows repeat with a `#n` suffix on the
/// name so names stay unique.
pub fn fixture_listings(config: &TestDataConfig) -> Vec<RestaurantRecord> {
    let table: &[Fixture] = if config.realistic_data {
        &FIXTURES
    } else {
        &FIXTURES[..3]
    };

    (0..config.listings)
        .map(|i| {
            let fixture = &table[i % table.len()];
            let round = i / table.len();
            let name = if round == 0 {
                fixture.name.to_string()
            } else {
                format!("{} #{}", fixture.name, round + 1)
            };
            RestaurantRecord {
                id: i as u32 + 1,
                name,
                address: fixture.address.to_string(),
                zip: Some(fixture.zip),
                description: fixture.description.to_string(),
                opentime: fixture.opentime.to_string(),
                closetime: fixture.closetime.to_string(),
                status: fixture.status,
                rating: fixture.rating,
                menu: menu_payload(fixture.menu),
                owner: Some(if i % 2 == 0 { 100 } else { 200 }),
                phone: None,
                price_label: None,
            }
        })
        .collect()
}

/// Create test data files in temporary files.
///
/// Returns `(json, csv)`: the JSON file holds the public `{"restaurants": [...]}`
/// envelope and the CSV file holds the same rows as a table dump.
pub fn create_test_data(config: &TestDataConfig) -> Result<(NamedTempFile, NamedTempFile)> {
    info!("Creating test data with config: {:?}", config);

    let listings = fixture_listings(config);
    let json_file = write_json_listings(&listings)?;
    let csv_file = write_csv_listings(&listings)?;

    Ok((json_file, csv_file))
}

fn write_json_listings(listings: &[RestaurantRecord]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::with_suffix(".json")?;
    serde_json::to_writer(&mut file, &json!({ "restaurants": listings }))?;
    file.flush()?;
    Ok(file)
}

fn write_csv_listings(listings: &[RestaurantRecord]) -> Result<NamedTempFile> {
    let mut df = df!(
        "rid" => listings.iter().map(|r| r.id).collect::<Vec<_>>(),
        "name" => listings.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        "address" => listings.iter().map(|r| r.address.as_str()).collect::<Vec<_>>(),
        "zip" => listings.iter().map(|r| r.zip).collect::<Vec<_>>(),
        "opentime" => listings.iter().map(|r| r.opentime.as_str()).collect::<Vec<_>>(),
        "closetime" => listings.iter().map(|r| r.closetime.as_str()).collect::<Vec<_>>(),
        "description" => listings.iter().map(|r| r.description.as_str()).collect::<Vec<_>>(),
        "rating" => listings.iter().map(|r| r.rating).collect::<Vec<_>>(),
        "status" => listings.iter().map(|r| r.status).collect::<Vec<_>>(),
        "menu" => listings.iter().map(|r| r.menu.as_str()).collect::<Vec<_>>(),
    )?;

    let mut file = NamedTempFile::with_suffix(".csv")?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_fixture() {
        let listings = fixture_listings(&TestDataConfig::minimal());
        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0].name, "Golden Dumpling House");
        assert_eq!(listings[2].zip, Some(10001));
    }

    #[test]
    fn test_fixture_rows_repeat_with_unique_names() {
        let config = TestDataConfig {
            listings: 5,
            realistic_data: false,
        };
        let listings = fixture_listings(&config);
        assert_eq!(listings[3].name, "Golden Dumpling House #2");
        assert_eq!(listings[4].id, 5);
    }

    #[test]
    fn test_fixture_menus() {
        let listings = fixture_listings(&TestDataConfig::sample());
        assert!(listings[0].menu().is_some());
        assert!(listings[6].menu().is_none(), "malformed menu");
        assert!(listings[7].menu().is_none(), "object-shaped menu");
        assert_eq!(listings[8].menu().unwrap().item_count(), 0);
    }

    #[test]
    fn test_create_test_data_files() {
        let (json_file, csv_file) = create_test_data(&TestDataConfig::minimal()).unwrap();
        let json_text = std::fs::read_to_string(json_file.path()).unwrap();
        assert!(json_text.starts_with(r#"{"restaurants":["#));
        let csv_text = std::fs::read_to_string(csv_file.path()).unwrap();
        assert!(csv_text.starts_with("rid,name,address,zip"));
        assert_eq!(csv_text.lines().count(), 4);
    }
}
