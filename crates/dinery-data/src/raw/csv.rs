//! CSV dumps of the restaurant table.
//!
//! Every column is read as text and then cast non-strictly, so a malformed
//! number turns into a null instead of failing the scan. Nulls are coerced the
//! same way the JSON decoder coerces bad values.

use std::path::Path;

use itertools::izip;
use polars::prelude::*;
use tracing::{debug, instrument, warn};

use super::Result;
use crate::RestaurantRecord;

const LISTING_COLUMNS: [&str; 10] = [
    "rid",
    "name",
    "address",
    "zip",
    "opentime",
    "closetime",
    "description",
    "rating",
    "status",
    "menu",
];

pub fn get_listings_lf(path: impl AsRef<Path>) -> Result<LazyFrame> {
    Ok(LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .select([
            col("rid").cast(DataType::UInt32),
            col("name"),
            col("address"),
            col("zip").cast(DataType::UInt32),
            col("opentime"),
            col("closetime"),
            col("description"),
            col("rating").cast(DataType::Float64),
            col("status").cast(DataType::Int64),
            col("menu"),
        ]))
}

#[instrument(name = "Read CSV listings", skip_all, level = "debug")]
pub fn read_listings(path: impl AsRef<Path>) -> Result<Vec<RestaurantRecord>> {
    let df = get_listings_lf(path)?.collect()?;
    listings_from_df(&df)
}

/// Build records from a frame with the listing columns. Rows without an id are dropped.
pub fn listings_from_df(df: &DataFrame) -> Result<Vec<RestaurantRecord>> {
    let cols = df.select(LISTING_COLUMNS)?.take_columns();

    let listings: Vec<RestaurantRecord> = izip!(
        cols[0].u32()?,
        cols[1].str()?,
        cols[2].str()?,
        cols[3].u32()?,
        cols[4].str()?,
        cols[5].str()?,
        cols[6].str()?,
        cols[7].f64()?,
    )
    .zip(cols[8].i64()?.iter().zip(cols[9].str()?.iter()))
    .enumerate()
    .filter_map(
        |(
            row,
            ((id, name, address, zip, opentime, closetime, description, rating), (status, menu)),
        )| {
            let Some(id) = id else {
                warn!(row, "Skipping CSV listing without a numeric rid");
                return None;
            };
            Some(RestaurantRecord {
                id,
                name: name.unwrap_or_default().to_string(),
                address: address.unwrap_or_default().to_string(),
                zip,
                description: description.unwrap_or_default().to_string(),
                opentime: opentime.unwrap_or_default().to_string(),
                closetime: closetime.unwrap_or_default().to_string(),
                status: status.unwrap_or(0),
                rating: rating.filter(|r| r.is_finite()).unwrap_or(0.0),
                menu: menu.unwrap_or_default().to_string(),
                ..Default::default()
            })
        },
    )
    .collect();

    debug!(rows = df.height(), decoded = listings.len(), "Decoded CSV listings");
    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_utils::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_get_listings_lf_types() {
        let file = write_csv(&[
            "rid,name,address,zip,opentime,closetime,description,rating,status,menu",
            r#"1,Soup Spot,1 First Ave,10009,09:00,17:00,Soups,4.5,1,"[{""category"":""Soup"",""items"":[{""name"":""Miso"",""price"":5}]}]""#,
        ]);

        let df = get_listings_lf(file.path()).unwrap().collect().unwrap();
        assert_eq!(df.height(), 1);
        assert_column_type(&df, "rid", &DataType::UInt32);
        assert_column_type(&df, "zip", &DataType::UInt32);
        assert_column_type(&df, "rating", &DataType::Float64);
        assert_column_type(&df, "status", &DataType::Int64);
        assert_column_type(&df, "menu", &DataType::String);
        assert_no_nulls_in_column(&df, "rid");
    }

    #[test]
    fn test_read_listings_coerces_bad_values() {
        let file = write_csv(&[
            "rid,name,address,zip,opentime,closetime,description,rating,status,menu",
            r#"1,Soup Spot,1 First Ave,10009,09:00,17:00,Soups,4.5,1,"[{""category"":""Soup"",""items"":[{""name"":""Miso"",""price"":5}]}]""#,
            "2,Odd Place,2 Second Ave,nozip,10:00,20:00,Odd,unrated,closed,not json",
            "x,No Id,3 Third Ave,10010,10:00,20:00,Dropped,4.0,1,[]",
        ]);

        let listings = read_listings(file.path()).unwrap();
        assert_eq!(listings.len(), 2);

        assert_eq!(listings[0].id, 1);
        assert_eq!(listings[0].zip, Some(10009));
        assert_eq!(listings[0].rating, 4.5);
        assert_eq!(listings[0].status, 1);
        assert_eq!(listings[0].menu().unwrap().item_count(), 1);

        assert_eq!(listings[1].id, 2);
        assert_eq!(listings[1].zip, None);
        assert_eq!(listings[1].rating, 0.0);
        assert_eq!(listings[1].status, 0);
        assert!(listings[1].menu().is_none());
    }
}
