use ahash::AHashMap;
use dinery_data::RestaurantRecord;
use tracing::info;

/// Drop listings that share a name, keeping the one with the lowest id.
///
/// Kept listings stay in their existing order. Returns the removed ids in the
/// order they were encountered.
pub fn remove_duplicates(listings: &mut Vec<RestaurantRecord>) -> Vec<u32> {
    let mut keep: AHashMap<String, u32> = AHashMap::new();
    for record in listings.iter() {
        keep.entry(record.name.clone())
            .and_modify(|id| *id = (*id).min(record.id))
            .or_insert(record.id);
    }

    let mut removed = Vec::new();
    listings.retain(|record| {
        if keep.get(&record.name) == Some(&record.id) {
            keep.remove(&record.name);
            true
        } else {
            removed.push(record.id);
            false
        }
    });

    if !removed.is_empty() {
        info!(count = removed.len(), "Removed duplicate listings");
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: u32, name: &str) -> RestaurantRecord {
        RestaurantRecord {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_keeps_lowest_id_in_order() {
        let mut listings = vec![
            named(9, "Pizza"),
            named(5, "Sushi"),
            named(3, "Pizza"),
            named(7, "Sushi"),
            named(1, "Tacos"),
        ];
        let removed = remove_duplicates(&mut listings);
        assert_eq!(removed, vec![9, 7]);
        let kept: Vec<u32> = listings.iter().map(|r| r.id).collect();
        assert_eq!(kept, vec![5, 3, 1]);
    }

    #[test]
    fn test_no_duplicates() {
        let mut listings = vec![named(1, "A"), named(2, "B")];
        assert!(remove_duplicates(&mut listings).is_empty());
        assert_eq!(listings.len(), 2);
    }
}
