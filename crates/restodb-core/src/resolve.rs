// crates/restodb-core/src/resolve.rs

use crate::error::GeocodeError;
use crate::geocode::{Location, ReverseGeocoder};
use crate::model::Restaurant;

/// First record (dataset order) titled exactly `title`.
pub fn representative<'a>(title: &str, records: &'a [Restaurant]) -> Option<&'a Restaurant> {
    records.iter().find(|r| r.title == title)
}

/// Approximate location of a matched title.
///
/// The same title can appear at many addresses; the first record in dataset
/// order stands in for all of them. Any failure is a [`GeocodeError`], which
/// callers surface as "location unknown" without aborting the search.
pub fn resolve<G>(title: &str, records: &[Restaurant], geocoder: &G) -> Result<Location, GeocodeError>
where
    G: ReverseGeocoder + ?Sized,
{
    let record =
        representative(title, records).ok_or_else(|| GeocodeError::NoRecords(title.to_string()))?;
    geocoder.reverse(record.latitude, record.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::StaticGeocoder;
    use crate::palette::viridis;
    use std::cell::RefCell;

    fn record(title: &str, lat: f64, lon: f64) -> Restaurant {
        Restaurant {
            title: title.into(),
            category: "Pizza".into(),
            rating: 4.0,
            latitude: lat,
            longitude: lon,
            phone: None,
            address: None,
            color: viridis(0.0),
        }
    }

    struct Recording(RefCell<Vec<(f64, f64)>>);

    impl ReverseGeocoder for Recording {
        fn reverse(&self, lat: f64, lon: f64) -> Result<Location, GeocodeError> {
            self.0.borrow_mut().push((lat, lon));
            Ok(Location::new("Somewhere", "Anywhere"))
        }
    }

    #[test]
    fn geocodes_first_record_in_dataset_order() {
        let records = [record("Joe's", 1.0, 2.0), record("Joe's", 3.0, 4.0)];
        let geocoder = Recording(RefCell::new(Vec::new()));
        resolve("Joe's", &records, &geocoder).unwrap();
        assert_eq!(*geocoder.0.borrow(), [(1.0, 2.0)]);
    }

    #[test]
    fn unknown_title_is_no_records() {
        let records = [record("Joe's", 1.0, 2.0)];
        let err = resolve("Moe's", &records, &StaticGeocoder::unavailable()).unwrap_err();
        assert!(matches!(err, GeocodeError::NoRecords(t) if t == "Moe's"));
    }

    #[test]
    fn geocoder_failure_is_passed_through() {
        let records = [record("Joe's", 1.0, 2.0)];
        let err = resolve("Joe's", &records, &StaticGeocoder::unavailable()).unwrap_err();
        assert!(matches!(err, GeocodeError::NoResult { .. }));
    }
}
