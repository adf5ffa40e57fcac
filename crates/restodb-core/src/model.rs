// crates/restodb-core/src/model.rs

use crate::common::{DbStats, LoadStats};
use crate::palette::{Palette, Rgba};
use crate::raw::RestaurantRaw;
use crate::text::{equals_folded, non_empty, parse_opt_f64};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One normalized restaurant row.
///
/// `rating`, `latitude` and `longitude` are always finite numbers; rows
/// without them never make it into a [`RestaurantDb`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub title: String,
    pub category: String,
    pub rating: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Derived from `category` via the load's [`Palette`].
    pub color: Rgba,
}

impl Restaurant {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn phone(&self) -> &str {
        self.phone.as_deref().unwrap_or("")
    }

    pub fn address(&self) -> &str {
        self.address.as_deref().unwrap_or("")
    }

    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// The normalized, read-only dataset produced by one load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDb {
    pub records: Vec<Restaurant>,
    pub palette: Palette,
    pub load_stats: LoadStats,
}

/// Record that survived coercion but has no color yet.
struct Coerced {
    raw: RestaurantRaw,
    rating: f64,
    latitude: f64,
    longitude: f64,
}

/// Convert raw CSV rows into a [`RestaurantDb`].
///
/// 1. Coerce `Rating`, `Latitude`, `Longitude`; unparsable cells become missing.
/// 2. Drop rows without a rating, then rows without both coordinates.
/// 3. Build the palette from the surviving categories and attach colors.
pub fn build_restodb<I>(raw: I) -> RestaurantDb
where
    I: IntoIterator<Item = RestaurantRaw>,
{
    let mut stats = LoadStats::default();
    let mut kept: Vec<Coerced> = Vec::new();

    for (row, r) in raw.into_iter().enumerate() {
        stats.rows_read += 1;

        let Some(rating) = parse_opt_f64(r.rating.as_deref()) else {
            tracing::debug!(row, title = %r.title, "dropping row: missing rating");
            stats.dropped_missing_rating += 1;
            continue;
        };

        let lat = parse_opt_f64(r.latitude.as_deref());
        let lon = parse_opt_f64(r.longitude.as_deref());
        let (Some(latitude), Some(longitude)) = (lat, lon) else {
            tracing::debug!(row, title = %r.title, "dropping row: missing coordinates");
            stats.dropped_missing_coordinates += 1;
            continue;
        };

        kept.push(Coerced {
            raw: r,
            rating,
            latitude,
            longitude,
        });
    }

    let palette = Palette::from_categories(kept.iter().map(|c| c.raw.category.as_str()));

    let records = kept
        .into_iter()
        .map(|c| {
            // Every kept category is in the palette by construction.
            let color = palette
                .color_for(&c.raw.category)
                .unwrap_or_else(|| crate::palette::viridis(0.0));
            Restaurant {
                title: c.raw.title,
                category: c.raw.category,
                rating: c.rating,
                latitude: c.latitude,
                longitude: c.longitude,
                phone: non_empty(c.raw.phone),
                address: non_empty(c.raw.address),
                color,
            }
        })
        .collect::<Vec<_>>();

    stats.kept = records.len();

    RestaurantDb {
        records,
        palette,
        load_stats: stats,
    }
}

impl RestaurantDb {
    /// All records in dataset order.
    pub fn records(&self) -> &[Restaurant] {
        &self.records
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn load_stats(&self) -> LoadStats {
        self.load_stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> DbStats {
        let titles: HashSet<&str> = self.records.iter().map(|r| r.title.as_str()).collect();
        DbStats {
            restaurants: self.records.len(),
            categories: self.palette.len(),
            distinct_titles: titles.len(),
        }
    }

    /// Distinct categories, sorted (palette order).
    pub fn categories(&self) -> Vec<&str> {
        self.palette.categories().collect()
    }

    /// Resolve a user-typed category to its canonical spelling.
    ///
    /// Exact match wins; otherwise the first category equal after folding
    /// (case and accents) is returned.
    pub fn find_category(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        let mut categories = self.palette.categories();
        if self.palette.color_for(name).is_some() {
            return categories.find(|c| *c == name);
        }
        categories.find(|c| equals_folded(c, name))
    }

    /// Records of one category, dataset order. Exact match only.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Restaurant> + 'a {
        self.records.iter().filter(move |r| r.category == category)
    }

    /// Records sharing an exact title, dataset order.
    pub fn by_title<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a Restaurant> + 'a {
        self.records.iter().filter(move |r| r.title == title)
    }

    /// Every title in dataset order, duplicates included.
    pub fn titles(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.title.as_str()).collect()
    }

    /// Mean latitude/longitude of the whole dataset; `None` when empty.
    pub fn center(&self) -> Option<(f64, f64)> {
        if self.records.is_empty() {
            return None;
        }
        let n = self.records.len() as f64;
        let (lat, lon) = self
            .records
            .iter()
            .fold((0.0, 0.0), |(a, b), r| (a + r.latitude, b + r.longitude));
        Some((lat / n, lon / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, category: &str, rating: &str, lat: &str, lon: &str) -> RestaurantRaw {
        RestaurantRaw {
            title: title.into(),
            category: category.into(),
            rating: Some(rating.into()),
            latitude: Some(lat.into()),
            longitude: Some(lon.into()),
            phone: Some(String::new()),
            address: Some("1 Main St".into()),
        }
    }

    #[test]
    fn drops_rows_with_bad_numbers_and_counts_them() {
        let db = build_restodb(vec![
            raw("A", "Pizza", "4.5", "40.0", "-73.0"),
            raw("B", "Pizza", "n/a", "40.0", "-73.0"),
            raw("C", "Sushi", "3.0", "", "-73.0"),
            raw("D", "Tacos", "", "oops", "-73.0"),
        ]);

        assert_eq!(db.titles(), ["A"]);
        assert_eq!(
            db.load_stats(),
            LoadStats {
                rows_read: 4,
                dropped_missing_rating: 2,
                dropped_missing_coordinates: 1,
                dropped_unreadable: 0,
                kept: 1,
            }
        );
    }

    #[test]
    fn palette_only_covers_surviving_categories() {
        let db = build_restodb(vec![
            raw("A", "Pizza", "4.5", "40.0", "-73.0"),
            raw("B", "Sushi", "bad", "40.0", "-73.0"),
        ]);
        assert_eq!(db.categories(), ["Pizza"]);
        assert_eq!(db.records()[0].color, crate::palette::viridis(0.0));
    }

    #[test]
    fn blank_passthrough_fields_become_none() {
        let db = build_restodb(vec![raw("A", "Pizza", "4", "1", "2")]);
        let r = &db.records()[0];
        assert_eq!(r.phone, None);
        assert_eq!(r.phone(), "");
        assert_eq!(r.address(), "1 Main St");
    }

    #[test]
    fn category_lookup_folds_case_and_accents() {
        let db = build_restodb(vec![raw("A", "Café", "4", "1", "2")]);
        assert_eq!(db.find_category("Café"), Some("Café"));
        assert_eq!(db.find_category("cafe"), Some("Café"));
        assert_eq!(db.find_category("Bar"), None);
    }

    #[test]
    fn center_is_mean_of_coordinates() {
        let db = build_restodb(vec![
            raw("A", "Pizza", "4", "10", "20"),
            raw("B", "Pizza", "4", "20", "40"),
        ]);
        assert_eq!(db.center(), Some((15.0, 30.0)));
        assert_eq!(build_restodb(Vec::new()).center(), None);
    }
}
