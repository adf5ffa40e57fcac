// crates/restodb-core/src/analytics.rs

//! Per-category descriptive statistics.
//!
//! Produces the numeric series behind the analytics charts (bar, histogram,
//! pie, scatter, area, donut). Drawing them is left to the caller.

use crate::error::{RestoError, Result};
use crate::model::{Restaurant, RestaurantDb};
use crate::palette::{viridis_samples, Rgba};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const TOP_N_MIN: usize = 1;
pub const TOP_N_MAX: usize = 50;
pub const DEFAULT_TOP_N: usize = 10;
pub const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleCount<'a> {
    pub title: &'a str,
    pub count: usize,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingCount {
    pub rating: f64,
    pub count: usize,
    /// Share of the category, in percent.
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TitleAverage<'a> {
    pub title: &'a str,
    pub mean_rating: f64,
}

/// Everything the analytics view shows for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport<'a> {
    pub category: &'a str,
    pub top_n: usize,
    pub record_count: usize,
    pub mean_rating: Option<f64>,
    /// Most frequent titles, count descending, ties in first-seen order.
    pub top_titles: Vec<TitleCount<'a>>,
    pub rating_histogram: Vec<HistogramBin>,
    /// Distinct ratings, count descending, ties by rating ascending.
    pub rating_counts: Vec<RatingCount>,
    /// Distinct ratings, rating ascending.
    pub rating_area: Vec<RatingCount>,
    /// Mean rating per title, sorted by title.
    pub average_by_title: Vec<TitleAverage<'a>>,
}

impl<'a> CategoryReport<'a> {
    /// Builds the report for `category` (matched via [`RestaurantDb::find_category`]).
    pub fn build(db: &'a RestaurantDb, category: &str, top_n: usize) -> Result<Self> {
        if !(TOP_N_MIN..=TOP_N_MAX).contains(&top_n) {
            return Err(RestoError::InvalidArgument(format!(
                "top_n must be within {TOP_N_MIN}..={TOP_N_MAX}, got {top_n}"
            )));
        }
        let category = db
            .find_category(category)
            .ok_or_else(|| RestoError::InvalidArgument(format!("unknown category: {category}")))?;

        let records: Vec<&'a Restaurant> = db.by_category(category).collect();
        let ratings: Vec<f64> = records.iter().map(|r| r.rating).collect();

        let mean_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };

        let rating_area = rating_counts(&ratings);
        let mut by_count = rating_area.clone();
        // Stable sort keeps ascending rating within equal counts.
        by_count.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(Self {
            category,
            top_n,
            record_count: records.len(),
            mean_rating,
            top_titles: top_titles(&records, top_n),
            rating_histogram: histogram(&ratings, HISTOGRAM_BINS),
            rating_counts: by_count,
            rating_area,
            average_by_title: average_by_title(&records),
        })
    }

    /// Suggested figure size `(width, height)`: wider for larger `top_n`.
    pub fn figure_size(&self) -> (f64, f64) {
        ((self.top_n as f64 * 0.2).max(10.0), 6.0)
    }
}

fn top_titles<'a>(records: &[&'a Restaurant], top_n: usize) -> Vec<TitleCount<'a>> {
    let mut order: Vec<&'a str> = Vec::new();
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for r in records {
        let n = counts.entry(r.title.as_str()).or_insert(0);
        if *n == 0 {
            order.push(r.title.as_str());
        }
        *n += 1;
    }

    let mut ranked: Vec<(&str, usize)> = order.into_iter().map(|t| (t, counts[t])).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);

    let colors = viridis_samples(ranked.len());
    ranked
        .into_iter()
        .zip(colors)
        .map(|((title, count), color)| TitleCount { title, count, color })
        .collect()
}

/// Equal-width histogram over `[min, max]`, last bin closed.
///
/// When every value is equal the range widens to `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

fn rating_counts(ratings: &[f64]) -> Vec<RatingCount> {
    let mut sorted = ratings.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let total = sorted.len() as f64;

    let mut out: Vec<RatingCount> = Vec::new();
    for v in sorted {
        match out.last_mut() {
            Some(last) if last.rating == v => last.count += 1,
            _ => out.push(RatingCount {
                rating: v,
                count: 1,
                percent: 0.0,
            }),
        }
    }
    for rc in &mut out {
        rc.percent = rc.count as f64 * 100.0 / total;
    }
    out
}

fn average_by_title<'a>(records: &[&'a Restaurant]) -> Vec<TitleAverage<'a>> {
    let mut sums: BTreeMap<&'a str, (f64, usize)> = BTreeMap::new();
    for r in records {
        let e = sums.entry(r.title.as_str()).or_insert((0.0, 0));
        e.0 += r.rating;
        e.1 += 1;
    }
    sums.into_iter()
        .map(|(title, (sum, n))| TitleAverage {
            title,
            mean_rating: sum / n as f64,
        })
        .collect()
}

impl RestaurantDb {
    pub fn category_report(&self, category: &str, top_n: usize) -> Result<CategoryReport<'_>> {
        CategoryReport::build(self, category, top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_restodb;
    use crate::raw::RestaurantRaw;

    fn raw(title: &str, category: &str, rating: &str) -> RestaurantRaw {
        RestaurantRaw {
            title: title.into(),
            category: category.into(),
            rating: Some(rating.into()),
            latitude: Some("40".into()),
            longitude: Some("-74".into()),
            ..Default::default()
        }
    }

    fn db() -> RestaurantDb {
        build_restodb(vec![
            raw("Joe's", "Pizza", "4.0"),
            raw("Sal's", "Pizza", "3.0"),
            raw("Sal's", "Pizza", "5.0"),
            raw("Joe's", "Pizza", "4.0"),
            raw("Vito's", "Pizza", "4.0"),
            raw("Sakura", "Sushi", "4.5"),
        ])
    }

    #[test]
    fn top_titles_break_ties_by_first_appearance() {
        let db = db();
        let report = db.category_report("Pizza", 2).unwrap();
        let top: Vec<_> = report.top_titles.iter().map(|t| (t.title, t.count)).collect();
        assert_eq!(top, [("Joe's", 2), ("Sal's", 2)]);
        assert_eq!(report.record_count, 5);
        assert_eq!(report.mean_rating, Some(4.0));
    }

    #[test]
    fn rating_counts_and_area_orderings() {
        let db = db();
        let report = db.category_report("pizza", 10).unwrap();
        let counts: Vec<_> = report.rating_counts.iter().map(|r| (r.rating, r.count)).collect();
        assert_eq!(counts, [(4.0, 3), (3.0, 1), (5.0, 1)]);
        let area: Vec<_> = report.rating_area.iter().map(|r| r.rating).collect();
        assert_eq!(area, [3.0, 4.0, 5.0]);
        assert_eq!(report.rating_counts[0].percent, 60.0);
    }

    #[test]
    fn averages_sorted_by_title() {
        let db = db();
        let report = db.category_report("Pizza", 10).unwrap();
        let avgs: Vec<_> = report
            .average_by_title
            .iter()
            .map(|a| (a.title, a.mean_rating))
            .collect();
        assert_eq!(avgs, [("Joe's", 4.0), ("Sal's", 4.0), ("Vito's", 4.0)]);
    }

    #[test]
    fn histogram_covers_every_value() {
        let bins = histogram(&[3.0, 4.0, 4.0, 5.0], 20);
        assert_eq!(bins.len(), 20);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
        assert_eq!(bins[19].count, 1);
        assert_eq!(bins[19].upper, 5.0);
        assert_eq!(bins[0].lower, 3.0);
    }

    #[test]
    fn histogram_of_constant_values_widens_range() {
        let bins = histogram(&[4.5, 4.5], 20);
        assert_eq!(bins[0].lower, 4.0);
        assert_eq!(bins[19].upper, 5.0);
        assert_eq!(bins.iter().filter(|b| b.count == 2).count(), 1);
    }

    #[test]
    fn rejects_bad_arguments() {
        let db = db();
        assert!(matches!(db.category_report("Pizza", 0), Err(RestoError::InvalidArgument(_))));
        assert!(matches!(db.category_report("Pizza", 51), Err(RestoError::InvalidArgument(_))));
        assert!(matches!(db.category_report("Tacos", 10), Err(RestoError::InvalidArgument(_))));
    }

    #[test]
    fn figure_width_grows_with_top_n() {
        let db = db();
        assert_eq!(db.category_report("Pizza", 10).unwrap().figure_size(), (10.0, 6.0));
        assert_eq!(db.category_report("Pizza", 50).unwrap().figure_size(), (10.0, 6.0));
    }
}
