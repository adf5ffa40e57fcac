// crates/restodb-core/src/view.rs

//! Request/response views.
//!
//! Every interaction is one call to [`render`] with an explicit
//! [`ViewState`]; there is no reactive state inside the core. The returned
//! [`View`] borrows from the dataset and holds everything a front-end needs
//! to draw: markers, table rows, chart series or search results.

use crate::analytics::CategoryReport;
use crate::error::{GeocodeError, RestoError, Result};
use crate::geocode::{Location, ReverseGeocoder};
use crate::model::{Restaurant, RestaurantDb};
use crate::resolve::resolve;
use crate::search::{MatchResult, SearchOptions};
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 1000;
pub const DEFAULT_ZOOM: u8 = 4;

/// Which slice of the dataset the map shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapMode {
    All,
    /// 1-based page number.
    Page(usize),
    Category(String),
}

/// One user request.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Map(MapMode),
    Analytics { category: String, top_n: usize },
    /// `pick` indexes into the returned matches (0-based); `None` picks the best.
    Search { query: String, pick: Option<usize> },
}

/// Collaborators and knobs for [`render`].
pub struct RenderContext<'g> {
    pub page_size: usize,
    pub search: SearchOptions,
    /// `None` skips reverse geocoding.
    pub geocoder: Option<&'g dyn ReverseGeocoder>,
}

impl Default for RenderContext<'_> {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search: SearchOptions::default(),
            geocoder: None,
        }
    }
}

/// Fixed-size pages over `total` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub total: usize,
    pub page_size: usize,
}

impl Paginator {
    pub fn new(total: usize, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(RestoError::InvalidArgument("page size must be positive".into()));
        }
        Ok(Self { total, page_size })
    }

    /// Always at least one page, even for an empty dataset.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    /// Row range of a 1-based `page`; the last page may be short.
    pub fn range(&self, page: usize) -> Result<Range<usize>> {
        if page == 0 || page > self.page_count() {
            return Err(RestoError::InvalidArgument(format!(
                "page {page} out of range 1..={}",
                self.page_count()
            )));
        }
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total);
        Ok(start..end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerIcon {
    pub color: &'static str,
    pub glyph: &'static str,
}

pub const DEFAULT_ICON: MarkerIcon = MarkerIcon {
    color: "blue",
    glyph: "info-sign",
};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker<'a> {
    pub latitude: f64,
    pub longitude: f64,
    pub tooltip: String,
    pub icon: MarkerIcon,
    pub record: &'a Restaurant,
}

impl<'a> Marker<'a> {
    pub fn for_record(record: &'a Restaurant) -> Self {
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            tooltip: tooltip(record),
            icon: DEFAULT_ICON,
            record,
        }
    }
}

/// `Name: …<br>Category: …<br>Rating: …`
pub fn tooltip(r: &Restaurant) -> String {
    format!(
        "Name: {}<br>Category: {}<br>Rating: {}",
        r.title,
        r.category,
        format_rating(r.rating)
    )
}

/// Ratings always carry a decimal point (`4.0`, `4.5`).
pub fn format_rating(v: f64) -> String {
    format!("{v:?}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView<'a> {
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<Marker<'a>>,
    /// Tabular listing, only for paginated mode.
    pub table: Option<Vec<&'a Restaurant>>,
    /// `(page, page_count)` in paginated mode.
    pub page: Option<(usize, usize)>,
}

/// Result of resolving the picked match to a place.
#[derive(Debug)]
pub enum LocationState {
    Found(Location),
    /// Shown as "location unknown"; the search view still renders.
    Unknown(GeocodeError),
    Skipped,
}

impl LocationState {
    pub fn label(&self) -> String {
        match self {
            LocationState::Found(loc) => loc.to_string(),
            LocationState::Unknown(_) => "location unknown".to_string(),
            LocationState::Skipped => "not looked up".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum SearchOutcome<'a> {
    NoResults,
    Matches {
        result: MatchResult<'a>,
        picked: &'a str,
        /// Records of the picked title, for the small map.
        picked_records: Vec<&'a Restaurant>,
        location: LocationState,
    },
}

#[derive(Debug)]
pub struct SearchView<'a> {
    pub query: String,
    pub outcome: SearchOutcome<'a>,
}

#[derive(Debug)]
pub enum View<'a> {
    Map(MapView<'a>),
    Analytics(CategoryReport<'a>),
    Search(SearchView<'a>),
}

/// Runs one interaction against a loaded dataset.
pub fn render<'a>(db: &'a RestaurantDb, state: &ViewState, ctx: &RenderContext<'_>) -> Result<View<'a>> {
    match state {
        ViewState::Map(mode) => render_map(db, mode, ctx.page_size).map(View::Map),
        ViewState::Analytics { category, top_n } => {
            CategoryReport::build(db, category, *top_n).map(View::Analytics)
        }
        ViewState::Search { query, pick } => render_search(db, query, *pick, ctx).map(View::Search),
    }
}

fn render_map<'a>(db: &'a RestaurantDb, mode: &MapMode, page_size: usize) -> Result<MapView<'a>> {
    let center = db.center().unwrap_or((0.0, 0.0));
    let (records, table, page): (Vec<&'a Restaurant>, bool, Option<(usize, usize)>) = match mode {
        MapMode::All => (db.records().iter().collect(), false, None),
        MapMode::Page(p) => {
            let pages = Paginator::new(db.len(), page_size)?;
            let range = pages.range(*p)?;
            (db.records()[range].iter().collect(), true, Some((*p, pages.page_count())))
        }
        MapMode::Category(name) => {
            let category = db
                .find_category(name)
                .ok_or_else(|| RestoError::InvalidArgument(format!("unknown category: {name}")))?;
            (db.by_category(category).collect(), false, None)
        }
    };

    tracing::debug!(?mode, markers = records.len(), "map view");
    Ok(MapView {
        center,
        zoom: DEFAULT_ZOOM,
        markers: records.iter().map(|&r| Marker::for_record(r)).collect(),
        table: table.then_some(records),
        page,
    })
}

fn render_search<'a>(
    db: &'a RestaurantDb,
    query: &str,
    pick: Option<usize>,
    ctx: &RenderContext<'_>,
) -> Result<SearchView<'a>> {
    let result = db.find_matches(query, &ctx.search)?;
    if result.is_empty() {
        return Ok(SearchView {
            query: query.to_string(),
            outcome: SearchOutcome::NoResults,
        });
    }

    let index = pick.unwrap_or(0);
    let picked = result.matches.get(index).ok_or_else(|| {
        RestoError::InvalidArgument(format!(
            "pick {index} out of range, {} matches",
            result.matches.len()
        ))
    })?;
    let picked_title = picked.title;
    let picked_records = picked.records.clone();

    let location = match ctx.geocoder {
        None => LocationState::Skipped,
        Some(geocoder) => match resolve(picked_title, db.records(), geocoder) {
            Ok(loc) => LocationState::Found(loc),
            Err(e) => {
                tracing::warn!(title = picked_title, error = %e, "reverse geocoding failed");
                LocationState::Unknown(e)
            }
        },
    };

    Ok(SearchView {
        query: query.to_string(),
        outcome: SearchOutcome::Matches {
            result,
            picked: picked_title,
            picked_records,
            location,
        },
    })
}
