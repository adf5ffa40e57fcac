// crates/restodb-core/src/lib.rs

//! restodb-core
//! ============
//!
//! Load a restaurant dataset (CSV over HTTP or from disk), normalize it,
//! color it by category, and explore it: map markers, per-category
//! statistics, fuzzy title search and reverse geocoding.
//!
//! ```text
//! source ──► loader ──► model (RestaurantDb) ──► view::render(state)
//!                            │                      ├─ map / pages
//!                            │                      ├─ analytics
//!                            └──► search ──► resolve ──► geocode
//! ```
//!
//! Quick start
//! -----------
//!
//! ```no_run
//! use restodb_core::prelude::*;
//!
//! let db = RestaurantDb::load("data/restaurants.csv")?;
//! let hits = db.find_matches("McDnalds", &SearchOptions::default())?;
//! for m in &hits.matches {
//!     println!("{} ({} locations)", m.title, m.records.len());
//! }
//! # Ok::<(), restodb_core::RestoError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod analytics;
pub mod cache;
pub mod common;
pub mod error;
pub mod geocode;
pub mod loader;
pub mod model;
pub mod palette;
pub mod prelude;
pub mod resolve;
pub mod search;
pub mod settings;
pub mod text;
pub mod view;
// Shared raw input rows (used by the loader and tests)
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::analytics::CategoryReport;
pub use crate::cache::DatasetCache;
pub use crate::common::{DbStats, LoadStats};
pub use crate::error::{GeocodeError, RestoError, Result};
#[cfg(feature = "remote")]
#[cfg_attr(docsrs, doc(cfg(feature = "remote")))]
pub use crate::geocode::NominatimGeocoder;
pub use crate::geocode::{Location, ReverseGeocoder, StaticGeocoder};
pub use crate::loader::{LoadOptions, Source};
pub use crate::model::{build_restodb, Restaurant, RestaurantDb};
pub use crate::palette::{Palette, Rgba};
pub use crate::resolve::resolve;
pub use crate::search::{search, MatchResult, SearchOptions};
pub use crate::settings::Settings;
pub use crate::view::{render, MapMode, Paginator, RenderContext, View, ViewState};
