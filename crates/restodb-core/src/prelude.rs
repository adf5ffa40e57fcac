//! restodb prelude: bring common types and traits into scope for demos.

#![allow(unused_imports)]

pub use crate::analytics::CategoryReport;
pub use crate::cache::DatasetCache;
pub use crate::common::{DbStats, LoadStats};
pub use crate::error::{GeocodeError, RestoError, Result};
pub use crate::geocode::{Location, ReverseGeocoder, StaticGeocoder};
#[cfg(feature = "remote")]
pub use crate::geocode::NominatimGeocoder;
pub use crate::loader::{LoadOptions, Source};
pub use crate::model::{Restaurant, RestaurantDb};
pub use crate::palette::{Palette, Rgba};
pub use crate::resolve::resolve;
pub use crate::search::{search, MatchResult, SearchOptions, TitleMatch};
pub use crate::settings::Settings;
pub use crate::text::{equals_folded, fold_key};
pub use crate::view::{render, MapMode, Paginator, RenderContext, View, ViewState};
