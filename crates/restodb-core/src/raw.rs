// crates/restodb-core/src/raw.rs

use serde::Deserialize;

/// Column headers every dataset must carry (case-sensitive).
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Title",
    "Category",
    "Rating",
    "Latitude",
    "Longitude",
    "Phone",
    "Address",
];

/// Raw restaurant row as it comes from the CSV.
///
/// Every cell is kept as text so a bad number never fails the whole row
/// at deserialization time; coercion happens in [`crate::model::build_restodb`].
/// Extra columns in the source are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantRaw {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Rating", default)]
    pub rating: Option<String>,
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<String>,
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<String>,
    #[serde(rename = "Phone", default)]
    pub phone: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
}

pub type RestaurantsRaw = Vec<RestaurantRaw>;
