// crates/restodb-core/src/settings.rs

//! Runtime settings.
//!
//! Built-in defaults are layered with an optional TOML file and `RESTODB_*`
//! environment variables (`RESTODB_SEARCH__MIN_SIMILARITY=0.7`). Command-line
//! flags are applied on top by the binary.

use crate::error::Result;
use crate::geocode::DEFAULT_NOMINATIM_ENDPOINT;
use crate::loader::{LoadOptions, DEFAULT_USER_AGENT};
use crate::search::SearchOptions;
use crate::view::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_SETTINGS: &str = r#"
[dataset]
source    = "data/restaurants.csv"
page_size = 1000

[search]
limit          = 5
min_similarity = 0.6
fold           = false

[http]
timeout_secs = 30

[geocoder]
enabled  = true
endpoint = "https://nominatim.openstreetmap.org"
"#;

pub const ENV_PREFIX: &str = "RESTODB";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
}

/// `[dataset]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Optional binary snapshot path, reused while fresher than the source.
    #[serde(default)]
    pub snapshot: Option<String>,
}

fn default_source() -> String {
    "data/restaurants.csv".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            source: default_source(),
            page_size: default_page_size(),
            snapshot: None,
        }
    }
}

/// `[search]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
    #[serde(default)]
    pub fold: bool,
}

fn default_limit() -> usize {
    crate::search::DEFAULT_LIMIT
}

fn default_min_similarity() -> f64 {
    crate::search::DEFAULT_MIN_SIMILARITY
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            min_similarity: default_min_similarity(),
            fold: false,
        }
    }
}

/// `[http]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// `[geocoder]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_NOMINATIM_ENDPOINT.to_string()
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset: DatasetSettings::default(),
            search: SearchSettings::default(),
            http: HttpSettings::default(),
            geocoder: GeocoderSettings::default(),
        }
    }
}

impl Settings {
    /// Defaults, then `file` (if given, must exist), then the environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml));
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            timeout: self.timeout(),
            user_agent: self.http.user_agent.clone(),
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            limit: self.search.limit,
            min_similarity: self.search.min_similarity,
            fold: self.search.fold,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embedded_defaults_match_struct_defaults() {
        let parsed: Settings = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[search]\nmin_similarity = 0.8\n\n[dataset]\npage_size = 250").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.search.min_similarity, 0.8);
        assert_eq!(settings.search.limit, 5);
        assert_eq!(settings.dataset.page_size, 250);
        assert_eq!(settings.search_options().min_similarity, 0.8);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/no/such/restodb.toml"))).is_err());
    }
}
