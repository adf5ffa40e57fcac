// crates/restodb-core/src/geocode.rs

//! Reverse geocoding: coordinates to an approximate "state, country" label.

use crate::error::GeocodeError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// Approximate location of a coordinate. Either half may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub state: Option<String>,
    pub country: Option<String>,
}

impl Location {
    pub fn new(state: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            country: Some(country.into()),
        }
    }

    pub fn state(&self) -> &str {
        self.state.as_deref().unwrap_or("Unknown")
    }

    pub fn country(&self) -> &str {
        self.country.as_deref().unwrap_or("Unknown")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.state(), self.country())
    }
}

/// Anything that can turn a coordinate into a [`Location`].
pub trait ReverseGeocoder {
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Location, GeocodeError>;
}

impl<G: ReverseGeocoder + ?Sized> ReverseGeocoder for &G {
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Location, GeocodeError> {
        (**self).reverse(latitude, longitude)
    }
}

impl<G: ReverseGeocoder + ?Sized> ReverseGeocoder for Box<G> {
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Location, GeocodeError> {
        (**self).reverse(latitude, longitude)
    }
}

/// Geocoder with a canned answer, for tests and offline runs.
#[derive(Debug, Clone)]
pub struct StaticGeocoder {
    answer: Option<Location>,
}

impl StaticGeocoder {
    pub fn answering(location: Location) -> Self {
        Self {
            answer: Some(location),
        }
    }

    /// Always fails with [`GeocodeError::NoResult`].
    pub fn unavailable() -> Self {
        Self { answer: None }
    }
}

impl ReverseGeocoder for StaticGeocoder {
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Location, GeocodeError> {
        self.answer.clone().ok_or(GeocodeError::NoResult {
            lat: latitude,
            lon: longitude,
        })
    }
}

/// The subset of a Nominatim `jsonv2` reverse response we read.
#[cfg_attr(not(feature = "remote"), allow(dead_code))]
#[derive(Debug, Default, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    state: Option<String>,
    province: Option<String>,
    region: Option<String>,
    county: Option<String>,
    country: Option<String>,
}

/// Extracts a [`Location`] from a Nominatim reverse response body.
#[cfg_attr(not(feature = "remote"), allow(dead_code))]
fn parse_nominatim(body: &str, lat: f64, lon: f64) -> Result<Location, GeocodeError> {
    let resp: NominatimResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Decode(e.to_string()))?;
    if let Some(err) = resp.error {
        tracing::debug!(lat, lon, error = %err, "nominatim reported no result");
        return Err(GeocodeError::NoResult { lat, lon });
    }
    let addr = resp.address.ok_or(GeocodeError::NoResult { lat, lon })?;
    let location = Location {
        state: addr.state.or(addr.province).or(addr.region).or(addr.county),
        country: addr.country,
    };
    if location.state.is_none() && location.country.is_none() {
        return Err(GeocodeError::NoResult { lat, lon });
    }
    Ok(location)
}

#[cfg(feature = "remote")]
pub use nominatim::NominatimGeocoder;

#[cfg(feature = "remote")]
mod nominatim {
    use super::{parse_nominatim, Location, ReverseGeocoder};
    use crate::error::GeocodeError;
    use std::time::Duration;

    /// Blocking client for a Nominatim-compatible `/reverse` endpoint.
    #[derive(Debug, Clone)]
    pub struct NominatimGeocoder {
        client: reqwest::blocking::Client,
        endpoint: String,
    }

    impl NominatimGeocoder {
        /// Nominatim's usage policy requires an identifying `user_agent`.
        pub fn new(
            endpoint: &str,
            user_agent: &str,
            timeout: Duration,
        ) -> Result<Self, GeocodeError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .user_agent(user_agent)
                .build()
                .map_err(|e| GeocodeError::Transport(e.to_string()))?;
            Ok(Self {
                client,
                endpoint: endpoint.trim_end_matches('/').to_string(),
            })
        }
    }

    impl ReverseGeocoder for NominatimGeocoder {
        fn reverse(&self, latitude: f64, longitude: f64) -> Result<Location, GeocodeError> {
            let url = format!("{}/reverse", self.endpoint);
            let lat = latitude.to_string();
            let lon = longitude.to_string();
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("format", "jsonv2"),
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("zoom", "10"),
                    ("addressdetails", "1"),
                ])
                .send()
                .map_err(|e| GeocodeError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(GeocodeError::Status(status.as_u16()));
            }
            let body = response
                .text()
                .map_err(|e| GeocodeError::Transport(e.to_string()))?;
            let location = parse_nominatim(&body, latitude, longitude)?;
            tracing::debug!(latitude, longitude, %location, "reverse geocoded");
            Ok(location)
        }
    }
}
