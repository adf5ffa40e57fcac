// crates/restodb-core/src/error.rs

//! Error types.
//!
//! [`RestoError`] covers everything that aborts the current request (the
//! dataset cannot be fetched, the CSV lacks required columns, an argument is
//! out of range). Per-cell parse failures never show up here: the offending
//! row is dropped and counted in [`LoadStats`](crate::LoadStats).
//!
//! [`GeocodeError`] is kept separate because a failed reverse lookup is
//! recoverable: the search flow renders "location unknown" and carries on.

use thiserror::Error;

/// Fatal errors for a load or a view request.
#[derive(Debug, Error)]
pub enum RestoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Dataset repeats required columns: {}", .0.join(", "))]
    DuplicateColumns(Vec<String>),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),
}

/// Recoverable reverse-geocoding failures ("location unknown").
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Transport(String),

    #[error("geocoder returned HTTP {0}")]
    Status(u16),

    #[error("no location found for ({lat}, {lon})")]
    NoResult { lat: f64, lon: f64 },

    #[error("no records titled {0:?}")]
    NoRecords(String),

    #[error("could not decode geocoder response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, RestoError>;
