// crates/restodb-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (HTTP or disk, optional gzip) and hands the
//! byte stream to the CSV reader. Normalization lives in
//! [`crate::model::build_restodb`].
//!
//! Transport failures are fatal for the load and are reported as
//! [`RestoError::Http`], [`RestoError::HttpStatus`], [`RestoError::NotFound`]
//! or [`RestoError::Io`], and so is a header that lacks or repeats a required
//! column. A bad cell or an undecodable row never is: the row is dropped and
//! counted.

use crate::error::{RestoError, Result};
use crate::model::{build_restodb, RestaurantDb};
use crate::raw::{RestaurantRaw, RestaurantsRaw, REQUIRED_COLUMNS};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod common_io;
mod remote;
pub mod snapshot;

/// The Kaggle listing the dataset was originally published under.
pub const DATA_REPO_URL: &str =
    "https://www.kaggle.com/datasets/kwxdata/380k-restaurants-mostly-usa-based";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("restodb/", env!("CARGO_PKG_VERSION"));

/// Transport settings for fetching a dataset.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Where a dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Http(String),
    File(PathBuf),
}

impl Source {
    /// `http(s)://` is remote, `file://` and anything else is a local path.
    pub fn parse(uri: &str) -> Self {
        let uri = uri.trim();
        let lower = uri.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Http(uri.to_string())
        } else if let Some(path) = uri.strip_prefix("file://") {
            Source::File(PathBuf::from(path))
        } else {
            Source::File(PathBuf::from(uri))
        }
    }

    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Source::File(p) => Some(p.as_path()),
            Source::Http(_) => None,
        }
    }

    fn open(&self, opts: &LoadOptions) -> Result<Box<dyn Read>> {
        match self {
            Source::File(path) => common_io::open_stream(path),
            #[cfg(feature = "remote")]
            Source::Http(url) => {
                let body = remote::fetch(url, opts)?;
                common_io::decompress_if_gz(body, url)
            }
            #[cfg(not(feature = "remote"))]
            Source::Http(url) => {
                let _ = opts;
                Err(RestoError::UnsupportedSource(format!(
                    "{url}: http sources need the 'remote' feature"
                )))
            }
        }
    }
}

impl RestaurantDb {
    /// Load and normalize the dataset at `source` with default transport settings.
    pub fn load(source: &str) -> Result<Self> {
        Self::load_with(source, &LoadOptions::default())
    }

    /// Load and normalize the dataset at `source`.
    pub fn load_with(source: &str, opts: &LoadOptions) -> Result<Self> {
        let reader = Source::parse(source).open(opts)?;
        let db = Self::load_from_reader(reader)?;
        let stats = db.load_stats();
        tracing::info!(
            source,
            rows = stats.rows_read,
            kept = stats.kept,
            dropped_rating = stats.dropped_missing_rating,
            dropped_coordinates = stats.dropped_missing_coordinates,
            categories = db.palette().len(),
            "dataset loaded"
        );
        Ok(db)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_reader(common_io::open_stream(path.as_ref())?)
    }

    /// Parse CSV from any reader and normalize it.
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Self> {
        let (raw, unreadable) = read_csv(reader)?;
        let mut db = build_restodb(raw);
        db.load_stats.rows_read += unreadable;
        db.load_stats.dropped_unreadable = unreadable;
        Ok(db)
    }
}

/// Reads every decodable row into a [`RestaurantRaw`].
///
/// Returns the rows plus the number of rows the CSV layer could not decode
/// (bad UTF-8, unparsable record); those are skipped and counted. A header
/// that lacks or repeats a required column is fatal, as are I/O errors
/// mid-stream.
fn read_csv<R: Read>(reader: R) -> Result<(RestaurantsRaw, usize)> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    check_headers(&headers)?;

    let mut rows = Vec::new();
    let mut unreadable = 0;
    for (line, result) in rdr.deserialize::<RestaurantRaw>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                tracing::debug!(line = line + 2, error = %e, "dropping unreadable row");
                unreadable += 1;
            }
        }
    }
    Ok((rows, unreadable))
}

/// Every required column present exactly once.
fn check_headers(headers: &csv::StringRecord) -> Result<()> {
    let count = |col: &str| headers.iter().filter(|h| *h == col).count();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| count(**col) == 0)
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RestoError::MissingColumns(missing));
    }

    let repeated: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| count(**col) > 1)
        .map(|col| col.to_string())
        .collect();
    if !repeated.is_empty() {
        return Err(RestoError::DuplicateColumns(repeated));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Title,Category,Rating,Latitude,Longitude,Phone,Address,Website
Joe's,Pizza,4.5,40.71,-74.00,555-0100,1 Main St,http://joes.example
Bad Rating,Pizza,five,40.71,-74.00,,,
No Coords,Sushi,4.0,,-74.00,,,
Sakura,Sushi,3.8,40.75,-73.99,,2 Oak Ave,
";

    #[test]
    fn parses_uris() {
        assert_eq!(
            Source::parse("https://example.com/r.csv"),
            Source::Http("https://example.com/r.csv".into())
        );
        assert_eq!(
            Source::parse("file:///tmp/r.csv"),
            Source::File(PathBuf::from("/tmp/r.csv"))
        );
        assert_eq!(Source::parse("data/r.csv"), Source::File("data/r.csv".into()));
    }

    #[test]
    fn reads_and_filters_rows() {
        let db = RestaurantDb::load_from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(db.titles(), ["Joe's", "Sakura"]);
        assert_eq!(db.records()[0].phone(), "555-0100");
        assert_eq!(db.load_stats().rows_read, 4);
        assert_eq!(db.load_stats().dropped(), 2);
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = "Longitude,Latitude,Rating,Category,Title,Address,Phone\n-74,40,4,Pizza,Joe's,,\n";
        let db = RestaurantDb::load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(db.records()[0].coordinates(), (40.0, -74.0));
    }

    #[test]
    fn missing_columns_are_fatal() {
        let csv = "Title,Category,Latitude\nJoe's,Pizza,40\n";
        match RestaurantDb::load_from_reader(csv.as_bytes()) {
            Err(RestoError::MissingColumns(cols)) => {
                assert_eq!(cols, ["Rating", "Longitude", "Phone", "Address"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn header_names_are_case_sensitive() {
        let csv = "title,Category,Rating,Latitude,Longitude,Phone,Address\n";
        let err = RestaurantDb::load_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RestoError::MissingColumns(ref c) if c == &["Title"]));
    }

    #[test]
    fn repeated_required_column_is_fatal() {
        let csv = "Title,Category,Rating,Latitude,Longitude,Phone,Address,Title\nA,P,4,1,2,,,B\n";
        match RestaurantDb::load_from_reader(csv.as_bytes()) {
            Err(RestoError::DuplicateColumns(cols)) => assert_eq!(cols, ["Title"]),
            other => panic!("expected DuplicateColumns, got {other:?}"),
        }
    }

    #[test]
    fn repeated_extra_column_is_fine() {
        let csv = "Title,Category,Rating,Latitude,Longitude,Phone,Address,Notes,Notes\nA,P,4,1,2,,,x,y\n";
        let db = RestaurantDb::load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(db.titles(), ["A"]);
    }

    #[test]
    fn undecodable_rows_are_counted_on_their_own() {
        let mut csv = b"Title,Category,Rating,Latitude,Longitude,Phone,Address\n".to_vec();
        csv.extend_from_slice(b"Joe's,Pizza,4,1,2,,\n");
        csv.extend_from_slice(b"\xff\xfe,Pizza,4,1,2,,\n");
        let db = RestaurantDb::load_from_reader(csv.as_slice()).unwrap();

        assert_eq!(db.titles(), ["Joe's"]);
        let stats = db.load_stats();
        assert_eq!(stats.rows_read, 2);
        assert_eq!(stats.dropped_unreadable, 1);
        assert_eq!(stats.dropped_missing_rating, 0);
        assert_eq!(stats.dropped(), 1);
    }

    #[test]
    fn short_rows_are_dropped_not_fatal() {
        let csv = "Title,Category,Rating,Latitude,Longitude,Phone,Address\nJoe's,Pizza\nSakura,Sushi,4,1,2,,\n";
        let db = RestaurantDb::load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(db.titles(), ["Sakura"]);
        assert_eq!(db.load_stats().rows_read, 2);
    }
}
