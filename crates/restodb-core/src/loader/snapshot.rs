// crates/restodb-core/src/loader/snapshot.rs

//! Binary snapshots of a normalized dataset.
//!
//! A snapshot is only an accelerator: the caller decides when one is
//! trustworthy (see [`snapshot_is_fresh`]) and falls back to the real
//! source otherwise.

use crate::error::{RestoError, Result};
use crate::model::RestaurantDb;
use bincode::Options;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

#[cfg(not(feature = "compact"))]
pub const SNAPSHOT_SUFFIX: &str = "snap.bin";
#[cfg(feature = "compact")]
pub const SNAPSHOT_SUFFIX: &str = "snap.bin.gz";

/// Upper bound on snapshot payloads; guards against corrupt length prefixes.
const SNAPSHOT_LIMIT: u64 = 512 * 1024 * 1024;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(SNAPSHOT_LIMIT)
        .allow_trailing_bytes()
}

impl RestaurantDb {
    /// Writes the dataset to `path` (gzip-compressed with `compact`).
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        #[cfg(feature = "compact")]
        {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            options().serialize_into(&mut encoder, self)?;
            writer = encoder.finish()?;
        }
        #[cfg(not(feature = "compact"))]
        options().serialize_into(&mut writer, self)?;

        writer.flush()?;
        tracing::debug!(path = %path.display(), records = self.len(), "snapshot written");
        Ok(())
    }

    /// Reads a dataset written by [`RestaurantDb::save_snapshot`].
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            RestoError::NotFound(format!("Snapshot not found at {}: {}", path.display(), e))
        })?;
        let reader = BufReader::new(file);

        #[cfg(feature = "compact")]
        let mut decoder: Box<dyn Read> = Box::new(GzDecoder::new(reader));
        #[cfg(not(feature = "compact"))]
        let mut decoder: Box<dyn Read> = Box::new(reader);

        let db: RestaurantDb = options().deserialize_from(&mut decoder)?;
        tracing::debug!(path = %path.display(), records = db.len(), "snapshot loaded");
        Ok(db)
    }
}

/// `true` when `snapshot` exists and is at least as new as the local `source`.
///
/// Remote sources have no modification time we can trust, so they are never
/// considered fresh.
pub fn snapshot_is_fresh(source: &str, snapshot: &Path) -> bool {
    let parsed = super::Source::parse(source);
    let Some(source_path) = parsed.local_path() else {
        return false;
    };
    let snap_time = match fs::metadata(snapshot).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    match fs::metadata(source_path).and_then(|m| m.modified()) {
        Ok(source_time) => source_time <= snap_time,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_restodb;

    #[test]
    fn local_snapshot_written_after_source_is_fresh() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("restaurants.csv");
        fs::write(&source, "Title,Category,Rating,Latitude,Longitude,Phone,Address\n").unwrap();
        let snap = dir.path().join("restaurants.snap");

        let source_uri = format!("file://{}", source.display());
        assert!(!snapshot_is_fresh(&source_uri, &snap));

        build_restodb(Vec::new()).save_snapshot(&snap).unwrap();
        assert!(snapshot_is_fresh(&source_uri, &snap));
        assert!(snapshot_is_fresh(source.to_str().unwrap(), &snap));
        assert!(!snapshot_is_fresh("http://example.com/restaurants.csv", &snap));
    }

    #[test]
    fn round_trip_keeps_stats() {
        let dir = tempfile::TempDir::new().unwrap();
        let snap = dir.path().join("empty.snap");
        let db = build_restodb(Vec::new());
        db.save_snapshot(&snap).unwrap();
        assert_eq!(RestaurantDb::load_snapshot(&snap).unwrap(), db);
    }
}
