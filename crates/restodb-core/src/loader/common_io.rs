// crates/restodb-core/src/loader/common_io.rs
use crate::error::{RestoError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// Opens a local file, buffers it and unwraps gzip when the name ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        RestoError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    decompress_if_gz(Box::new(reader), &path.to_string_lossy())
}

/// Wraps `reader` in a gzip decoder when `name` ends in `.gz`.
pub fn decompress_if_gz(reader: Box<dyn Read>, name: &str) -> Result<Box<dyn Read>> {
    if !is_gz(name) {
        return Ok(reader);
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(RestoError::UnsupportedSource(format!(
            "{name}: gzip sources need the 'compact' feature"
        )))
    }
}

fn is_gz(name: &str) -> bool {
    // Ignore any query string on URLs.
    let path = name.split(['?', '#']).next().unwrap_or(name);
    path.to_ascii_lowercase().ends_with(".gz")
}

/// `data/restaurants.csv` -> `data/restaurants.csv.<suffix>`
pub fn get_cache_path(source_path: &Path, suffix: &str) -> PathBuf {
    let filename = source_path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    source_path.with_file_name(format!("{filename}.{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_gzip_by_extension() {
        assert!(is_gz("data/restaurants.csv.gz"));
        assert!(is_gz("https://host/r.CSV.GZ?token=1"));
        assert!(!is_gz("https://host/r.csv?x=.gz2"));
        assert!(!is_gz("restaurants.csv"));
    }

    #[test]
    fn cache_path_sits_next_to_source() {
        let p = get_cache_path(Path::new("/tmp/data/r.csv"), "snap.bin");
        assert_eq!(p, PathBuf::from("/tmp/data/r.csv.snap.bin"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = open_stream(Path::new("/definitely/not/here.csv")).err();
        assert!(matches!(err, Some(RestoError::NotFound(_))));
    }
}
