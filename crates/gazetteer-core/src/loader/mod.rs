// crates/gazetteer-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (I/O, decompression, the binary cache) for
//! the country table and hands the parsed rows to
//! [`CountryRegistry::from_rows`].

use crate::countries::CountryRegistry;
use crate::error::Result;
use crate::raw::CountryRaw;
use std::path::{Path, PathBuf};

pub mod common_io;

#[cfg(feature = "cache")]
mod cache;

use common_io::CompressionMode;

/// Suffix appended to the table's file name for the bincode cache.
pub const CACHE_SUFFIX: &str = "registry.bin";

impl CountryRegistry {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "country-codes.json"
    }

    /// Load the bundled table.
    pub fn load_default() -> Result<Self> {
        Self::load_from_path(Self::default_data_dir().join(Self::default_dataset_filename()))
    }

    /// Parse a country table (`.json` or `.json.gz`).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path, CompressionMode::for_path(path))?;
        let rows: Vec<CountryRaw> = serde_json::from_reader(reader)?;
        let registry = Self::from_rows(rows)?;
        log::debug!(
            "loaded {} countries ({} aliases) from {}",
            registry.len(),
            registry.alias_count(),
            path.display()
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_table_loads() {
        let registry = CountryRegistry::load_default().unwrap();
        assert!(registry.len() > 50);
        assert_eq!(registry.resolve("GB").unwrap(), "GB");
        assert_eq!(
            registry.name_for("GB"),
            Some("United Kingdom of Great Britain and Northern Ireland")
        );
    }

    #[test]
    fn malformed_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"{\"not\": \"a list\"}")
            .unwrap();
        assert!(CountryRegistry::load_from_path(&path).is_err());
        assert!(CountryRegistry::load_from_path(dir.path().join("missing.json")).is_err());
    }
}
