// crates/gazetteer-core/src/loader/cache.rs
use super::common_io::{self, CompressionMode};
use super::CACHE_SUFFIX;
use crate::countries::CountryRegistry;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

impl CountryRegistry {
    /// **Smart Load:** uses the bincode cache beside the table when it is
    /// fresh, otherwise parses the table and rewrites the cache.
    ///
    /// Cache write failures are ignored.
    pub fn load_cached(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let cache_path = common_io::get_cache_path(path, CACHE_SUFFIX);

        if common_io::is_cache_fresh(path, &cache_path) {
            match read_generic::<Self>(&cache_path) {
                Ok(registry) => return Ok(registry),
                Err(e) => log::debug!("ignoring cache {}: {e}", cache_path.display()),
            }
        }

        let registry = Self::load_from_path(path)?;
        if let Err(e) = write_generic(&cache_path, &registry, CompressionMode::preferred()) {
            log::debug!("could not write cache {}: {e}", cache_path.display());
        }
        Ok(registry)
    }
}

/// Writes any serializable value to disk as bincode.
pub(crate) fn write_generic<T: Serialize>(
    path: &Path,
    value: &T,
    compression: CompressionMode,
) -> Result<()> {
    let mut encoder = common_io::create_stream(path, compression)?;
    bincode::serialize_into(&mut encoder, value)?;
    encoder.flush()?;
    Ok(())
}

fn read_generic<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = common_io::open_stream(path, CompressionMode::preferred())?;
    Ok(bincode::deserialize_from(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_is_written_and_reused() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("countries.json");
        std::fs::write(
            &source,
            r#"[{"ISO3166-1-Alpha-2": "ES", "ISO3166-1-Alpha-3": "ESP", "official_name_en": "Spain"}]"#,
        )
        .unwrap();

        let first = CountryRegistry::load_cached(&source).unwrap();
        let cache = common_io::get_cache_path(&source, CACHE_SUFFIX);
        assert!(cache.exists());

        let second = CountryRegistry::load_cached(&source).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.resolve("ESP").unwrap(), "ES");
    }

    #[test]
    fn corrupt_cache_falls_back_to_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("countries.json");
        std::fs::write(&source, r#"[{"ISO3166-1-Alpha-2": "MX", "CLDR display name": "Mexico"}]"#)
            .unwrap();
        let cache = common_io::get_cache_path(&source, CACHE_SUFFIX);
        std::fs::write(&cache, b"garbage").unwrap();

        let registry = CountryRegistry::load_cached(&source).unwrap();
        assert_eq!(registry.resolve("Mexico").unwrap(), "MX");
    }
}
