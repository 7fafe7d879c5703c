// crates/gazetteer-core/src/loader/common_io.rs
use crate::error::{GazetteerError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl CompressionMode {
    /// Gzip when the `compact` feature is on.
    pub fn preferred() -> Self {
        #[cfg(feature = "compact")]
        {
            CompressionMode::Gzip
        }
        #[cfg(not(feature = "compact"))]
        {
            CompressionMode::None
        }
    }

    /// Gzip for `*.gz` paths.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => CompressionMode::Gzip,
            _ => CompressionMode::None,
        }
    }
}

/// Opens a file, buffers it, and wraps it in a gzip decoder when asked.
pub fn open_stream(path: &Path, compression: CompressionMode) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GazetteerError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot open {}: {e}", path.display()),
        ))
    })?;
    let reader = BufReader::new(file);

    match compression {
        CompressionMode::None => Ok(Box::new(reader)),
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                Ok(Box::new(GzDecoder::new(reader)))
            }
            #[cfg(not(feature = "compact"))]
            {
                Err(GazetteerError::InvalidData(format!(
                    "{} is gzipped but 'compact' is disabled",
                    path.display()
                )))
            }
        }
    }
}

/// Creates a file, buffers it, and wraps it in a gzip encoder when asked.
pub fn create_stream(path: &Path, compression: CompressionMode) -> Result<Box<dyn Write>> {
    let writer = BufWriter::new(File::create(path)?);
    match compression {
        CompressionMode::None => Ok(Box::new(writer)),
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                Ok(Box::new(GzEncoder::new(writer, Compression::default())))
            }
            #[cfg(not(feature = "compact"))]
            {
                Err(GazetteerError::InvalidData(
                    "Gzip requested but 'compact' disabled".into(),
                ))
            }
        }
    }
}

/// `<dir>/<file name>.<suffix>`
pub fn get_cache_path(source: &Path, suffix: &str) -> PathBuf {
    let filename = source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{filename}.{suffix}"))
}

/// True when `cache` exists and is not older than `source`.
pub fn is_cache_fresh(source: &Path, cache: &Path) -> bool {
    let cache_time = match fs::metadata(cache).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    match fs::metadata(source).and_then(|m| m.modified()) {
        Ok(source_time) => source_time <= cache_time,
        Err(_) => true,
    }
}
