// crates/gazetteer-core/src/error.rs
use thiserror::Error;

/// Boxed error handed back by gazetteer adapters.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong inside `gazetteer-core`.
///
/// Validation variants are raised at assignment time (constructors and
/// setters); once an entity exists its invariants hold. Lookups that find
/// nothing return empty collections, not [`GazetteerError::NotFound`].
#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("Invalid language tag '{tag}': {}", .issues.join("; "))]
    InvalidLanguageTag { tag: String, issues: Vec<String> },

    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    #[error("Invalid ccode='{0}'")]
    InvalidCountryCode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected type: {0}")]
    UnexpectedType(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "cache")]
    #[error("Cache error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error(transparent)]
    Backend(BackendError),
}

impl GazetteerError {
    /// True for the validation family (tag, URI, country code).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidLanguageTag { .. } | Self::InvalidUri(_) | Self::InvalidCountryCode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GazetteerError>;
