// crates/gazetteer-core/src/gazetteer.rs

//! # Gazetteer boundary
//!
//! Per-source web clients live outside this crate and plug in through
//! [`GazetteerBackend`]. A [`Gazetteer`] pairs a table of named backends
//! with the field mapper that turns the source's raw JSON into a
//! [`PlaceDraft`]. The backend is selected once with
//! [`Gazetteer::set_backend`]; calls then go straight to it.

use crate::countries::CountryRegistry;
use crate::error::{BackendError, GazetteerError, Result};
use crate::model::{Feature, PlaceDraft};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One search hit as reported by a gazetteer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub uri: Option<String>,
    pub title: String,
    pub summary: String,
}

/// Generic search request. Backends translate it to their own parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text terms.
    pub text: Vec<String>,
    /// Named parameters (`"title"`, `"bbox"`, ...).
    pub parameters: IndexMap<String, Value>,
}

impl SearchQuery {
    pub fn text<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: terms.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

/// Hits plus an echo of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub query: SearchQuery,
}

/// Transport to one gazetteer. Errors are handed back to the caller as is.
pub trait GazetteerBackend {
    /// Raw record for `id`.
    fn get(&self, id: &str) -> std::result::Result<Value, BackendError>;

    fn search(&self, query: &SearchQuery) -> std::result::Result<SearchResults, BackendError>;
}

/// Maps a source record to the shared draft shape.
pub type FieldMapper = fn(id: &str, raw: &Value) -> Result<PlaceDraft>;

/// Reads the raw record as a draft, using `id` when the record has none.
pub fn default_mapper(id: &str, raw: &Value) -> Result<PlaceDraft> {
    let mut draft = PlaceDraft::from_value(raw)?;
    if draft.id.is_none() {
        draft.id = Some(id.to_string());
    }
    Ok(draft)
}

pub struct Gazetteer {
    name: String,
    description: String,
    backends: IndexMap<String, Box<dyn GazetteerBackend>>,
    current: Option<String>,
    mapper: FieldMapper,
}

impl Gazetteer {
    pub fn new(name: impl Into<String>, mapper: FieldMapper) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            backends: IndexMap::new(),
            current: None,
            mapper,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Register (or replace) a named backend.
    pub fn configure_backend(&mut self, name: impl Into<String>, backend: impl GazetteerBackend + 'static) {
        self.backends.insert(name.into(), Box::new(backend));
    }

    /// Select the backend used by [`get`](Self::get) and [`search`](Self::search).
    pub fn set_backend(&mut self, name: &str) -> Result<()> {
        if !self.backends.contains_key(name) {
            let available: Vec<&str> = self.backends.keys().map(String::as_str).collect();
            return Err(GazetteerError::NotFound(format!(
                "Unsupported backend: {name}. Available: {}",
                available.join(", ")
            )));
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Name of the selected backend.
    pub fn backend(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn backends(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }

    fn current_backend(&self) -> Result<&dyn GazetteerBackend> {
        self.current
            .as_deref()
            .and_then(|name| self.backends.get(name))
            .map(|b| b.as_ref())
            .ok_or_else(|| GazetteerError::NotFound(format!("no backend selected for {}", self.name)))
    }

    /// Fetch a record and build its [`Feature`].
    pub fn get(&self, id: &str, registry: &CountryRegistry) -> Result<Feature> {
        let raw = self.current_backend()?.get(id).map_err(GazetteerError::Backend)?;
        let draft = (self.mapper)(id, &raw)?;
        Feature::from_draft(draft, registry)
    }

    pub fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        self.current_backend()?
            .search(query)
            .map_err(GazetteerError::Backend)
    }
}

impl std::fmt::Debug for Gazetteer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gazetteer")
            .field("name", &self.name)
            .field("backends", &self.backends.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .finish()
    }
}

/// Gazetteers by name.
#[derive(Debug, Default)]
pub struct Gazetteers {
    gazetteers: IndexMap<String, Gazetteer>,
}

impl Gazetteers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, gazetteer: Gazetteer) {
        self.gazetteers.insert(gazetteer.name.clone(), gazetteer);
    }

    pub fn get(&self, name: &str) -> Result<&Gazetteer> {
        self.gazetteers.get(name).ok_or_else(|| self.unknown(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Gazetteer> {
        if !self.gazetteers.contains_key(name) {
            return Err(self.unknown(name));
        }
        self.gazetteers
            .get_mut(name)
            .ok_or_else(|| GazetteerError::NotFound(name.to_string()))
    }

    fn unknown(&self, name: &str) -> GazetteerError {
        GazetteerError::NotFound(format!(
            "Could not invoke gazetteer named '{name}'. Expected one of: {}",
            self.names().join(", ")
        ))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.gazetteers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// `(name, description)` pairs, sorted by name.
    pub fn supported(&self) -> Vec<(&str, &str)> {
        self.names()
            .into_iter()
            .filter_map(|n| self.gazetteers.get(n).map(|g| (n, g.description())))
            .collect()
    }
}
