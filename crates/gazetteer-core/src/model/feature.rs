// crates/gazetteer-core/src/model/feature.rs

//! # Feature
//!
//! The aggregate place record. A [`Feature`] owns its [`Properties`],
//! [`NameCollection`], [`DescriptionCollection`] and [`FeatureGeometry`],
//! and is built from a [`PlaceDraft`] or from an LPF feature mapping.

use super::description::DescriptionCollection;
use super::draft::PlaceDraft;
use super::geometry::FeatureGeometry;
use super::name::NameCollection;
use super::properties::Properties;
use crate::countries::CountryRegistry;
use crate::error::{GazetteerError, Result};
use crate::serialization::{field, impl_to_value_via_mapping, Field, Serialization};
use crate::text::{normalize, normalize_opt};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use url::Url;
use uuid::Uuid;

const FEATURE_TYPE: &str = "Feature";

static URI_SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("scheme pattern is static")
});

/// Normalize and validate a URI.
///
/// `http`/`https` URIs must be well-formed URLs with a host. Other schemes
/// and scheme-less references are accepted as they are.
pub fn validate_uri(value: &str) -> Result<String> {
    let v = normalize(value);
    let scheme = URI_SCHEME
        .captures(&v)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_lowercase());
    if matches!(scheme.as_deref(), Some("http" | "https")) {
        let well_formed = !v.contains(char::is_whitespace)
            && Url::parse(&v)
                .ok()
                .is_some_and(|url| url.host_str().is_some_and(|h| !h.is_empty()));
        if !well_formed {
            return Err(GazetteerError::InvalidUri(v));
        }
    }
    Ok(v)
}

/// A single field update, see [`Feature::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Id(String),
    Title(String),
    Uri(String),
}

/// A place record in Linked Places Format.
///
/// # Examples
///
/// ```rust
/// use gazetteer_core::{CountryRegistry, Feature, PlaceDraft, Serialization};
///
/// let registry = CountryRegistry::load_default().unwrap();
/// let draft = PlaceDraft {
///     id: Some("295374".into()),
///     uri: Some("https://pleiades.stoa.org/places/295374".into()),
///     title: Some("Zucchabar".into()),
///     ccodes: Some(vec!["DZA".into()]),
///     names: vec!["Zucchabar".into(), "Miliana".into()],
///     ..PlaceDraft::default()
/// };
/// let feature = Feature::from_draft(draft, &registry).unwrap();
///
/// assert_eq!(feature.properties().ccodes().first().map(String::as_str), Some("DZ"));
/// assert_eq!(feature.to_string(), "Feature(Zucchabar: <https://pleiades.stoa.org/places/295374>)");
/// assert_eq!(feature.to_mapping().unwrap()["geometry"], serde_json::json!([]));
/// ```
#[derive(Debug)]
pub struct Feature {
    id: Option<String>,
    internal_id: String,
    uri: Option<String>,
    properties: Properties,
    names: NameCollection,
    descriptions: DescriptionCollection,
    geometry: FeatureGeometry,
}

impl Default for Feature {
    fn default() -> Self {
        Self::new()
    }
}

impl Feature {
    /// An empty feature with a fresh internal id.
    pub fn new() -> Self {
        Self {
            id: None,
            internal_id: Uuid::new_v4().simple().to_string(),
            uri: None,
            properties: Properties::new(),
            names: NameCollection::new(),
            descriptions: DescriptionCollection::new(),
            geometry: FeatureGeometry::Empty,
        }
    }

    /// Build from an adapter draft, validating every field.
    pub fn from_draft(draft: PlaceDraft, registry: &CountryRegistry) -> Result<Self> {
        log::debug!("{draft:#?}");
        let mut feature = Self::new();

        if let Some(id) = &draft.id {
            feature.set_id(id);
        }
        if let Some(uri) = draft.effective_uri() {
            feature.set_uri(uri)?;
        }
        if let Some(title) = draft.effective_title() {
            feature.properties.set_title(title);
        }
        if let Some(ccodes) = draft.effective_ccodes() {
            feature.properties.set_ccodes(ccodes, registry)?;
        }

        feature.geometry = match (&draft.geometries, &draft.geometry) {
            (Some(many), _) => FeatureGeometry::from_geojson_list(many)?,
            (None, Some(one)) => FeatureGeometry::from_geojson(one)?,
            (None, None) => FeatureGeometry::Empty,
        };

        for name in draft.names {
            feature.names.add_name(name)?;
        }
        for description in draft.descriptions {
            feature.descriptions.add_description(description)?;
        }
        Ok(feature)
    }

    /// Rebuild from an LPF feature mapping as written by
    /// [`Serialization::to_mapping`]. The internal id is fresh.
    pub fn from_mapping(value: &Value, registry: &CountryRegistry) -> Result<Self> {
        match value.get("type").and_then(Value::as_str) {
            None | Some(FEATURE_TYPE) => {}
            Some(other) => {
                return Err(GazetteerError::InvalidData(format!(
                    "expected a Feature, got type '{other}'"
                )))
            }
        }
        Self::from_draft(PlaceDraft::from_value(value)?, registry)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Normalizes the value; blank input clears the id.
    pub fn set_id(&mut self, value: &str) {
        self.id = normalize_opt(value);
    }

    /// Process-unique id, never serialized.
    pub fn internal_id(&self) -> &str {
        &self.internal_id
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Validates before assigning. Blank input leaves the URI unchanged.
    pub fn set_uri(&mut self, value: &str) -> Result<()> {
        let v = validate_uri(value)?;
        if !v.is_empty() {
            self.uri = Some(v);
        }
        Ok(())
    }

    pub fn clear_uri(&mut self) {
        self.uri = None;
    }

    pub fn title(&self) -> &str {
        self.properties.title()
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn names(&self) -> &NameCollection {
        &self.names
    }

    pub fn names_mut(&mut self) -> &mut NameCollection {
        &mut self.names
    }

    pub fn descriptions(&self) -> &DescriptionCollection {
        &self.descriptions
    }

    pub fn descriptions_mut(&mut self) -> &mut DescriptionCollection {
        &mut self.descriptions
    }

    pub fn geometry(&self) -> &FeatureGeometry {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: FeatureGeometry) {
        self.geometry = geometry;
    }

    pub fn apply(&mut self, change: Change) -> Result<()> {
        match change {
            Change::Id(id) => self.set_id(&id),
            Change::Title(title) => self.properties.set_title(&title),
            Change::Uri(uri) => self.set_uri(&uri)?,
        }
        Ok(())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Feature({}: <{}>)",
            self.properties.title(),
            self.uri.as_deref().unwrap_or_default()
        )
    }
}

impl Serialization for Feature {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            field("type", &FEATURE_TYPE),
            field("id", &self.id),
            field("@id", &self.uri),
            field("properties", &self.properties),
            field("names", &self.names),
            field("descriptions", &self.descriptions),
            field("geometry", &self.geometry),
            field("internal_id", &self.internal_id),
        ]
    }

    fn omit(&self) -> &'static [&'static str] {
        &["internal_id"]
    }
}

impl_to_value_via_mapping!(Feature);
