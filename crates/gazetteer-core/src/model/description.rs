// crates/gazetteer-core/src/model/description.rs
use super::collection::IndexedCollection;
use super::feature::validate_uri;
use crate::error::{GazetteerError, Result};
use crate::language::LanguageTag;
use crate::serialization::{field, impl_to_value_via_mapping, Field, Serialization, Transform};
use crate::text::{normalize_opt, slugify};
use crate::traits::{Keyed, LanguageAware};
use indexmap::IndexSet;
use serde::Deserialize;
use serde_json::Value;

/// A descriptive blurb with optional attribution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Description {
    value: String,
    source: Option<String>,
    language: LanguageTag,
}

impl Description {
    pub fn new(value: &str) -> Self {
        let mut d = Self::default();
        d.set_value(value);
        d
    }

    pub fn from_record(record: DescriptionRecord) -> Result<Self> {
        let mut d = Self::new(record.value.as_deref().unwrap_or_default());
        if let Some(source) = &record.source {
            d.set_source(source)?;
        }
        if let Some(tag) = record.language_tag.as_deref().filter(|t| !t.trim().is_empty()) {
            d.set_language_tag(tag.trim())?;
        }
        Ok(d)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Blank input leaves the current value in place.
    pub fn set_value(&mut self, value: &str) {
        if let Some(v) = normalize_opt(value) {
            self.value = v;
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// A source carrying an `http`/`https` scheme must be a well-formed URL.
    /// Blank input leaves the current source in place.
    pub fn set_source(&mut self, source: &str) -> Result<()> {
        if normalize_opt(source).is_some() {
            self.source = Some(validate_uri(source)?);
        }
        Ok(())
    }

    pub fn clear_source(&mut self) {
        self.source = None;
    }

    /// Unique word slugs of the value, in order of appearance.
    pub fn words(&self) -> IndexSet<String> {
        self.value
            .split_whitespace()
            .map(slugify)
            .filter(|w| !w.is_empty())
            .collect()
    }
}

impl LanguageAware for Description {
    fn language(&self) -> &LanguageTag {
        &self.language
    }

    fn language_mut(&mut self) -> &mut LanguageTag {
        &mut self.language
    }
}

impl Keyed for Description {
    /// Hex BLAKE3 digest of the value.
    fn make_key(&self) -> String {
        blake3::hash(self.value.as_bytes()).to_hex().to_string()
    }

    fn index_terms(&self) -> Vec<String> {
        self.words().into_iter().collect()
    }
}

impl Serialization for Description {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            field("value", &self.value),
            field("source", &self.source),
            field("language_tag", &self.language),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DescriptionRecord {
    pub value: Option<String>,
    pub source: Option<String>,
    #[serde(alias = "language")]
    pub language_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DescriptionInput {
    #[serde(skip_deserializing)]
    Description(Description),
    Text(String),
    Record(DescriptionRecord),
}

impl DescriptionInput {
    pub fn into_description(self) -> Result<Description> {
        match self {
            DescriptionInput::Description(d) => Ok(d),
            DescriptionInput::Text(text) => Ok(Description::new(&text)),
            DescriptionInput::Record(record) => Description::from_record(record),
        }
    }
}

impl From<Description> for DescriptionInput {
    fn from(d: Description) -> Self {
        DescriptionInput::Description(d)
    }
}

impl From<DescriptionRecord> for DescriptionInput {
    fn from(record: DescriptionRecord) -> Self {
        DescriptionInput::Record(record)
    }
}

impl From<&str> for DescriptionInput {
    fn from(text: &str) -> Self {
        DescriptionInput::Text(text.to_string())
    }
}

impl From<String> for DescriptionInput {
    fn from(text: String) -> Self {
        DescriptionInput::Text(text)
    }
}

impl TryFrom<&Value> for DescriptionInput {
    type Error = GazetteerError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(DescriptionInput::Text(s.clone())),
            Value::Object(_) => Ok(DescriptionInput::Record(serde_json::from_value(value.clone())?)),
            other => Err(GazetteerError::UnexpectedType(format!(
                "cannot build a description from {other}"
            ))),
        }
    }
}

/// De-duplicating set of [`Description`]s indexed by word slug.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptionCollection {
    descriptions: IndexedCollection<Description>,
}

impl DescriptionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_description(&mut self, value: impl Into<DescriptionInput>) -> Result<String> {
        let d = value.into().into_description()?;
        if d.value.is_empty() {
            return Err(GazetteerError::InvalidData("a description needs a value".into()));
        }
        Ok(self.descriptions.insert(d))
    }

    /// Add a description given as raw JSON (string or object).
    pub fn add_value(&mut self, value: &Value) -> Result<String> {
        self.add_description(DescriptionInput::try_from(value)?)
    }

    pub fn remove_description(&mut self, description: &Description) -> Result<Description> {
        let key = self
            .descriptions
            .find_key(|held| held == description)
            .map(str::to_string)
            .ok_or_else(|| {
                GazetteerError::NotFound(format!("description key '{}'", description.make_key()))
            })?;
        self.descriptions
            .remove_key(&key)
            .ok_or_else(|| GazetteerError::NotFound(format!("description key '{key}'")))
    }

    /// Descriptions containing the word `s` (compared by slug).
    pub fn get_descriptions(&self, s: &str) -> Vec<&Description> {
        self.descriptions
            .lookup(&slugify(s))
            .map(|keys| self.descriptions.select(keys))
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Description> {
        self.descriptions.get(key)
    }

    pub fn description_strings(&self) -> Vec<&str> {
        self.descriptions.values().map(Description::value).collect()
    }

    pub fn first(&self) -> Option<&Description> {
        self.descriptions.values().next()
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Description> {
        self.descriptions.values()
    }
}

impl Serialization for DescriptionCollection {
    fn fields(&self) -> Vec<Field<'_>> {
        let mut fields: Vec<Field<'_>> = self
            .descriptions
            .iter()
            .map(|(key, d)| field(key, d))
            .collect();
        fields.push(field("index", self.descriptions.index()));
        fields
    }

    fn omit(&self) -> &'static [&'static str] {
        &["index"]
    }

    fn transform(&self) -> Transform {
        Transform::RefactorToList
    }
}

impl_to_value_via_mapping!(Description, DescriptionCollection);
