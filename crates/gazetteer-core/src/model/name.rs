// crates/gazetteer-core/src/model/name.rs

//! # Names
//!
//! A [`Name`] is one attested or romanized form of a place name. A
//! [`NameCollection`] de-duplicates names by slug key and indexes every
//! toponym and romanization for lookup.

use super::collection::IndexedCollection;
use crate::error::{GazetteerError, Result};
use crate::language::LanguageTag;
use crate::romanize::{romanize, Romanizers};
use crate::serialization::{field, impl_to_value_via_mapping, Field, Serialization, Transform};
use crate::text::{fold_case, normalize_opt, slugify};
use crate::traits::{Keyed, LanguageAware};
use indexmap::IndexSet;
use serde::Deserialize;
use serde_json::Value;

/// One form of a place name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Name {
    toponym: Option<String>,
    romanizations: IndexSet<String>,
    language: LanguageTag,
    key: Option<String>,
}

impl Name {
    /// A toponym-only name.
    pub fn new(toponym: &str) -> Self {
        let mut name = Self::default();
        name.set_toponym(toponym);
        name
    }

    /// Build from record fields, validating the language tag.
    pub fn from_record(record: NameRecord) -> Result<Self> {
        let mut name = Self::default();
        if let Some(toponym) = &record.toponym {
            name.set_toponym(toponym);
        }
        for r in &record.romanizations {
            name.add_romanization(r);
        }
        if let Some(tag) = record.language_tag.as_deref().filter(|t| !t.trim().is_empty()) {
            name.set_language_tag(tag.trim())?;
        }
        Ok(name)
    }

    pub fn toponym(&self) -> Option<&str> {
        self.toponym.as_deref()
    }

    /// Normalizes the value. Blank input leaves the current toponym in place.
    pub fn set_toponym(&mut self, value: &str) {
        if let Some(v) = normalize_opt(value) {
            self.toponym = Some(v);
        }
    }

    pub fn clear_toponym(&mut self) {
        self.toponym = None;
    }

    pub fn romanizations(&self) -> &IndexSet<String> {
        &self.romanizations
    }

    /// Adds a normalized romanization; blank input is ignored.
    pub fn add_romanization(&mut self, value: &str) -> bool {
        match normalize_opt(value) {
            Some(v) => self.romanizations.insert(v),
            None => false,
        }
    }

    pub fn clear_romanizations(&mut self) {
        self.romanizations.clear();
    }

    /// Pin the collection key instead of deriving it from the content.
    pub fn set_key(&mut self, key: Option<String>) {
        self.key = key.filter(|k| !k.is_empty());
    }

    /// Toponym first, then every romanization, without duplicates.
    pub fn name_strings(&self) -> IndexSet<&str> {
        self.toponym
            .as_deref()
            .into_iter()
            .chain(self.romanizations.iter().map(String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.toponym.is_none() && self.romanizations.is_empty()
    }

    /// Run the romanization policy on the toponym and keep the results.
    ///
    /// A name without a toponym is left untouched. Returns the number of
    /// romanizations added.
    pub fn romanize_with(&mut self, engines: &Romanizers) -> Result<usize> {
        let Some(toponym) = self.toponym.clone() else {
            return Ok(0);
        };
        let language = self.language.language_subtag().map(str::to_string);
        let found = romanize(&toponym, language.as_deref(), engines)?;
        let before = self.romanizations.len();
        for r in &found {
            self.add_romanization(r);
        }
        Ok(self.romanizations.len() - before)
    }
}

impl LanguageAware for Name {
    fn language(&self) -> &LanguageTag {
        &self.language
    }

    fn language_mut(&mut self) -> &mut LanguageTag {
        &mut self.language
    }
}

impl Keyed for Name {
    /// Explicit key, else the slug of the first romanization, else of the toponym.
    fn make_key(&self) -> String {
        if let Some(key) = &self.key {
            return key.clone();
        }
        self.romanizations
            .first()
            .map(String::as_str)
            .or(self.toponym.as_deref())
            .map(slugify)
            .unwrap_or_default()
    }

    fn index_terms(&self) -> Vec<String> {
        self.name_strings().into_iter().map(str::to_string).collect()
    }
}

impl Serialization for Name {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            field("toponym", &self.toponym),
            field("romanizations", &self.romanizations),
            field("language_tag", &self.language),
            field("key", &self.key),
        ]
    }

    fn omit(&self) -> &'static [&'static str] {
        &["key"]
    }
}

/// Raw name fields as adapters and LPF files carry them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NameRecord {
    pub toponym: Option<String>,
    pub romanizations: Vec<String>,
    #[serde(alias = "language")]
    pub language_tag: Option<String>,
}

/// Anything [`NameCollection::add_name`] accepts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NameInput {
    #[serde(skip_deserializing)]
    Name(Name),
    Toponym(String),
    Record(NameRecord),
}

impl NameInput {
    pub fn into_name(self) -> Result<Name> {
        match self {
            NameInput::Name(name) => Ok(name),
            NameInput::Toponym(toponym) => Ok(Name::new(&toponym)),
            NameInput::Record(record) => Name::from_record(record),
        }
    }
}

impl From<Name> for NameInput {
    fn from(name: Name) -> Self {
        NameInput::Name(name)
    }
}

impl From<NameRecord> for NameInput {
    fn from(record: NameRecord) -> Self {
        NameInput::Record(record)
    }
}

impl From<&str> for NameInput {
    fn from(toponym: &str) -> Self {
        NameInput::Toponym(toponym.to_string())
    }
}

impl From<String> for NameInput {
    fn from(toponym: String) -> Self {
        NameInput::Toponym(toponym)
    }
}

impl TryFrom<&Value> for NameInput {
    type Error = GazetteerError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(NameInput::Toponym(s.clone())),
            Value::Object(_) => Ok(NameInput::Record(serde_json::from_value(value.clone())?)),
            other => Err(GazetteerError::UnexpectedType(format!(
                "cannot build a name from {other}"
            ))),
        }
    }
}

/// De-duplicating, searchable set of [`Name`]s.
///
/// # Examples
///
/// ```rust
/// use gazetteer_core::NameCollection;
///
/// let mut names = NameCollection::new();
/// names.add_name("Zucchabar").unwrap();
/// names.add_name("Miliana").unwrap();
///
/// assert_eq!(names.get_names("miliana").len(), 1);
/// assert_eq!(names.get_names("a").len(), 2);
/// assert!(names.get_names("Roma").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameCollection {
    names: IndexedCollection<Name>,
}

impl NameCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a [`Name`], a [`NameRecord`] or a bare toponym.
    ///
    /// Returns the key the name was stored under.
    pub fn add_name(&mut self, value: impl Into<NameInput>) -> Result<String> {
        let name = value.into().into_name()?;
        if name.is_empty() {
            return Err(GazetteerError::InvalidData(
                "a name needs a toponym or a romanization".into(),
            ));
        }
        Ok(self.names.insert(name))
    }

    /// Add a name given as raw JSON (string or object).
    pub fn add_value(&mut self, value: &Value) -> Result<String> {
        self.add_name(NameInput::try_from(value)?)
    }

    /// Remove a held name. Fails with `NotFound` when it is not present.
    pub fn remove_name(&mut self, name: &Name) -> Result<Name> {
        let key = self
            .names
            .find_key(|held| held == name)
            .map(str::to_string)
            .ok_or_else(|| GazetteerError::NotFound(format!("name key '{}'", name.make_key())))?;
        self.remove_key(&key)
    }

    pub fn remove_key(&mut self, key: &str) -> Result<Name> {
        self.names
            .remove_key(key)
            .ok_or_else(|| GazetteerError::NotFound(format!("name key '{key}'")))
    }

    /// Exact match, then case-insensitive match, then case-insensitive
    /// substring match over every indexed string. Empty when nothing matches.
    pub fn get_names(&self, s: &str) -> Vec<&Name> {
        if let Some(keys) = self.names.lookup(s) {
            return self.names.select(keys);
        }
        let folded = fold_case(s);
        let folded_index: Vec<(String, &IndexSet<String>)> = self
            .names
            .index()
            .iter()
            .map(|(term, keys)| (fold_case(term), keys))
            .collect();

        let exact: IndexSet<String> = folded_index
            .iter()
            .filter(|(term, _)| *term == folded)
            .flat_map(|(_, keys)| keys.iter().cloned())
            .collect();
        if !exact.is_empty() {
            return self.names.select(&exact);
        }

        let partial: IndexSet<String> = folded_index
            .iter()
            .filter(|(term, _)| term.contains(&folded))
            .flat_map(|(_, keys)| keys.iter().cloned())
            .collect();
        self.names.select(&partial)
    }

    pub fn get(&self, key: &str) -> Option<&Name> {
        self.names.get(key)
    }

    /// Every toponym and romanization across the collection.
    pub fn name_strings(&self) -> IndexSet<&str> {
        self.names.values().flat_map(Name::name_strings).collect()
    }

    /// Romanize every name in place.
    ///
    /// Keys and index entries are rebuilt, so keys may change.
    pub fn romanize_all(&mut self, engines: &Romanizers) -> Result<usize> {
        let mut names: Vec<Name> = self.names.values().cloned().collect();
        let mut added = 0;
        for name in &mut names {
            added += name.romanize_with(engines)?;
        }
        self.names.clear();
        for name in names {
            self.names.insert(name);
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Name> {
        self.names.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.names.keys()
    }
}

impl Serialization for NameCollection {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![field("names", &self.names), field("index", self.names.index())]
    }

    fn omit(&self) -> &'static [&'static str] {
        &["index"]
    }

    fn transform(&self) -> Transform {
        Transform::Promote
    }
}

impl_to_value_via_mapping!(Name, NameCollection);
