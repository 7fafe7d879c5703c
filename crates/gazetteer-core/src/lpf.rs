// crates/gazetteer-core/src/lpf.rs

//! # Linked Places Format envelope
//!
//! Features are written inside a fixed `FeatureCollection` envelope:
//!
//! ```json
//! {"@context": "<CONTEXT_URL>", "type": "FeatureCollection", "features": [...]}
//! ```
//!
//! Reading returns the raw `features` list; [`load_features`] rebuilds
//! [`Feature`] values from it.

use crate::countries::CountryRegistry;
use crate::error::{GazetteerError, Result};
use crate::model::Feature;
use crate::serialization::{sort_keys, Serialization};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::io::{Read, Write};

pub const CONTEXT_URL: &str =
    "https://raw.githubusercontent.com/LinkedPasts/linked-places/master/linkedplaces-context-v1.1.jsonld";

/// Output options. Non-ASCII text is always written verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Pretty-print with this many spaces; compact when `None`.
    pub indent: Option<usize>,
    /// Order object keys alphabetically instead of by insertion.
    pub sort_keys: bool,
}

impl DumpOptions {
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            ..Self::default()
        }
    }
}

/// Wrap feature mappings in the LPF envelope.
pub fn envelope<'a, I>(features: I) -> Result<Value>
where
    I: IntoIterator<Item = &'a Feature>,
{
    let features = features
        .into_iter()
        .map(Serialization::to_mapping)
        .collect::<Result<Vec<_>>>()?;
    let mut map = Map::new();
    map.insert("@context".into(), Value::String(CONTEXT_URL.into()));
    map.insert("type".into(), Value::String("FeatureCollection".into()));
    map.insert("features".into(), Value::Array(features));
    Ok(Value::Object(map))
}

/// Serialize one or many features to an LPF string.
///
/// ```rust
/// use gazetteer_core::lpf::{dumps, DumpOptions};
/// use gazetteer_core::Feature;
///
/// let mut feature = Feature::new();
/// feature.set_id("roma");
/// let s = dumps(std::slice::from_ref(&feature), &DumpOptions::default()).unwrap();
/// assert!(s.starts_with(r#"{"@context":"#));
/// assert!(s.contains(r#""type":"FeatureCollection""#));
/// ```
pub fn dumps<'a, I>(features: I, opts: &DumpOptions) -> Result<String>
where
    I: IntoIterator<Item = &'a Feature>,
{
    let mut buf = Vec::new();
    dump(features, &mut buf, opts)?;
    String::from_utf8(buf).map_err(|e| GazetteerError::InvalidData(e.to_string()))
}

/// Serialize one or many features to a writer.
pub fn dump<'a, I, W>(features: I, writer: W, opts: &DumpOptions) -> Result<()>
where
    I: IntoIterator<Item = &'a Feature>,
    W: Write,
{
    let mut value = envelope(features)?;
    if opts.sort_keys {
        value = sort_keys(value);
    }
    match opts.indent {
        None => serde_json::to_writer(writer, &value)?,
        Some(n) => {
            let indent = vec![b' '; n];
            let mut ser = serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(&indent));
            value.serialize(&mut ser)?;
        }
    }
    Ok(())
}

/// Read an LPF document and return its `features` list.
pub fn load<R: Read>(reader: R) -> Result<Vec<Value>> {
    let doc: Value = serde_json::from_reader(reader)?;
    features_of(doc)
}

pub fn loads(s: &str) -> Result<Vec<Value>> {
    features_of(serde_json::from_str(s)?)
}

fn features_of(doc: Value) -> Result<Vec<Value>> {
    match doc {
        Value::Object(mut map) => match map.remove("features") {
            Some(Value::Array(features)) => Ok(features),
            Some(other) => Err(GazetteerError::InvalidData(format!(
                "'features' must be a list, got {other}"
            ))),
            None => Err(GazetteerError::InvalidData(
                "LPF document without 'features'".into(),
            )),
        },
        _ => Err(GazetteerError::InvalidData(
            "LPF document must be a JSON object".into(),
        )),
    }
}

/// Read an LPF document and rebuild its features.
pub fn load_features<R: Read>(reader: R, registry: &CountryRegistry) -> Result<Vec<Feature>> {
    load(reader)?
        .iter()
        .map(|f| Feature::from_mapping(f, registry))
        .collect()
}
