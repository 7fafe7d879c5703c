// crates/gazetteer-core/src/serialization.rs

//! # Mapping serialization
//!
//! Every model entity implements [`Serialization`]: it lists its fields,
//! names the ones to skip and declares an optional structural
//! [`Transform`]. The default [`Serialization::to_mapping`] turns that into
//! an insertion-ordered `serde_json::Value`, recursing into nested values
//! through [`ToValue`].

use crate::error::{GazetteerError, Result};
use crate::language::LanguageTag;
use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Structural rewrite applied after the field mapping is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    /// Keep the mapping.
    #[default]
    None,
    /// Replace a single-key mapping by that key's value.
    Promote,
    /// Drop the keys and keep the values in insertion order.
    RefactorToList,
}

/// Conversion of a field value into JSON.
pub trait ToValue {
    fn to_value(&self) -> Result<Value>;
}

/// A field as seen by [`Serialization::to_mapping`].
pub type Field<'a> = (Cow<'a, str>, &'a dyn ToValue);

/// Build a [`Field`].
#[inline]
pub fn field<'a>(name: impl Into<Cow<'a, str>>, value: &'a dyn ToValue) -> Field<'a> {
    (name.into(), value)
}

pub trait Serialization {
    /// All fields, bookkeeping included.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Field names left out of the mapping.
    fn omit(&self) -> &'static [&'static str] {
        &[]
    }

    fn transform(&self) -> Transform {
        Transform::None
    }

    fn to_mapping(&self) -> Result<Value> {
        let omit = self.omit();
        let mut map = Map::new();
        for (name, value) in self.fields() {
            if omit.contains(&name.as_ref()) {
                continue;
            }
            map.insert(name.into_owned(), value.to_value()?);
        }
        apply_transform(map, self.transform())
    }
}

fn apply_transform(map: Map<String, Value>, transform: Transform) -> Result<Value> {
    match transform {
        Transform::None => Ok(Value::Object(map)),
        Transform::Promote => {
            if map.len() != 1 {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                return Err(GazetteerError::Unsupported(format!(
                    "cannot promote a mapping with keys [{}]",
                    keys.join(", ")
                )));
            }
            Ok(map.into_iter().next().map_or(Value::Null, |(_, v)| v))
        }
        Transform::RefactorToList => Ok(Value::Array(map.into_iter().map(|(_, v)| v).collect())),
    }
}

/// Implements [`ToValue`] for entities by way of [`Serialization::to_mapping`].
macro_rules! impl_to_value_via_mapping {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::serialization::ToValue for $ty {
                fn to_value(&self) -> $crate::error::Result<serde_json::Value> {
                    $crate::serialization::Serialization::to_mapping(self)
                }
            }
        )+
    };
}
pub(crate) use impl_to_value_via_mapping;

impl ToValue for str {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::String(self.to_string()))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl ToValue for &'static str {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::String((*self).to_string()))
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Result<Value> {
        Ok(self.clone())
    }
}

impl ToValue for LanguageTag {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::String(self.tag().to_string()))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Result<Value> {
        match self {
            Some(v) => v.to_value(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Result<Value> {
        self.iter().map(ToValue::to_value).collect::<Result<Vec<_>>>().map(Value::Array)
    }
}

impl ToValue for IndexSet<String> {
    fn to_value(&self) -> Result<Value> {
        Ok(Value::Array(self.iter().cloned().map(Value::String).collect()))
    }
}

impl<T: ToValue> ToValue for IndexMap<String, T> {
    fn to_value(&self) -> Result<Value> {
        let mut map = Map::new();
        for (k, v) in self {
            map.insert(k.clone(), v.to_value()?);
        }
        Ok(Value::Object(map))
    }
}

/// Recursively order object keys alphabetically.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
