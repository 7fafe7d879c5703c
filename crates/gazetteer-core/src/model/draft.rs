// crates/gazetteer-core/src/model/draft.rs
use super::description::DescriptionInput;
use super::name::NameInput;
use super::properties::PropertiesRecord;
use crate::error::Result;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The typed bag of fields every gazetteer adapter produces.
///
/// It deserializes from adapter output and from LPF features alike
/// (`@id` is accepted for `uri` and wins when both are present, the way
/// `properties` wins over the flat fields). Unknown keys are ignored.
///
/// ```rust
/// use gazetteer_core::PlaceDraft;
/// use serde_json::json;
///
/// let draft = PlaceDraft::from_value(&json!({
///     "id": 295374,
///     "title": "Zucchabar",
///     "names": ["Zucchabar", {"toponym": "Miliana", "language_tag": "fr"}],
///     "geometry": {"type": "Point", "coordinates": [2.2, 36.3]}
/// })).unwrap();
/// assert_eq!(draft.id.as_deref(), Some("295374"));
/// assert_eq!(draft.names.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaceDraft {
    #[serde(deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub uri: Option<String>,
    #[serde(rename = "@id")]
    pub at_id: Option<String>,
    pub title: Option<String>,
    pub ccodes: Option<Vec<String>>,
    /// Overrides `title` / `ccodes` when present.
    pub properties: Option<PropertiesRecord>,
    pub names: Vec<NameInput>,
    pub descriptions: Vec<DescriptionInput>,
    pub geometry: Option<Value>,
    /// Takes precedence over `geometry`.
    pub geometries: Option<Vec<Value>>,
}

impl PlaceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// URI after the `@id` override.
    pub fn effective_uri(&self) -> Option<&str> {
        self.at_id.as_deref().or(self.uri.as_deref())
    }

    /// Title after the `properties` override.
    pub fn effective_title(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.title.as_deref())
            .or(self.title.as_deref())
    }

    /// Country codes after the `properties` override.
    pub fn effective_ccodes(&self) -> Option<&[String]> {
        self.properties
            .as_ref()
            .and_then(|p| p.ccodes.as_deref())
            .or(self.ccodes.as_deref())
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lpf_feature_shape_is_accepted() {
        let draft = PlaceDraft::from_value(&json!({
            "type": "Feature",
            "id": "zucchabar",
            "@id": "https://pleiades.stoa.org/places/295374",
            "properties": {"title": "Zucchabar", "ccodes": ["DZ"]},
            "names": [],
            "descriptions": [{"value": "An ancient place", "source": null, "language_tag": "und"}],
            "geometry": []
        }))
        .unwrap();
        assert_eq!(draft.effective_uri(), Some("https://pleiades.stoa.org/places/295374"));
        assert_eq!(draft.effective_title(), Some("Zucchabar"));
        assert_eq!(draft.effective_ccodes(), Some(&["DZ".to_string()][..]));
        assert_eq!(draft.descriptions.len(), 1);
    }

    #[test]
    fn properties_override_flat_fields() {
        let draft = PlaceDraft::from_value(&json!({
            "title": "flat",
            "ccodes": ["ES"],
            "properties": {"title": "nested"}
        }))
        .unwrap();
        assert_eq!(draft.effective_title(), Some("nested"));
        assert_eq!(draft.effective_ccodes(), Some(&["ES".to_string()][..]));
    }

    #[test]
    fn at_id_wins_over_uri() {
        let draft = PlaceDraft::from_value(&json!({
            "uri": "https://example.org/flat",
            "@id": "https://pleiades.stoa.org/places/295374"
        }))
        .unwrap();
        assert_eq!(draft.effective_uri(), Some("https://pleiades.stoa.org/places/295374"));

        let flat = PlaceDraft::from_value(&json!({"uri": "https://example.org/flat"})).unwrap();
        assert_eq!(flat.effective_uri(), Some("https://example.org/flat"));
    }

    #[test]
    fn bad_id_type_is_rejected() {
        assert!(PlaceDraft::from_value(&json!({"id": [1, 2]})).is_err());
    }
}
