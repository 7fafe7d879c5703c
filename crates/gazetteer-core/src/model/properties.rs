// crates/gazetteer-core/src/model/properties.rs
use crate::countries::CountryRegistry;
use crate::error::{GazetteerError, Result};
use crate::serialization::{field, impl_to_value_via_mapping, Field, Serialization};
use crate::text::normalize;
use indexmap::IndexSet;
use serde::Deserialize;

/// Title and preferred country codes of a place.
///
/// Every code handed in is rewritten to its preferred form, so `ccodes`
/// only ever holds registry codes.
///
/// # Examples
///
/// ```rust
/// use gazetteer_core::{CountryRegistry, Properties};
///
/// let registry = CountryRegistry::load_default().unwrap();
/// let mut props = Properties::new();
/// props.set_ccodes(["GB", "ESP"], &registry).unwrap();
/// assert_eq!(props.ccodes().iter().collect::<Vec<_>>(), vec!["GB", "ES"]);
///
/// props.remove_ccode("ES", &registry).unwrap();
/// assert!(props.remove_ccode("Narnia", &registry).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    title: String,
    ccodes: IndexSet<String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_record(record: &PropertiesRecord, registry: &CountryRegistry) -> Result<Self> {
        let mut props = Self::new();
        if let Some(title) = &record.title {
            props.set_title(title);
        }
        if let Some(ccodes) = &record.ccodes {
            props.set_ccodes(ccodes, registry)?;
        }
        Ok(props)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = normalize(title);
    }

    pub fn ccodes(&self) -> &IndexSet<String> {
        &self.ccodes
    }

    /// Replace the whole set. Nothing changes unless every value resolves.
    pub fn set_ccodes<I, S>(&mut self, values: I, registry: &CountryRegistry) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolved = values
            .into_iter()
            .map(|v| preferred(v.as_ref(), registry))
            .collect::<Result<IndexSet<_>>>()?;
        self.ccodes = resolved;
        Ok(())
    }

    pub fn add_ccode(&mut self, value: &str, registry: &CountryRegistry) -> Result<()> {
        let code = preferred(value, registry)?;
        self.ccodes.insert(code);
        Ok(())
    }

    /// Remove by stored code or by any alias resolving to a stored code.
    pub fn remove_ccode(&mut self, value: &str, registry: &CountryRegistry) -> Result<()> {
        if self.ccodes.shift_remove(value) {
            return Ok(());
        }
        if let Ok(code) = registry.resolve(value) {
            if self.ccodes.shift_remove(code) {
                return Ok(());
            }
        }
        Err(GazetteerError::NotFound(format!("ccode '{value}'")))
    }

    /// English names of the held codes, in code order.
    pub fn country_names<'r>(&self, registry: &'r CountryRegistry) -> Vec<&'r str> {
        self.ccodes
            .iter()
            .filter_map(|code| registry.name_for(code))
            .collect()
    }
}

fn preferred(value: &str, registry: &CountryRegistry) -> Result<String> {
    let code = registry.resolve(value)?;
    if code != value {
        log::info!("Replacing ccode '{value}' with corresponding preferred ccode {code}.");
    }
    Ok(code.to_string())
}

impl Serialization for Properties {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![field("title", &self.title), field("ccodes", &self.ccodes)]
    }
}

impl_to_value_via_mapping!(Properties);

/// Raw `properties` object of a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PropertiesRecord {
    pub title: Option<String>,
    pub ccodes: Option<Vec<String>>,
}
