// crates/gazetteer-core/src/countries.rs

//! # Country codes
//!
//! [`CountryRegistry`] maps every known spelling of a country (ISO codes,
//! CLDR and official names, UN terminology) to one preferred ISO 3166-1
//! alpha-2 code. It is built once from the country table and passed by
//! reference wherever codes are validated.
//!
//! Cells holding several comma-separated values are left out at build
//! time. Those spellings are therefore unknown to the registry.

use crate::error::{GazetteerError, Result};
use crate::raw::CountryRaw;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// MARC codes that must not be used as aliases.
const SKIPPED_MARC: &[&str] = &["uik"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRegistry {
    aliases: BTreeMap<String, String>,
    names: BTreeMap<String, String>,
}

impl CountryRegistry {
    /// Build from parsed table rows.
    ///
    /// Two rows claiming the same alias for different codes is an error.
    pub fn from_rows(rows: impl IntoIterator<Item = CountryRaw>) -> Result<Self> {
        let mut registry = Self::default();
        for row in rows {
            let Some(preferred) = row.alpha2() else {
                continue;
            };
            if preferred.contains(',') {
                log::debug!("skipping ISO3166-1-Alpha-2 == '{preferred}'");
                continue;
            }
            for (column, value) in row.alias_cells() {
                let Some(value) = value else {
                    continue;
                };
                if value.contains(',') {
                    log::debug!("skipping {column} == '{value}'");
                    continue;
                }
                if column == "MARC" && SKIPPED_MARC.contains(&value.as_str()) {
                    continue;
                }
                registry.insert_alias(value, &preferred)?;
            }
            if let Some(name) = row.english_name() {
                registry.names.insert(preferred.clone(), name);
            }
        }
        Ok(registry)
    }

    fn insert_alias(&mut self, alias: String, preferred: &str) -> Result<()> {
        match self.aliases.get(&alias) {
            Some(existing) if existing != preferred => Err(GazetteerError::InvalidData(format!(
                "collision: '{alias}' currently == {existing} failed == {preferred}"
            ))),
            Some(_) => Ok(()),
            None => {
                self.aliases.insert(alias, preferred.to_string());
                Ok(())
            }
        }
    }

    /// Preferred code for any known alias.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gazetteer_core::CountryRegistry;
    ///
    /// let registry = CountryRegistry::load_default().unwrap();
    /// assert_eq!(registry.resolve("ESP").unwrap(), "ES");
    /// assert_eq!(registry.resolve("Mexico").unwrap(), "MX");
    /// assert_eq!(registry.resolve("MX").unwrap(), "MX");
    /// assert!(registry.resolve("Narnia").is_err());
    /// ```
    pub fn resolve(&self, value: &str) -> Result<&str> {
        self.aliases
            .get(value)
            .map(String::as_str)
            .ok_or_else(|| GazetteerError::InvalidCountryCode(value.to_string()))
    }

    pub fn is_known(&self, value: &str) -> bool {
        self.aliases.contains_key(value)
    }

    /// English official name of a preferred code.
    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Preferred codes, sorted.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Number of countries with a name.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn rows(value: serde_json::Value) -> Vec<CountryRaw> {
        serde_json::from_value(value).unwrap()
    }

    #[fixture]
    fn registry() -> CountryRegistry {
        CountryRegistry::from_rows(rows(json!([
            {
                "ISO3166-1-Alpha-2": "ES",
                "ISO3166-1-Alpha-3": "ESP",
                "ISO3166-1-numeric": 724,
                "CLDR display name": "Spain",
                "official_name_en": "Spain",
                "official_name_fr": "Espagne",
                "official_name_es": "España",
                "UNTERM English Short": "Spain"
            },
            {
                "ISO3166-1-Alpha-2": "KP",
                "ISO3166-1-Alpha-3": "PRK",
                "CLDR display name": "North Korea",
                "official_name_en": "Democratic People's Republic of Korea",
                "UNTERM French Short": "République populaire démocratique de Corée (la)",
                "MARC": "ko, kn"
            },
            {
                "ISO3166-1-Alpha-2": "GB",
                "ISO3166-1-Alpha-3": "GBR",
                "official_name_en": "United Kingdom of Great Britain and Northern Ireland",
                "MARC": "uik"
            },
            { "ISO3166-1-Alpha-2": null, "CLDR display name": "Nowhere" }
        ])))
        .unwrap()
    }

    #[rstest]
    #[case("ES", "ES")]
    #[case("ESP", "ES")]
    #[case("724", "ES")]
    #[case("España", "ES")]
    #[case("PRK", "KP")]
    #[case("GBR", "GB")]
    fn aliases_resolve(registry: CountryRegistry, #[case] alias: &str, #[case] code: &str) {
        assert_eq!(registry.resolve(alias).unwrap(), code);
        assert_eq!(registry.resolve(code).unwrap(), code);
    }

    #[rstest]
    #[case("ko, kn")]
    #[case("uik")]
    #[case("Nowhere")]
    #[case("esp")]
    fn skipped_or_unknown(registry: CountryRegistry, #[case] alias: &str) {
        assert!(matches!(
            registry.resolve(alias),
            Err(GazetteerError::InvalidCountryCode(_))
        ));
    }

    #[rstest]
    fn english_names(registry: CountryRegistry) {
        assert_eq!(registry.name_for("ES"), Some("Spain"));
        assert_eq!(registry.codes().collect::<Vec<_>>(), vec!["ES", "GB", "KP"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn conflicting_aliases_are_fatal() {
        let result = CountryRegistry::from_rows(rows(json!([
            { "ISO3166-1-Alpha-2": "AA", "CLDR display name": "Twin" },
            { "ISO3166-1-Alpha-2": "BB", "CLDR display name": "Twin" }
        ])));
        assert!(matches!(result, Err(GazetteerError::InvalidData(_))));
    }
}
