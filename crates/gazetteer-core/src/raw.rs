// crates/gazetteer-core/src/raw.rs

//! Raw rows of the country metadata table, as shipped in
//! `data/country-codes.json`.

use serde::Deserialize;
use serde_json::Value;

/// One row of the country table. Cells may be strings, numbers or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryRaw {
    #[serde(rename = "CLDR display name", default)]
    pub cldr_display_name: Option<Value>,
    #[serde(rename = "Geoname ID", default)]
    pub geoname_id: Option<Value>,
    #[serde(rename = "ISO3166-1-Alpha-2", default)]
    pub iso_alpha2: Option<Value>,
    #[serde(rename = "ISO3166-1-Alpha-3", default)]
    pub iso_alpha3: Option<Value>,
    #[serde(rename = "ISO3166-1-numeric", default)]
    pub iso_numeric: Option<Value>,
    #[serde(rename = "MARC", default)]
    pub marc: Option<Value>,
    #[serde(default)]
    pub official_name_ar: Option<Value>,
    #[serde(default)]
    pub official_name_cn: Option<Value>,
    #[serde(default)]
    pub official_name_en: Option<Value>,
    #[serde(default)]
    pub official_name_es: Option<Value>,
    #[serde(default)]
    pub official_name_fr: Option<Value>,
    #[serde(default)]
    pub official_name_ru: Option<Value>,
    #[serde(rename = "UNTERM Arabic Short", default)]
    pub unterm_arabic_short: Option<Value>,
    #[serde(rename = "UNTERM Chinese Short", default)]
    pub unterm_chinese_short: Option<Value>,
    #[serde(rename = "UNTERM English Short", default)]
    pub unterm_english_short: Option<Value>,
    #[serde(rename = "UNTERM French Short", default)]
    pub unterm_french_short: Option<Value>,
    #[serde(rename = "UNTERM Russian Short", default)]
    pub unterm_russian_short: Option<Value>,
    #[serde(rename = "UNTERM Spanish Short", default)]
    pub unterm_spanish_short: Option<Value>,
}

impl CountryRaw {
    /// Alias-bearing columns with their header names.
    pub fn alias_cells(&self) -> [(&'static str, Option<String>); 18] {
        [
            ("CLDR display name", cell(&self.cldr_display_name)),
            ("Geoname ID", cell(&self.geoname_id)),
            ("ISO3166-1-Alpha-2", cell(&self.iso_alpha2)),
            ("ISO3166-1-Alpha-3", cell(&self.iso_alpha3)),
            ("ISO3166-1-numeric", cell(&self.iso_numeric)),
            ("MARC", cell(&self.marc)),
            ("official_name_ar", cell(&self.official_name_ar)),
            ("official_name_cn", cell(&self.official_name_cn)),
            ("official_name_en", cell(&self.official_name_en)),
            ("official_name_es", cell(&self.official_name_es)),
            ("official_name_fr", cell(&self.official_name_fr)),
            ("official_name_ru", cell(&self.official_name_ru)),
            ("UNTERM Arabic Short", cell(&self.unterm_arabic_short)),
            ("UNTERM Chinese Short", cell(&self.unterm_chinese_short)),
            ("UNTERM English Short", cell(&self.unterm_english_short)),
            ("UNTERM French Short", cell(&self.unterm_french_short)),
            ("UNTERM Russian Short", cell(&self.unterm_russian_short)),
            ("UNTERM Spanish Short", cell(&self.unterm_spanish_short)),
        ]
    }

    pub fn alpha2(&self) -> Option<String> {
        cell(&self.iso_alpha2)
    }

    pub fn english_name(&self) -> Option<String> {
        cell(&self.official_name_en)
    }
}

/// Text of a cell. Numbers become their decimal form; empty and other
/// values are absent.
fn cell(value: &Option<Value>) -> Option<String> {
    match value.as_ref()? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_blanks() {
        let row: CountryRaw = serde_json::from_value(json!({
            "ISO3166-1-Alpha-2": "ES",
            "ISO3166-1-numeric": 724,
            "Geoname ID": "",
            "MARC": null,
            "Unrelated": true
        }))
        .unwrap();
        assert_eq!(row.alpha2().as_deref(), Some("ES"));
        let cells = row.alias_cells();
        assert_eq!(cells[4].1.as_deref(), Some("724"));
        assert_eq!(cells[1].1, None);
        assert_eq!(cells[5].1, None);
    }
}
