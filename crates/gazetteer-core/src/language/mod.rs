// crates/gazetteer-core/src/language/mod.rs

//! # Language tags
//!
//! [`LanguageTag`] wraps a validated BCP-47 tag. Parsing follows the
//! RFC 5646 grammar and checks the language and script subtags against the
//! bundled registry in [`registry`]. Every problem found is reported, not
//! just the first one.

pub mod registry;
pub mod script;

use crate::error::{GazetteerError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub use script::{detect_script, is_latn};

/// The tag reported when none has been set.
pub const UNDETERMINED: &str = "und";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ParsedTag {
    tag: String,
    language: Option<String>,
    script: Option<String>,
    region: Option<String>,
}

/// A validated BCP-47 language tag, or unset (`und`).
///
/// Subtags are derived whenever the tag is set. When the tag names no
/// script, [`LanguageTag::script_subtag`] falls back to the language's
/// registered default script.
///
/// # Examples
///
/// ```rust
/// use gazetteer_core::LanguageTag;
///
/// let tag = LanguageTag::parse("en-Arab-US").unwrap();
/// assert_eq!(tag.tag(), "en-Arab-US");
/// assert_eq!(tag.region_subtag(), Some("US"));
///
/// assert_eq!(LanguageTag::parse("en").unwrap().script_subtag(), Some("Latn"));
/// assert_eq!(LanguageTag::parse("grc").unwrap().script_subtag(), None);
/// assert_eq!(LanguageTag::default().tag(), "und");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    parsed: Option<ParsedTag>,
}

impl LanguageTag {
    /// Parse and validate a tag.
    pub fn parse(value: &str) -> Result<Self> {
        let mut tag = Self::default();
        tag.set_tag(value)?;
        Ok(tag)
    }

    /// Replace the tag. On error the previous value is kept.
    pub fn set_tag(&mut self, value: &str) -> Result<()> {
        let parsed = parse_tag(value).map_err(|issues| GazetteerError::InvalidLanguageTag {
            tag: value.to_string(),
            issues,
        })?;
        self.parsed = Some(parsed);
        Ok(())
    }

    /// Reset to the undetermined state.
    pub fn clear(&mut self) {
        self.parsed = None;
    }

    pub fn is_set(&self) -> bool {
        self.parsed.is_some()
    }

    /// Canonical tag string; `"und"` when unset.
    pub fn tag(&self) -> &str {
        self.parsed.as_ref().map_or(UNDETERMINED, |p| p.tag.as_str())
    }

    pub fn language_subtag(&self) -> Option<&str> {
        self.parsed.as_ref()?.language.as_deref()
    }

    pub fn region_subtag(&self) -> Option<&str> {
        self.parsed.as_ref()?.region.as_deref()
    }

    /// Explicit script subtag, else the language's default script.
    pub fn script_subtag(&self) -> Option<&str> {
        let parsed = self.parsed.as_ref()?;
        match &parsed.script {
            Some(script) => Some(script.as_str()),
            None => parsed
                .language
                .as_deref()
                .and_then(registry::default_script),
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LanguageTag {
    type Err = GazetteerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for LanguageTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for LanguageTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// -----------------------------------------------------------------------------
// RFC 5646 PARSER
// -----------------------------------------------------------------------------

fn is_alpha(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_digit(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn titlecase(s: &str) -> String {
    let lower = s.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn is_variant(s: &str) -> bool {
    let b = s.as_bytes();
    (5..=8).contains(&b.len()) || (b.len() == 4 && b[0].is_ascii_digit())
}

fn parse_tag(value: &str) -> std::result::Result<ParsedTag, Vec<String>> {
    let value = value.trim();
    if value.is_empty() {
        return Err(vec!["the tag is empty".to_string()]);
    }
    if let Some(canonical) = registry::GRANDFATHERED.get(value.to_ascii_lowercase().as_str()) {
        return Ok(ParsedTag {
            tag: (*canonical).to_string(),
            language: None,
            script: None,
            region: None,
        });
    }

    let mut issues = Vec::new();
    let subtags: Vec<&str> = value.split('-').collect();
    for (i, subtag) in subtags.iter().enumerate() {
        if subtag.is_empty() {
            issues.push(format!("subtag {} is empty", i + 1));
        } else if subtag.len() > 8 || !subtag.bytes().all(|b| b.is_ascii_alphanumeric()) {
            issues.push(format!("'{subtag}' is not a well-formed subtag"));
        }
    }
    if !issues.is_empty() {
        return Err(issues);
    }

    let mut canonical: Vec<String> = Vec::with_capacity(subtags.len());
    let mut rest = subtags.as_slice();
    let mut language = None;
    let mut script = None;
    let mut region = None;

    // primary language, unless the whole tag is private use
    if !rest[0].eq_ignore_ascii_case("x") {
        let primary = rest[0].to_ascii_lowercase();
        if !is_alpha(&primary) || primary.len() < 2 {
            issues.push(format!("'{}' is not a valid primary language subtag", rest[0]));
        } else if primary.len() <= 3 && !registry::is_registered_language(&primary) {
            issues.push(format!("unknown language subtag '{primary}'"));
        } else if primary.len() > 3 {
            issues.push(format!("unregistered language subtag '{primary}'"));
        }
        canonical.push(primary.clone());
        language = Some(primary);
        rest = &rest[1..];

        // extlangs: at most three, only after a 2-3 letter language
        let mut extlangs = 0;
        while let Some(next) = rest.first() {
            if next.len() == 3 && is_alpha(next) && language.as_ref().is_some_and(|l| l.len() <= 3) {
                extlangs += 1;
                if extlangs > 3 {
                    issues.push(format!("too many extended language subtags at '{next}'"));
                }
                canonical.push(next.to_ascii_lowercase());
                rest = &rest[1..];
            } else {
                break;
            }
        }

        if let Some(next) = rest.first() {
            if next.len() == 4 && is_alpha(next) {
                let s = titlecase(next);
                if !registry::is_registered_script(&s) {
                    issues.push(format!("unknown script subtag '{s}'"));
                }
                canonical.push(s.clone());
                script = Some(s);
                rest = &rest[1..];
            }
        }

        if let Some(next) = rest.first() {
            if (next.len() == 2 && is_alpha(next)) || (next.len() == 3 && is_digit(next)) {
                let r = next.to_ascii_uppercase();
                canonical.push(r.clone());
                region = Some(r);
                rest = &rest[1..];
            }
        }

        let mut variants: Vec<String> = Vec::new();
        while let Some(next) = rest.first() {
            if !is_variant(next) {
                break;
            }
            let v = next.to_ascii_lowercase();
            if variants.contains(&v) {
                issues.push(format!("duplicate variant subtag '{v}'"));
            }
            variants.push(v.clone());
            canonical.push(v);
            rest = &rest[1..];
        }

        let mut singletons: Vec<String> = Vec::new();
        while let Some(next) = rest.first() {
            if next.len() != 1 || next.eq_ignore_ascii_case("x") {
                break;
            }
            let singleton = next.to_ascii_lowercase();
            if singletons.contains(&singleton) {
                issues.push(format!("duplicate extension singleton '{singleton}'"));
            }
            singletons.push(singleton.clone());
            canonical.push(singleton.clone());
            rest = &rest[1..];
            let mut count = 0;
            while let Some(part) = rest.first() {
                if part.len() < 2 {
                    break;
                }
                canonical.push(part.to_ascii_lowercase());
                rest = &rest[1..];
                count += 1;
            }
            if count == 0 {
                issues.push(format!("extension '{singleton}' has no subtags"));
            }
        }
    }

    if let Some(next) = rest.first() {
        if next.eq_ignore_ascii_case("x") {
            canonical.push("x".to_string());
            rest = &rest[1..];
            if rest.is_empty() {
                issues.push("private use section has no subtags".to_string());
            }
            canonical.extend(rest.iter().map(|p| p.to_ascii_lowercase()));
            rest = &[];
        }
    }

    for unexpected in rest {
        issues.push(format!("unexpected subtag '{unexpected}'"));
    }

    if issues.is_empty() {
        Ok(ParsedTag {
            tag: canonical.join("-"),
            language,
            script,
            region,
        })
    } else {
        Err(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en")]
    #[case("en-US")]
    #[case("en-Arab-US")]
    #[case("grc")]
    #[case("la-x-classical")]
    #[case("zh-cmn-Hans-CN")]
    #[case("sl-rozaj-biske")]
    #[case("de-CH-1901")]
    #[case("es-419")]
    #[case("en-a-bbb-x-a-ccc")]
    #[case("x-whatever")]
    #[case("i-klingon")]
    #[case("und")]
    fn valid_tags_round_trip(#[case] value: &str) {
        let tag = LanguageTag::parse(value).unwrap();
        assert_eq!(tag.tag(), value);
        assert_eq!(tag.to_string(), value);
    }

    #[test]
    fn case_is_canonicalized() {
        let tag = LanguageTag::parse("EN-arab-us").unwrap();
        assert_eq!(tag.tag(), "en-Arab-US");
    }

    #[rstest]
    #[case("")]
    #[case("en--US")]
    #[case("en-US-US")]
    #[case("xx")]
    #[case("en-Abcd")]
    #[case("de-1901-1901")]
    #[case("en-a-bbb-a-ccc")]
    #[case("en-a")]
    #[case("en-x")]
    #[case("toolongsubtag")]
    #[case("1a")]
    fn invalid_tags_are_rejected(#[case] value: &str) {
        let err = LanguageTag::parse(value).unwrap_err();
        assert!(matches!(err, GazetteerError::InvalidLanguageTag { .. }), "{value}: {err}");
    }

    #[test]
    fn error_message_enumerates_issues() {
        let err = LanguageTag::parse("xx-Abcd").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unknown language subtag 'xx'"), "{msg}");
        assert!(msg.contains("unknown script subtag 'Abcd'"), "{msg}");
    }

    #[test]
    fn subtags_follow_the_tag() {
        let mut tag = LanguageTag::parse("en-Arab-US").unwrap();
        assert_eq!(tag.language_subtag(), Some("en"));
        assert_eq!(tag.region_subtag(), Some("US"));
        assert_eq!(tag.script_subtag(), Some("Arab"));

        tag.set_tag("en").unwrap();
        assert_eq!(tag.language_subtag(), Some("en"));
        assert_eq!(tag.region_subtag(), None);
        assert_eq!(tag.script_subtag(), Some("Latn"));

        tag.set_tag("grc").unwrap();
        assert_eq!(tag.language_subtag(), Some("grc"));
        assert_eq!(tag.script_subtag(), None);
    }

    #[test]
    fn failed_set_keeps_previous_tag() {
        let mut tag = LanguageTag::parse("el").unwrap();
        assert!(tag.set_tag("en-US-US").is_err());
        assert_eq!(tag.tag(), "el");
    }

    #[test]
    fn unset_tag_is_undetermined() {
        let tag = LanguageTag::default();
        assert_eq!(tag.tag(), "und");
        assert!(!tag.is_set());
        assert_eq!(tag.language_subtag(), None);
        assert_eq!(tag.script_subtag(), None);
    }

    #[test]
    fn serde_uses_the_string_form() {
        let tag: LanguageTag = serde_json::from_str("\"de-CH\"").unwrap();
        assert_eq!(serde_json::to_string(&tag).unwrap(), "\"de-CH\"");
        assert!(serde_json::from_str::<LanguageTag>("\"en-US-US\"").is_err());
    }
}
