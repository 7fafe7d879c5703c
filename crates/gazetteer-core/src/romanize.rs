// crates/gazetteer-core/src/romanize.rs

//! # Romanization
//!
//! The transliteration engines live outside this crate. This module holds
//! the registry they are plugged into and the policy deciding which
//! engines run for a toponym and which of their results are kept.
//!
//! ```rust
//! use gazetteer_core::romanize::{romanize, Romanizers};
//!
//! let mut engines = Romanizers::new();
//! engines.register("pinyin", |_: &str, _: Option<&str>| vec!["běijīng".to_string()]);
//!
//! let found = romanize("北京", Some("zh"), &engines).unwrap();
//! assert!(found.contains("běijīng"));
//! assert!(found.contains("bei\u{030C}iji\u{0304}ng"));
//! ```

use crate::error::{GazetteerError, Result};
use crate::language::{detect_script, is_latn};
use crate::text::slugify_with;
use indexmap::{IndexMap, IndexSet};
use unicode_normalization::UnicodeNormalization;

/// A transliteration engine.
pub trait Romanizer {
    /// Candidate Latin renderings of `text`. `language` is the ISO 639
    /// language subtag when known.
    fn romanize(&self, text: &str, language: Option<&str>) -> Vec<String>;
}

impl<F> Romanizer for F
where
    F: Fn(&str, Option<&str>) -> Vec<String>,
{
    fn romanize(&self, text: &str, language: Option<&str>) -> Vec<String> {
        self(text, language)
    }
}

/// Engines by identifier (`"grc"`, `"pinyin"`, `"iuliia"`, ...).
#[derive(Default)]
pub struct Romanizers {
    engines: IndexMap<String, Box<dyn Romanizer>>,
}

impl Romanizers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>, engine: impl Romanizer + 'static) {
        self.engines.insert(id.into(), Box::new(engine));
    }

    pub fn get(&self, id: &str) -> Option<&dyn Romanizer> {
        self.engines.get(id).map(|e| e.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

impl std::fmt::Debug for Romanizers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Romanizers")
            .field("engines", &self.engines.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Engines invoked for a script, given the language subtag.
///
/// `Latn` needs none. Scripts without a rule are [`GazetteerError::Unsupported`].
pub fn engines_for(script: &str, language: Option<&str>) -> Result<Vec<&'static str>> {
    let engines = match (script, language) {
        ("Latn", _) => vec![],
        ("Arab", Some("ar")) => vec!["ara", "romanov"],
        ("Arab", _) => vec![],
        ("Armn", Some("hy")) => vec!["arm", "hy-translit"],
        ("Armn", _) => vec!["arm"],
        ("Brah", _) => vec!["brh"],
        ("Copt", _) => vec!["cop"],
        ("Cyrl", Some("ru")) => vec!["ru-translit", "iuliia"],
        ("Cyrl", _) => vec!["iuliia"],
        ("Geor", _) => vec!["ka-translit"],
        ("Grek", _) => vec!["grc", "el-translit"],
        ("Hani", _) => vec!["pinyin"],
        ("Hebr", _) => vec!["heb"],
        ("Phnx", _) => vec!["phn"],
        ("Syrc", _) => vec!["syc"],
        (other, _) => {
            return Err(GazetteerError::Unsupported(format!(
                "no romanization rule for script {other}"
            )))
        }
    };
    Ok(engines)
}

/// Latin-script candidates for `text`.
///
/// Latin input is kept as is, other scripts go through the engines chosen
/// by [`engines_for`]. A space-separated ASCII slug of the text is always
/// added, the set is closed under the four Unicode normal forms and
/// anything not in Latin script is dropped.
pub fn romanize(text: &str, language: Option<&str>, engines: &Romanizers) -> Result<IndexSet<String>> {
    let mut found: IndexSet<String> = IndexSet::new();

    if let Some(script) = detect_script(text) {
        if script == "Latn" {
            found.insert(text.to_string());
        }
        for id in engines_for(script, language)? {
            let Some(engine) = engines.get(id) else {
                log::warn!("romanization engine '{id}' is not registered, skipping");
                continue;
            };
            for candidate in engine.romanize(text, language) {
                if let Some(kept) = check_candidate(id, candidate) {
                    found.insert(kept);
                }
            }
        }
    }

    let slug = slugify_with(text, " ", false);
    if !slug.is_empty() {
        found.insert(slug);
    }

    let mut closed = IndexSet::new();
    for s in &found {
        closed.insert(s.clone());
        closed.insert(s.nfc().collect::<String>());
        closed.insert(s.nfd().collect::<String>());
        closed.insert(s.nfkc().collect::<String>());
        closed.insert(s.nfkd().collect::<String>());
    }
    closed.retain(|s| !s.is_empty() && is_latn(s));
    Ok(closed)
}

fn check_candidate(engine: &str, candidate: String) -> Option<String> {
    if candidate.is_empty() || engine != "grc" || is_latn(&candidate) {
        return Some(candidate);
    }
    // iota with tonos survives the grc engine
    if candidate.contains('\u{03AF}') {
        return Some(candidate.replace('\u{03AF}', "\u{00ED}"));
    }
    log::error!("engine 'grc' produced a romanization containing non-Latin characters: {candidate}");
    None
}
