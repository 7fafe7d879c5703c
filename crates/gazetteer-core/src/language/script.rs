// crates/gazetteer-core/src/language/script.rs

//! Script detection for toponyms.

use once_cell::sync::Lazy;
use regex::Regex;

/// ISO 15924 code -> Unicode script property name, in detection order.
///
/// Latin comes first so that strings made only of Common characters
/// (digits, punctuation) are reported as `Latn`.
const SCRIPT_PROPERTIES: &[(&str, &str)] = &[
    ("Latn", "Latin"),
    ("Grek", "Greek"),
    ("Cyrl", "Cyrillic"),
    ("Arab", "Arabic"),
    ("Hebr", "Hebrew"),
    ("Armn", "Armenian"),
    ("Geor", "Georgian"),
    ("Copt", "Coptic"),
    ("Syrc", "Syriac"),
    ("Phnx", "Phoenician"),
    ("Brah", "Brahmi"),
    ("Hani", "Han"),
    ("Armi", "Imperial_Aramaic"),
    ("Avst", "Avestan"),
    ("Cari", "Carian"),
    ("Cprt", "Cypriot"),
    ("Deva", "Devanagari"),
    ("Egyp", "Egyptian_Hieroglyphs"),
    ("Ethi", "Ethiopic"),
    ("Glag", "Glagolitic"),
    ("Goth", "Gothic"),
    ("Hang", "Hangul"),
    ("Hira", "Hiragana"),
    ("Ital", "Old_Italic"),
    ("Kana", "Katakana"),
    ("Khar", "Kharoshthi"),
    ("Linb", "Linear_B"),
    ("Lyci", "Lycian"),
    ("Lydi", "Lydian"),
    ("Mand", "Mandaic"),
    ("Nbat", "Nabataean"),
    ("Ogam", "Ogham"),
    ("Orkh", "Old_Turkic"),
    ("Palm", "Palmyrene"),
    ("Phli", "Inscriptional_Pahlavi"),
    ("Prti", "Inscriptional_Parthian"),
    ("Runr", "Runic"),
    ("Samr", "Samaritan"),
    ("Sarb", "Old_South_Arabian"),
    ("Sogd", "Sogdian"),
    ("Tfng", "Tifinagh"),
    ("Thaa", "Thaana"),
    ("Thai", "Thai"),
    ("Tibt", "Tibetan"),
    ("Ugar", "Ugaritic"),
    ("Xpeo", "Old_Persian"),
    ("Xsux", "Cuneiform"),
];

static SCRIPT_MATCHERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SCRIPT_PROPERTIES
        .iter()
        .map(|(code, property)| {
            let pattern = format!(r"^[\s\p{{Common}}\p{{Inherited}}\p{{{property}}}]+$");
            let rx = Regex::new(&pattern).expect("script property patterns are static");
            (*code, rx)
        })
        .collect()
});

/// Returns the ISO 15924 code of the single script `s` is written in.
///
/// Whitespace, Common and Inherited characters are allowed alongside the
/// script. Mixed-script or empty strings yield `None`.
pub fn detect_script(s: &str) -> Option<&'static str> {
    SCRIPT_MATCHERS
        .iter()
        .find(|(_, rx)| rx.is_match(s))
        .map(|(code, _)| *code)
}

/// True when `s` is written entirely in Latin script.
pub fn is_latn(s: &str) -> bool {
    // index 0 is Latin, see SCRIPT_PROPERTIES
    SCRIPT_MATCHERS[0].1.is_match(s)
}
