// crates/gazetteer-core/src/text.rs

//! String normalization shared by every model field.
//!
//! Two families live here:
//! - [`normalize`] cleans a value for storage (NFC + whitespace collapse).
//! - [`slugify`] / [`slugify_with`] build ASCII keys using `deunicode`
//!   transliteration, as used for collection keys and file names.

use unicode_normalization::UnicodeNormalization;

/// Unicode-normalize (NFC) and collapse whitespace.
///
/// Every run of whitespace becomes a single ASCII space and the result is
/// trimmed, so all-whitespace input yields `""`. The function is idempotent.
///
/// # Examples
///
/// ```rust
/// use gazetteer_core::text::normalize;
///
/// assert_eq!(normalize("  Moon\t town \n"), "Moon town");
/// assert_eq!(normalize("    \t"), "");
/// ```
pub fn normalize(s: &str) -> String {
    let composed: String = s.nfc().collect();
    let mut out = String::with_capacity(composed.len());
    for word in composed.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Normalize and treat an empty result as absent.
pub fn normalize_opt(s: &str) -> Option<String> {
    let v = normalize(s);
    (!v.is_empty()).then_some(v)
}

/// Convert a string into a lowercase, dash-separated ASCII slug.
///
/// # Examples
///
/// ```rust
/// use gazetteer_core::text::slugify;
///
/// assert_eq!(slugify("Łódź"), "lodz");
/// assert_eq!(slugify("  Zucchabar / Miliana "), "zucchabar-miliana");
/// ```
pub fn slugify(s: &str) -> String {
    slugify_with(s, "-", true)
}

/// Slug with an explicit separator and case policy.
///
/// Non-alphanumeric runs collapse to a single `separator`; leading and
/// trailing separators are dropped.
pub fn slugify_with(s: &str, separator: &str, lowercase: bool) -> String {
    let ascii = deunicode::deunicode(s);
    let mut out = String::with_capacity(ascii.len());
    let mut pending = false;
    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending && !out.is_empty() {
                out.push_str(separator);
            }
            pending = false;
            if lowercase {
                out.push(ch.to_ascii_lowercase());
            } else {
                out.push(ch);
            }
        } else {
            pending = true;
        }
    }
    out
}

/// Case-insensitive key used for the fallback tiers of name lookups.
#[inline]
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("Moontown", "Moontown")]
    #[case("  Brownsboro  ", "Brownsboro")]
    #[case("a \u{00A0}\t b", "a b")]
    #[case("", "")]
    #[case("\n\t ", "")]
    fn normalize_collapses_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn normalize_composes_combining_marks() {
        // 'e' + COMBINING ACUTE ACCENT
        assert_eq!(normalize("Pe\u{0301}kin"), "P\u{00E9}kin");
    }

    #[test]
    fn normalize_opt_drops_empty() {
        assert_eq!(normalize_opt("   "), None);
        assert_eq!(normalize_opt(" fish001 "), Some("fish001".to_string()));
    }

    #[rstest]
    #[case("foo", "foo")]
    #[case("Foo", "foo")]
    #[case("Straße", "strasse")]
    #[case("--Athens, Greece--", "athens-greece")]
    #[case("!!!", "")]
    fn slugify_produces_ascii_keys(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[test]
    fn slugify_with_keeps_case_and_separator() {
        assert_eq!(slugify_with("Pékin", " ", false), "Pekin");
        assert_eq!(slugify_with("Bei-Jing  shi", " ", false), "Bei Jing shi");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "\\PC*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn slugs_are_key_safe(s in "\\PC*") {
            let slug = slugify(&s);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        }
    }
}
