// crates/gazetteer-core/src/traits.rs
use crate::error::Result;
use crate::language::LanguageTag;

/// Capability of carrying a [`LanguageTag`].
///
/// Implementors hand out their tag field; the subtag accessors are
/// forwarded from it.
///
/// # Examples
/// ```rust
/// use gazetteer_core::{LanguageAware, Name};
///
/// let mut name = Name::new("Ῥώμη");
/// name.set_language_tag("grc").unwrap();
/// assert_eq!(name.language_tag(), "grc");
/// assert_eq!(name.script_subtag(), None);
/// ```
pub trait LanguageAware {
    fn language(&self) -> &LanguageTag;
    fn language_mut(&mut self) -> &mut LanguageTag;

    /// Canonical tag, `"und"` when unset.
    #[inline]
    fn language_tag(&self) -> &str {
        self.language().tag()
    }

    /// Validate and replace the tag.
    #[inline]
    fn set_language_tag(&mut self, value: &str) -> Result<()> {
        self.language_mut().set_tag(value)
    }

    #[inline]
    fn language_subtag(&self) -> Option<&str> {
        self.language().language_subtag()
    }

    #[inline]
    fn script_subtag(&self) -> Option<&str> {
        self.language().script_subtag()
    }

    #[inline]
    fn region_subtag(&self) -> Option<&str> {
        self.language().region_subtag()
    }
}

/// An entry that can live in an [`IndexedCollection`](crate::model::IndexedCollection).
pub trait Keyed {
    /// Content-derived key used for de-duplication.
    fn make_key(&self) -> String;

    /// Terms under which the entry is reachable in the inverted index.
    fn index_terms(&self) -> Vec<String>;
}
