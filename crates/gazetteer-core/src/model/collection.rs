// crates/gazetteer-core/src/model/collection.rs
use crate::error::Result;
use crate::serialization::ToValue;
use crate::traits::Keyed;
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// Inverted index: term -> keys of the entries reachable through it.
pub type TermIndex = IndexMap<String, IndexSet<String>>;

/// Owned, insertion-ordered store of [`Keyed`] entries with an inverted index.
///
/// Keys come from [`Keyed::make_key`]. A collision never overwrites: the
/// entry is stored under `key-1`, `key-2`, ... instead. Suffixes per base
/// only grow, so a removed `key-1` is not handed out again.
/// Every term in the index maps to a non-empty set of present keys.
#[derive(Debug, Clone)]
pub struct IndexedCollection<T> {
    entries: IndexMap<String, T>,
    index: TermIndex,
    /// Highest suffix issued per base key.
    suffixes: IndexMap<String, usize>,
}

impl<T> Default for IndexedCollection<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            index: IndexMap::new(),
            suffixes: IndexMap::new(),
        }
    }
}

/// Equal when the stored entries and their index agree.
impl<T: PartialEq> PartialEq for IndexedCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries && self.index == other.index
    }
}

impl<T: Keyed> IndexedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `item` and return the key it was filed under.
    pub fn insert(&mut self, item: T) -> String {
        let base = item.make_key();
        let key = self.free_key(&base);
        if key != base {
            log::debug!("key collision on '{base}', storing as '{key}'");
        }
        for term in item.index_terms() {
            self.index.entry(term).or_default().insert(key.clone());
        }
        self.entries.insert(key.clone(), item);
        key
    }

    fn free_key(&mut self, base: &str) -> String {
        if !self.entries.contains_key(base) {
            return base.to_string();
        }
        let last = self.suffixes.entry(base.to_string()).or_insert(0);
        loop {
            *last += 1;
            let candidate = format!("{base}-{last}");
            if !self.entries.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Remove the entry stored under `key` and purge its index entries.
    pub fn remove_key(&mut self, key: &str) -> Option<T> {
        let item = self.entries.shift_remove(key)?;
        self.index.retain(|_, keys| {
            keys.shift_remove(key);
            !keys.is_empty()
        });
        Some(item)
    }

    /// Key of the first entry matching `pred`.
    pub fn find_key(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, item)| pred(item))
            .map(|(key, _)| key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys indexed under exactly `term`.
    pub fn lookup(&self, term: &str) -> Option<&IndexSet<String>> {
        self.index.get(term)
    }

    /// Collect the entries whose key is in `keys`, in insertion order.
    pub fn select<'a>(&'a self, keys: &IndexSet<String>) -> Vec<&'a T> {
        self.entries
            .iter()
            .filter(|(key, _)| keys.contains(key.as_str()))
            .map(|(_, item)| item)
            .collect()
    }

    pub fn index(&self) -> &TermIndex {
        &self.index
    }
}

impl<T> IndexedCollection<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.suffixes.clear();
    }
}

/// Serializes as the list of entries.
impl<T: ToValue> ToValue for IndexedCollection<T> {
    fn to_value(&self) -> Result<Value> {
        self.entries
            .values()
            .map(ToValue::to_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Word(&'static str);

    impl Keyed for Word {
        fn make_key(&self) -> String {
            self.0.to_lowercase()
        }

        fn index_terms(&self) -> Vec<String> {
            vec![self.0.to_string()]
        }
    }

    #[test]
    fn collisions_get_numeric_suffixes() {
        let mut c = IndexedCollection::new();
        assert_eq!(c.insert(Word("foo")), "foo");
        assert_eq!(c.insert(Word("Foo")), "foo-1");
        assert_eq!(c.insert(Word("FOO")), "foo-2");
        assert_eq!(c.len(), 3);
        assert_eq!(c.keys().collect::<Vec<_>>(), vec!["foo", "foo-1", "foo-2"]);
    }

    #[test]
    fn freed_suffix_is_not_reissued() {
        let mut c = IndexedCollection::new();
        c.insert(Word("foo"));
        c.insert(Word("Foo"));
        c.insert(Word("FOO"));
        c.remove_key("foo-1");
        c.remove_key("foo-2");
        assert_eq!(c.insert(Word("fOO")), "foo-3");
        assert_eq!(c.insert(Word("foO")), "foo-4");
    }

    #[test]
    fn suffix_skips_keys_taken_by_other_entries() {
        let mut c = IndexedCollection::new();
        c.insert(Word("foo-1"));
        c.insert(Word("foo"));
        assert_eq!(c.insert(Word("Foo")), "foo-2");
    }

    #[test]
    fn equality_ignores_issued_suffixes() {
        let mut a = IndexedCollection::new();
        a.insert(Word("foo"));
        a.insert(Word("Foo"));
        a.remove_key("foo-1");
        let mut b = IndexedCollection::new();
        b.insert(Word("foo"));
        assert_eq!(a, b);
    }

    #[test]
    fn removal_purges_index() {
        let mut c = IndexedCollection::new();
        c.insert(Word("foo"));
        c.insert(Word("bar"));
        assert!(c.lookup("foo").is_some());
        assert_eq!(c.remove_key("foo"), Some(Word("foo")));
        assert!(c.lookup("foo").is_none());
        assert!(c.index().values().all(|keys| !keys.is_empty()));
        assert!(c.remove_key("foo").is_none());
    }

    #[test]
    fn select_keeps_insertion_order() {
        let mut c = IndexedCollection::new();
        c.insert(Word("a"));
        c.insert(Word("b"));
        c.insert(Word("c"));
        let keys: IndexSet<String> = ["c".to_string(), "a".to_string()].into_iter().collect();
        assert_eq!(c.select(&keys), vec![&Word("a"), &Word("c")]);
    }
}
