// crates/gazetteer-core/src/catalog.rs

//! # Place catalog
//!
//! An insertion-ordered set of [`Feature`]s keyed by string, filled from
//! gazetteers by [`Catalog::accession`] or from disk by
//! [`Catalog::load_dir`], and written back out as LPF files.

use crate::common::CatalogStats;
use crate::countries::CountryRegistry;
use crate::error::{GazetteerError, Result};
use crate::gazetteer::{Gazetteer, Gazetteers, SearchHit, SearchQuery, SearchResults};
use crate::loader::common_io::{create_stream, open_stream, CompressionMode};
use crate::lpf::{self, DumpOptions};
use crate::model::{Change, Feature};
use crate::text::slugify;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A search hit tagged with the gazetteer that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedHit {
    #[serde(rename = "gazetteer_name")]
    pub gazetteer: String,
    #[serde(flatten)]
    pub hit: SearchHit,
}

#[derive(Debug, Default)]
pub struct Catalog {
    places: IndexMap<String, Feature>,
    hits: IndexMap<String, IndexMap<String, SearchHit>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // PLACES
    // -------------------------------------------------------------------------

    /// Fetch `ids` from `gazetteer` and store each place under the slug of
    /// its title. The place's `id` is set to its key. Nothing is stored
    /// unless every id is fetched and built.
    pub fn accession<S: AsRef<str>>(
        &mut self,
        gazetteer: &Gazetteer,
        ids: &[S],
        registry: &CountryRegistry,
    ) -> Result<Vec<SearchHit>> {
        let mut staged: IndexMap<String, Feature> = IndexMap::with_capacity(ids.len());
        let mut hits = Vec::with_capacity(ids.len());
        for id in ids {
            let mut place = gazetteer.get(id.as_ref(), registry)?;
            let mut base = slugify(place.title());
            if base.is_empty() {
                base = slugify(id.as_ref());
            }
            let key = self.free_key(&base, &staged);
            place.set_id(&key);
            log::debug!("accessioned {} from {} as '{key}'", id.as_ref(), gazetteer.name());
            hits.push(hit_for(&key, &place));
            staged.insert(key, place);
        }
        self.places.extend(staged);
        Ok(hits)
    }

    /// Store `place` under its id, else the slug of its title, else its
    /// internal id. Collisions get a numeric suffix.
    pub fn insert(&mut self, place: Feature) -> String {
        let base = match place.id() {
            Some(id) => id.to_string(),
            None => match slugify(place.title()) {
                slug if slug.is_empty() => place.internal_id().to_string(),
                slug => slug,
            },
        };
        let key = self.free_key(&base, &IndexMap::new());
        self.places.insert(key.clone(), place);
        key
    }

    fn is_taken(&self, key: &str, staged: &IndexMap<String, Feature>) -> bool {
        self.places.contains_key(key) || staged.contains_key(key)
    }

    fn free_key(&self, base: &str, staged: &IndexMap<String, Feature>) -> String {
        if !self.is_taken(base, staged) {
            return base.to_string();
        }
        (1..)
            .map(|i| format!("{base}-{i}"))
            .find(|candidate| !self.is_taken(candidate, staged))
            .unwrap_or_else(|| base.to_string())
    }

    pub fn get_place(&self, key: &str) -> Result<&Feature> {
        self.places.get(key).ok_or_else(|| not_found(key))
    }

    pub fn get_place_mut(&mut self, key: &str) -> Result<&mut Feature> {
        self.places.get_mut(key).ok_or_else(|| not_found(key))
    }

    pub fn remove(&mut self, key: &str) -> Result<Feature> {
        self.places.shift_remove(key).ok_or_else(|| not_found(key))
    }

    /// Apply `change` to the place under `key` and return its key
    /// afterwards. Changing the id moves the place to the new key.
    pub fn change(&mut self, key: &str, change: Change) -> Result<String> {
        if !self.places.contains_key(key) {
            return Err(not_found(key));
        }
        match change {
            Change::Id(id) => {
                let mut renamed = Feature::new();
                renamed.set_id(&id);
                let new_key = renamed
                    .id()
                    .map(str::to_string)
                    .ok_or_else(|| GazetteerError::InvalidData("place id cannot be blank".into()))?;
                if new_key != key && self.places.contains_key(&new_key) {
                    return Err(GazetteerError::InvalidData(format!(
                        "key '{new_key}' is already in use"
                    )));
                }
                let mut place = self.places.shift_remove(key).ok_or_else(|| not_found(key))?;
                place.set_id(&new_key);
                self.places.insert(new_key.clone(), place);
                Ok(new_key)
            }
            other => {
                self.get_place_mut(key)?.apply(other)?;
                Ok(key.to_string())
            }
        }
    }

    /// One hit per place, sorted by title slug.
    pub fn internal(&self) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self.places.iter().map(|(k, p)| hit_for(k, p)).collect();
        hits.sort_by_cached_key(|h| slugify(&h.title));
        hits
    }

    pub fn stats(&self) -> CatalogStats {
        let countries: IndexSet<&str> = self
            .places
            .values()
            .flat_map(|p| p.properties().ccodes().iter().map(String::as_str))
            .collect();
        CatalogStats {
            places: self.places.len(),
            names: self.places.values().map(|p| p.names().len()).sum(),
            descriptions: self.places.values().map(|p| p.descriptions().len()).sum(),
            located: self.places.values().filter(|p| !p.geometry().is_empty()).count(),
            countries: countries.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.places.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Feature)> {
        self.places.iter().map(|(k, p)| (k.as_str(), p))
    }

    // -------------------------------------------------------------------------
    // SEARCH
    // -------------------------------------------------------------------------

    /// Run `query` against the named gazetteer and remember its hits.
    pub fn search(&mut self, gazetteers: &Gazetteers, name: &str, query: &SearchQuery) -> Result<SearchResults> {
        let results = gazetteers.get(name)?.search(query)?;
        let recorded = self.hits.entry(name.to_string()).or_default();
        for hit in &results.hits {
            recorded.insert(hit.id.clone(), hit.clone());
        }
        Ok(results)
    }

    /// Every remembered hit, sorted by gazetteer name then title slug.
    ///
    /// Hits are remembered per gazetteer by id. Within one gazetteer, hits
    /// whose titles share a slug collapse to the one recorded last; the
    /// same title from two gazetteers is listed once for each.
    pub fn search_results(&self) -> Vec<RecordedHit> {
        let mut all = Vec::new();
        for (gazetteer, hits) in &self.hits {
            let mut by_slug: IndexMap<String, &SearchHit> = IndexMap::new();
            for hit in hits.values() {
                by_slug.insert(slugify(&hit.title), hit);
            }
            all.extend(by_slug.into_iter().map(|(slug, hit)| {
                (
                    slug,
                    RecordedHit {
                        gazetteer: gazetteer.clone(),
                        hit: hit.clone(),
                    },
                )
            }));
        }
        all.sort_by(|(a_slug, a), (b_slug, b)| (&a.gazetteer, a_slug).cmp(&(&b.gazetteer, b_slug)));
        all.into_iter().map(|(_, recorded)| recorded).collect()
    }

    pub fn clear_search_results(&mut self) {
        self.hits.clear();
    }

    // -------------------------------------------------------------------------
    // FILES
    // -------------------------------------------------------------------------

    /// Write every place into one `FeatureCollection` file.
    pub fn save_all(&self, path: &Path, opts: &DumpOptions) -> Result<usize> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = create_stream(path, CompressionMode::for_path(path))?;
        lpf::dump(self.places.values(), &mut writer, opts)?;
        writer.flush()?;
        log::debug!("saved {} places to {}", self.places.len(), path.display());
        Ok(self.places.len())
    }

    /// Write one file per place, named `<slug(key)>.json`. Keys whose slugs
    /// clash (or are empty) get `-1`, `-2`, ... so no file is written twice.
    pub fn save_each(&self, dir: &Path, opts: &DumpOptions) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut stems: IndexSet<String> = IndexSet::with_capacity(self.places.len());
        let mut written = Vec::with_capacity(self.places.len());
        for (key, place) in &self.places {
            let stem = file_stem(key, &stems);
            if stem != slugify(key) {
                log::debug!("place '{key}' saved as {stem}.json");
            }
            let path = dir.join(format!("{stem}.json"));
            stems.insert(stem);
            let mut writer = create_stream(&path, CompressionMode::None)?;
            lpf::dump(std::iter::once(place), &mut writer, opts)?;
            writer.flush()?;
            written.push(path);
        }
        Ok(written)
    }

    /// Read every `*.json` file in `dir` (in file-name order). Each place
    /// takes the first free key of: its id, its title slug,
    /// `<slug(file stem)>:<id>`. Nothing is stored unless every file loads.
    pub fn load_dir(&mut self, dir: &Path, registry: &CountryRegistry) -> Result<usize> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")))
            .collect();
        paths.sort();

        let mut staged: IndexMap<String, Feature> = IndexMap::new();
        for path in paths {
            let reader = open_stream(&path, CompressionMode::None)?;
            let stem = path
                .file_stem()
                .map(|s| slugify(&s.to_string_lossy()))
                .unwrap_or_default();
            for place in lpf::load_features(reader, registry)? {
                let key = self.load_key(&place, &stem, &staged).ok_or_else(|| {
                    GazetteerError::InvalidData(format!(
                        "no free key for place '{}' in {}",
                        place.title(),
                        path.display()
                    ))
                })?;
                staged.insert(key, place);
            }
        }
        let loaded = staged.len();
        self.places.extend(staged);
        log::debug!("loaded {loaded} places from {}", dir.display());
        Ok(loaded)
    }

    fn load_key(&self, place: &Feature, stem: &str, staged: &IndexMap<String, Feature>) -> Option<String> {
        let candidates = [
            place.id().map(str::to_string),
            Some(slugify(place.title())),
            place.id().map(|id| format!("{stem}:{id}")),
        ];
        candidates
            .into_iter()
            .flatten()
            .find(|k| !k.is_empty() && !self.is_taken(k, staged))
    }
}

/// `slug(key)`, or `place` when that is empty, suffixed until unused.
fn file_stem(key: &str, used: &IndexSet<String>) -> String {
    let base = match slugify(key) {
        slug if slug.is_empty() => "place".to_string(),
        slug => slug,
    };
    if !used.contains(&base) {
        return base;
    }
    (1..)
        .map(|i| format!("{base}-{i}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| base.clone())
}

fn hit_for(key: &str, place: &Feature) -> SearchHit {
    SearchHit {
        id: key.to_string(),
        uri: place.uri().map(str::to_string),
        title: place.title().to_string(),
        summary: place
            .descriptions()
            .first()
            .map(|d| d.value().to_string())
            .unwrap_or_default(),
    }
}

fn not_found(key: &str) -> GazetteerError {
    GazetteerError::NotFound(format!("place '{key}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BackendError;
    use crate::gazetteer::{default_mapper, GazetteerBackend};
    use rstest::{fixture, rstest};
    use serde_json::{json, Value};
    use tempfile::tempdir;

    struct Fixed;

    impl GazetteerBackend for Fixed {
        fn get(&self, id: &str) -> std::result::Result<Value, BackendError> {
            let title = match id {
                "1" | "3" => "Zucchabar",
                "2" => "Oxyrhynchus",
                _ => return Err(format!("no place {id}").into()),
            };
            Ok(json!({
                "title": title,
                "uri": format!("https://pleiades.stoa.org/places/{id}"),
                "descriptions": ["An ancient place"],
                "ccodes": ["DZ"],
                "geometry": {"type": "Point", "coordinates": [2.2, 36.3]}
            }))
        }

        fn search(&self, query: &SearchQuery) -> std::result::Result<SearchResults, BackendError> {
            let hits = if query.text.iter().any(|t| t == "zucchabar") {
                vec![
                    SearchHit { id: "1".into(), title: "Zucchabar".into(), ..SearchHit::default() },
                    SearchHit { id: "3".into(), title: "zucchabar".into(), ..SearchHit::default() },
                ]
            } else {
                vec![
                    SearchHit { id: "b".into(), title: "Beta".into(), ..SearchHit::default() },
                    SearchHit { id: "a".into(), title: "Alpha".into(), ..SearchHit::default() },
                ]
            };
            Ok(SearchResults { hits, query: query.clone() })
        }
    }

    #[fixture]
    fn registry() -> CountryRegistry {
        CountryRegistry::load_default().unwrap()
    }

    #[fixture]
    fn gazetteers() -> Gazetteers {
        let mut all = Gazetteers::new();
        for name in ["pleiades", "idai"] {
            let mut g = Gazetteer::new(name, default_mapper);
            g.configure_backend("web", Fixed);
            g.set_backend("web").unwrap();
            all.register(g);
        }
        all
    }

    fn place(title: &str) -> Feature {
        let mut f = Feature::new();
        f.properties_mut().set_title(title);
        f
    }

    #[rstest]
    fn accession_keys_by_title_slug(registry: CountryRegistry, gazetteers: Gazetteers) {
        let mut catalog = Catalog::new();
        let g = gazetteers.get("pleiades").unwrap();
        let hits = catalog.accession(g, &["1", "2", "3"], &registry).unwrap();
        let keys: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(keys, vec!["zucchabar", "oxyrhynchus", "zucchabar-1"]);
        assert_eq!(hits[0].summary, "An ancient place");
        assert_eq!(catalog.get_place("zucchabar-1").unwrap().id(), Some("zucchabar-1"));
    }

    #[rstest]
    fn accession_propagates_backend_errors(registry: CountryRegistry, gazetteers: Gazetteers) {
        let mut catalog = Catalog::new();
        let g = gazetteers.get("pleiades").unwrap();
        let err = catalog.accession(g, &["9"], &registry).unwrap_err();
        assert_eq!(err.to_string(), "no place 9");
        assert!(catalog.is_empty());
    }

    #[rstest]
    fn failed_accession_stores_nothing(registry: CountryRegistry, gazetteers: Gazetteers) {
        let mut catalog = Catalog::new();
        catalog.insert(place("Oxyrhynchus"));
        let g = gazetteers.get("pleiades").unwrap();
        assert!(catalog.accession(g, &["1", "2", "9"], &registry).is_err());
        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["oxyrhynchus"]);

        let hits = catalog.accession(g, &["1", "2"], &registry).unwrap();
        assert_eq!(hits[1].id, "oxyrhynchus-1");
    }

    #[test]
    fn insert_prefers_id_then_title() {
        let mut catalog = Catalog::new();
        let mut with_id = place("Roma");
        with_id.set_id("rome");
        assert_eq!(catalog.insert(with_id), "rome");
        assert_eq!(catalog.insert(place("Roma")), "roma");
        assert_eq!(catalog.insert(place("Roma")), "roma-1");
        let anonymous = place("");
        let internal = anonymous.internal_id().to_string();
        assert_eq!(catalog.insert(anonymous), internal);
    }

    #[test]
    fn unknown_keys_are_not_found() {
        let mut catalog = Catalog::new();
        assert!(matches!(catalog.get_place("x"), Err(GazetteerError::NotFound(_))));
        assert!(matches!(catalog.remove("x"), Err(GazetteerError::NotFound(_))));
        assert!(matches!(
            catalog.change("x", Change::Title("y".into())),
            Err(GazetteerError::NotFound(_))
        ));
    }

    #[test]
    fn change_id_rekeys() {
        let mut catalog = Catalog::new();
        let a = catalog.insert(place("Alpha"));
        let b = catalog.insert(place("Beta"));
        assert_eq!(catalog.change(&a, Change::Id("alef".into())).unwrap(), "alef");
        assert_eq!(catalog.get_place("alef").unwrap().id(), Some("alef"));
        assert!(catalog.get_place(&a).is_err());
        assert!(matches!(
            catalog.change(&b, Change::Id("alef".into())),
            Err(GazetteerError::InvalidData(_))
        ));
        catalog.change(&b, Change::Title("Bet".into())).unwrap();
        assert_eq!(catalog.get_place(&b).unwrap().title(), "Bet");
    }

    #[test]
    fn internal_is_sorted_by_title() {
        let mut catalog = Catalog::new();
        catalog.insert(place("Gamma"));
        catalog.insert(place("alpha"));
        catalog.insert(place("Beta"));
        let titles: Vec<String> = catalog.internal().into_iter().map(|h| h.title).collect();
        assert_eq!(titles, vec!["alpha", "Beta", "Gamma"]);
    }

    #[rstest]
    fn stats_count_contents(registry: CountryRegistry, gazetteers: Gazetteers) {
        let mut catalog = Catalog::new();
        catalog
            .accession(gazetteers.get("idai").unwrap(), &["1", "2"], &registry)
            .unwrap();
        catalog.insert(place("Nowhere"));
        let stats = catalog.stats();
        assert_eq!(stats.places, 3);
        assert_eq!(stats.descriptions, 2);
        assert_eq!(stats.located, 2);
        assert_eq!(stats.countries, 1);
    }

    #[rstest]
    fn search_results_sorted_by_gazetteer_then_title(gazetteers: Gazetteers) {
        let mut catalog = Catalog::new();
        let q = SearchQuery::text(["x"]);
        catalog.search(&gazetteers, "pleiades", &q).unwrap();
        catalog.search(&gazetteers, "idai", &q).unwrap();
        catalog.search(&gazetteers, "idai", &q).unwrap();
        let results = catalog.search_results();
        let order: Vec<(&str, &str)> = results
            .iter()
            .map(|r| (r.gazetteer.as_str(), r.hit.id.as_str()))
            .collect();
        assert_eq!(order, vec![("idai", "a"), ("idai", "b"), ("pleiades", "a"), ("pleiades", "b")]);
        assert!(catalog.search(&gazetteers, "vici", &q).is_err());
    }

    #[rstest]
    fn search_results_collapse_titles_per_gazetteer(gazetteers: Gazetteers) {
        let mut catalog = Catalog::new();
        let q = SearchQuery::text(["zucchabar"]);
        let results = catalog.search(&gazetteers, "pleiades", &q).unwrap();
        assert_eq!(results.hits.len(), 2);
        catalog.search(&gazetteers, "idai", &q).unwrap();

        let recorded = catalog.search_results();
        let order: Vec<(&str, &str)> = recorded
            .iter()
            .map(|r| (r.gazetteer.as_str(), r.hit.id.as_str()))
            .collect();
        assert_eq!(order, vec![("idai", "3"), ("pleiades", "3")]);
    }

    #[test]
    fn recorded_hits_carry_gazetteer_name() {
        let hit = RecordedHit {
            gazetteer: "pleiades".into(),
            hit: SearchHit { id: "1".into(), title: "A".into(), ..SearchHit::default() },
        };
        let v = serde_json::to_value(&hit).unwrap();
        assert_eq!(v["gazetteer_name"], "pleiades");
        assert_eq!(v["id"], "1");
    }

    #[rstest]
    fn save_each_then_load_dir(registry: CountryRegistry) {
        let dir = tempdir().unwrap();
        let mut catalog = Catalog::new();
        let mut a = place("Alpha");
        a.set_id("alpha");
        catalog.insert(a);
        catalog.insert(place("Beta"));
        let written = catalog.save_each(dir.path(), &DumpOptions::pretty(4)).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("alpha.json").exists());

        let mut back = Catalog::new();
        assert_eq!(back.load_dir(dir.path(), &registry).unwrap(), 2);
        assert_eq!(back.get_place("alpha").unwrap().title(), "Alpha");
        assert_eq!(back.get_place("beta").unwrap().id(), None);

        // A place without an id has no fallback once its title slug is taken.
        assert!(back.load_dir(dir.path(), &registry).is_err());
        assert_eq!(back.len(), 2);
    }

    #[rstest]
    fn save_each_never_overwrites(registry: CountryRegistry) {
        let dir = tempdir().unwrap();
        let mut catalog = Catalog::new();
        for id in ["Roma", "roma", "set-one:p1", "set-one-p1", "***"] {
            let mut p = place(id);
            p.set_id(id);
            catalog.insert(p);
        }
        let written = catalog.save_each(dir.path(), &DumpOptions::default()).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["roma.json", "roma-1.json", "set-one-p1.json", "set-one-p1-1.json", "place.json"]
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 5);

        let mut back = Catalog::new();
        assert_eq!(back.load_dir(dir.path(), &registry).unwrap(), 5);
        assert!(back.get_place("roma").is_ok());
        assert!(back.get_place("Roma").is_ok());
    }

    #[rstest]
    fn failed_load_dir_stores_nothing(registry: CountryRegistry) {
        let dir = tempdir().unwrap();
        let mut a = place("Alpha");
        a.set_id("alpha");
        fs::write(dir.path().join("a.json"), lpf::dumps([&a], &DumpOptions::default()).unwrap()).unwrap();
        fs::write(dir.path().join("b.json"), "{ not json").unwrap();

        let mut catalog = Catalog::new();
        assert!(catalog.load_dir(dir.path(), &registry).is_err());
        assert!(catalog.is_empty());
    }

    #[rstest]
    fn save_all_writes_one_collection(registry: CountryRegistry) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("all.json");
        let mut catalog = Catalog::new();
        catalog.insert(place("Alpha"));
        catalog.insert(place("Beta"));
        let opts = DumpOptions { indent: Some(4), sort_keys: true };
        assert_eq!(catalog.save_all(&path, &opts).unwrap(), 2);
        let features = lpf::load_features(fs::File::open(&path).unwrap(), &registry).unwrap();
        assert_eq!(features.len(), 2);
    }

    #[rstest]
    fn load_dir_falls_back_to_stem_and_id(registry: CountryRegistry) {
        let dir = tempdir().unwrap();
        let mut a = place("Alpha");
        a.set_id("p1");
        let mut b = place("Alpha");
        b.set_id("p1");
        let mut c = place("Alpha");
        c.set_id("p1");
        fs::write(dir.path().join("Set One.json"), lpf::dumps([&a, &b, &c], &DumpOptions::default()).unwrap()).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut catalog = Catalog::new();
        assert_eq!(catalog.load_dir(dir.path(), &registry).unwrap(), 3);
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, vec!["p1", "alpha", "set-one:p1"]);
    }
}
