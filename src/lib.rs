//! Workspace facade over [`gazetteer_core`], used by the demos.

pub use gazetteer_core::*;

pub mod prelude {
    pub use gazetteer_core::lpf::{self, DumpOptions};
    pub use gazetteer_core::{
        Catalog, Change, CountryRegistry, Feature, FeatureGeometry, Gazetteer, GazetteerBackend, GazetteerError,
        Gazetteers, LanguageAware, Name, NameCollection, PlaceDraft, Result, Romanizers, SearchQuery,
        Serialization,
    };
}
