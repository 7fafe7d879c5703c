// crates/gazetteer-core/src/lib.rs

//! # gazetteer-core
//!
//! Linked Places Format (LPF) data model for aggregating place records
//! from historical gazetteers: multilingual names with romanizations,
//! descriptions, country codes and GeoJSON geometry, plus the LPF
//! `FeatureCollection` reader and writer.
//!
//! ```rust
//! use gazetteer_core::{CountryRegistry, Feature, PlaceDraft};
//! use gazetteer_core::lpf::{dumps, DumpOptions};
//!
//! let registry = CountryRegistry::load_default().unwrap();
//! let draft = PlaceDraft {
//!     id: Some("zucchabar".into()),
//!     title: Some("Zucchabar".into()),
//!     ccodes: Some(vec!["Algeria".into()]),
//!     names: vec!["Zucchabar".into()],
//!     ..PlaceDraft::default()
//! };
//! let feature = Feature::from_draft(draft, &registry).unwrap();
//! assert_eq!(feature.names().get_names("zucchabar").len(), 1);
//!
//! let json = dumps([&feature], &DumpOptions::default()).unwrap();
//! assert!(json.contains(r#""ccodes":["DZ"]"#));
//! ```

pub mod catalog;
pub mod common;
pub mod countries;
pub mod error;
pub mod gazetteer; // Adapter boundary
pub mod language;
pub mod loader; // Country table + cache
pub mod lpf;
pub mod model;
pub mod romanize;
pub mod serialization;
pub mod spatial;
pub mod text;
pub mod traits;
// Raw country-table rows
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::catalog::{Catalog, RecordedHit};
pub use crate::common::CatalogStats;
pub use crate::countries::CountryRegistry;
pub use crate::error::{BackendError, GazetteerError, Result};
pub use crate::gazetteer::{
    default_mapper, FieldMapper, Gazetteer, GazetteerBackend, Gazetteers, SearchHit, SearchQuery,
    SearchResults,
};
pub use crate::language::LanguageTag;
pub use crate::lpf::DumpOptions;
pub use crate::romanize::{Romanizer, Romanizers};
pub use crate::serialization::{Serialization, ToValue, Transform};
pub use crate::spatial::{axes, bubble, BubbleOptions};
pub use crate::traits::{Keyed, LanguageAware};
pub use model::{
    Change, Description, DescriptionCollection, DescriptionInput, DescriptionRecord, Feature,
    FeatureGeometry, IndexedCollection, Name, NameCollection, NameInput, NameRecord, PlaceDraft,
    Properties, PropertiesRecord,
};
