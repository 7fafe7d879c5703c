// crates/gazetteer-core/src/model/mod.rs
pub mod collection;
pub mod description;
pub mod draft;
pub mod feature;
pub mod geometry;
pub mod name;
pub mod properties;

pub use collection::{IndexedCollection, TermIndex};
pub use description::{Description, DescriptionCollection, DescriptionInput, DescriptionRecord};
pub use draft::PlaceDraft;
pub use feature::{validate_uri, Change, Feature};
pub use geometry::FeatureGeometry;
pub use name::{Name, NameCollection, NameInput, NameRecord};
pub use properties::{Properties, PropertiesRecord};
