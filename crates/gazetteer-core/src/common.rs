use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for a catalog.
///
/// Returned by [`Catalog::stats`](crate::Catalog::stats), these counts
/// reflect the places currently held in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub places: usize,
    pub names: usize,
    pub descriptions: usize,
    /// Places with at least one geometry.
    pub located: usize,
    /// Distinct country codes across all places.
    pub countries: usize,
}
