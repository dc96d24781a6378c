//! Bounding-box prefilter.

use hashbrown::HashSet;

use super::RegionCatalog;
use crate::models::RegionId;

/// Narrows a query to the regions whose bounding box contains it.
///
/// Passing the filter is necessary but not sufficient for membership.
pub struct BoundingBoxFilter<'a> {
    catalog: &'a RegionCatalog,
}

impl<'a> BoundingBoxFilter<'a> {
    pub fn new(catalog: &'a RegionCatalog) -> Self {
        Self { catalog }
    }

    /// Identifiers of every region whose box contains (lon, lat), edges included
    pub fn candidates(&self, lon: f64, lat: f64) -> HashSet<RegionId> {
        self.catalog
            .iter()
            .filter(|(_, region)| region.bbox.contains(lon, lat))
            .map(|(id, _)| id)
            .collect()
    }
}
