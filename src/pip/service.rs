//! Classification service for assigning a point to a province.

use hashbrown::HashSet;
use tracing::debug;

use super::{BoundingBoxFilter, CrossingMode, CrossingTester, MatchResolver, RegionCatalog};
use crate::models::{ClassificationResult, CoordinateQuery, RegionId};

/// Point-in-province classification service
pub struct ClassifierService {
    catalog: RegionCatalog,
    mode: CrossingMode,
    tester: Box<dyn CrossingTester>,
}

impl ClassifierService {
    /// Create a new service over a loaded catalog
    pub fn new(catalog: RegionCatalog, mode: CrossingMode) -> Self {
        Self {
            catalog,
            mode,
            tester: mode.tester(),
        }
    }

    /// Classify one coordinate
    pub fn classify(&self, query: CoordinateQuery) -> ClassificationResult {
        let candidates = self.candidates(query.lon, query.lat);
        let inside = self.inside(query.lon, query.lat, &candidates);

        debug!(
            "Classify {} at ({}, {}): {} candidates, {} containing",
            query.sample_id,
            query.lon,
            query.lat,
            candidates.len(),
            inside.len()
        );

        MatchResolver::new(&self.catalog).resolve(query, &inside)
    }

    /// Regions whose bounding box contains the point
    pub fn candidates(&self, lon: f64, lat: f64) -> HashSet<RegionId> {
        BoundingBoxFilter::new(&self.catalog).candidates(lon, lat)
    }

    /// Subset of `candidates` the crossing test places the point inside
    pub fn inside(&self, lon: f64, lat: f64, candidates: &HashSet<RegionId>) -> HashSet<RegionId> {
        candidates
            .iter()
            .copied()
            .filter(|id| {
                self.catalog
                    .get(*id)
                    .is_some_and(|region| self.tester.is_inside(lon, lat, region))
            })
            .collect()
    }

    pub fn mode(&self) -> CrossingMode {
        self.mode
    }

    /// Get the catalog (for stats/debugging)
    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }
}
