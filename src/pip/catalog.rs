//! In-memory catalog of province boundaries.

use tracing::{debug, info};

use crate::error::CatalogError;
use crate::models::region::ring_from_pairs;
use crate::models::{BoundingBox, Region, RegionId, RegionRecord};

/// Immutable set of regions, built once before any query.
///
/// Regions are addressed by [`RegionId`], never by code.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    /// Build the catalog from source records, failing on the first
    /// incomplete record or short ring.
    pub fn build(records: Vec<RegionRecord>) -> Result<Self, CatalogError> {
        info!("Building region catalog from {} records...", records.len());

        let regions = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| region_from_record(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        let rings: usize = regions.iter().map(|r| r.rings.len()).sum();
        info!(
            "Region catalog built with {} regions, {} rings",
            regions.len(),
            rings
        );

        Ok(Self { regions })
    }

    /// Look up a region by identifier
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    pub fn bbox(&self, id: RegionId) -> Option<&BoundingBox> {
        self.get(id).map(|r| &r.bbox)
    }

    pub fn rings(&self, id: RegionId) -> Option<&[geo_types::LineString<f64>]> {
        self.get(id).map(|r| r.rings.as_slice())
    }

    /// Iterate over all regions with their identifiers, in load order
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, region)| (RegionId(i), region))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn region_from_record(index: usize, record: RegionRecord) -> Result<Region, CatalogError> {
    let label = record.describe(index);
    let missing = |field| CatalogError::MissingField {
        record: label.clone(),
        field,
    };

    let code = record.code.ok_or_else(|| missing("code"))?;
    let name = record.name.ok_or_else(|| missing("name"))?;
    let [first, second] = record.bbox.ok_or_else(|| missing("bbox"))?;
    if record.rings.is_empty() {
        return Err(missing("rings"));
    }

    for (i, ring) in record.rings.iter().enumerate() {
        if ring.len() < 2 {
            return Err(CatalogError::ShortRing {
                record: label,
                ring: i,
                points: ring.len(),
            });
        }
    }

    let rings = record
        .rings
        .iter()
        .map(|pairs| ring_from_pairs(pairs))
        .collect();

    let region = Region::new(
        code,
        name,
        record.id,
        BoundingBox::from_corners(first, second),
        rings,
    );
    debug!("Loaded region {} '{}'", region.label(), region.name);

    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str) -> RegionRecord {
        RegionRecord {
            id: Some(format!("test.{}", code)),
            code: Some(code.to_string()),
            name: Some(format!("{} province", code)),
            bbox: Some([[0.0, 0.0], [10.0, 10.0]]),
            rings: vec![vec![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0], [0.0, 0.0]]],
        }
    }

    #[test]
    fn test_build_assigns_ids_in_order() {
        let catalog = RegionCatalog::build(vec![record("A"), record("B")]).unwrap();
        assert_eq!(catalog.len(), 2);

        let ids: Vec<_> = catalog.iter().map(|(id, r)| (id.index(), r.code.clone())).collect();
        assert_eq!(ids, vec![(0, "A".to_string()), (1, "B".to_string())]);

        let (id, _) = catalog.iter().nth(1).unwrap();
        assert_eq!(catalog.bbox(id).unwrap().max_lat, 10.0);
        assert_eq!(catalog.rings(id).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_codes_are_kept() {
        let catalog = RegionCatalog::build(vec![record("A"), record("A")]).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_missing_fields_fail() {
        let mut no_code = record("A");
        no_code.code = None;
        let err = RegionCatalog::build(vec![no_code]).unwrap_err();
        assert!(matches!(err, CatalogError::MissingField { field: "code", .. }));

        let mut no_name = record("A");
        no_name.name = None;
        let err = RegionCatalog::build(vec![no_name]).unwrap_err();
        assert!(matches!(err, CatalogError::MissingField { field: "name", .. }));

        let mut no_bbox = record("A");
        no_bbox.bbox = None;
        let err = RegionCatalog::build(vec![no_bbox]).unwrap_err();
        assert!(matches!(err, CatalogError::MissingField { field: "bbox", .. }));

        let mut no_rings = record("A");
        no_rings.rings.clear();
        let err = RegionCatalog::build(vec![no_rings]).unwrap_err();
        assert!(matches!(err, CatalogError::MissingField { field: "rings", .. }));
    }

    #[test]
    fn test_short_ring_fails() {
        let mut short = record("A");
        short.rings.push(vec![[1.0, 1.0]]);
        let err = RegionCatalog::build(vec![record("B"), short]).unwrap_err();
        match err {
            CatalogError::ShortRing {
                record,
                ring,
                points,
            } => {
                assert_eq!(record, "record 1 (id test.A)");
                assert_eq!(ring, 1);
                assert_eq!(points, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_two_point_ring_is_accepted() {
        let mut two = record("A");
        two.rings = vec![vec![[0.0, 0.0], [0.0, 10.0]]];
        assert!(RegionCatalog::build(vec![two]).is_ok());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = RegionCatalog::build(vec![]).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.iter().count(), 0);
    }
}
