//! Region types for the province catalog.

use geo_types::{Coord, LineString, Polygon};
use serde::Deserialize;

/// Opaque per-region identifier, assigned by the catalog in load order.
///
/// Region codes are not guaranteed to be unique across a feed, so the
/// catalog never keys on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub(crate) usize);

impl RegionId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Axis-aligned bounding box in degrees.
///
/// Corners are kept exactly as supplied. A box whose min exceeds its max
/// is not rejected; it simply contains no point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Build from two opposite corners in (lon, lat) order. The first corner
    /// becomes the minimum and the second the maximum, without reordering.
    pub fn from_corners(first: [f64; 2], second: [f64; 2]) -> Self {
        Self::new(first[0], first[1], second[0], second[1])
    }

    /// Inclusive containment on both axes.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.min_lat <= lat && lat <= self.max_lat && self.min_lon <= lon && lon <= self.max_lon
    }
}

/// A named province with its prefilter box and boundary rings.
#[derive(Debug, Clone)]
pub struct Region {
    pub code: String,
    pub name: String,
    /// Identifier carried by the source feed (GML `fid`), for diagnostics only
    pub source_id: Option<String>,
    pub bbox: BoundingBox,
    /// Boundary rings as given, consumed as open polylines
    pub rings: Vec<LineString<f64>>,
    /// Rings closed into polygons, used by exact containment
    pub(crate) polygons: Vec<Polygon<f64>>,
}

impl Region {
    pub fn new(
        code: String,
        name: String,
        source_id: Option<String>,
        bbox: BoundingBox,
        rings: Vec<LineString<f64>>,
    ) -> Self {
        let polygons = rings
            .iter()
            .map(|ring| Polygon::new(ring.clone(), vec![]))
            .collect();

        Self {
            code,
            name,
            source_id,
            bbox,
            rings,
            polygons,
        }
    }

    /// Human-readable label for log and error messages
    pub fn label(&self) -> String {
        match &self.source_id {
            Some(id) => format!("{} ({})", self.code, id),
            None => self.code.clone(),
        }
    }
}

/// Region record as delivered by a catalog source.
///
/// Every field is optional here so that an incomplete record surfaces as a
/// catalog load error naming the record, not as an opaque parse failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegionRecord {
    #[serde(default, alias = "fid")]
    pub id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Two opposite corners, (lon, lat) each
    #[serde(default)]
    pub bbox: Option<[[f64; 2]; 2]>,
    /// Rings of (lon, lat) vertices
    #[serde(default)]
    pub rings: Vec<Vec<[f64; 2]>>,
}

impl RegionRecord {
    /// Describe the record for error messages: position plus source id if any
    pub fn describe(&self, index: usize) -> String {
        match &self.id {
            Some(id) => format!("record {} (id {})", index, id),
            None => format!("record {}", index),
        }
    }
}

pub(crate) fn ring_from_pairs(pairs: &[[f64; 2]]) -> LineString<f64> {
    LineString::new(
        pairs
            .iter()
            .map(|[lon, lat]| Coord { x: *lon, y: *lat })
            .collect(),
    )
}
