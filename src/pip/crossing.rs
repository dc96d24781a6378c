//! Crossing-number membership tests.
//!
//! Two modes are provided. [`LegacyCrossings`] reproduces the rule existing
//! Longhurst classifications were produced with: a segment counts when the
//! query latitude lies between its endpoints (inclusive) and the query
//! longitude is at or west of the segment's second vertex. No x-intercept is
//! interpolated, so points just east of a slanted edge can be counted inside.
//! [`ExactCrossings`] is the conventional even-odd test over closed rings and
//! changes results near boundaries; it is only used when asked for.

use geo::Contains;
use geo_types::{LineString, Point};
use serde::Deserialize;

use crate::models::Region;

/// Decides whether a point lies inside a region that already passed the
/// bounding-box prefilter.
pub trait CrossingTester: Send + Sync {
    fn is_inside(&self, lon: f64, lat: f64, region: &Region) -> bool;
}

/// Selects the membership rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CrossingMode {
    /// Second-vertex longitude comparison, compatible with existing outputs
    #[default]
    Legacy,
    /// Interpolated ray casting over implicitly closed rings
    Exact,
}

impl CrossingMode {
    pub fn tester(&self) -> Box<dyn CrossingTester> {
        match self {
            CrossingMode::Legacy => Box::new(LegacyCrossings),
            CrossingMode::Exact => Box::new(ExactCrossings),
        }
    }
}

impl std::fmt::Display for CrossingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrossingMode::Legacy => write!(f, "legacy"),
            CrossingMode::Exact => write!(f, "exact"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCrossings;

impl CrossingTester for LegacyCrossings {
    fn is_inside(&self, lon: f64, lat: f64, region: &Region) -> bool {
        count_crossings(&region.rings, lon, lat) % 2 == 1
    }
}

/// Sum crossings over every ring with one shared counter.
///
/// Rings are walked as open polylines; the last vertex is not joined back
/// to the first.
pub fn count_crossings(rings: &[LineString<f64>], lon: f64, lat: f64) -> usize {
    rings
        .iter()
        .flat_map(|ring| ring.0.windows(2))
        .filter(|pair| {
            let (a, b) = (pair[0], pair[1]);
            let straddles = (a.y >= lat && b.y <= lat) || (a.y <= lat && b.y >= lat);
            straddles && lon <= b.x
        })
        .count()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExactCrossings;

impl CrossingTester for ExactCrossings {
    /// Even-odd over rings: inside when strictly within an odd number of them.
    fn is_inside(&self, lon: f64, lat: f64, region: &Region) -> bool {
        let point = Point::new(lon, lat);
        region
            .polygons
            .iter()
            .filter(|polygon| polygon.contains(&point))
            .count()
            % 2
            == 1
    }
}
