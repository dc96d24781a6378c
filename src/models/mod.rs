//! Core data models for province classification.

pub mod classification;
pub mod region;

pub use classification::{
    format_coordinate, Assignment, ClassificationResult, CoordinateQuery, MULTIPLE_REASON,
    NO_CODE, ON_LAND_REASON,
};
pub use region::{BoundingBox, Region, RegionId, RegionRecord};
