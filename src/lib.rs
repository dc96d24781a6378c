//! Longhurst - assigns coordinates to marine biogeographic provinces
//!
//! This library provides the province catalog, the point-in-polygon
//! classifier and the batch runner used by the `classify` binary.

pub mod batch;
pub mod config;
pub mod error;
pub mod models;
pub mod pip;
pub mod source;

pub use error::{BatchError, CatalogError};
pub use models::{Assignment, ClassificationResult, CoordinateQuery, Region, RegionId};
pub use pip::{ClassifierService, CrossingMode, RegionCatalog};
