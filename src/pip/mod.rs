//! Point-in-Polygon (PIP) province classification.
//!
//! A bounding-box prefilter narrows the catalog to candidates, a crossing
//! test decides membership for each candidate, and the resolver turns the
//! containing set into one assignment.

mod catalog;
mod crossing;
mod filter;
mod resolver;
mod service;

pub use catalog::RegionCatalog;
pub use crossing::{count_crossings, CrossingMode, CrossingTester, ExactCrossings, LegacyCrossings};
pub use filter::BoundingBoxFilter;
pub use resolver::MatchResolver;
pub use service::ClassifierService;
