//! Region boundaries and per-region values
//!
//! - **loader**: GeoJSON FeatureCollection → `RegionFeature`s
//! - **geometry**: Polygon / MultiPolygon shapes
//! - **assigner**: seeded uniform temperature per region
//! - **error**: Error types

pub mod assigner;
pub mod error;
pub mod geometry;
pub mod loader;

pub use assigner::{to_feature_collection, RegionRecord, RegionValueAssigner};
pub use error::{RegionError, RegionResult};
pub use geometry::{Geometry, Position, Ring};
pub use loader::{load_regions, parse_regions, RegionFeature, REGION_KEY};
