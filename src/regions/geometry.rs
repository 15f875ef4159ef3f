//! Boundary geometry
//!
//! Only the polygonal GeoJSON geometries are meaningful for a choropleth.
//! Positions are `[longitude, latitude]` with an optional altitude that is
//! carried through untouched.

use serde::{Deserialize, Serialize};
use std::mem::size_of;

/// A GeoJSON position
pub type Position = Vec<f64>;

/// A closed ring of positions
pub type Ring = Vec<Position>;

/// Polygonal boundary of a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

impl Geometry {
    /// All rings, outer and inner, across every polygon
    pub fn rings(&self) -> Box<dyn Iterator<Item = &Ring> + '_> {
        match self {
            Geometry::Polygon { coordinates } => Box::new(coordinates.iter()),
            Geometry::MultiPolygon { coordinates } => Box::new(coordinates.iter().flatten()),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.rings().map(|r| r.len()).sum()
    }

    /// A polygon needs a closed ring of at least four positions
    pub fn is_drawable(&self) -> bool {
        self.rings().any(|r| r.len() >= 4)
            && self
                .rings()
                .flatten()
                .all(|p| p.len() >= 2 && p[0].is_finite() && p[1].is_finite())
    }

    /// Approximate heap + inline footprint in bytes
    pub fn estimated_bytes(&self) -> usize {
        let positions: usize = self
            .rings()
            .flatten()
            .map(|p| size_of::<Position>() + p.len() * size_of::<f64>())
            .sum();
        let rings = self.rings().count() * size_of::<Ring>();
        size_of::<Geometry>() + rings + positions
    }
}
