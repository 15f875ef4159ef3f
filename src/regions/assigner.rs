//! Region value assigner
//!
//! Attaches one independent uniform sample per region. Regions do not
//! influence each other; only their order determines which draw they get.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use serde_json::{json, Value};
use std::mem::size_of;

use super::error::{RegionError, RegionResult};
use super::geometry::Geometry;
use super::loader::{RegionFeature, REGION_KEY};

/// A region with its synthetic temperature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRecord {
    pub name: Option<String>,
    pub geometry: Option<Geometry>,
    pub temperature: f64,
}

impl RegionRecord {
    /// Name for messages, falling back to the row index
    pub fn display_name(&self, idx: usize) -> String {
        self.name.clone().unwrap_or_else(|| format!("#{}", idx))
    }

    pub fn estimated_bytes(&self) -> usize {
        let name = self.name.as_ref().map(|n| n.capacity()).unwrap_or(0);
        let geometry = self.geometry.as_ref().map(|g| g.estimated_bytes()).unwrap_or(0);
        size_of::<RegionRecord>() + name + geometry
    }

    /// GeoJSON Feature with `region` and `temperature` properties
    pub fn to_feature(&self) -> Value {
        json!({
            "type": "Feature",
            "properties": { REGION_KEY: self.name, "temperature": self.temperature },
            "geometry": self.geometry,
        })
    }
}

/// GeoJSON FeatureCollection of records, in order
pub fn to_feature_collection(records: &[RegionRecord]) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": records.iter().map(RegionRecord::to_feature).collect::<Vec<_>>(),
    })
}

/// Seeded uniform sampler over a half-open range
#[derive(Debug, Clone)]
pub struct RegionValueAssigner {
    seed: u64,
    low: f64,
    high: f64,
}

impl RegionValueAssigner {
    pub fn new(seed: u64, low: f64, high: f64) -> Self {
        Self { seed, low, high }
    }

    /// Draw one value in `[low, high)` per feature, in input order
    pub fn assign(&self, features: Vec<RegionFeature>) -> RegionResult<Vec<RegionRecord>> {
        if !(self.low.is_finite() && self.high.is_finite() && self.low < self.high) {
            return Err(RegionError::InvalidRange(format!(
                "[{}, {}) is empty or not finite",
                self.low, self.high
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);

        let records = features
            .into_iter()
            .map(|feature| RegionRecord {
                name: feature.name,
                geometry: feature.geometry,
                temperature: rng.gen_range(self.low..self.high),
            })
            .collect();

        Ok(records)
    }
}

impl Default for RegionValueAssigner {
    fn default() -> Self {
        Self::new(42, 26.0, 34.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn features(n: usize) -> Vec<RegionFeature> {
        (0..n)
            .map(|i| RegionFeature {
                name: Some(format!("REGION {}", i)),
                geometry: None,
                properties: Map::new(),
            })
            .collect()
    }

    #[test]
    fn test_one_value_per_region_in_range() {
        let records = RegionValueAssigner::default().assign(features(5)).unwrap();

        assert_eq!(records.len(), 5);
        for record in &records {
            assert!(record.temperature >= 26.0 && record.temperature < 34.0);
        }
        assert_eq!(records[3].name.as_deref(), Some("REGION 3"));
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = RegionValueAssigner::default().assign(features(5)).unwrap();
        let b = RegionValueAssigner::default().assign(features(5)).unwrap();
        assert_eq!(a, b);

        let c = RegionValueAssigner::new(7, 26.0, 34.0).assign(features(5)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_range() {
        let err = RegionValueAssigner::new(42, 34.0, 26.0)
            .assign(features(1))
            .unwrap_err();
        assert!(matches!(err, RegionError::InvalidRange(_)));

        assert!(RegionValueAssigner::new(42, f64::NAN, 1.0).assign(features(1)).is_err());
    }

    #[test]
    fn test_display_name_fallback() {
        let record = RegionRecord {
            name: None,
            geometry: None,
            temperature: 30.0,
        };
        assert_eq!(record.display_name(4), "#4");
        assert!(record.estimated_bytes() >= size_of::<RegionRecord>());
    }

    #[test]
    fn test_feature_collection() {
        let records = RegionValueAssigner::default().assign(features(2)).unwrap();
        let value = to_feature_collection(&records);

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 2);
        assert_eq!(value["features"][1]["properties"]["region"], "REGION 1");
        assert_eq!(value["features"][0]["properties"]["temperature"], records[0].temperature);
        assert!(value["features"][0]["geometry"].is_null());
    }
}
