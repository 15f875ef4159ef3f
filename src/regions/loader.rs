//! GeoJSON boundary loader
//!
//! Reads a FeatureCollection whose features are keyed by a `region` property.
//! Features with unusable geometry are kept (without geometry) so the
//! renderer can skip them individually.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

use super::error::{RegionError, RegionResult};
use super::geometry::Geometry;

/// Property that names a region
pub const REGION_KEY: &str = "region";

/// A boundary feature as loaded from disk
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    /// Value of the `region` property, if present
    pub name: Option<String>,
    pub geometry: Option<Geometry>,
    /// All feature properties, including `region`
    pub properties: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Value>,
}

/// Load region boundaries from a GeoJSON file
pub fn load_regions(path: &Path) -> RegionResult<Vec<RegionFeature>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => RegionError::NotFound {
            path: path.to_path_buf(),
        },
        _ => RegionError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let features = parse_regions(&content)?;
    tracing::info!(path = ?path, features = features.len(), "Loaded region boundaries");
    Ok(features)
}

/// Parse region boundaries from GeoJSON text
pub fn parse_regions(content: &str) -> RegionResult<Vec<RegionFeature>> {
    let raw: RawCollection = serde_json::from_str(content)?;

    if raw.kind != "FeatureCollection" {
        return Err(RegionError::Parse(format!(
            "expected a FeatureCollection, found '{}'",
            raw.kind
        )));
    }

    if raw.features.is_empty() {
        return Err(RegionError::Empty);
    }

    let features: Vec<RegionFeature> = raw
        .features
        .into_iter()
        .enumerate()
        .map(|(idx, feature)| convert_feature(idx, feature))
        .collect();

    if features.iter().all(|f| f.name.is_none()) {
        return Err(RegionError::MissingProperty(REGION_KEY.to_string()));
    }

    Ok(features)
}

fn convert_feature(idx: usize, raw: RawFeature) -> RegionFeature {
    let properties = raw.properties.unwrap_or_default();

    let name = match properties.get(REGION_KEY) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    };

    let geometry = match raw.geometry {
        Some(Value::Null) | None => None,
        Some(value) => match serde_json::from_value::<Geometry>(value) {
            Ok(geometry) => Some(geometry),
            Err(e) => {
                tracing::warn!(feature = idx, region = ?name, error = %e, "Unsupported feature geometry");
                None
            }
        },
    };

    RegionFeature {
        name,
        geometry,
        properties,
    }
}
