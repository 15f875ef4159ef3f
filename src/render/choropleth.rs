//! Choropleth Map
//!
//! Regions are shaded by temperature and each gets its own tooltip layer.
//! The map itself is drawn client-side by Leaflet from the JSON produced by
//! [`MapView::to_json`].

use serde::Serialize;
use serde_json::{json, Value};

use super::error::{RenderError, RenderResult};
use super::html::escape;
use crate::regions::{Geometry, RegionRecord, REGION_KEY};

/// ColorBrewer YlOrRd, six classes
pub const YL_OR_RD: [&str; 6] = [
    "#ffffb2", "#fed976", "#feb24c", "#fd8d3c", "#f03b20", "#bd0026",
];

/// Equal-width binned color scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
    pub colors: Vec<String>,
}

impl ColorScale {
    /// Scale spanning the finite values; `None` if there are none
    pub fn spanning(values: impl IntoIterator<Item = f64>, palette: &[&str]) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        Some(Self {
            min,
            max,
            colors: palette.iter().map(|c| c.to_string()).collect(),
        })
    }

    /// Bin index of a value; the maximum falls in the last bin
    pub fn bin(&self, value: f64) -> usize {
        let bins = self.colors.len();
        if self.max <= self.min {
            return 0;
        }
        let pos = (value - self.min) / (self.max - self.min) * bins as f64;
        (pos.floor().max(0.0) as usize).min(bins - 1)
    }

    pub fn color_for(&self, value: f64) -> &str {
        &self.colors[self.bin(value)]
    }

    /// Bin edges, `colors.len() + 1` of them
    pub fn thresholds(&self) -> Vec<f64> {
        let bins = self.colors.len();
        (0..=bins)
            .map(|i| self.min + (self.max - self.min) * i as f64 / bins as f64)
            .collect()
    }
}

/// A region ready to be filled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadedRegion {
    pub name: String,
    pub value: f64,
    pub fill: String,
    pub geometry: Geometry,
}

/// Filled region layer keyed by region name
#[derive(Debug, Clone, PartialEq)]
pub struct Choropleth {
    pub legend_name: String,
    pub key_on: String,
    pub fill_opacity: f64,
    pub line_opacity: f64,
    pub scale: ColorScale,
    pub regions: Vec<ShadedRegion>,
}

impl Choropleth {
    /// Shade every named region that has a drawable boundary
    pub fn build(records: &[RegionRecord], legend_name: impl Into<String>) -> RenderResult<Self> {
        let keyed: Vec<(&String, &Geometry, f64)> = records
            .iter()
            .filter_map(|r| match (&r.name, &r.geometry) {
                (Some(name), Some(geometry)) if geometry.is_drawable() && r.temperature.is_finite() => {
                    Some((name, geometry, r.temperature))
                }
                _ => None,
            })
            .collect();

        let scale = ColorScale::spanning(keyed.iter().map(|k| k.2), &YL_OR_RD)
            .ok_or(RenderError::NoShadedRegions)?;

        let regions = keyed
            .into_iter()
            .map(|(name, geometry, value)| ShadedRegion {
                name: name.clone(),
                value,
                fill: scale.color_for(value).to_string(),
                geometry: geometry.clone(),
            })
            .collect();

        Ok(Self {
            legend_name: legend_name.into(),
            key_on: format!("feature.properties.{}", REGION_KEY),
            fill_opacity: 0.7,
            line_opacity: 0.2,
            scale,
            regions,
        })
    }

    fn to_json(&self) -> Value {
        let features: Vec<Value> = self
            .regions
            .iter()
            .map(|r| {
                json!({
                    "type": "Feature",
                    "properties": { REGION_KEY: r.name, "value": r.value, "fill": r.fill },
                    "geometry": r.geometry,
                })
            })
            .collect();

        json!({
            "legend": self.legend_name,
            "key_on": self.key_on,
            "fill_opacity": self.fill_opacity,
            "line_opacity": self.line_opacity,
            "colors": self.scale.colors,
            "thresholds": self.scale.thresholds(),
            "data": { "type": "FeatureCollection", "features": features },
        })
    }
}

/// Hover label over one region's outline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipLayer {
    pub region: String,
    /// Leaflet renders tooltip strings as HTML, so the name is escaped
    pub text: String,
    pub geometry: Geometry,
}

impl TooltipLayer {
    pub fn build(record: &RegionRecord) -> RenderResult<Self> {
        let name = record
            .name
            .as_ref()
            .ok_or_else(|| RenderError::Tooltip("region name is missing".to_string()))?;
        let geometry = record
            .geometry
            .as_ref()
            .ok_or_else(|| RenderError::Tooltip("boundary geometry is missing".to_string()))?;

        if !geometry.is_drawable() {
            return Err(RenderError::Tooltip(
                "boundary geometry is empty or malformed".to_string(),
            ));
        }
        if !record.temperature.is_finite() {
            return Err(RenderError::Tooltip("temperature is not a number".to_string()));
        }

        Ok(Self {
            region: name.clone(),
            text: format!("{}: {:.1} °C", escape(name), record.temperature),
            geometry: geometry.clone(),
        })
    }
}

/// A tooltip that could not be added
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedTooltip {
    pub region: String,
    pub reason: String,
}

/// Tally of one tooltip pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TooltipReport {
    pub attempted: usize,
    pub added: usize,
    pub skipped: Vec<SkippedTooltip>,
}

/// Everything the client needs to draw the map
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub choropleth: Option<Choropleth>,
    pub tooltips: Vec<TooltipLayer>,
}

impl MapView {
    pub fn new(center: [f64; 2], zoom: u8) -> Self {
        Self {
            center,
            zoom,
            width: 700,
            height: 500,
            choropleth: None,
            tooltips: Vec::new(),
        }
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn add_choropleth(&mut self, choropleth: Choropleth) {
        self.choropleth = Some(choropleth);
    }

    /// Try one tooltip per record, skipping (and logging) the ones that fail
    pub fn add_tooltips(&mut self, records: &[RegionRecord]) -> TooltipReport {
        let mut report = TooltipReport::default();

        for (idx, record) in records.iter().enumerate() {
            report.attempted += 1;
            match TooltipLayer::build(record) {
                Ok(layer) => {
                    self.tooltips.push(layer);
                    report.added += 1;
                }
                Err(e) => {
                    let region = record.display_name(idx);
                    tracing::warn!(region = %region, error = %e, "Failed to add tooltip");
                    report.skipped.push(SkippedTooltip {
                        region,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }

    pub fn to_json(&self) -> Value {
        json!({
            "center": self.center,
            "zoom": self.zoom,
            "choropleth": self.choropleth.as_ref().map(Choropleth::to_json),
            "tooltips": self.tooltips,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Geometry {
        Geometry::Polygon {
            coordinates: vec![vec![
                vec![103.8, 1.3],
                vec![103.9, 1.3],
                vec![103.9, 1.4],
                vec![103.8, 1.3],
            ]],
        }
    }

    fn record(name: Option<&str>, geometry: Option<Geometry>, temperature: f64) -> RegionRecord {
        RegionRecord {
            name: name.map(str::to_string),
            geometry,
            temperature,
        }
    }

    #[test]
    fn test_color_scale_bins() {
        let scale = ColorScale::spanning([26.0, 32.0], &YL_OR_RD).unwrap();

        assert_eq!(scale.bin(26.0), 0);
        assert_eq!(scale.bin(27.5), 1);
        assert_eq!(scale.bin(31.9), 5);
        assert_eq!(scale.bin(32.0), 5);
        assert_eq!(scale.color_for(26.0), "#ffffb2");
        assert_eq!(scale.color_for(32.0), "#bd0026");
        assert_eq!(scale.thresholds(), vec![26.0, 27.0, 28.0, 29.0, 30.0, 31.0, 32.0]);
    }

    #[test]
    fn test_color_scale_degenerate() {
        let scale = ColorScale::spanning([30.0], &YL_OR_RD).unwrap();
        assert_eq!(scale.bin(30.0), 0);
        assert!(ColorScale::spanning([f64::NAN], &YL_OR_RD).is_none());
    }

    #[test]
    fn test_choropleth_shades_named_regions() {
        let records = vec![
            record(Some("CENTRAL REGION"), Some(triangle()), 27.0),
            record(Some("EAST REGION"), Some(triangle()), 33.0),
            record(None, Some(triangle()), 30.0),
            record(Some("WEST REGION"), None, 29.0),
        ];
        let choropleth = Choropleth::build(&records, "Temperature (°C)").unwrap();

        assert_eq!(choropleth.regions.len(), 2);
        assert_eq!(choropleth.key_on, "feature.properties.region");
        assert_eq!(choropleth.regions[0].fill, "#ffffb2");
        assert_eq!(choropleth.regions[1].fill, "#bd0026");
    }

    #[test]
    fn test_choropleth_needs_a_named_region() {
        let records = vec![record(None, Some(triangle()), 30.0)];
        assert_eq!(
            Choropleth::build(&records, "Temperature (°C)").unwrap_err(),
            RenderError::NoShadedRegions
        );
    }

    #[test]
    fn test_tooltip_text() {
        let layer = TooltipLayer::build(&record(Some("NORTH REGION"), Some(triangle()), 29.96)).unwrap();
        assert_eq!(layer.text, "NORTH REGION: 30.0 °C");
    }

    #[test]
    fn test_tooltip_text_escapes_region_name() {
        let name = "<img src=x onerror=alert(1)> & CO";
        let layer = TooltipLayer::build(&record(Some(name), Some(triangle()), 28.0)).unwrap();
        assert_eq!(layer.region, name);
        assert_eq!(layer.text, "&lt;img src=x onerror=alert(1)&gt; &amp; CO: 28.0 °C");
    }

    #[test]
    fn test_tooltips_attempt_every_record_and_continue() {
        let records = vec![
            record(Some("CENTRAL REGION"), Some(triangle()), 27.0),
            record(Some("EAST REGION"), None, 28.0),
            record(None, Some(triangle()), 29.0),
            record(Some("NORTH REGION"), Some(Geometry::Polygon { coordinates: vec![] }), 30.0),
            record(Some("WEST REGION"), Some(triangle()), f64::NAN),
            record(Some("NORTH-EAST REGION"), Some(triangle()), 31.0),
        ];
        let mut map = MapView::new([1.35, 103.82], 11);
        let report = map.add_tooltips(&records);

        assert_eq!(report.attempted, records.len());
        assert_eq!(report.added, 2);
        assert_eq!(report.skipped.len(), 4);
        assert_eq!(report.skipped[1].region, "#2");
        assert_eq!(map.tooltips.len(), 2);
        assert_eq!(map.tooltips[1].region, "NORTH-EAST REGION");
    }

    #[test]
    fn test_map_json_shape() {
        let records = vec![record(Some("CENTRAL REGION"), Some(triangle()), 28.0)];
        let mut map = MapView::new([1.35, 103.82], 11);
        map.add_choropleth(Choropleth::build(&records, "Temperature (°C)").unwrap());
        map.add_tooltips(&records);

        let value = map.to_json();
        assert_eq!(value["zoom"], 11);
        assert_eq!(value["center"][1], 103.82);
        assert_eq!(value["choropleth"]["legend"], "Temperature (°C)");
        assert_eq!(
            value["choropleth"]["data"]["features"][0]["properties"]["region"],
            "CENTRAL REGION"
        );
        assert_eq!(value["tooltips"][0]["geometry"]["type"], "Polygon");
    }
}
