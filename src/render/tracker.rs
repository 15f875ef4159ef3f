//! Singapore Weather Tracker page
//!
//! Loads region boundaries, assigns each a synthetic temperature, and lays
//! the result out in three tabs: the choropleth map, the time-series
//! dashboard, and a debug panel.
//!
//! Fatal steps (series, boundary file, temperature assignment, choropleth)
//! halt the page. Tooltips and tab contents fail locally.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::BTreeSet;

use super::choropleth::{Choropleth, MapView};
use super::dashboard::{current_values, head_table, prepare_series, trends};
use super::diagnostics::SystemInfo;
use super::error::RenderError;
use super::page::{Block, Fatal, Level, Page, Rendered, Tab, Table};
use crate::config::Config;
use crate::regions::{load_regions, Geometry, RegionError, RegionRecord, RegionValueAssigner, REGION_KEY};
use crate::series::{estimated_bytes, WeatherSeries};

pub const TRACKER_TITLE: &str = "Singapore Weather Tracker";

/// Render the map page
pub fn render_tracker(config: &Config, debug: bool, now: DateTime<Utc>) -> Rendered {
    let mut page = Page::new(TRACKER_TITLE, debug);
    page.push_sidebar(Block::DebugToggle { checked: debug });

    let Some(series) = prepare_series(&mut page, &config.series, now) else {
        return halt(page, Fatal::Series);
    };

    let records = match load_region_records(&mut page, config) {
        Ok(records) => records,
        Err(cause) => return halt(page, cause),
    };

    page.debug_print("Creating map...");
    let mut map = MapView::new([config.map.center_lat, config.map.center_lon], config.map.zoom)
        .size(config.map.width, config.map.height);
    page.debug_print("Map created successfully");

    page.debug_print("Adding choropleth layer...");
    match Choropleth::build(&records, config.map.legend_name.clone()) {
        Ok(choropleth) => {
            map.add_choropleth(choropleth);
            page.debug_print("Choropleth layer added successfully");
        }
        Err(e @ RenderError::NoShadedRegions) => {
            page.error(format!("❌ {}", e));
            if page.debug {
                let keyed: Vec<String> = records
                    .iter()
                    .enumerate()
                    .map(|(idx, r)| r.display_name(idx))
                    .collect();
                page.text(format!("Available regions: {:?}", keyed));
            }
            return halt(page, Fatal::MapSetup);
        }
        Err(e) => {
            page.error(format!("❌ Error adding choropleth layer: {}", e));
            page.trace(&anyhow::Error::new(e));
            return halt(page, Fatal::MapSetup);
        }
    }

    page.debug_print("Adding tooltips...");
    let report = map.add_tooltips(&records);
    for skipped in &report.skipped {
        page.debug_print(format!(
            "Warning: Failed to add tooltip for region {}: {}",
            skipped.region, skipped.reason
        ));
    }
    page.debug_print(format!("Tooltips added successfully for {} regions", report.added));

    page.title(TRACKER_TITLE);

    let mut map_tab = page.child();
    map_tab.subheader("Singapore Weather Map");
    map_tab.section("displaying map", |p| {
        p.push(Block::Map(map));
        p.success("✅ Map displayed successfully");
        Ok(())
    });

    let mut series_tab = page.child();
    current_values(&mut series_tab, &series);
    series_tab.rule();
    trends(&mut series_tab, &series);
    series_tab.success("✅ Time series data displayed successfully");

    let mut debug_tab = page.child();
    if debug {
        debug_info(&mut debug_tab, &records, &series);
    } else {
        debug_tab.info("Enable Debug Mode in the sidebar to see debug information");
    }

    page.push(Block::Tabs(vec![
        Tab {
            label: "Weather Map".to_string(),
            blocks: map_tab.into_blocks(),
        },
        Tab {
            label: "Time Series Data".to_string(),
            blocks: series_tab.into_blocks(),
        },
        Tab {
            label: "Debug Info".to_string(),
            blocks: debug_tab.into_blocks(),
        },
    ]));

    if !debug {
        page.push_sidebar(Block::Banner {
            level: Level::Success,
            message: "✅ Dashboard loaded successfully!".to_string(),
        });
    }

    Rendered::Complete(page)
}

fn halt(page: Page, cause: Fatal) -> Rendered {
    tracing::error!(cause = ?cause, "Tracker page halted");
    Rendered::Halted {
        page: page.halt(),
        cause,
    }
}

/// Load the boundary file and attach temperatures
fn load_region_records(page: &mut Page, config: &Config) -> Result<Vec<RegionRecord>, Fatal> {
    let path = &config.regions.path;
    page.debug_print(format!("Loading Singapore regions GeoJSON file {}...", path.display()));

    let features = match load_regions(path) {
        Ok(features) => features,
        Err(e) => {
            let expected = matches!(
                e,
                RegionError::NotFound { .. } | RegionError::Empty | RegionError::MissingProperty(_)
            );
            if expected {
                page.error(format!("❌ {}", e));
            } else {
                page.error(format!("❌ Error loading GeoJSON file: {}", e));
                page.trace(&anyhow::Error::new(e));
            }
            return Err(Fatal::RegionsUnavailable);
        }
    };

    if page.debug {
        let mut columns: BTreeSet<&str> = features
            .iter()
            .flat_map(|f| f.properties.keys().map(String::as_str))
            .collect();
        columns.insert("geometry");
        let names: BTreeSet<&str> = features.iter().filter_map(|f| f.name.as_deref()).collect();
        page.debug_data(
            "GeoJSON loaded successfully",
            &json!({
                "shape": [features.len(), columns.len()],
                "columns": columns,
                "regions": names,
            }),
        );
    }

    page.debug_print("Generating synthetic temperature data...");
    let assigner = RegionValueAssigner::new(
        config.regions.seed,
        config.regions.min_temperature,
        config.regions.max_temperature,
    );
    let records = match assigner.assign(features) {
        Ok(records) => records,
        Err(e) => {
            page.error(format!("❌ Error generating temperature data: {}", e));
            page.trace(&anyhow::Error::new(e));
            return Err(Fatal::MapSetup);
        }
    };

    if page.debug {
        let temps: Vec<f64> = records.iter().map(|r| r.temperature).collect();
        let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = temps.iter().sum::<f64>() / temps.len() as f64;
        page.debug_data(
            "Temperature data generated",
            &json!({ "min_temp": min, "max_temp": max, "mean_temp": mean }),
        );
    }

    Ok(records)
}

/// Row counts, footprints and head-of-table samples
fn debug_info(tab: &mut Page, records: &[RegionRecord], series: &WeatherSeries) {
    tab.subheader("🔧 Debug Information");

    tab.text("System Information:");
    tab.push(Block::Table(SystemInfo::current().table()));

    tab.text("Data Information:");
    tab.text(format!("- Regions shape: ({}, 3)", records.len()));
    let (rows, cols) = series.shape();
    tab.text(format!("- Time series shape: ({}, {})", rows, cols));

    let region_bytes: usize = records.iter().map(RegionRecord::estimated_bytes).sum();
    tab.text("Memory Usage (approximate):");
    tab.text(format!("- Regions data: {:.2} KB", region_bytes as f64 / 1024.0));
    tab.text(format!(
        "- Time series data: {:.2} KB",
        estimated_bytes(series) as f64 / 1024.0
    ));

    tab.text("Sample Data:");
    tab.text("Regions data:");
    tab.push(Block::Table(region_head_table(records, 5)));
    tab.text("Time series data:");
    tab.push(Block::Table(head_table(series, 5)));
}

/// First `n` region records with a geometry summary
fn region_head_table(records: &[RegionRecord], n: usize) -> Table {
    Table {
        headers: vec![
            REGION_KEY.to_string(),
            "geometry".to_string(),
            "Temperature".to_string(),
        ],
        rows: records
            .iter()
            .take(n)
            .map(|r| {
                let geometry = match &r.geometry {
                    Some(g) => {
                        let kind = match g {
                            Geometry::Polygon { .. } => "POLYGON",
                            Geometry::MultiPolygon { .. } => "MULTIPOLYGON",
                        };
                        format!("{} ({} vertices)", kind, g.vertex_count())
                    }
                    None => "None".to_string(),
                };
                vec![
                    r.name.clone().unwrap_or_else(|| "None".to_string()),
                    geometry,
                    format!("{:.6}", r.temperature),
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{WaveSpec, Waveform};
    use chrono::TimeZone;
    use tempfile::TempDir;

    const REGIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"region": "CENTRAL REGION"},
             "geometry": {"type": "Polygon", "coordinates": [[[103.8, 1.28], [103.86, 1.28], [103.86, 1.34], [103.8, 1.28]]]}},
            {"type": "Feature", "properties": {"region": "EAST REGION"},
             "geometry": {"type": "Polygon", "coordinates": [[[103.9, 1.3], [104.0, 1.3], [104.0, 1.38], [103.9, 1.3]]]}},
            {"type": "Feature", "properties": {"region": "NORTH REGION"}, "geometry": null}
        ]
    }"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    fn config_with(dir: &TempDir, contents: Option<&str>) -> Config {
        let path = dir.path().join("singapore_regions.geojson");
        if let Some(contents) = contents {
            std::fs::write(&path, contents).unwrap();
        }
        let mut config = Config::default();
        config.regions.path = path;
        config
    }

    fn tabs(page: &Page) -> &[Tab] {
        page.body
            .iter()
            .find_map(|b| match b {
                Block::Tabs(tabs) => Some(tabs.as_slice()),
                _ => None,
            })
            .expect("tabs")
    }

    #[test]
    fn test_tracker_renders_three_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let rendered = render_tracker(&config_with(&dir, Some(REGIONS)), false, now());
        assert!(rendered.is_complete());

        let page = rendered.page();
        let tabs = tabs(page);
        let labels: Vec<&str> = tabs.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Weather Map", "Time Series Data", "Debug Info"]);

        let map = tabs[0].blocks.iter().find_map(|b| match b {
            Block::Map(map) => Some(map),
            _ => None,
        });
        let map = map.expect("map block");
        // Three regions attempted, the one without geometry skipped
        assert_eq!(map.tooltips.len(), 2);
        assert_eq!(map.choropleth.as_ref().unwrap().regions.len(), 2);
        assert_eq!(map.center, [1.35, 103.82]);

        assert!(tabs[1].blocks.iter().any(|b| matches!(b, Block::Chart(_))));
        assert!(tabs[2]
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Banner { level: Level::Info, .. })));
        assert_eq!(
            page.messages(Level::Success),
            vec![
                "✅ Dashboard loaded successfully!",
                "✅ Map displayed successfully",
                "✅ Time series data displayed successfully",
            ]
        );
    }

    #[test]
    fn test_series_tab_layout() {
        let dir = tempfile::tempdir().unwrap();
        let rendered = render_tracker(&config_with(&dir, Some(REGIONS)), false, now());
        let blocks = &tabs(rendered.page())[1].blocks;

        let kinds: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Metrics(_) => Some("metrics"),
                Block::Rule => Some("rule"),
                Block::Chart(_) => Some("chart"),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec!["metrics", "rule", "chart"]);
        assert!(!blocks
            .iter()
            .any(|b| matches!(b, Block::Banner { level: Level::Error, .. })));
    }

    #[test]
    fn test_tracker_debug_panel() {
        let dir = tempfile::tempdir().unwrap();
        let rendered = render_tracker(&config_with(&dir, Some(REGIONS)), true, now());
        let page = rendered.page();

        let debug_tab = &tabs(page)[2];
        assert!(debug_tab
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Text(t) if t == "- Regions shape: (3, 3)")));
        let tables = debug_tab
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Table(_)))
            .count();
        assert_eq!(tables, 3);

        assert!(page.body.iter().any(|b| matches!(
            b,
            Block::Text(t) if t == "🔍 DEBUG: Warning: Failed to add tooltip for region NORTH REGION: boundary geometry is missing"
        )));
        assert!(page.body.iter().any(|b| matches!(
            b,
            Block::Text(t) if t == "🔍 DEBUG: Tooltips added successfully for 2 regions"
        )));
    }

    #[test]
    fn test_missing_geometry_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let rendered = render_tracker(&config_with(&dir, None), false, now());

        assert_eq!(rendered.fatal(), Some(Fatal::RegionsUnavailable));
        let page = rendered.page();
        assert_eq!(page.messages(Level::Error).len(), 1);
        assert!(page.messages(Level::Error)[0].contains("singapore_regions.geojson' not found"));
        assert!(!page.body.iter().any(|b| matches!(b, Block::Tabs(_) | Block::Title(_))));
        assert!(page.messages(Level::Success).is_empty());
    }

    #[test]
    fn test_empty_geometry_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with(&dir, Some(r#"{"type": "FeatureCollection", "features": []}"#));
        let rendered = render_tracker(&config, false, now());

        assert_eq!(rendered.fatal(), Some(Fatal::RegionsUnavailable));
        assert_eq!(
            rendered.page().messages(Level::Error),
            vec!["❌ No data found in the GeoJSON file"]
        );
    }

    #[test]
    fn test_series_failure_halts_before_loading_regions() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_with(&dir, Some(REGIONS));
        config.series.wind_speed = WaveSpec::new(-20.0, 1.0, Waveform::Sine, 1.0, 0.0);

        let rendered = render_tracker(&config, false, now());
        assert_eq!(rendered.fatal(), Some(Fatal::Series));
    }

    #[test]
    fn test_no_drawable_named_region_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"region": "WEST REGION"}, "geometry": null}
        ]}"#;
        let rendered = render_tracker(&config_with(&dir, Some(json)), false, now());

        assert_eq!(rendered.fatal(), Some(Fatal::MapSetup));
        assert!(rendered.page().messages(Level::Error)[0].starts_with("❌ Missing required column"));
    }

    #[test]
    fn test_region_head_table() {
        let features = crate::regions::parse_regions(REGIONS).unwrap();
        let records = RegionValueAssigner::default().assign(features).unwrap();
        let table = region_head_table(&records, 5);

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0][1], "POLYGON (4 vertices)");
        assert_eq!(table.rows[2][1], "None");
        assert!(Config::default().regions.path.ends_with("singapore_regions.geojson"));
    }
}
