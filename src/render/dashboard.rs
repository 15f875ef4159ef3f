//! Time-series dashboard
//!
//! Pipeline: generate → validate → current values → trend chart →
//! (debug) data summary. Generation and validation failures halt the page;
//! everything after them fails locally.

use chrono::{DateTime, Utc};
use serde_json::json;

use super::chart::LineChart;
use super::diagnostics::SystemInfo;
use super::error::{RenderError, RenderResult};
use super::page::{Block, Fatal, MetricCell, Page, Rendered, Table};
use crate::config::Config;
use crate::series::{
    column_range, describe, validate, Column, GeneratorConfig, SeriesGenerator, WeatherSeries,
};

pub const DASHBOARD_TITLE: &str = "Weather Dashboard";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render the standalone dashboard page
pub fn render_dashboard(config: &Config, debug: bool, now: DateTime<Utc>) -> Rendered {
    let mut page = Page::new(DASHBOARD_TITLE, debug);

    page.push_sidebar(Block::DebugToggle { checked: debug });
    if debug {
        page.push_sidebar(Block::Subheader("🔧 System Info".to_string()));
        page.push_sidebar(Block::Table(SystemInfo::current().table()));
    }

    let Some(series) = prepare_series(&mut page, &config.series, now) else {
        return Rendered::Halted {
            page: page.halt(),
            cause: Fatal::Series,
        };
    };

    page.title(DASHBOARD_TITLE);
    current_values(&mut page, &series);
    page.rule();
    trends(&mut page, &series);

    if page.debug {
        data_summary(&mut page, &series);
    }

    page.success("✅ Dashboard displayed successfully");
    Rendered::Complete(page)
}

/// Generate and validate the series, reporting problems on the page.
///
/// Returns `None` when the series must not be rendered.
pub fn prepare_series(
    page: &mut Page,
    config: &GeneratorConfig,
    now: DateTime<Utc>,
) -> Option<WeatherSeries> {
    page.debug_print("Generating synthetic weather data...");

    let series = match SeriesGenerator::new(config.clone()).generate_at(now) {
        Ok(series) => series,
        Err(e) => {
            page.error(format!("❌ Error generating weather data: {}", e));
            page.trace(&anyhow::Error::new(e));
            page.error("❌ Failed to generate weather data. Please check the error messages above.");
            return None;
        }
    };

    page.debug_data(
        "Weather data generated successfully",
        &json!({
            "shape": series.shape(),
            "columns": series.columns(),
            "temp_range": column_range(&series, Column::Temperature),
            "humidity_range": column_range(&series, Column::Humidity),
            "wind_range": column_range(&series, Column::WindSpeed),
        }),
    );

    page.debug_print("Validating series...");
    match validate(&series) {
        Ok(report) => {
            for warning in &report.warnings {
                page.warning(format!("⚠️ {}", warning));
            }
            page.debug_print("Series validation completed successfully");
        }
        Err(e) => {
            page.error(format!("❌ Data validation failed: {}", e));
            page.trace(&anyhow::Error::new(e));
            page.error("❌ Data validation failed. Please check the error messages above.");
            return None;
        }
    }

    Some(series)
}

/// Most recent finite value of one column
pub fn latest_value(series: &WeatherSeries, column: Column) -> RenderResult<f64> {
    series
        .latest()
        .map(|s| s.value(column))
        .filter(|v| v.is_finite())
        .ok_or_else(|| RenderError::MissingValue(column.name().to_string()))
}

/// Three-column row of current values; each metric fails on its own
pub fn current_values(page: &mut Page, series: &WeatherSeries) {
    page.subheader("Current Values");

    let mut cells = Vec::with_capacity(Column::all().len());
    for &column in Column::all() {
        match latest_value(series, column) {
            Ok(value) => {
                page.debug_print(format!("Current {}: {:.1}{}", column.name(), value, column.unit()));
                cells.push(MetricCell::Value {
                    label: column.label().to_string(),
                    value: format!("{:.1}", value),
                });
            }
            Err(e) => {
                page.debug_print(format!("{} loading error: {}", column.noun(), e));
                cells.push(MetricCell::Error(format!("Error loading {}: {}", column.name(), e)));
            }
        }
    }

    page.push(Block::Metrics(cells));
}

/// Trend chart of every column over time
pub fn trends(page: &mut Page, series: &WeatherSeries) {
    page.subheader("Trends Over Time");
    page.section("displaying chart", |p| {
        let chart = LineChart::from_series(series)?;
        // Surface drawing problems here rather than at HTML time
        chart.to_svg()?;
        p.push(Block::Chart(chart));
        p.debug_print("Chart displayed successfully");
        Ok(())
    });
}

/// Point count, time range and per-column statistics
pub fn data_summary(page: &mut Page, series: &WeatherSeries) {
    page.rule();
    page.subheader("🔧 Data Summary");
    page.text(format!("Data Points: {}", series.len()));
    if let Some((start, end)) = series.time_range() {
        page.text(format!(
            "Time Range: {} to {}",
            start.format(TIMESTAMP_FORMAT),
            end.format(TIMESTAMP_FORMAT)
        ));
    }
    page.text("Statistics:");
    page.push(Block::Table(describe_table(series)));
}

/// `describe()`-style table: one row per statistic, one column per measure
pub fn describe_table(series: &WeatherSeries) -> Table {
    let described = describe(series);

    let mut headers = vec![String::new()];
    headers.extend(described.iter().map(|(c, _)| c.label().to_string()));

    let stat_names = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
    let rows = stat_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut row = vec![name.to_string()];
            for (_, summary) in &described {
                row.push(match summary {
                    Some(s) => format!("{:.6}", s.rows()[i].1),
                    None => "NaN".to_string(),
                });
            }
            row
        })
        .collect();

    Table { headers, rows }
}

/// First `n` rows of the series
pub fn head_table(series: &WeatherSeries, n: usize) -> Table {
    Table {
        headers: series.columns().to_vec(),
        rows: series
            .head(n)
            .iter()
            .map(|s| {
                let mut row = vec![s.timestamp.format(TIMESTAMP_FORMAT).to_string()];
                row.extend(Column::all().iter().map(|&c| format!("{:.6}", s.value(c))));
                row
            })
            .collect(),
    }
}
