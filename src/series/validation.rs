//! Frame validation
//!
//! Structural problems (missing columns, no rows) fail validation.
//! Data-quality problems (missing entries, out-of-order timestamps) are
//! collected as warnings so the dashboard can still render.

use serde::Serialize;

use super::error::{SeriesError, SeriesResult};
use super::types::{Column, WeatherSeries, TIME_COLUMN};

/// Columns every renderable series must carry
pub const REQUIRED_COLUMNS: [&str; 4] = [
    TIME_COLUMN,
    "Temperature (°C)",
    "Humidity (%)",
    "Wind Speed (km/h)",
];

/// Outcome of a successful validation
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ValidationReport {
    /// Human-readable warnings, in the order they were found
    pub warnings: Vec<String>,
    /// Missing-entry count per column header
    pub nan_counts: Vec<(String, usize)>,
}

impl ValidationReport {
    /// True when no warnings were raised
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Total number of missing entries across all columns
    pub fn total_missing(&self) -> usize {
        self.nan_counts.iter().map(|(_, n)| n).sum()
    }
}

/// Validate a series for rendering
pub fn validate(series: &WeatherSeries) -> SeriesResult<ValidationReport> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !series.columns().iter().any(|c| c == *required))
        .map(|c| c.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(SeriesError::MissingColumns(missing));
    }

    if series.is_empty() {
        return Err(SeriesError::Empty);
    }

    let mut report = ValidationReport::default();

    // Timestamps are typed, so the time column can never hold a missing entry
    report.nan_counts.push((TIME_COLUMN.to_string(), 0));
    for &column in Column::all() {
        let count = series
            .samples()
            .iter()
            .filter(|s| s.value(column).is_nan())
            .count();
        report.nan_counts.push((column.label().to_string(), count));
    }

    if report.total_missing() > 0 {
        let counts = report
            .nan_counts
            .iter()
            .map(|(name, n)| format!("'{}': {}", name, n))
            .collect::<Vec<_>>()
            .join(", ");
        report.warnings.push(format!("Found NaN values: {{{}}}", counts));
    }

    let out_of_order = series
        .samples()
        .windows(2)
        .filter(|pair| pair[1].timestamp <= pair[0].timestamp)
        .count();
    if out_of_order > 0 {
        report.warnings.push(format!(
            "Time column is not strictly increasing ({} out-of-order steps)",
            out_of_order
        ));
    }

    for warning in &report.warnings {
        tracing::warn!(warning = %warning, "Series validation warning");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Sample;
    use chrono::{Duration, TimeZone, Utc};

    fn samples(values: &[(f64, f64, f64)]) -> Vec<Sample> {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &(t, h, w))| Sample::new(start + Duration::minutes(i as i64), t, h, w))
            .collect()
    }

    #[test]
    fn test_clean_series() {
        let series = WeatherSeries::new(samples(&[(20.0, 50.0, 10.0), (21.0, 51.0, 9.0)]));
        let report = validate(&series).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.total_missing(), 0);
        assert_eq!(report.nan_counts.len(), 4);
    }

    #[test]
    fn test_nan_entries_are_flagged_not_failed() {
        let series = WeatherSeries::new(samples(&[
            (f64::NAN, 50.0, 10.0),
            (21.0, f64::NAN, 9.0),
            (22.0, 52.0, f64::NAN),
            (f64::NAN, 53.0, 8.0),
        ]));
        let report = validate(&series).unwrap();

        assert_eq!(report.total_missing(), 4);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            report.warnings[0],
            "Found NaN values: {'Time': 0, 'Temperature (°C)': 2, 'Humidity (%)': 1, 'Wind Speed (km/h)': 1}"
        );
    }

    #[test]
    fn test_missing_columns_fail() {
        let columns = vec!["Time".to_string(), "Temperature (°C)".to_string()];
        let series = WeatherSeries::with_columns(columns, samples(&[(20.0, 50.0, 10.0)]));

        match validate(&series) {
            Err(SeriesError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["Humidity (%)", "Wind Speed (km/h)"]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_series_fails() {
        let series = WeatherSeries::new(vec![]);
        assert_eq!(validate(&series), Err(SeriesError::Empty));
    }

    #[test]
    fn test_out_of_order_timestamps_warn() {
        let mut rows = samples(&[(20.0, 50.0, 10.0), (21.0, 51.0, 9.0), (22.0, 52.0, 8.0)]);
        rows.swap(0, 2);
        let report = validate(&WeatherSeries::new(rows)).unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Time column is not strictly increasing"));
    }
}
