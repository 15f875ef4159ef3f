//! Summary statistics for debug panels

use serde::Serialize;
use std::mem::size_of;

use super::types::{Column, Sample, WeatherSeries};

/// Count, moments and quartiles of one column (missing entries skipped)
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Summarise a slice of values; `None` when no finite values remain
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        } else {
            f64::NAN
        };

        Some(Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }

    /// Row labels and values in display order
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.median),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}

/// Linear-interpolated quantile over sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Summaries for every measured column
pub fn describe(series: &WeatherSeries) -> Vec<(Column, Option<ColumnSummary>)> {
    Column::all()
        .iter()
        .map(|&column| (column, ColumnSummary::from_values(&series.values(column))))
        .collect()
}

/// Minimum and maximum of one column, ignoring missing entries
pub fn column_range(series: &WeatherSeries, column: Column) -> Option<(f64, f64)> {
    series
        .samples()
        .iter()
        .map(|s| s.value(column))
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Approximate in-memory size of a series in bytes
pub fn estimated_bytes(series: &WeatherSeries) -> usize {
    let header: usize = series.columns().iter().map(|c| c.capacity() + size_of::<String>()).sum();
    size_of::<WeatherSeries>() + header + series.len() * size_of::<Sample>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_summary_matches_known_values() {
        let summary = ColumnSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert_eq!(summary.count, 5);
        assert_eq!(summary.mean, 3.0);
        assert!((summary.std - 2.5f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q25, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q75, 4.0);
        assert_eq!(summary.max, 5.0);
    }

    #[test]
    fn test_quantiles_interpolate() {
        let summary = ColumnSummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(summary.q25, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q75, 3.25);
    }

    #[test]
    fn test_nan_skipped() {
        let summary = ColumnSummary::from_values(&[f64::NAN, 2.0, 4.0]).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 3.0);

        assert!(ColumnSummary::from_values(&[f64::NAN]).is_none());
        assert!(ColumnSummary::from_values(&[]).is_none());
    }

    #[test]
    fn test_column_range_and_footprint() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        let series = WeatherSeries::new(
            (0..10)
                .map(|i| Sample::new(start + Duration::minutes(i), 20.0 + i as f64, 50.0, 5.0))
                .collect(),
        );

        assert_eq!(column_range(&series, Column::Temperature), Some((20.0, 29.0)));
        assert!(estimated_bytes(&series) >= 10 * size_of::<Sample>());

        let described = describe(&series);
        assert_eq!(described.len(), 3);
        assert_eq!(described[1].1.unwrap().std, 0.0);
    }
}
