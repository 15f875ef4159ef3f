//! Core data types for the weather series
//!
//! - `Sample`: one reading of all three measurements at a point in time
//! - `Column`: the measured quantities and their display labels
//! - `WeatherSeries`: an ordered run of samples plus its column header
//! - `ValueRange` / `PlausibilityBounds`: physical sanity limits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Header of the timestamp column
pub const TIME_COLUMN: &str = "Time";

/// A single weather reading
///
/// Missing entries are represented as `NaN`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, temperature: f64, humidity: f64, wind_speed: f64) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
            wind_speed,
        }
    }

    /// Read the value of one measured column
    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::Temperature => self.temperature,
            Column::Humidity => self.humidity,
            Column::WindSpeed => self.wind_speed,
        }
    }
}

/// Measured quantity in a weather series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Temperature,
    Humidity,
    WindSpeed,
}

impl Column {
    /// All measured columns, in display order
    pub fn all() -> &'static [Column] {
        &[Column::Temperature, Column::Humidity, Column::WindSpeed]
    }

    /// Header label including the unit
    pub fn label(&self) -> &'static str {
        match self {
            Column::Temperature => "Temperature (°C)",
            Column::Humidity => "Humidity (%)",
            Column::WindSpeed => "Wind Speed (km/h)",
        }
    }

    /// Unit suffix used in prose
    pub fn unit(&self) -> &'static str {
        match self {
            Column::Temperature => "°C",
            Column::Humidity => "%",
            Column::WindSpeed => " km/h",
        }
    }

    /// Capitalised noun used at the start of messages
    pub fn noun(&self) -> &'static str {
        match self {
            Column::Temperature => "Temperature",
            Column::Humidity => "Humidity",
            Column::WindSpeed => "Wind speed",
        }
    }

    /// Kind of implausible value this column rejects
    pub fn violation(&self) -> &'static str {
        match self {
            Column::WindSpeed => "negative",
            _ => "unrealistic",
        }
    }

    /// Lower-case name used in per-metric messages
    pub fn name(&self) -> &'static str {
        match self {
            Column::Temperature => "temperature",
            Column::Humidity => "humidity",
            Column::WindSpeed => "wind speed",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An ordered run of weather samples
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherSeries {
    columns: Vec<String>,
    samples: Vec<Sample>,
}

impl WeatherSeries {
    /// Build a series carrying the standard four-column header
    pub fn new(samples: Vec<Sample>) -> Self {
        let mut columns = vec![TIME_COLUMN.to_string()];
        columns.extend(Column::all().iter().map(|c| c.label().to_string()));
        Self { columns, samples }
    }

    /// Build a series with an explicit header, e.g. from an external table
    pub fn with_columns(columns: Vec<String>, samples: Vec<Sample>) -> Self {
        Self { columns, samples }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// All values of one column, in time order
    pub fn values(&self, column: Column) -> Vec<f64> {
        self.samples.iter().map(|s| s.value(column)).collect()
    }

    /// First and last timestamps
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }

    /// The first `n` samples
    pub fn head(&self, n: usize) -> &[Sample] {
        &self.samples[..n.min(self.samples.len())]
    }

    /// (rows, columns) in the manner of a data frame shape
    pub fn shape(&self) -> (usize, usize) {
        (self.samples.len(), self.columns.len())
    }
}

/// Inclusive numeric range; an absent side is unbounded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ValueRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// NaN is neither inside nor outside a range; missing entries are
    /// reported by validation, not by the range policy.
    pub fn rejects(&self, value: f64) -> bool {
        self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| value > max)
    }
}

/// Physical plausibility limits for each measured column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlausibilityBounds {
    pub temperature: ValueRange,
    pub humidity: ValueRange,
    pub wind_speed: ValueRange,
}

impl PlausibilityBounds {
    pub fn range(&self, column: Column) -> ValueRange {
        match column {
            Column::Temperature => self.temperature,
            Column::Humidity => self.humidity,
            Column::WindSpeed => self.wind_speed,
        }
    }
}

impl Default for PlausibilityBounds {
    fn default() -> Self {
        Self {
            temperature: ValueRange::new(-50.0, 60.0),
            humidity: ValueRange::new(0.0, 100.0),
            wind_speed: ValueRange::at_least(0.0),
        }
    }
}
