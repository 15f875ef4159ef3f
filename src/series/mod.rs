//! Synthetic Weather Series
//!
//! This module produces and checks the time-series half of the tracker:
//!
//! - **types**: Core data structures (Sample, WeatherSeries, Column, bounds)
//! - **generator**: Seeded sinusoid + noise generator with range policy
//! - **validation**: Column / missing-value checks that warn instead of fail
//! - **stats**: Summary statistics and footprint estimates for debug output
//! - **export**: CSV output
//! - **error**: Error types
//!
//! # Pipeline
//!
//! ```text
//!   GeneratorConfig → SeriesGenerator::generate_at(now)
//!                       ├─ out of bounds → SeriesError (no data)
//!                       └─ WeatherSeries → validate() → ValidationReport
//! ```
//!
//! # Example
//!
//! ```rust
//! use weather_tracker::series::{validate, GeneratorConfig, SeriesGenerator};
//!
//! let generator = SeriesGenerator::new(GeneratorConfig::default());
//! let series = generator.generate().expect("default waves stay in range");
//! let report = validate(&series).expect("generated series has every column");
//!
//! assert_eq!(series.len(), 100);
//! assert!(report.is_clean());
//! ```

pub mod error;
pub mod export;
pub mod generator;
pub mod stats;
pub mod types;
pub mod validation;

pub use error::{SeriesError, SeriesResult};
pub use export::{to_csv, write_csv};
pub use generator::{GeneratorConfig, SeriesGenerator, WaveSpec, Waveform, MAX_SAMPLE_COUNT};
pub use stats::{column_range, describe, estimated_bytes, ColumnSummary};
pub use types::{Column, PlausibilityBounds, Sample, ValueRange, WeatherSeries, TIME_COLUMN};
pub use validation::{validate, ValidationReport, REQUIRED_COLUMNS};
