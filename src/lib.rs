//! # Weather Tracker
//!
//! Server-rendered weather pages built from synthetic data: a time-series
//! dashboard (temperature, humidity, wind speed) and a choropleth map of
//! Singapore's regions.
//!
//! ## Modules
//!
//! - [`series`]: Seeded series generator, validation and statistics
//! - [`regions`]: GeoJSON boundary loading and per-region temperatures
//! - [`render`]: Page pipelines, chart and map building, HTML output
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use weather_tracker::config::Config;
//! use weather_tracker::render::{render_dashboard, render_page};
//!
//! let rendered = render_dashboard(&Config::default(), false, Utc::now());
//! assert!(rendered.is_complete());
//!
//! let html = render_page(rendered.page());
//! assert!(html.contains("Weather Dashboard"));
//! ```

pub mod api;
pub mod config;
pub mod regions;
pub mod render;
pub mod series;

// Re-export top-level types for convenience
pub use series::{
    validate, Column, GeneratorConfig, Sample, SeriesError, SeriesGenerator, SeriesResult,
    ValidationReport, WeatherSeries,
};

pub use regions::{load_regions, RegionError, RegionRecord, RegionResult, RegionValueAssigner};

pub use render::{render_dashboard, render_page, render_tracker, Fatal, Page, Rendered};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
