//! Rendering error types

use thiserror::Error;

/// Errors raised while building charts, maps and tooltips
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Nothing to plot
    #[error("No data available to display")]
    EmptySeries,

    /// A metric could not be read from the latest sample
    #[error("no current {0} value")]
    MissingValue(String),

    /// No region can be keyed and shaded
    #[error("Missing required column: 'region' (no named region has a drawable boundary)")]
    NoShadedRegions,

    /// A single region's tooltip could not be built
    #[error("{0}")]
    Tooltip(String),
}

/// Result type alias for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
