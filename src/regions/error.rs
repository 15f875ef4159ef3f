//! Region error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or annotating region boundaries
#[derive(Error, Debug)]
pub enum RegionError {
    /// The boundary file does not exist
    #[error("File '{}' not found. Please ensure the file exists in the current directory.", .path.display())]
    NotFound { path: PathBuf },

    /// The boundary file exists but could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a GeoJSON FeatureCollection
    #[error("Invalid GeoJSON: {0}")]
    Parse(String),

    /// The collection holds no features
    #[error("No data found in the GeoJSON file")]
    Empty,

    /// No feature carries the key property
    #[error("Missing required column: '{0}'")]
    MissingProperty(String),

    /// The configured value range is empty or not finite
    #[error("Invalid value range: {0}")]
    InvalidRange(String),
}

impl From<serde_json::Error> for RegionError {
    fn from(err: serde_json::Error) -> Self {
        RegionError::Parse(err.to_string())
    }
}

/// Result type alias for region operations
pub type RegionResult<T> = Result<T, RegionError>;
