//! Data Transfer Objects
//!
//! Query parameters and JSON response bodies for the endpoints.

use serde::{Deserialize, Serialize};

use crate::series::{ColumnSummary, Sample};

// ============================================
// PAGE DTOs
// ============================================

/// Per-request session values; the sidebar checkbox submits `debug=true`
#[derive(Debug, Default, Deserialize)]
pub struct SessionParams {
    #[serde(default)]
    pub debug: bool,
}

// ============================================
// SERIES DTOs
// ============================================

/// Output format for `/api/v1/series`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesFormat {
    #[default]
    Json,
    Csv,
}

/// Series query parameters; unset values come from the configuration
#[derive(Debug, Default, Deserialize)]
pub struct SeriesParams {
    #[serde(default)]
    pub format: SeriesFormat,
    pub seed: Option<u64>,
    pub count: Option<usize>,
}

/// Summary of one column
#[derive(Debug, Serialize)]
pub struct ColumnSummaryDto {
    pub column: String,
    /// `None` when the column has no finite values
    pub summary: Option<ColumnSummary>,
}

/// Generated series
#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub seed: u64,
    pub count: usize,
    pub columns: Vec<String>,
    pub samples: Vec<Sample>,
    /// Validation warnings (NaN counts, ordering)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub summary: Vec<ColumnSummaryDto>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Region boundary file: ok, missing
    pub regions: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
