//! Series Routes
//!
//! - GET /api/v1/series - Generated series as JSON, or CSV with `?format=csv`

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ColumnSummaryDto, SeriesFormat, SeriesParams, SeriesResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::series::{describe, to_csv, validate, SeriesGenerator, MAX_SAMPLE_COUNT};

/// GET /api/v1/series
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeriesParams>,
) -> ApiResult<Response> {
    let mut config = state.config.series.clone();
    if let Some(seed) = params.seed {
        config.seed = seed;
    }
    if let Some(count) = params.count {
        if count == 0 || count > MAX_SAMPLE_COUNT {
            return Err(ApiError::Validation(format!(
                "count must be between 1 and {}",
                MAX_SAMPLE_COUNT
            )));
        }
        config.sample_count = count;
    }

    let seed = config.seed;
    let series = SeriesGenerator::new(config).generate()?;
    let report = validate(&series)?;

    tracing::debug!(seed, count = series.len(), "Generated series");

    match params.format {
        SeriesFormat::Csv => {
            let body = to_csv(&series).map_err(|e| ApiError::Internal(format!("CSV export failed: {}", e)))?;
            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"weather_series.csv\"",
                    ),
                ],
                body,
            )
                .into_response())
        }
        SeriesFormat::Json => {
            let summary = describe(&series)
                .into_iter()
                .map(|(column, summary)| ColumnSummaryDto {
                    column: column.label().to_string(),
                    summary,
                })
                .collect();

            Ok(Json(SeriesResponse {
                seed,
                count: series.len(),
                columns: series.columns().to_vec(),
                samples: series.samples().to_vec(),
                warnings: report.warnings,
                summary,
            })
            .into_response())
        }
    }
}
