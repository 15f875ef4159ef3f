//! Region Routes
//!
//! - GET /api/v1/regions - Region boundaries with their assigned temperature

use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::regions::{load_regions, to_feature_collection, RegionValueAssigner};

/// GET /api/v1/regions
///
/// Returns a GeoJSON FeatureCollection whose features carry `region` and
/// `temperature` properties.
pub async fn get_regions(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let config = Arc::clone(&state.config);

    let records = tokio::task::spawn_blocking(move || {
        let features = load_regions(&config.regions.path)?;
        RegionValueAssigner::new(
            config.regions.seed,
            config.regions.min_temperature,
            config.regions.max_temperature,
        )
        .assign(features)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Region task failed: {}", e)))??;

    Ok(Json(to_feature_collection(&records)))
}
