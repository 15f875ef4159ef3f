//! Page Routes
//!
//! - GET / and GET /dashboard - Time-series dashboard
//! - GET /map - Weather map with tabs
//!
//! Pages are rebuilt on every request. A halted page is still returned as
//! HTML, with a 5xx status naming the fatal step.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::SessionParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::config::Config;
use crate::render::{render_dashboard, render_page, render_tracker, Fatal, Rendered};

/// GET / and GET /dashboard
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SessionParams>,
) -> ApiResult<Response> {
    render(state, params.debug, render_dashboard).await
}

/// GET /map
pub async fn map(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SessionParams>,
) -> ApiResult<Response> {
    render(state, params.debug, render_tracker).await
}

/// HTTP status for a finished pipeline
pub fn status_for(rendered: &Rendered) -> StatusCode {
    match rendered.fatal() {
        None => StatusCode::OK,
        Some(Fatal::Series) => StatusCode::INTERNAL_SERVER_ERROR,
        Some(Fatal::RegionsUnavailable) | Some(Fatal::MapSetup) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

async fn render(
    state: Arc<AppState>,
    debug_mode: bool,
    pipeline: fn(&Config, bool, chrono::DateTime<Utc>) -> Rendered,
) -> ApiResult<Response> {
    let config = Arc::clone(&state.config);

    // Pipelines read files and do CPU work; keep them off the async workers
    let rendered = tokio::task::spawn_blocking(move || pipeline(&config, debug_mode, Utc::now()))
        .await
        .map_err(|e| ApiError::Internal(format!("Page task failed: {}", e)))?;

    let status = status_for(&rendered);
    if let Some(cause) = rendered.fatal() {
        tracing::warn!(cause = ?cause, debug_mode, "Page halted");
    }

    Ok((status, Html(render_page(rendered.page()))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Page;

    #[test]
    fn test_status_for_halted_pages() {
        let page = || Page::new("Test", false);

        assert_eq!(status_for(&Rendered::Complete(page())), StatusCode::OK);
        assert_eq!(
            status_for(&Rendered::Halted { page: page(), cause: Fatal::Series }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&Rendered::Halted { page: page(), cause: Fatal::RegionsUnavailable }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&Rendered::Halted { page: page(), cause: Fatal::MapSetup }),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_halted_page_in_debug_mode_is_html() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.regions.path = dir.path().join("missing.geojson");
        let state = Arc::new(AppState::new(config));

        let response = render(state, true, render_tracker).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("🔍 DEBUG: Loading Singapore regions GeoJSON file"));
    }
}
