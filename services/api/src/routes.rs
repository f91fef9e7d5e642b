use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use leadscout::error::AppError;
use leadscout::pipeline::ScrapeRequest;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct ScrapeApiRequest {
    pub(crate) niche: String,
    pub(crate) location: String,
    #[serde(default = "default_limit")]
    pub(crate) limit: usize,
}

fn default_limit() -> usize {
    ScrapeRequest::DEFAULT_LIMIT
}

#[derive(Debug, Serialize)]
pub(crate) struct ScrapeApiResponse {
    pub(crate) saved: usize,
    pub(crate) file: String,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/scrape", post(scrape_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Run one batch and acknowledge with the count written and where. The
/// candidate source swallows its own failures, so a degraded provider shows
/// up here as `saved: 0` rather than an error.
pub(crate) async fn scrape_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScrapeApiRequest>,
) -> Result<Json<ScrapeApiResponse>, AppError> {
    let request = ScrapeRequest {
        niche: payload.niche,
        location: payload.location,
        limit: payload.limit,
    };

    let outcome = state.service.run(&request).await?;

    Ok(Json(ScrapeApiResponse {
        saved: outcome.saved,
        file: outcome.file.display().to_string(),
    }))
}
