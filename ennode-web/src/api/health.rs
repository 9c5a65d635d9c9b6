//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use ennode_common::Locale;
use serde::Serialize;

use crate::AppState;

/// Liveness report with the backend this instance talks to
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub backend: String,
    pub default_locale: Locale,
}

/// GET /health
///
/// Answers from configuration alone; the backend is not contacted.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        backend: state.client.base_url().to_string(),
        default_locale: state.config.default_locale,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
