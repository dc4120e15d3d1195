//! Liveness plus a glance at what the service is working with

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Rows currently in the inventory table
    pub items: usize,
    /// False when no weather API key is set; the weather view answers 502
    pub weather_configured: bool,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let items = state.store.read().await.len();
    Json(HealthResponse {
        status: "ok",
        module: "closet-web",
        version: env!("CARGO_PKG_VERSION"),
        items,
        weather_configured: state.weather.has_api_key(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
