//! closet-web library - Virtual closet web service
//!
//! Serves the closet browser, weather-adapted view and outfit builder as
//! JSON endpoints plus a static page.

use std::sync::Arc;

use axum::Router;
use closet_common::{InventoryStore, WeatherMatch};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod weather;

use weather::WeatherClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Inventory table; appends take the write lock
    pub store: Arc<RwLock<InventoryStore>>,
    /// Weather provider client
    pub weather: Arc<WeatherClient>,
    /// Weather column matching mode for filters
    pub weather_match: WeatherMatch,
}

impl AppState {
    /// Create new application state
    pub fn new(store: InventoryStore, weather: WeatherClient, weather_match: WeatherMatch) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            weather: Arc::new(weather),
            weather_match,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/items", get(api::list_items).post(api::add_item))
        .route("/api/closet", get(api::filter_closet))
        .route("/api/closet/options", get(api::closet_options))
        .route("/api/weather", get(api::weather_view))
        .route("/api/weather/overview", get(api::weather_overview))
        .route("/api/weather/history", get(api::weather_history))
        .route("/api/weather/day", get(api::weather_day_summary))
        .route("/api/outfit", axum::routing::post(api::build_outfit))
        .route("/api/outfit/options", get(api::get_outfit_options));

    let ui = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/:file", get(api::serve_static))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(ui)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
