//! HTTP API handlers for closet-web

pub mod buildinfo;
pub mod closet;
pub mod health;
pub mod items;
pub mod outfit;
pub mod ui;
pub mod weather_view;

pub use buildinfo::{get_build_info, BuildInfo};
pub use closet::{closet_options, filter_closet};
pub use health::health_routes;
pub use items::{add_item, list_items};
pub use outfit::{build_outfit, get_outfit_options};
pub use ui::{serve_index, serve_static};
pub use weather_view::{weather_day_summary, weather_history, weather_overview, weather_view};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// `{ "error": message }` with the given status
pub(crate) fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
