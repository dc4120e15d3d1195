//! Shared test fixtures: seeded inventory and a stand-in weather provider

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use closet_common::config::WeatherConfig;
use closet_common::InventoryStore;
use serde_json::json;
use tempfile::TempDir;

pub const API_KEY: &str = "test-key";

pub const SEED: &str = "item_name,type,style,weather,image_url\n\
RedDress,Dress,Fancy,\u{2600}\u{FE0F},https://img.example/red-dress.png\n\
Blouse,Top,Fancy,\"\u{2600}\u{FE0F},\u{2601}\u{FE0F}\",https://img.example/blouse.png\n\
Jeans,Bottom,Casual,\"\u{2744}\u{FE0F},\u{2601}\u{FE0F}\",https://img.example/jeans.png\n\
Sneakers,Shoes,Casual,\"\u{2600}\u{FE0F},\u{2601}\u{FE0F}\",https://img.example/sneakers.png\n\
Boots,Shoes,Casual,\"\u{2744}\u{FE0F},\u{1F327}\u{FE0F}\",https://img.example/boots.png\n";

/// Inventory file seeded with five items inside a temp dir
pub fn seeded_store(dir: &TempDir) -> InventoryStore {
    let path = dir.path().join("closet_items.csv");
    std::fs::write(&path, SEED).unwrap();
    InventoryStore::load(&path).unwrap()
}

/// Coordinates the stand-in provider knows about
pub const ST_GALLEN: (f64, f64) = (47.42, 9.37);
pub const SNOWTOWN: (f64, f64) = (1.0, 1.0);
pub const FLAKYVILLE: (f64, f64) = (2.0, 2.0);
pub const BROKENBURG: (f64, f64) = (3.0, 3.0);

#[derive(Clone, Default)]
pub struct ProviderState {
    /// Requests seen by the One Call endpoint
    pub onecall_hits: Arc<AtomicUsize>,
}

type Params = Query<HashMap<String, String>>;

fn authorized(params: &HashMap<String, String>) -> bool {
    params.get("appid").map(String::as_str) == Some(API_KEY)
}

fn coords(params: &HashMap<String, String>) -> Option<(f64, f64)> {
    let lat = params.get("lat")?.parse().ok()?;
    let lon = params.get("lon")?.parse().ok()?;
    Some((lat, lon))
}

async fn geocode(Query(params): Params) -> Response {
    if !authorized(&params) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"cod": 401}))).into_response();
    }
    let hit = |name: &str, (lat, lon): (f64, f64)| json!([{"name": name, "lat": lat, "lon": lon, "country": "CH"}]);
    let body = match params.get("q").map(String::as_str) {
        Some("St. Gallen") => hit("St. Gallen", ST_GALLEN),
        Some("Snowtown") => hit("Snowtown", SNOWTOWN),
        Some("Flakyville") => hit("Flakyville", FLAKYVILLE),
        Some("Brokenburg") => hit("Brokenburg", BROKENBURG),
        _ => json!([]),
    };
    Json(body).into_response()
}

fn current(temp: f64, description: &str) -> Response {
    Json(json!({
        "lat": 0.0,
        "lon": 0.0,
        "timezone": "Europe/Zurich",
        "current": {
            "dt": 1_700_000_000,
            "temp": temp,
            "humidity": 80,
            "weather": [{"id": 800, "main": "x", "description": description, "icon": "01d"}]
        }
    }))
    .into_response()
}

async fn onecall(State(state): State<ProviderState>, Query(params): Params) -> Response {
    let seen = state.onecall_hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let at = coords(&params);
    if at == Some(ST_GALLEN) {
        current(18.0, "overcast clouds")
    } else if at == Some(SNOWTOWN) {
        current(30.0, "light snow")
    } else if at == Some(FLAKYVILLE) && seen == 0 {
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    } else if at == Some(FLAKYVILLE) {
        current(12.0, "moderate rain")
    } else if at == Some(BROKENBURG) {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    } else {
        Json(json!({"current": {}})).into_response()
    }
}

async fn overview(Query(params): Params) -> Response {
    if !authorized(&params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "lat": 47.42,
        "lon": 9.37,
        "tz": "+01:00",
        "date": "2024-05-01",
        "units": "metric",
        "weather_overview": "Overcast all day with mild temperatures."
    }))
    .into_response()
}

async fn timemachine(Query(params): Params) -> Response {
    if !authorized(&params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Some(dt) = params.get("dt").and_then(|d| d.parse::<i64>().ok()) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"cod": 400, "message": "dt required"}))).into_response();
    };
    let data = if coords(&params) == Some(ST_GALLEN) {
        json!([{"dt": dt, "temp": 4.5, "weather": [{"id": 500, "main": "Rain", "description": "light rain"}]}])
    } else {
        json!([])
    };
    Json(json!({"lat": 47.42, "lon": 9.37, "timezone": "Europe/Zurich", "data": data})).into_response()
}

async fn day_summary(Query(params): Params) -> Response {
    if !authorized(&params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Some(date) = params.get("date").cloned() else {
        return (StatusCode::BAD_REQUEST, Json(json!({"cod": 400, "message": "date required"}))).into_response();
    };
    Json(json!({
        "lat": 47.42,
        "lon": 9.37,
        "tz": "+01:00",
        "date": date,
        "units": "metric",
        "cloud_cover": {"afternoon": 75.0},
        "humidity": {"afternoon": 68.0},
        "precipitation": {"total": 2.4},
        "temperature": {"min": 3.1, "max": 11.8, "afternoon": 10.2, "night": 4.0, "evening": 7.5, "morning": 3.9}
    }))
    .into_response()
}

/// Start the stand-in provider on an ephemeral port; returns its base URL
pub async fn spawn_provider() -> (String, ProviderState) {
    let state = ProviderState::default();
    let app = Router::new()
        .route("/geo/1.0/direct", get(geocode))
        .route("/data/3.0/onecall", get(onecall))
        .route("/data/3.0/onecall/overview", get(overview))
        .route("/data/3.0/onecall/timemachine", get(timemachine))
        .route("/data/3.0/onecall/day_summary", get(day_summary))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

/// Client settings pointing both endpoints at `base_url`
pub fn weather_config(base_url: &str, api_key: Option<&str>) -> WeatherConfig {
    WeatherConfig {
        api_key: api_key.map(String::from),
        geo_base_url: base_url.to_string(),
        api_base_url: base_url.to_string(),
        timeout_secs: 5,
    }
}
