//! "Weather View" tab: items suited to a city's current conditions, plus
//! the provider's overview, historical and daily summary lookups

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use closet_common::{filter_by_condition, ClothingItem, WeatherReading};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error_response;
use crate::weather::{Coordinates, DaySummary, WeatherError};
use crate::AppState;

/// City shown when none is given
pub const DEFAULT_CITY: &str = "St. Gallen";

/// Query parameters for the weather view
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    #[serde(default = "default_city")]
    pub city: String,
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

/// Current reading plus the items tagged for its condition
#[derive(Debug, Serialize)]
pub struct WeatherViewResponse {
    pub city: String,
    pub location: Coordinates,
    pub reading: WeatherReading,
    pub total_results: usize,
    pub items: Vec<ClothingItem>,
}

/// Provider overview text for a city
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub city: String,
    pub location: Coordinates,
    pub overview: String,
}

/// Query parameters for a past instant
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_city")]
    pub city: String,
    /// Unix timestamp (seconds)
    pub dt: i64,
}

/// Query parameters for a calendar day
#[derive(Debug, Deserialize)]
pub struct DayQuery {
    #[serde(default = "default_city")]
    pub city: String,
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Classified reading at a past instant
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub city: String,
    pub location: Coordinates,
    pub at: DateTime<Utc>,
    pub reading: WeatherReading,
}

/// Daily aggregation for a city
#[derive(Debug, Serialize)]
pub struct DaySummaryResponse {
    pub city: String,
    pub location: Coordinates,
    pub summary: DaySummary,
}

fn city_name(city: &str) -> Result<String, WeatherViewError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherViewError::MissingCity);
    }
    Ok(city.to_string())
}

/// GET /api/weather?city=NAME
pub async fn weather_view(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<WeatherViewResponse>, WeatherViewError> {
    let city = city_name(&query.city)?;

    let location = state.weather.resolve_city(&city).await?;
    let reading = state.weather.current_conditions(location).await?;

    let store = state.store.read().await;
    let items: Vec<ClothingItem> = filter_by_condition(store.all(), reading.condition, state.weather_match)
        .into_iter()
        .cloned()
        .collect();

    info!(
        city = %city,
        condition = %reading.condition,
        matched = items.len(),
        "Weather view"
    );

    Ok(Json(WeatherViewResponse {
        city,
        location,
        reading,
        total_results: items.len(),
        items,
    }))
}

/// GET /api/weather/overview?city=NAME
pub async fn weather_overview(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<OverviewResponse>, WeatherViewError> {
    let city = city_name(&query.city)?;

    let location = state.weather.resolve_city(&city).await?;
    let overview = state.weather.overview(location).await?;

    Ok(Json(OverviewResponse {
        city,
        location,
        overview,
    }))
}

/// GET /api/weather/history?city=NAME&dt=UNIX_SECONDS
pub async fn weather_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, WeatherViewError> {
    let Query(query) = query?;
    let city = city_name(&query.city)?;
    let at = DateTime::from_timestamp(query.dt, 0)
        .ok_or_else(|| WeatherViewError::BadQuery(format!("Timestamp out of range: {}", query.dt)))?;

    let location = state.weather.resolve_city(&city).await?;
    let reading = state.weather.historical(location, at).await?;

    Ok(Json(HistoryResponse {
        city,
        location,
        at,
        reading,
    }))
}

/// GET /api/weather/day?city=NAME&date=YYYY-MM-DD
pub async fn weather_day_summary(
    State(state): State<AppState>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Json<DaySummaryResponse>, WeatherViewError> {
    let Query(query) = query?;
    let city = city_name(&query.city)?;

    let location = state.weather.resolve_city(&city).await?;
    let summary = state.weather.day_summary(location, query.date).await?;

    Ok(Json(DaySummaryResponse {
        city,
        location,
        summary,
    }))
}

/// Weather view errors
#[derive(Debug)]
pub enum WeatherViewError {
    MissingCity,
    BadQuery(String),
    CityNotFound(String),
    Unavailable(String),
}

impl From<WeatherError> for WeatherViewError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::CityNotFound(city) => WeatherViewError::CityNotFound(city),
            WeatherError::Unavailable(msg) => WeatherViewError::Unavailable(msg),
        }
    }
}

impl From<QueryRejection> for WeatherViewError {
    fn from(rejection: QueryRejection) -> Self {
        WeatherViewError::BadQuery(rejection.body_text())
    }
}

impl IntoResponse for WeatherViewError {
    fn into_response(self) -> Response {
        match self {
            WeatherViewError::MissingCity => {
                error_response(StatusCode::BAD_REQUEST, "Please enter a city".to_string())
            }
            WeatherViewError::BadQuery(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            WeatherViewError::CityNotFound(city) => {
                error_response(StatusCode::NOT_FOUND, format!("City not found: {}", city))
            }
            WeatherViewError::Unavailable(msg) => {
                error_response(StatusCode::BAD_GATEWAY, format!("Weather API error: {}", msg))
            }
        }
    }
}
