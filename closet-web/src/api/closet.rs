//! "My Closet" tab: browse and filter the inventory
//!
//! Selections are repeatable query keys, e.g.
//! `/api/closet?type=Top&type=Dress&weather=%E2%9D%84%EF%B8%8F`.
//! Weather values are taken as-is since they may themselves contain commas.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use closet_common::filter::FilterOptions;
use closet_common::{filter_items, filter_options, ClothingItem, FilterCriteria, ItemType, Style};
use serde::Serialize;
use tracing::debug;

use super::error_response;
use crate::AppState;

/// Filter response with matching items
#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub total_results: usize,
    pub items: Vec<ClothingItem>,
}

/// Build criteria from repeated `type` / `style` / `weather` keys
fn criteria_from_pairs(pairs: Vec<(String, String)>) -> Result<FilterCriteria, ClosetError> {
    let mut criteria = FilterCriteria::default();
    for (key, value) in pairs {
        if value.trim().is_empty() {
            continue;
        }
        match key.as_str() {
            "type" => criteria.types.push(value.parse::<ItemType>()?),
            "style" => criteria.styles.push(value.parse::<Style>()?),
            "weather" => criteria.weather.push(value),
            _ => {}
        }
    }
    Ok(criteria)
}

/// GET /api/closet
pub async fn filter_closet(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<FilterResponse>, ClosetError> {
    let criteria = criteria_from_pairs(pairs)?;
    let store = state.store.read().await;

    let items: Vec<ClothingItem> = filter_items(store.all(), &criteria, state.weather_match)?
        .into_iter()
        .cloned()
        .collect();

    debug!(?criteria, matched = items.len(), "Filtered closet");

    Ok(Json(FilterResponse {
        total_results: items.len(),
        items,
    }))
}

/// GET /api/closet/options
///
/// Distinct values present in the table, for the filter widgets
pub async fn closet_options(State(state): State<AppState>) -> Json<FilterOptions> {
    let store = state.store.read().await;
    Json(filter_options(store.all()))
}

/// Closet filter errors
#[derive(Debug)]
pub enum ClosetError {
    InvalidFilter(String),
}

impl From<closet_common::Error> for ClosetError {
    fn from(e: closet_common::Error) -> Self {
        ClosetError::InvalidFilter(e.to_string())
    }
}

impl IntoResponse for ClosetError {
    fn into_response(self) -> Response {
        match self {
            ClosetError::InvalidFilter(msg) => {
                error_response(StatusCode::BAD_REQUEST, format!("Invalid filter: {}", msg))
            }
        }
    }
}
