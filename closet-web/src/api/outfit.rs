//! "Build Outfit" tab

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use closet_common::outfit::OutfitOptions;
use closet_common::{compose_outfit, outfit_options, ClothingItem, OutfitError, OutfitSelection};
use serde::Serialize;

use super::error_response;
use crate::AppState;

/// Resolved outfit, in wearing order
#[derive(Debug, Serialize)]
pub struct OutfitResponse {
    pub items: Vec<ClothingItem>,
}

/// GET /api/outfit/options
///
/// Item names per slot, for the four selectors
pub async fn get_outfit_options(State(state): State<AppState>) -> Json<OutfitOptions> {
    let store = state.store.read().await;
    Json(outfit_options(store.all()))
}

/// POST /api/outfit
///
/// Accepts dress+shoes or top+bottom+shoes.
pub async fn build_outfit(
    State(state): State<AppState>,
    payload: Result<Json<OutfitSelection>, JsonRejection>,
) -> Result<Json<OutfitResponse>, OutfitApiError> {
    let Json(selection) = payload?;
    let store = state.store.read().await;
    let items = compose_outfit(store.all(), &selection)?;
    Ok(Json(OutfitResponse { items }))
}

/// Outfit endpoint errors
#[derive(Debug)]
pub enum OutfitApiError {
    /// Body was not a selection object
    BadBody(String),
    Outfit(OutfitError),
}

impl From<OutfitError> for OutfitApiError {
    fn from(e: OutfitError) -> Self {
        OutfitApiError::Outfit(e)
    }
}

impl From<JsonRejection> for OutfitApiError {
    fn from(rejection: JsonRejection) -> Self {
        OutfitApiError::BadBody(rejection.body_text())
    }
}

impl IntoResponse for OutfitApiError {
    fn into_response(self) -> Response {
        let message = match self {
            OutfitApiError::BadBody(msg) => msg,
            OutfitApiError::Outfit(e) => e.to_string(),
        };
        error_response(StatusCode::BAD_REQUEST, message)
    }
}
