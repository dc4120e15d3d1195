//! Inventory listing and the add-item form

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use closet_common::{ClothingItem, NewItem};
use serde::Serialize;
use tracing::{error, info};

use super::error_response;
use crate::AppState;

/// Full inventory table
#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub total: usize,
    pub items: Vec<ClothingItem>,
}

/// GET /api/items
pub async fn list_items(State(state): State<AppState>) -> Json<ItemsResponse> {
    let store = state.store.read().await;
    Json(ItemsResponse {
        total: store.len(),
        items: store.all().to_vec(),
    })
}

/// POST /api/items
///
/// Every field is required; `type`, `style` and each `weather` entry must
/// come from their closed sets. Nothing is written on rejection.
pub async fn add_item(
    State(state): State<AppState>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> Result<(StatusCode, Json<ClothingItem>), ItemsError> {
    let Json(form) = payload?;
    let mut store = state.store.write().await;
    let item = store.add(form).map_err(ItemsError::from)?;
    info!(item = %item.item_name, total = store.len(), "Item added");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Add-item errors
#[derive(Debug)]
pub enum ItemsError {
    Validation(String),
    Storage(String),
}

impl From<closet_common::Error> for ItemsError {
    fn from(e: closet_common::Error) -> Self {
        match e {
            closet_common::Error::Validation(msg) => ItemsError::Validation(msg),
            other => {
                error!("Failed to append item: {}", other);
                ItemsError::Storage(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ItemsError {
    fn from(rejection: JsonRejection) -> Self {
        ItemsError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ItemsError {
    fn into_response(self) -> Response {
        match self {
            ItemsError::Validation(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            ItemsError::Storage(msg) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Storage error: {}", msg),
            ),
        }
    }
}
