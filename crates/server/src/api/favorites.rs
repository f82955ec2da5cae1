//! Favorites API handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use reelbox_core::{FavoriteRecord, FavoritesPage};

use super::error::{error_response, invalid_request, ApiError};
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for listing favorites
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFavoritesParams {
    /// 1-based page number (default 1)
    pub page: Option<u32>,
    /// Page size (default from config, capped at the configured maximum)
    pub page_size: Option<u32>,
}

/// Request body for adding a favorite
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteBody {
    pub title: String,
    pub external_id: String,
    pub year: i32,
    pub poster_url: String,
}

impl From<AddFavoriteBody> for FavoriteRecord {
    fn from(body: AddFavoriteBody) -> Self {
        FavoriteRecord::new(body.title, body.external_id, body.year, body.poster_url)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// List one page of favorites
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListFavoritesParams>, QueryRejection>,
) -> Result<Json<FavoritesPage>, ApiError> {
    let Query(params) = params.map_err(|e| invalid_request(e.body_text()))?;
    let limits = state.favorites_config();

    let page = params.page.unwrap_or(1);
    let page_size = params
        .page_size
        .unwrap_or(limits.default_page_size)
        .min(limits.max_page_size);

    state
        .favorites()
        .list(page, page_size)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Get a single favorite by external id
pub async fn get_favorite(
    State(state): State<Arc<AppState>>,
    Path(external_id): Path<String>,
) -> Result<Json<FavoriteRecord>, ApiError> {
    state
        .favorites()
        .get(&external_id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Add a favorite
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddFavoriteBody>, JsonRejection>,
) -> Result<(StatusCode, Json<FavoriteRecord>), ApiError> {
    let Json(body) = body.map_err(|e| invalid_request(e.body_text()))?;

    let record = state
        .favorites()
        .add(body.into())
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Remove a favorite
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path(external_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .favorites()
        .remove(&external_id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
