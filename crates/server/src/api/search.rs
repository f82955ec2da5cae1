//! Catalog search API handler.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use reelbox_core::SearchResults;

use super::error::{error_response, invalid_request, ApiError};
use crate::state::AppState;

/// Query parameters for catalog search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search text
    #[serde(default)]
    pub query: String,
    /// 1-based page number (default 1)
    pub page: Option<u32>,
}

/// Search the catalog, flagging results that are already favorites.
pub async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResults>, ApiError> {
    let Query(params) = params.map_err(|e| invalid_request(e.body_text()))?;
    let page = params.page.unwrap_or(1);

    state
        .search()
        .search_with_favorites(&params.query, page)
        .await
        .map(Json)
        .map_err(error_response)
}
