use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{favorites, handlers, middleware::metrics_middleware, search};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Catalog search
        .route("/search", get(search::search))
        // Favorites
        .route(
            "/favorites",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route(
            "/favorites/{id}",
            get(favorites::get_favorite).delete(favorites::remove_favorite),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
