//! HTTP interface - axum routes over the core services.
//!
//! Handlers decode requests, call exactly one core operation and wrap the result in the
//! `{ success, message, data }` envelope. They hold no business rules.

/// Error to HTTP response mapping and request extractors
pub mod error;
/// `/menu-items` handlers
pub mod menu_items;
/// `/menus` handlers
pub mod menus;
/// Response envelope
pub mod response;

use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::api::response::ApiResponse;

/// Shared data available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations, shared by every handler
    pub db: Arc<DatabaseConnection>,
}

impl AppState {
    /// Creates a new `AppState` owning the given database connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }
}

async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::done("OK"))
}

/// Builds the application router with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let menu_routes = Router::new()
        .route("/", post(menus::create).get(menus::find_all))
        .route("/active", get(menus::find_active))
        .route("/with-counts", get(menus::find_with_counts))
        .route(
            "/{id}",
            get(menus::find_one)
                .patch(menus::update)
                .delete(menus::remove),
        );

    let menu_item_routes = Router::new()
        .route("/", post(menu_items::create).get(menu_items::find_all))
        .route("/path/{*path}", get(menu_items::find_by_path))
        .route("/menu/{menu_id}", get(menu_items::find_by_menu_id))
        .route(
            "/menu/{menu_id}/hierarchy",
            get(menu_items::find_hierarchy_by_menu_id),
        )
        .route("/hierarchy/all", get(menu_items::find_all_hierarchies))
        .route(
            "/{id}",
            get(menu_items::find_one)
                .patch(menu_items::update)
                .delete(menu_items::remove),
        )
        .route("/{id}/children", post(menu_items::create_child))
        .route("/{id}/order", patch(menu_items::update_order));

    Router::new()
        .route("/health", get(health))
        .nest("/menus", menu_routes)
        .nest("/menu-items", menu_item_routes)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
