use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{StatusCode, Uri},
    routing::get,
};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir};

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod auth;
pub mod doc;
pub mod health;
pub mod pages;
pub mod params;
pub mod trades;
pub mod users;
pub mod warehouses;
pub mod waters;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/waters", waters::router())
        .nest("/warehouses", warehouses::router())
        .nest("/trades", trades::router())
}

/// The full application: pages, API, media files and docs, bound to `state`.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;
    let media = ServeDir::new(&state.config.media_root);

    Router::new()
        .merge(pages::router())
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .nest_service("/media", media)
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
