pub mod api;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}

/// Build the full router with CORS and request tracing
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::build_api_routes(state))
        .fallback(unknown_endpoint)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
