pub mod blogs;
pub mod login;
pub mod middleware;
pub mod users;

use std::sync::Arc;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Assemble the `/api` routes.
///
/// Token extraction runs on every request; user resolution only on the
/// blog routes, where a bad token must reject the request before any
/// handler runs.
pub fn build_api_routes(state: Arc<AppState>) -> Router {
    let blog_routes = Router::new()
        .route("/blogs", get(blogs::list_blogs).post(blogs::create_blog))
        .route("/blogs/stats", get(blogs::blog_stats))
        .route(
            "/blogs/{id}",
            get(blogs::get_blog)
                .put(blogs::update_blog)
                .delete(blogs::delete_blog),
        )
        .layer(from_fn_with_state(state.clone(), middleware::user_resolver));

    Router::new()
        .merge(blog_routes)
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/login", post(login::login))
        .layer(from_fn(middleware::token_extractor))
        .with_state(state)
}
