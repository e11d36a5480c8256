use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use bloglist_db::{is_unique_violation, BlogRepo, UserRepo};

use crate::auth::hash_password;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Username and password share the same presence and length rules;
/// `field` names the offender in the error message.
fn require_min_length(value: Option<String>, field: &str) -> Result<String, ApiError> {
    let value = value.ok_or_else(|| ApiError::Validation(format!("{} is required", field)))?;
    if value.chars().count() < 3 {
        return Err(ApiError::Validation(format!(
            "{} must be at least 3 characters long",
            field
        )));
    }
    Ok(value)
}

/// POST /api/users
#[tracing::instrument(skip(state, req))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let username = require_min_length(req.username, "username")?;
    let password = require_min_length(req.password, "password")?;
    let name = req.name.unwrap_or_default();

    if UserRepo::get_by_username(&state.pool, &username)
        .await?
        .is_some()
    {
        return Err(ApiError::Validation(
            "expected `username` to be unique".to_string(),
        ));
    }

    let password_hash = hash_password(&password)?;
    let user_id = Uuid::new_v4().to_string();

    if let Err(err) = UserRepo::create(&state.pool, &user_id, &username, &name, &password_hash).await
    {
        // Two concurrent registrations can both pass the pre-check; the
        // UNIQUE constraint is the arbiter.
        if is_unique_violation(&err) {
            return Err(ApiError::Validation(
                "expected `username` to be unique".to_string(),
            ));
        }
        return Err(err.into());
    }

    tracing::info!("Created user {}", username);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": user_id,
            "username": username,
            "name": name,
            "blogs": [],
        })),
    ))
}

/// GET /api/users - users with their blogs embedded
#[tracing::instrument(skip(state))]
pub async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let users = UserRepo::list(&state.pool).await?;
    let blogs = BlogRepo::list(&state.pool).await?;

    let users: Vec<Value> = users
        .iter()
        .map(|user| {
            let owned: Vec<Value> = blogs
                .iter()
                .filter(|blog| blog.user_id == user.user_id)
                .map(|blog| {
                    json!({
                        "id": blog.blog_id,
                        "title": blog.title,
                        "author": blog.author,
                        "url": blog.url,
                    })
                })
                .collect();

            json!({
                "id": user.user_id,
                "username": user.username,
                "name": user.name,
                "blogs": owned,
            })
        })
        .collect();

    Ok(Json(json!(users)))
}
