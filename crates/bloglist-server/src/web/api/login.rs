use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use bloglist_db::UserRepo;

use crate::auth::{create_token, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/login
#[tracing::instrument(skip(state, req))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Value>> {
    let user = UserRepo::get_by_username(&state.pool, &req.username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&req.password, &user.password_hash)? {
        tracing::info!("Failed login attempt for {}", user.username);
        return Err(ApiError::InvalidCredentials);
    }

    let token = create_token(
        &user.user_id,
        &user.username,
        &state.config.auth.token_secret,
        state.config.auth.token_ttl_secs,
    )?;

    Ok(Json(json!({
        "token": token,
        "username": user.username,
        "name": user.name,
    })))
}
