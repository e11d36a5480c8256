use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use bloglist_db::{UserRepo, UserRow};

use crate::auth::verify_token;
use crate::error::ApiError;
use crate::state::AppState;

/// Candidate token pulled off the `Authorization` header, before any
/// verification has happened
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// The verified acting user for this request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRow);

/// First stage: if the request carries `Authorization: Bearer <token>`,
/// stash the token in the request extensions. Never rejects.
pub async fn token_extractor(mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string());

    if let Some(token) = token {
        request.extensions_mut().insert(BearerToken(token));
    }

    next.run(request).await
}

/// Second stage: when a candidate token is present, verify it and attach
/// the acting user. A present-but-bad token rejects the request here; an
/// absent token passes through without a user.
pub async fn user_resolver(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request.extensions().get::<BearerToken>().cloned();

    if let Some(BearerToken(token)) = token {
        let claims = verify_token(&token, &state.config.auth.token_secret)?;
        let user = UserRepo::get_by_id(&state.pool, &claims.sub)
            .await?
            .ok_or_else(|| ApiError::InvalidToken("token invalid".to_string()))?;
        request.extensions_mut().insert(CurrentUser(user));
    }

    Ok(next.run(request).await)
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}
