use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Every failure kind the API can surface.
///
/// The `IntoResponse` impl below is the single place where failure kinds
/// are translated to wire-level status codes and bodies; handlers only
/// ever return one of these variants.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path id is not a canonical UUID
    #[error("malformatted id")]
    MalformedId,
    /// Request body failed a field-level validation rule
    #[error("{0}")]
    Validation(String),
    /// Token signature or payload did not check out
    #[error("{0}")]
    InvalidToken(String),
    /// Token was valid once but is past its expiry
    #[error("token expired")]
    ExpiredToken,
    /// Operation requires an acting user and none was attached
    #[error("token missing")]
    Unauthorized,
    /// Login with an unknown username or a wrong password
    #[error("invalid username or password")]
    InvalidCredentials,
    /// Acting user does not own the blog they tried to remove
    #[error("could not remove blog")]
    NotOwner,
    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Route not part of the API surface
    #[error("unknown endpoint")]
    UnknownEndpoint,
    /// Anything unexpected; details are logged, not sent to the client
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MalformedId => (StatusCode::BAD_REQUEST, "malformatted id".to_string()),
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::InvalidToken(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::ExpiredToken => (StatusCode::UNAUTHORIZED, "token expired".to_string()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "token missing".to_string()),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid username or password".to_string(),
            ),
            ApiError::NotOwner => (
                StatusCode::BAD_REQUEST,
                "could not remove blog".to_string(),
            ),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            ApiError::UnknownEndpoint => {
                (StatusCode::NOT_FOUND, "unknown endpoint".to_string())
            }
            ApiError::Internal(err) => {
                tracing::error!("Unhandled error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failures_are_bad_requests() {
        let response = ApiError::Validation("title is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::MalformedId.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::NotOwner.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_token_failures_are_unauthorized() {
        let response = ApiError::ExpiredToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ApiError::InvalidToken("invalid signature".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = ApiError::from(anyhow::anyhow!("connection refused"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
