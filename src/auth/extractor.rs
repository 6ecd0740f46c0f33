use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

/// Identity attached by [`crate::middleware::auth::require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    /// The bearer token the request was authenticated with.
    pub token: String,
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))
    }
}
