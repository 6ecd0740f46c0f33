use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::state::SharedState;

/// Rejects the request with 401 unless it carries a live bearer token.
pub async fn require_auth(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?.to_string();

    let user_id = state
        .tokens
        .validate(&token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    req.extensions_mut().insert(AuthUser { user_id, token });
    Ok(next.run(req).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".to_string()))?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Unauthorized(
            "Unsupported authorization scheme".to_string(),
        ));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::Unauthorized("Missing authentication token".to_string()));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc123")).unwrap(), "abc123");
        assert_eq!(bearer_token(&headers("bearer  abc123 ")).unwrap(), "abc123");
    }

    #[test]
    fn rejects_missing_header() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer    ", "abc123"] {
            assert!(
                matches!(bearer_token(&headers(value)), Err(AppError::Unauthorized(_))),
                "accepted {value:?}"
            );
        }
    }
}
