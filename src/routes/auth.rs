use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::models::UserResponse;
use crate::openapi::{ErrorBody, LoginBody, RegisterBody};
use crate::state::SharedState;
use crate::validation::{self, JsonBody, ValidationErrors};

#[derive(Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(value_type = String, example = "Bearer")]
    pub token_type: &'static str,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn email_taken() -> AppError {
    ValidationErrors::single("email", "The email has already been taken.").into()
}

#[utoipa::path(
    post,
    path = "/user/register",
    tag = "User",
    request_body = RegisterBody,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 422, description = "Invalid input or email taken", body = ErrorBody),
    )
)]
pub async fn register(
    State(state): State<SharedState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let reg = validation::auth::registration(&body)?;

    if db::users::email_exists(&state.pool, &reg.email).await? {
        return Err(email_taken());
    }

    let pw_hash = password::hash(&reg.password).map_err(AppError::Internal)?;

    // The unique index settles concurrent registrations of the same email.
    let user = db::users::create(&state.pool, &reg.name, &reg.email, &pw_hash)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => email_taken(),
            _ => AppError::Database(e),
        })?;

    tracing::info!(user_id = user.id, "user registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

#[utoipa::path(
    post,
    path = "/user/login",
    tag = "User",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 422, description = "Missing email or password", body = ErrorBody),
        (status = 429, description = "Too many failed attempts", body = ErrorBody),
    )
)]
pub async fn login(
    State(state): State<SharedState>,
    JsonBody(body): JsonBody,
) -> Result<Json<TokenResponse>, AppError> {
    let creds = validation::auth::credentials(&body)?;

    if state.login_limiter.check(&creds.email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let Some(user) = db::users::find_by_email(&state.pool, &creds.email).await? else {
        password::verify_dummy(&creds.password);
        state.login_limiter.record_failure(&creds.email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    };

    let valid = password::verify(&creds.password, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        state.login_limiter.record_failure(&creds.email);
        tracing::warn!(user_id = user.id, "failed login attempt");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    state.login_limiter.reset(&creds.email);
    let issued = state.tokens.issue(user.id).await?;

    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(TokenResponse {
        access_token: issued.token,
        token_type: "Bearer",
        expires_at: issued.expires_at,
    }))
}

#[utoipa::path(
    post,
    path = "/user/logout",
    tag = "User",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Token revoked", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    )
)]
pub async fn logout(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.tokens.revoke(&auth.token).await? {
        return Err(AppError::Unauthorized("Invalid or expired token".to_string()));
    }

    tracing::info!(user_id = auth.user_id, "user logged out");

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/user/whoami",
    tag = "User",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The token owner", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    )
)]
pub async fn whoami(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;
    Ok(Json(UserResponse::from(&user)))
}
