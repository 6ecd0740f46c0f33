use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::BouquetResponse;
use crate::openapi::{CreateBouquetBody, ErrorBody, UpdateBouquetBody};
use crate::routes::auth::MessageResponse;
use crate::state::SharedState;
use crate::validation::{self, JsonBody};

fn not_found() -> AppError {
    AppError::NotFound("Bouquet not found".to_string())
}

/// Ids that are not positive integers cannot match a row.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(not_found)
}

#[utoipa::path(
    get,
    path = "/bouquets",
    tag = "Bouquets",
    responses((status = 200, description = "Every bouquet, oldest first", body = [BouquetResponse]))
)]
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<BouquetResponse>>, AppError> {
    let bouquets = db::bouquets::list(&state.pool).await?;
    Ok(Json(bouquets.into_iter().map(BouquetResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/bouquets",
    tag = "Bouquets",
    security(("bearer" = [])),
    request_body = CreateBouquetBody,
    responses(
        (status = 201, description = "Bouquet created", body = BouquetResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 422, description = "Invalid input", body = ErrorBody),
    )
)]
pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<BouquetResponse>), AppError> {
    let new = validation::bouquet::new_bouquet(&body)?;
    let bouquet = db::bouquets::create(&state.pool, &new).await?;

    tracing::info!(user_id = auth.user_id, bouquet_id = bouquet.id, "bouquet created");

    Ok((StatusCode::CREATED, Json(bouquet.into())))
}

#[utoipa::path(
    get,
    path = "/bouquets/{id}",
    tag = "Bouquets",
    params(("id" = i64, Path, description = "Bouquet id")),
    responses(
        (status = 200, description = "The bouquet", body = BouquetResponse),
        (status = 404, description = "No such bouquet", body = ErrorBody),
    )
)]
pub async fn show(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<BouquetResponse>, AppError> {
    let id = parse_id(&id)?;
    let bouquet = db::bouquets::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(bouquet.into()))
}

#[utoipa::path(
    put,
    path = "/bouquets/{id}",
    tag = "Bouquets",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Bouquet id")),
    request_body = UpdateBouquetBody,
    responses(
        (status = 200, description = "The updated bouquet", body = BouquetResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No such bouquet", body = ErrorBody),
        (status = 422, description = "Invalid input", body = ErrorBody),
    )
)]
pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<BouquetResponse>, AppError> {
    let id = parse_id(&id)?;
    let existing = db::bouquets::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let changes = validation::bouquet::bouquet_changes(&body)?;
    if changes.is_empty() {
        return Ok(Json(existing.into()));
    }

    let bouquet = db::bouquets::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(user_id = auth.user_id, bouquet_id = id, "bouquet updated");

    Ok(Json(bouquet.into()))
}

#[utoipa::path(
    delete,
    path = "/bouquets/{id}",
    tag = "Bouquets",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Bouquet id")),
    responses(
        (status = 200, description = "Bouquet deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No such bouquet", body = ErrorBody),
    )
)]
pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    if !db::bouquets::delete(&state.pool, id).await? {
        return Err(not_found());
    }

    tracing::info!(user_id = auth.user_id, bouquet_id = id, "bouquet deleted");

    Ok(Json(MessageResponse {
        message: "Bouquet deleted".to_string(),
    }))
}
