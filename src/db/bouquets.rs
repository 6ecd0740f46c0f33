use sqlx::PgPool;

use crate::models::Bouquet;
use crate::validation::bouquet::{BouquetChanges, NewBouquet};

pub async fn list(pool: &PgPool) -> Result<Vec<Bouquet>, sqlx::Error> {
    sqlx::query_as::<_, Bouquet>("SELECT * FROM bouquets ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn create(pool: &PgPool, bouquet: &NewBouquet) -> Result<Bouquet, sqlx::Error> {
    sqlx::query_as::<_, Bouquet>(
        "INSERT INTO bouquets (name, description, price, image)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(&bouquet.name)
    .bind(&bouquet.description)
    .bind(bouquet.price)
    .bind(&bouquet.image)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Bouquet>, sqlx::Error> {
    sqlx::query_as::<_, Bouquet>("SELECT * FROM bouquets WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Overwrites the fields present in `changes`. `None` if the row is gone.
pub async fn update(
    pool: &PgPool,
    id: i64,
    changes: &BouquetChanges,
) -> Result<Option<Bouquet>, sqlx::Error> {
    sqlx::query_as::<_, Bouquet>(
        "UPDATE bouquets SET
             name = COALESCE($2, name),
             description = CASE WHEN $3 THEN $4 ELSE description END,
             price = COALESCE($5, price),
             image = CASE WHEN $6 THEN $7 ELSE image END,
             updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&changes.name)
    .bind(changes.description.is_some())
    .bind(changes.description.clone().flatten())
    .bind(changes.price)
    .bind(changes.image.is_some())
    .bind(changes.image.clone().flatten())
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was removed.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM bouquets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
