use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Bouquet {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public JSON shape of a bouquet.
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = Bouquet)]
pub struct BouquetResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bouquet> for BouquetResponse {
    fn from(b: Bouquet) -> Self {
        Self {
            id: b.id,
            name: b.name,
            description: b.description,
            price: b.price,
            image: b.image,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}
