//! Opaque bearer tokens.
//!
//! A token is 32 random bytes, hex encoded, handed to the client once. Only
//! its SHA-256 digest is stored, so a leaked table cannot be replayed.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::db;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Mint a new token bound to `user_id`.
    async fn issue(&self, user_id: i64) -> Result<IssuedToken, AppError>;
    /// Resolve a presented token to its user, if it is known and unexpired.
    async fn validate(&self, token: &str) -> Result<Option<i64>, AppError>;
    /// Forget a token. Returns whether it existed.
    async fn revoke(&self, token: &str) -> Result<bool, AppError>;
}

pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub struct PgTokenStore {
    pool: PgPool,
    ttl: Option<Duration>,
}

impl PgTokenStore {
    pub fn new(pool: PgPool, ttl: Option<Duration>) -> Self {
        Self { pool, ttl }
    }
}

#[async_trait]
impl TokenStore for PgTokenStore {
    async fn issue(&self, user_id: i64) -> Result<IssuedToken, AppError> {
        let token = generate_token();
        let expires_at = match self.ttl {
            Some(ttl) => Some(Utc::now().checked_add_signed(ttl).ok_or_else(|| {
                AppError::Internal("Token expiry overflows the calendar".to_string())
            })?),
            None => None,
        };
        db::access_tokens::create(&self.pool, user_id, &hash_token(&token), expires_at).await?;
        Ok(IssuedToken { token, expires_at })
    }

    async fn validate(&self, token: &str) -> Result<Option<i64>, AppError> {
        let token_hash = hash_token(token);
        let Some(stored) = db::access_tokens::find_by_hash(&self.pool, &token_hash).await? else {
            return Ok(None);
        };

        if stored.is_expired(Utc::now()) {
            db::access_tokens::delete_by_hash(&self.pool, &token_hash).await?;
            return Ok(None);
        }

        Ok(Some(stored.user_id))
    }

    async fn revoke(&self, token: &str) -> Result<bool, AppError> {
        Ok(db::access_tokens::delete_by_hash(&self.pool, &hash_token(token)).await?)
    }
}
