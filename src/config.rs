use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    /// Access token lifetime. `None` disables expiry.
    pub token_ttl: Option<chrono::Duration>,
    pub max_body_size: usize,
    pub db_max_connections: u32,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_required = |key: &str| {
            lookup(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("BLOSSOM_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid BLOSSOM_HOST: {e}"))?;

        let port: u16 = env_or("BLOSSOM_PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid BLOSSOM_PORT: {e}"))?;

        let token_ttl = parse_token_ttl(&env_or("BLOSSOM_TOKEN_TTL_MINUTES", "525600"))?;

        let max_body_size: usize = env_or("BLOSSOM_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid BLOSSOM_MAX_BODY_SIZE: {e}"))?;

        let db_max_connections: u32 = env_or("BLOSSOM_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid BLOSSOM_DB_MAX_CONNECTIONS: {e}"))?;

        let log_level = env_or("BLOSSOM_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            token_ttl,
            max_body_size,
            db_max_connections,
            log_level,
        })
    }
}

/// A hundred years, in minutes.
const MAX_TOKEN_TTL_MINUTES: i64 = 100 * 365 * 24 * 60;

/// Zero means tokens never expire.
fn parse_token_ttl(raw: &str) -> Result<Option<chrono::Duration>, String> {
    let minutes: i64 = raw
        .parse()
        .map_err(|e| format!("Invalid BLOSSOM_TOKEN_TTL_MINUTES: {e}"))?;
    if minutes < 0 {
        return Err("Invalid BLOSSOM_TOKEN_TTL_MINUTES: must not be negative".to_string());
    }
    if minutes > MAX_TOKEN_TTL_MINUTES {
        return Err(format!(
            "Invalid BLOSSOM_TOKEN_TTL_MINUTES: must be at most {MAX_TOKEN_TTL_MINUTES} (100 years)"
        ));
    }
    if minutes == 0 {
        return Ok(None);
    }
    chrono::Duration::try_minutes(minutes)
        .map(Some)
        .ok_or_else(|| "Invalid BLOSSOM_TOKEN_TTL_MINUTES: out of range".to_string())
}
