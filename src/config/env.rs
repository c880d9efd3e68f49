//! Process settings from environment variables (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_ENTITIES_PATH: &str = "entities.json";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub entities_path: PathBuf,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable source.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Env(format!("DB_MAX_CONNECTIONS must be a positive integer, got '{}'", v)))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env(format!("BIND_ADDR is not a socket address: '{}'", bind_raw)))?;
        let entities_path = PathBuf::from(get("ENTITIES_PATH").unwrap_or_else(|| DEFAULT_ENTITIES_PATH.into()));
        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "*")
            .map(String::from)
            .collect();

        Ok(ServerConfig {
            database_url,
            max_connections,
            bind_addr,
            entities_path,
            cors_allowed_origins,
        })
    }
}
