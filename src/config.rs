//! Runtime settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://starwars.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CURRENT_USER_ID: i64 = 1;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Settings {
    /// SQLite connection string. The file is created if missing.
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// User every favorites route acts on until a session layer supplies one.
    pub current_user_id: i64,
    pub max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Missing or empty keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr = match get("BIND_ADDR") {
            Some(v) => parse("BIND_ADDR", v)?,
            None => parse("BIND_ADDR", DEFAULT_BIND_ADDR.to_string())?,
        };
        let current_user_id = match get("CURRENT_USER_ID") {
            Some(v) => parse("CURRENT_USER_ID", v)?,
            None => DEFAULT_CURRENT_USER_ID,
        };
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => parse("DB_MAX_CONNECTIONS", v)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Settings {
            database_url,
            bind_addr,
            current_user_id,
            max_connections,
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
