//! Server configuration from environment variables (optionally seeded from a `.env` file).

use crate::error::ConfigError;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/cms";
pub const DEFAULT_SCHEMA: &str = "cms";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Where customer records are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local map; records are lost on exit.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    pub database_url: String,
    pub max_connections: u32,
    /// Schema holding the customers table. Must be a valid PostgreSQL identifier.
    pub schema: String,
    pub body_limit: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).map(|s| s.trim()).filter(|s| !s.is_empty());
        Ok(ServerConfig {
            bind_addr: parse_or("BIND_ADDR", get("BIND_ADDR"), SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            backend: get("STORE_BACKEND")
                .map(StoreBackend::from_str)
                .transpose()?
                .unwrap_or(StoreBackend::Postgres),
            database_url: get("DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL).to_string(),
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            schema: get("CMS_SCHEMA").unwrap_or(DEFAULT_SCHEMA).to_string(),
            body_limit: parse_or("REQUEST_BODY_LIMIT", get("REQUEST_BODY_LIMIT"), DEFAULT_BODY_LIMIT)?,
        })
    }
}

fn parse_or<T: FromStr>(var: &'static str, raw: Option<&str>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
            var,
            value: s.to_string(),
        }),
        None => Ok(default),
    }
}
