//! Server configuration from the environment.
//!
//! Variables may also come from a `.env` file, loaded in `main`.

use std::net::SocketAddr;

use crate::db::{DEFAULT_DB_URL, DbConfig};

/// Listings database URL or local path.
pub const ENV_DB_URL: &str = "BUS_DB_URL";
/// Auth token for remote databases.
pub const ENV_DB_AUTH_TOKEN: &str = "BUS_DB_AUTH_TOKEN";
/// Listen address.
pub const ENV_BIND_ADDR: &str = "BUS_BIND_ADDR";
/// Directory served under `/static`.
pub const ENV_STATIC_DIR: &str = "BUS_STATIC_DIR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

/// Error for an unusable environment variable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}: {message}")]
pub struct ConfigError {
    pub var: &'static str,
    pub message: String,
}

/// Everything `main` needs to start serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub db: DbConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse().map_err(|e| ConfigError {
            var: ENV_BIND_ADDR,
            message: format!("{bind:?}: {e}"),
        })?;

        let db = DbConfig::new(
            get(ENV_DB_URL).unwrap_or_else(|| DEFAULT_DB_URL.to_string()),
            get(ENV_DB_AUTH_TOKEN),
        );
        if db.is_remote() && get(ENV_DB_AUTH_TOKEN).is_none() {
            tracing::warn!("{ENV_DB_URL} is remote but {ENV_DB_AUTH_TOKEN} is not set");
        }

        Ok(Self {
            bind_addr,
            static_dir: get(ENV_STATIC_DIR).unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            db,
        })
    }
}
