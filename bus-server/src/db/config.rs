//! Database connection settings.

use std::fmt;

/// Default local database file.
pub const DEFAULT_DB_URL: &str = "bus_details.db";

/// Where the listings table lives.
#[derive(Clone, PartialEq, Eq)]
pub enum DbTarget {
    /// A local SQLite/libSQL file (or `:memory:`).
    Local { path: String },
    /// A remote libSQL server.
    Remote { url: String, auth_token: String },
}

/// Configuration for the listings database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub target: DbTarget,
}

impl DbConfig {
    /// Build a config from a URL or path plus an optional auth token.
    ///
    /// `libsql://`, `http://`, `https://`, `ws://` and `wss://` URLs are
    /// remote; anything else is treated as a local file path.
    pub fn new(url: impl Into<String>, auth_token: Option<String>) -> Self {
        let url = url.into();
        let target = if is_remote_url(&url) {
            DbTarget::Remote {
                url,
                auth_token: auth_token.unwrap_or_default(),
            }
        } else {
            DbTarget::Local { path: url }
        };
        Self { target }
    }

    /// Local file database.
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            target: DbTarget::Local { path: path.into() },
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.target, DbTarget::Remote { .. })
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::local(DEFAULT_DB_URL)
    }
}

fn is_remote_url(url: &str) -> bool {
    ["libsql://", "http://", "https://", "ws://", "wss://"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

// Keep auth tokens out of logs.
impl fmt::Debug for DbTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbTarget::Local { path } => f.debug_struct("Local").field("path", path).finish(),
            DbTarget::Remote { url, auth_token } => f
                .debug_struct("Remote")
                .field("url", url)
                .field("auth_token", &if auth_token.is_empty() { "" } else { "***" })
                .finish(),
        }
    }
}

impl fmt::Display for DbTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbTarget::Local { path } => write!(f, "file {path}"),
            DbTarget::Remote { url, .. } => write!(f, "remote {url}"),
        }
    }
}
