//! Application state for the web layer.

use std::sync::Arc;

use crate::db::Database;

/// Shared application state.
///
/// Each request opens its own session on `db`; nothing else is shared.
#[derive(Clone)]
pub struct AppState {
    /// Listings database
    pub db: Arc<Database>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }
}
