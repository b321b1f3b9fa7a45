//! Web layer for the bus listings dashboard.
//!
//! Serves the dashboard page and re-runs the filter pipeline on every
//! widget change.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
