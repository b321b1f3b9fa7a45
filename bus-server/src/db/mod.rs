//! Listing database access.
//!
//! Listings live in a libSQL (SQLite-compatible) database, either a local
//! file or a remote server. The dashboard only reads from it.
//!
//! Key characteristics:
//! - One [`Session`] (one connection) per pipeline run, released on drop
//! - Every value is bound through a numbered placeholder
//! - Lookups return sorted distinct values; empty results are not errors

mod config;
mod decode;
mod error;
pub mod schema;
mod session;
mod store;

pub use config::{DEFAULT_DB_URL, DbConfig, DbTarget};
pub use error::DbError;
pub use session::{Database, Session};
pub use store::ListingStore;
