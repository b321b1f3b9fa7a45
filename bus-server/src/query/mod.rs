//! SQL construction for the dashboard.
//!
//! Everything here is pure: it turns filter selections into statement text
//! plus bound values. Execution lives in [`crate::db`].

mod error;
mod filter;
mod lookup;
mod sql;

pub use error::QueryError;
pub use filter::ListingFilter;
pub use lookup::Lookup;
pub use sql::{DEPARTS_AT, SqlParam, SqlQuery, TABLE};
