//! The read-only listing store interface.

use std::future::Future;

use crate::domain::{DepartureTime, ListingTable};
use crate::query::ListingFilter;

use super::error::DbError;

/// Read access to bus listings.
///
/// Every lookup returns values sorted ascending. An empty result is a valid
/// answer, not an error.
pub trait ListingStore {
    /// Distinct states.
    fn states(&self) -> impl Future<Output = Result<Vec<String>, DbError>> + Send;

    /// Distinct route names within a state.
    fn routes(&self, state: &str) -> impl Future<Output = Result<Vec<String>, DbError>> + Send;

    /// Distinct bus types on a route.
    fn bus_types(
        &self,
        state: &str,
        route: &str,
    ) -> impl Future<Output = Result<Vec<String>, DbError>> + Send;

    /// Distinct departure times on a route.
    fn departure_times(
        &self,
        state: &str,
        route: &str,
    ) -> impl Future<Output = Result<Vec<DepartureTime>, DbError>> + Send;

    /// Every listing matching the filter, fully ordered.
    fn listings(
        &self,
        filter: &ListingFilter,
    ) -> impl Future<Output = Result<ListingTable, DbError>> + Send;
}
