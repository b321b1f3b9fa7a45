//! The filtered listing query.

use serde::Serialize;

use crate::domain::{DepartureTime, PriceOrder, PriceRange, StarRating};

use super::error::QueryError;
use super::sql::{DEPARTS_AT, SqlQuery, TABLE};

/// Every predicate of the final listing query.
///
/// All predicates are combined with AND. `bus_types` must be non-empty;
/// [`ListingFilter::to_query`] refuses to build SQL otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingFilter {
    pub state: String,
    pub route: String,
    pub price: PriceRange,
    pub departing_after: DepartureTime,
    pub min_rating: StarRating,
    pub bus_types: Vec<String>,
    pub order: PriceOrder,
}

impl ListingFilter {
    /// Bus types with duplicates removed, first occurrence kept.
    pub fn distinct_bus_types(&self) -> Vec<&str> {
        let mut seen = Vec::with_capacity(self.bus_types.len());
        for t in &self.bus_types {
            if !seen.contains(&t.as_str()) {
                seen.push(t.as_str());
            }
        }
        seen
    }

    /// Build the parameterized statement.
    ///
    /// Rows come back ordered by star rating (highest first), then by price
    /// in the requested direction, then by departure time.
    pub fn to_query(&self) -> Result<SqlQuery, QueryError> {
        let bus_types = self.distinct_bus_types();
        if bus_types.is_empty() {
            return Err(QueryError::EmptyBusTypes);
        }

        let mut q = SqlQuery::new();
        let route = q.bind(self.route.as_str());
        let state = q.bind(self.state.as_str());
        let min_price = q.bind(self.price.min());
        let max_price = q.bind(self.price.max());
        let departing = q.bind(self.departing_after.to_sql());
        let rating = q.bind(i64::from(self.min_rating.get()));
        let types = q.bind_list(bus_types);
        let direction = self.order.sql_keyword();

        q.push(&format!(
            "SELECT *, time(Departing_Time) AS {DEPARTS_AT} FROM {TABLE} \
             WHERE Route_Name = {route} \
             AND State = {state} \
             AND Price BETWEEN {min_price} AND {max_price} \
             AND time(Departing_Time) >= time({departing}) \
             AND Star_Rating >= {rating} \
             AND Bus_Type IN ({types}) \
             ORDER BY Star_Rating DESC, Price {direction}, time(Departing_Time) ASC"
        ));
        Ok(q)
    }
}
