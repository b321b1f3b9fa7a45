//! Table bootstrap for local databases.
//!
//! Production data is loaded by an external scraper; this module only exists
//! so a fresh local database (development, tests) has the expected shape.

use crate::query::{SqlQuery, TABLE};

use super::error::DbError;
use super::session::Session;

/// Create the listings table if it does not exist.
pub async fn create_table(session: &Session) -> Result<(), DbError> {
    let mut q = SqlQuery::new();
    q.push(&format!(
        "CREATE TABLE IF NOT EXISTS {TABLE} (
            Bus_Name TEXT NOT NULL,
            State TEXT NOT NULL,
            Route_Name TEXT NOT NULL,
            Bus_Type TEXT NOT NULL,
            Departing_Time TEXT NOT NULL,
            Price REAL NOT NULL,
            Star_Rating REAL NOT NULL
        )"
    ));
    session.execute(&q).await?;
    Ok(())
}

/// A row to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub bus_name: String,
    pub state: String,
    pub route_name: String,
    pub bus_type: String,
    pub departing_time: String,
    pub price: f64,
    pub star_rating: f64,
}

impl NewListing {
    pub fn new(
        state: &str,
        route_name: &str,
        bus_type: &str,
        departing_time: &str,
        price: f64,
        star_rating: f64,
    ) -> Self {
        Self {
            bus_name: format!("{route_name} {bus_type}"),
            state: state.to_string(),
            route_name: route_name.to_string(),
            bus_type: bus_type.to_string(),
            departing_time: departing_time.to_string(),
            price,
            star_rating,
        }
    }

    pub fn with_bus_name(mut self, name: impl Into<String>) -> Self {
        self.bus_name = name.into();
        self
    }
}

/// Insert one listing.
pub async fn insert_listing(session: &Session, listing: &NewListing) -> Result<(), DbError> {
    let mut q = SqlQuery::new();
    let texts = q.bind_list([
        listing.bus_name.as_str(),
        listing.state.as_str(),
        listing.route_name.as_str(),
        listing.bus_type.as_str(),
        listing.departing_time.as_str(),
    ]);
    let price = q.bind(listing.price);
    let rating = q.bind(listing.star_rating);
    q.push(&format!(
        "INSERT INTO {TABLE} \
         (Bus_Name, State, Route_Name, Bus_Type, Departing_Time, Price, Star_Rating) \
         VALUES ({texts}, {price}, {rating})"
    ));
    session.execute(&q).await?;
    Ok(())
}
