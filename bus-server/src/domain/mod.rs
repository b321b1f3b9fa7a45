//! Domain types for the bus route dashboard.
//!
//! These types represent validated filter values and listing rows. Filter
//! values enforce their invariants at construction time, so the query
//! builder can trust them.

mod departure;
mod error;
mod listing;
mod price;
mod rating;

pub use departure::{DepartureTime, TimeError};
pub use error::DomainError;
pub use listing::{BusListing, Cell, ListingTable};
pub use price::{InvalidPriceRange, PriceOrder, PriceRange};
pub use rating::{InvalidRating, StarRating};
