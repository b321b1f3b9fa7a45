//! Bus listings and result tables.

use std::fmt;

use serde::Serialize;

use super::DepartureTime;

/// A single value read verbatim from a result column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Cell {
    /// Numeric view of the cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(i) => Some(*i as f64),
            Cell::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Real(r) => write!(f, "{r}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// One row of the `bus_info` table.
///
/// The typed fields are the columns the dashboard filters on. `cells`
/// holds every column of the row, in table order, exactly as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusListing {
    pub state: String,
    pub route_name: String,
    pub bus_type: String,
    pub departing_time: DepartureTime,
    pub price: f64,
    pub star_rating: f64,
    pub cells: Vec<Cell>,
}

/// Result of the filtered listing query: column names plus full rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingTable {
    pub columns: Vec<String>,
    pub rows: Vec<BusListing>,
}

impl ListingTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether rows are ordered by rating descending, then price in `order`.
    #[cfg(test)]
    pub(crate) fn is_ranked(&self, order: super::PriceOrder) -> bool {
        self.rows.windows(2).all(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            if a.star_rating != b.star_rating {
                a.star_rating > b.star_rating
            } else {
                order.in_order(a.price, b.price)
            }
        })
    }
}
