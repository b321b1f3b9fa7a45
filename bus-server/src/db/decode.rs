//! Row-to-value decoding.
//!
//! `SELECT *` returns columns in table order, with whatever extra columns
//! the table carries. The filter columns are located by name so the rest of
//! the row can be passed through untouched. The departure time is read
//! from the `time(Departing_Time)` projection when the query carries one,
//! so a row decodes exactly when the WHERE clause could compare it.

use crate::domain::{BusListing, Cell, DepartureTime, ListingTable};
use crate::query::DEPARTS_AT;

use super::error::DbError;

impl From<libsql::Value> for Cell {
    fn from(value: libsql::Value) -> Self {
        match value {
            libsql::Value::Null => Cell::Null,
            libsql::Value::Integer(i) => Cell::Integer(i),
            libsql::Value::Real(r) => Cell::Real(r),
            libsql::Value::Text(s) => Cell::Text(s),
            libsql::Value::Blob(b) => Cell::Blob(b),
        }
    }
}

/// Positions of the filter columns within a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListingColumns {
    state: usize,
    route_name: usize,
    bus_type: usize,
    departing_time: usize,
    price: usize,
    star_rating: usize,
    /// The normalized `HH:MM:SS` projection, when present.
    departs_at: Option<usize>,
}

impl ListingColumns {
    /// Locate the filter columns by name, ignoring case.
    pub(crate) fn locate(columns: &[String]) -> Result<Self, DbError> {
        let find = |name: &str| {
            columns
                .iter()
                .position(|c| c.eq_ignore_ascii_case(name))
                .ok_or_else(|| DbError::decode(name, "column missing from result"))
        };
        Ok(Self {
            state: find("State")?,
            route_name: find("Route_Name")?,
            bus_type: find("Bus_Type")?,
            departing_time: find("Departing_Time")?,
            price: find("Price")?,
            star_rating: find("Star_Rating")?,
            departs_at: columns.iter().position(|c| c == DEPARTS_AT),
        })
    }

    /// Build a listing from a full row of cells.
    ///
    /// The normalized time cell, if any, is removed from `cells`.
    pub(crate) fn listing(&self, mut cells: Vec<Cell>) -> Result<BusListing, DbError> {
        let departing = required_text(
            &cells,
            self.departs_at.unwrap_or(self.departing_time),
            "Departing_Time",
        )?;
        let departing_time = DepartureTime::parse(departing)
            .map_err(|e| DbError::decode("Departing_Time", e.to_string()))?;

        let state = required_text(&cells, self.state, "State")?.to_string();
        let route_name = required_text(&cells, self.route_name, "Route_Name")?.to_string();
        let bus_type = required_text(&cells, self.bus_type, "Bus_Type")?.to_string();
        let price = required_number(&cells, self.price, "Price")?;
        let star_rating = required_number(&cells, self.star_rating, "Star_Rating")?;

        if let Some(idx) = self.departs_at {
            cells.remove(idx);
        }

        Ok(BusListing {
            state,
            route_name,
            bus_type,
            departing_time,
            price,
            star_rating,
            cells,
        })
    }
}

fn required_text<'a>(cells: &'a [Cell], idx: usize, column: &str) -> Result<&'a str, DbError> {
    match cells.get(idx) {
        Some(Cell::Text(s)) => Ok(s),
        Some(Cell::Null) | None => Err(DbError::decode(column, "unexpected NULL")),
        Some(other) => Err(DbError::decode(
            column,
            format!("expected text, got {other}"),
        )),
    }
}

fn required_number(cells: &[Cell], idx: usize, column: &str) -> Result<f64, DbError> {
    match cells.get(idx) {
        Some(Cell::Null) | None => Err(DbError::decode(column, "unexpected NULL")),
        Some(Cell::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| DbError::decode(column, format!("expected a number, got {s:?}"))),
        Some(cell) => cell
            .as_f64()
            .ok_or_else(|| DbError::decode(column, format!("expected a number, got {cell}"))),
    }
}

/// Drain a `SELECT *` result into a [`ListingTable`].
pub(crate) async fn read_table(mut rows: libsql::Rows) -> Result<ListingTable, DbError> {
    let columns: Vec<String> = (0..rows.column_count())
        .map(|i| rows.column_name(i).unwrap_or_default().to_string())
        .collect();
    let layout = ListingColumns::locate(&columns)?;

    let mut listings = Vec::new();
    while let Some(row) = rows.next().await? {
        let mut cells = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            cells.push(Cell::from(row.get_value(i as i32)?));
        }
        listings.push(layout.listing(cells)?);
    }

    let columns = columns.into_iter().filter(|c| c != DEPARTS_AT).collect();
    Ok(ListingTable {
        columns,
        rows: listings,
    })
}

/// Drain a single-column result of non-null text values.
pub(crate) async fn read_text_column(
    mut rows: libsql::Rows,
    column: &str,
) -> Result<Vec<String>, DbError> {
    let mut values = Vec::new();
    while let Some(row) = rows.next().await? {
        match Cell::from(row.get_value(0)?) {
            Cell::Text(s) => values.push(s),
            Cell::Null => return Err(DbError::decode(column, "unexpected NULL")),
            other => values.push(other.to_string()),
        }
    }
    Ok(values)
}
