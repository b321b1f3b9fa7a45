//! Parameterized SQL text plus its bound values.

use std::fmt;

use serde::Serialize;

/// Name of the listings table.
pub const TABLE: &str = "bus_info";

/// Alias of `time(Departing_Time)` in listing results.
///
/// Row decoding reads the departure time from this column so it agrees
/// with the comparison in the WHERE clause. It is dropped from the table
/// handed to callers.
pub const DEPARTS_AT: &str = "departs_at";

/// A value bound to a numbered placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(s: String) -> Self {
        SqlParam::Text(s)
    }
}

impl From<i64> for SqlParam {
    fn from(i: i64) -> Self {
        SqlParam::Integer(i)
    }
}

impl From<u32> for SqlParam {
    fn from(i: u32) -> Self {
        SqlParam::Integer(i64::from(i))
    }
}

impl From<f64> for SqlParam {
    fn from(r: f64) -> Self {
        SqlParam::Real(r)
    }
}

impl fmt::Display for SqlParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlParam::Text(s) => write!(f, "{s:?}"),
            SqlParam::Integer(i) => write!(f, "{i}"),
            SqlParam::Real(r) => write!(f, "{r}"),
        }
    }
}

/// A complete statement: SQL text with `?N` placeholders and the values for them.
///
/// Values never appear in `sql`; each one is pushed through [`SqlQuery::bind`],
/// which returns the placeholder to splice into the text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl SqlQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value and return its placeholder (`?1`, `?2`, ...).
    pub fn bind(&mut self, value: impl Into<SqlParam>) -> String {
        self.params.push(value.into());
        format!("?{}", self.params.len())
    }

    /// Register every value and return a comma-separated placeholder list.
    pub fn bind_list<I, T>(&mut self, values: I) -> String
    where
        I: IntoIterator<Item = T>,
        T: Into<SqlParam>,
    {
        values
            .into_iter()
            .map(|v| self.bind(v))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Append raw SQL text.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Number of placeholders in the statement.
    pub fn placeholder_count(&self) -> usize {
        self.params.len()
    }
}
