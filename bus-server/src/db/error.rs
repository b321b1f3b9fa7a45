//! Database error types.

use crate::query::QueryError;

/// Errors from opening the database or running a query.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Underlying libSQL error (connection, SQL, network).
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// A result row did not have the expected shape.
    #[error("cannot decode column {column}: {message}")]
    Decode { column: String, message: String },

    /// The statement could not be built.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Connection settings are unusable.
    #[error("invalid database configuration: {0}")]
    Config(String),
}

impl DbError {
    pub(crate) fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        DbError::Decode {
            column: column.into(),
            message: message.into(),
        }
    }
}
