//! Query construction errors.

/// Errors raised while building SQL, before anything reaches the database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The IN clause would be empty, which is not valid SQL.
    #[error("at least one bus type must be selected")]
    EmptyBusTypes,
}
