//! Domain error types.
//!
//! These errors represent invalid filter input. They are distinct from
//! database errors.

use super::{InvalidPriceRange, InvalidRating, TimeError};

/// Validation failures for user-supplied filter values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Time(#[from] TimeError),

    #[error(transparent)]
    Rating(#[from] InvalidRating),

    #[error(transparent)]
    PriceRange(#[from] InvalidPriceRange),
}
