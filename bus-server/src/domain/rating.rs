//! Star ratings.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned for a rating outside 1-5.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid star rating {0}: must be 1-5")]
pub struct InvalidRating(pub i64);

/// A whole-star rating between 1 and 5 inclusive.
///
/// Used as the minimum-rating filter. Ratings stored on listings may be
/// fractional, so they are kept as plain numbers on [`BusListing`](super::BusListing).
///
/// # Examples
///
/// ```
/// use bus_server::domain::StarRating;
///
/// let three = StarRating::new(3).unwrap();
/// assert_eq!(three.get(), 3);
/// assert!(StarRating::new(0).is_err());
/// assert!(StarRating::new(6).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: StarRating = StarRating(1);
    pub const MAX: StarRating = StarRating(5);

    pub fn new(value: i64) -> Result<Self, InvalidRating> {
        match u8::try_from(value) {
            Ok(v @ 1..=5) => Ok(Self(v)),
            _ => Err(InvalidRating(value)),
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// All selectable ratings, lowest first.
    pub fn all() -> impl Iterator<Item = StarRating> {
        (Self::MIN.0..=Self::MAX.0).map(StarRating)
    }
}

impl Default for StarRating {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Debug for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StarRating({})", self.0)
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for StarRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for StarRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = i64::deserialize(deserializer)?;
        StarRating::new(v).map_err(serde::de::Error::custom)
    }
}
