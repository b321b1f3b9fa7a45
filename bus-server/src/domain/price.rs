//! Price range and price sort order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned for an unusable price range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPriceRange {
    #[error("price bound {0} is outside 0-{max}", max = PriceRange::CEILING)]
    OutOfBounds(u32),

    #[error("minimum price {min} is above maximum price {max}")]
    Inverted { min: u32, max: u32 },
}

/// An inclusive price range selected on the price slider.
///
/// Both bounds lie within `0..=CEILING` and `min <= max`.
///
/// # Examples
///
/// ```
/// use bus_server::domain::PriceRange;
///
/// let range = PriceRange::new(500, 3000).unwrap();
/// assert!(range.contains(500.0));
/// assert!(range.contains(3000.0));
/// assert!(!range.contains(3000.5));
///
/// assert!(PriceRange::new(3000, 500).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PriceRange {
    min: u32,
    max: u32,
}

impl PriceRange {
    /// Upper end of the slider.
    pub const CEILING: u32 = 5000;

    pub fn new(min: u32, max: u32) -> Result<Self, InvalidPriceRange> {
        for bound in [min, max] {
            if bound > Self::CEILING {
                return Err(InvalidPriceRange::OutOfBounds(bound));
            }
        }
        if min > max {
            return Err(InvalidPriceRange::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Whether a price falls inside the range (both ends inclusive).
    pub fn contains(&self, price: f64) -> bool {
        f64::from(self.min) <= price && price <= f64::from(self.max)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 500,
            max: 3000,
        }
    }
}

/// Direction in which prices are sorted within a star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceOrder {
    #[default]
    LowToHigh,
    HighToLow,
}

impl PriceOrder {
    /// SQL ordering keyword.
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            PriceOrder::LowToHigh => "ASC",
            PriceOrder::HighToLow => "DESC",
        }
    }

    /// Label shown in the sort selector.
    pub fn label(&self) -> &'static str {
        match self {
            PriceOrder::LowToHigh => "Low to High",
            PriceOrder::HighToLow => "High to Low",
        }
    }

    /// Value used in forms and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceOrder::LowToHigh => "low_to_high",
            PriceOrder::HighToLow => "high_to_low",
        }
    }

    pub fn all() -> [PriceOrder; 2] {
        [PriceOrder::LowToHigh, PriceOrder::HighToLow]
    }

    /// Whether two prices on equally-rated rows are in order.
    #[cfg(test)]
    pub(crate) fn in_order(&self, first: f64, second: f64) -> bool {
        match self {
            PriceOrder::LowToHigh => first <= second,
            PriceOrder::HighToLow => first >= second,
        }
    }
}

impl fmt::Display for PriceOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
