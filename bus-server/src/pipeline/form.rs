//! Raw widget values and their validation.

use serde::{Deserialize, Serialize};

use crate::domain::{DepartureTime, DomainError, PriceOrder, PriceRange, StarRating};

/// Current values of the dashboard widgets.
///
/// Every field is optional: a missing value means "use the default", which
/// for dependent selectors is the first available option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterForm {
    pub state: Option<String>,
    pub route: Option<String>,
    /// `None` selects every available bus type; `Some(vec![])` selects none.
    pub bus_types: Option<Vec<String>>,
    /// "HH:MM" or "HH:MM:SS".
    pub departing_time: Option<String>,
    pub price_order: Option<PriceOrder>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub min_rating: Option<i64>,
}

/// The widget values that do not depend on the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pub price: PriceRange,
    pub min_rating: StarRating,
    pub order: PriceOrder,
    pub departing_time: Option<DepartureTime>,
}

impl FilterForm {
    /// Validate the free-standing values, applying defaults for missing ones.
    pub fn criteria(&self) -> Result<Criteria, DomainError> {
        let defaults = PriceRange::default();
        let price = PriceRange::new(
            self.min_price.unwrap_or(defaults.min()),
            self.max_price.unwrap_or(defaults.max()),
        )?;

        let min_rating = match self.min_rating {
            Some(r) => StarRating::new(r)?,
            None => StarRating::default(),
        };

        let departing_time = self
            .departing_time
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(DepartureTime::parse)
            .transpose()?;

        Ok(Criteria {
            price,
            min_rating,
            order: self.price_order.unwrap_or_default(),
            departing_time,
        })
    }
}
