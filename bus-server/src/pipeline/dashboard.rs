//! Output of one pipeline run.

use serde::Serialize;

use crate::domain::{DepartureTime, ListingTable, PriceOrder, PriceRange, StarRating};

use super::form::Criteria;

/// A user-visible condition that stopped or emptied the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    NoStates,
    NoRoutes,
    NoBusTypes,
    NoBusTypesSelected,
    NoMatches,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoStates => "No states available.",
            Notice::NoRoutes => "No routes available for this state.",
            Notice::NoBusTypes => "No available bus types for this route.",
            Notice::NoBusTypesSelected => "Select at least one bus type.",
            Notice::NoMatches => "No buses match the selected filters.",
        }
    }
}

/// Values each selector can offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub states: Vec<String>,
    pub routes: Vec<String>,
    pub bus_types: Vec<String>,
    pub departure_times: Vec<DepartureTime>,
}

/// What the run actually used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub state: Option<String>,
    pub route: Option<String>,
    pub bus_types: Vec<String>,
    pub departing_time: Option<DepartureTime>,
    pub price: PriceRange,
    pub min_rating: StarRating,
    pub order: PriceOrder,
}

impl Selection {
    pub(crate) fn from_criteria(criteria: &Criteria) -> Self {
        Self {
            state: None,
            route: None,
            bus_types: Vec::new(),
            departing_time: None,
            price: criteria.price,
            min_rating: criteria.min_rating,
            order: criteria.order,
        }
    }
}

/// Everything needed to render the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub options: FilterOptions,
    pub selection: Selection,
    pub notices: Vec<Notice>,
    /// `None` when the final query was not attempted.
    pub listings: Option<ListingTable>,
}

impl Dashboard {
    pub(crate) fn new(criteria: &Criteria) -> Self {
        Self {
            options: FilterOptions::default(),
            selection: Selection::from_criteria(criteria),
            notices: Vec::new(),
            listings: None,
        }
    }

    /// Whether the final query ran.
    pub fn queried(&self) -> bool {
        self.listings.is_some()
    }
}
