//! Data transfer objects for web requests and responses.

use serde::Serialize;

use crate::domain::{ListingTable, PriceOrder};
use crate::pipeline::{Dashboard, FilterForm, FilterOptions, Notice, Selection};

/// Query string accepted by the index page.
///
/// Mirrors [`FilterForm`]. Bus types are given as repeated keys
/// (`bus_types=AC&bus_types=Sleeper`) so a filtered page can be linked to;
/// a single empty `bus_types=` selects none.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IndexQuery {
    pub state: Option<String>,
    pub route: Option<String>,
    pub bus_types: Option<Vec<String>>,
    pub departing_time: Option<String>,
    pub price_order: Option<PriceOrder>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub min_rating: Option<i64>,
}

impl IndexQuery {
    /// Build from decoded `key=value` pairs. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, String> {
        let mut q = IndexQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "state" => q.state = Some(value),
                "route" => q.route = Some(value),
                "departing_time" => q.departing_time = Some(value),
                "bus_types" => {
                    let types = q.bus_types.get_or_insert_with(Vec::new);
                    if !value.is_empty() {
                        types.push(value);
                    }
                }
                "price_order" => {
                    let order = PriceOrder::all()
                        .into_iter()
                        .find(|o| o.as_str() == value)
                        .ok_or_else(|| format!("unknown price_order {value:?}"))?;
                    q.price_order = Some(order);
                }
                "min_price" => q.min_price = Some(number(&key, &value)?),
                "max_price" => q.max_price = Some(number(&key, &value)?),
                "min_rating" => q.min_rating = Some(number(&key, &value)?),
                _ => {}
            }
        }
        Ok(q)
    }
}

fn number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{key} must be a whole number, got {value:?}"))
}

impl From<IndexQuery> for FilterForm {
    fn from(q: IndexQuery) -> Self {
        FilterForm {
            state: q.state,
            route: q.route,
            bus_types: q.bus_types,
            departing_time: q.departing_time,
            price_order: q.price_order,
            min_price: q.min_price,
            max_price: q.max_price,
            min_rating: q.min_rating,
        }
    }
}

/// A notice with its display text.
#[derive(Debug, Serialize)]
pub struct NoticeResult {
    pub code: Notice,
    pub message: &'static str,
}

/// JSON body returned by `POST /dashboard`.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub options: FilterOptions,
    pub selection: Selection,
    pub notices: Vec<NoticeResult>,
    /// Absent when the final query was not run.
    pub listings: Option<ListingTable>,
}

impl DashboardResponse {
    pub fn from_dashboard(dashboard: Dashboard) -> Self {
        Self {
            notices: dashboard
                .notices
                .iter()
                .map(|n| NoticeResult {
                    code: *n,
                    message: n.message(),
                })
                .collect(),
            options: dashboard.options,
            selection: dashboard.selection,
            listings: dashboard.listings,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
