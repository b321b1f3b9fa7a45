//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{PriceOrder, PriceRange, StarRating};
use crate::pipeline::Dashboard;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Dashboard page: sidebar filters plus results.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: DashboardView,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Dashboard fragment, swapped in after every filter change.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub view: DashboardView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One entry of a selector or checkbox group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionView {
    fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// Result table with every cell already rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Dashboard view model for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub states: Vec<OptionView>,
    pub routes: Vec<OptionView>,
    pub departure_times: Vec<OptionView>,
    pub bus_types: Vec<OptionView>,
    pub price_orders: Vec<OptionView>,
    pub ratings: Vec<OptionView>,
    pub min_price: u32,
    pub max_price: u32,
    pub price_ceiling: u32,
    pub notices: Vec<String>,
    pub has_table: bool,
    pub table: TableView,
}

impl DashboardView {
    /// Create from a pipeline run.
    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        let sel = &dashboard.selection;
        let opts = &dashboard.options;

        let states = opts
            .states
            .iter()
            .map(|s| OptionView::new(s, s, sel.state.as_ref() == Some(s)))
            .collect();

        let routes = opts
            .routes
            .iter()
            .map(|r| OptionView::new(r, r, sel.route.as_ref() == Some(r)))
            .collect();

        let departure_times = opts
            .departure_times
            .iter()
            .map(|t| {
                let text = t.to_string();
                OptionView::new(text.clone(), text, sel.departing_time == Some(*t))
            })
            .collect();

        let bus_types = opts
            .bus_types
            .iter()
            .map(|b| OptionView::new(b, b, sel.bus_types.contains(b)))
            .collect();

        let price_orders = PriceOrder::all()
            .iter()
            .map(|o| OptionView::new(o.as_str(), o.label(), *o == sel.order))
            .collect();

        let ratings = StarRating::all()
            .map(|r| OptionView::new(r.to_string(), r.to_string(), r == sel.min_rating))
            .collect();

        let table = dashboard
            .listings
            .as_ref()
            .filter(|t| !t.is_empty())
            .map(|t| TableView {
                columns: t.columns.clone(),
                rows: t
                    .rows
                    .iter()
                    .map(|row| row.cells.iter().map(|c| c.to_string()).collect())
                    .collect(),
            });

        Self {
            states,
            routes,
            departure_times,
            bus_types,
            price_orders,
            ratings,
            min_price: sel.price.min(),
            max_price: sel.price.max(),
            price_ceiling: PriceRange::CEILING,
            notices: dashboard
                .notices
                .iter()
                .map(|n| n.message().to_string())
                .collect(),
            has_table: table.is_some(),
            table: table.unwrap_or_default(),
        }
    }

    /// Number of result rows, for the results heading.
    pub fn row_count(&self) -> usize {
        self.table.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusListing, Cell, DepartureTime, ListingTable};
    use crate::pipeline::{FilterOptions, Notice, Selection};

    fn time(s: &str) -> DepartureTime {
        DepartureTime::parse(s).unwrap()
    }

    fn dashboard() -> Dashboard {
        let cells = vec![
            Cell::Text("SRS <Travels>".into()),
            Cell::Text("Karnataka".into()),
            Cell::Text("AC".into()),
            Cell::Real(1250.5),
            Cell::Integer(4),
        ];
        Dashboard {
            options: FilterOptions {
                states: vec!["Karnataka".into(), "Kerala".into()],
                routes: vec!["Bangalore-Chennai".into()],
                bus_types: vec!["AC".into(), "Sleeper".into()],
                departure_times: vec![time("08:00"), time("21:30")],
            },
            selection: Selection {
                state: Some("Karnataka".into()),
                route: Some("Bangalore-Chennai".into()),
                bus_types: vec!["AC".into()],
                departing_time: Some(time("08:00")),
                price: PriceRange::new(500, 3000).unwrap(),
                min_rating: StarRating::new(3).unwrap(),
                order: PriceOrder::HighToLow,
            },
            notices: vec![],
            listings: Some(ListingTable {
                columns: vec![
                    "Bus_Name".into(),
                    "State".into(),
                    "Bus_Type".into(),
                    "Price".into(),
                    "Star_Rating".into(),
                ],
                rows: vec![BusListing {
                    state: "Karnataka".into(),
                    route_name: "Bangalore-Chennai".into(),
                    bus_type: "AC".into(),
                    departing_time: time("08:00"),
                    price: 1250.5,
                    star_rating: 4.0,
                    cells,
                }],
            }),
        }
    }

    #[test]
    fn view_marks_selected_options() {
        let view = DashboardView::from_dashboard(&dashboard());
        assert!(view.states[0].selected);
        assert!(!view.states[1].selected);
        assert_eq!(
            view.bus_types,
            vec![
                OptionView::new("AC", "AC", true),
                OptionView::new("Sleeper", "Sleeper", false)
            ]
        );
        assert_eq!(view.departure_times[0], OptionView::new("08:00", "08:00", true));
        assert_eq!(
            view.price_orders[1],
            OptionView::new("high_to_low", "High to Low", true)
        );
        let selected: Vec<&str> = view
            .ratings
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.value.as_str())
            .collect();
        assert_eq!(selected, vec!["3"]);
        assert_eq!(view.ratings.len(), 5);
    }

    #[test]
    fn view_renders_cells_as_text() {
        let view = DashboardView::from_dashboard(&dashboard());
        assert!(view.has_table);
        assert_eq!(view.row_count(), 1);
        assert_eq!(
            view.table.rows[0],
            vec!["SRS <Travels>", "Karnataka", "AC", "1250.5", "4"]
        );
    }

    #[test]
    fn empty_result_has_no_table() {
        let mut d = dashboard();
        d.listings = Some(ListingTable::default());
        d.notices = vec![Notice::NoMatches];
        let view = DashboardView::from_dashboard(&d);
        assert!(!view.has_table);
        assert_eq!(view.notices, vec!["No buses match the selected filters."]);
    }

    #[test]
    fn index_page_renders() {
        let html = IndexTemplate {
            view: DashboardView::from_dashboard(&dashboard()),
        }
        .render()
        .unwrap();
        assert!(html.contains("Easy and Secure Online Bus Ticket Booking"));
        assert!(html.contains("Bangalore-Chennai"));
        assert!(html.contains("/static/app.js"));
        // cell text is escaped
        assert!(html.contains("SRS &lt;Travels&gt;"));
        assert!(!html.contains("SRS <Travels>"));
    }

    #[test]
    fn fragment_renders_notices_without_layout() {
        let mut d = dashboard();
        d.listings = None;
        d.notices = vec![Notice::NoBusTypes];
        let html = DashboardTemplate {
            view: DashboardView::from_dashboard(&d),
        }
        .render()
        .unwrap();
        assert!(html.contains("No available bus types for this route."));
        assert!(!html.contains("<html"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn error_page_renders() {
        let html = ErrorTemplate {
            title: "Database unavailable".into(),
            message: "libSQL error: no such table: bus_info".into(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Database unavailable"));
        assert!(html.contains("no such table: bus_info"));
    }
}
