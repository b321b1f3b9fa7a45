//! The filter pipeline.
//!
//! Runs the dependent lookups in order (states, routes, then bus types and
//! departure times), resolves each selector against what is available, and
//! finishes with the filtered listing query. Empty lookups stop the run with
//! a notice rather than an error.

use tracing::{debug, warn};

use crate::db::{Database, DbError, ListingStore};
use crate::domain::{DepartureTime, DomainError};
use crate::query::ListingFilter;

use super::dashboard::{Dashboard, Notice};
use super::form::FilterForm;

/// Error that aborts a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A widget value is out of range or malformed
    #[error("invalid filter: {0}")]
    InvalidInput(#[from] DomainError),

    /// The database could not be reached or a query failed
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Run the pipeline on a fresh session from `db`.
///
/// The session's connection is released before this returns, on success
/// and on error alike.
pub async fn run_session(db: &Database, form: &FilterForm) -> Result<Dashboard, PipelineError> {
    let session = db.session()?;
    run(&session, form).await
}

/// Run the pipeline against any listing store.
pub async fn run<S: ListingStore>(store: &S, form: &FilterForm) -> Result<Dashboard, PipelineError> {
    let criteria = form.criteria()?;
    let mut dashboard = Dashboard::new(&criteria);

    dashboard.options.states = store.states().await?;
    let Some(state) = pick(&dashboard.options.states, form.state.as_deref()) else {
        return Ok(stop(dashboard, Notice::NoStates));
    };
    dashboard.selection.state = Some(state.clone());

    dashboard.options.routes = store.routes(&state).await?;
    let Some(route) = pick(&dashboard.options.routes, form.route.as_deref()) else {
        return Ok(stop(dashboard, Notice::NoRoutes));
    };
    dashboard.selection.route = Some(route.clone());

    dashboard.options.bus_types = store.bus_types(&state, &route).await?;
    dashboard.options.departure_times = store.departure_times(&state, &route).await?;

    let departing = match criteria.departing_time {
        Some(t) if dashboard.options.departure_times.contains(&t) => t,
        _ => dashboard
            .options
            .departure_times
            .first()
            .copied()
            .unwrap_or(DepartureTime::MIDNIGHT),
    };
    dashboard.selection.departing_time = Some(departing);

    if dashboard.options.bus_types.is_empty() {
        return Ok(stop(dashboard, Notice::NoBusTypes));
    }
    let bus_types: Vec<String> = match &form.bus_types {
        None => dashboard.options.bus_types.clone(),
        Some(requested) => dashboard
            .options
            .bus_types
            .iter()
            .filter(|t| requested.contains(t))
            .cloned()
            .collect(),
    };
    if bus_types.is_empty() {
        return Ok(stop(dashboard, Notice::NoBusTypesSelected));
    }
    dashboard.selection.bus_types = bus_types.clone();

    let filter = ListingFilter {
        state,
        route,
        price: criteria.price,
        departing_after: departing,
        min_rating: criteria.min_rating,
        bus_types,
        order: criteria.order,
    };
    let table = store.listings(&filter).await?;
    debug!(rows = table.len(), "pipeline finished");
    if table.is_empty() {
        dashboard.notices.push(Notice::NoMatches);
    }
    dashboard.listings = Some(table);

    Ok(dashboard)
}

/// The requested value if it is on offer, else the first option.
fn pick(options: &[String], requested: Option<&str>) -> Option<String> {
    requested
        .and_then(|r| options.iter().find(|o| o.as_str() == r))
        .or_else(|| options.first())
        .cloned()
}

fn stop(mut dashboard: Dashboard, notice: Notice) -> Dashboard {
    warn!(
        state = dashboard.selection.state.as_deref().unwrap_or(""),
        route = dashboard.selection.route.as_deref().unwrap_or(""),
        "{}",
        notice.message()
    );
    dashboard.notices.push(notice);
    dashboard
}
