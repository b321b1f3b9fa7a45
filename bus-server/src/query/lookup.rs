//! Dependent-value lookups.
//!
//! Each lookup returns the sorted distinct values of one column, scoped by
//! the filters chosen before it: states first, then routes within a state,
//! then bus types and departure times within a route.

use super::sql::{SqlQuery, TABLE};

/// A distinct-value lookup against the listings table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    States,
    Routes { state: &'a str },
    BusTypes { state: &'a str, route: &'a str },
    DepartureTimes { state: &'a str, route: &'a str },
}

impl Lookup<'_> {
    /// Column the lookup returns, for logging.
    pub fn column(&self) -> &'static str {
        match self {
            Lookup::States => "State",
            Lookup::Routes { .. } => "Route_Name",
            Lookup::BusTypes { .. } => "Bus_Type",
            Lookup::DepartureTimes { .. } => "Departing_Time",
        }
    }

    /// Build the SQL statement for this lookup.
    pub fn to_query(&self) -> SqlQuery {
        let mut q = SqlQuery::new();
        match self {
            Lookup::States => {
                q.push(&format!(
                    "SELECT DISTINCT State FROM {TABLE} ORDER BY State"
                ));
            }
            Lookup::Routes { state } => {
                let p = q.bind(*state);
                q.push(&format!(
                    "SELECT DISTINCT Route_Name FROM {TABLE} WHERE State = {p} ORDER BY Route_Name"
                ));
            }
            Lookup::BusTypes { state, route } => {
                let r = q.bind(*route);
                let s = q.bind(*state);
                q.push(&format!(
                    "SELECT DISTINCT Bus_Type FROM {TABLE} \
                     WHERE Route_Name = {r} AND State = {s} ORDER BY Bus_Type"
                ));
            }
            Lookup::DepartureTimes { state, route } => {
                // time() folds "HH:MM" and "HH:MM:SS" into one value and is
                // NULL for text it cannot read
                let r = q.bind(*route);
                let s = q.bind(*state);
                q.push(&format!(
                    "SELECT DISTINCT time(Departing_Time) AS departing FROM {TABLE} \
                     WHERE Route_Name = {r} AND State = {s} \
                     AND time(Departing_Time) IS NOT NULL ORDER BY departing"
                ));
            }
        }
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SqlParam;

    #[test]
    fn states_has_no_params() {
        let q = Lookup::States.to_query();
        assert_eq!(q.sql, "SELECT DISTINCT State FROM bus_info ORDER BY State");
        assert!(q.params.is_empty());
    }

    #[test]
    fn routes_scoped_to_state() {
        let q = Lookup::Routes { state: "Kerala" }.to_query();
        assert_eq!(
            q.sql,
            "SELECT DISTINCT Route_Name FROM bus_info WHERE State = ?1 ORDER BY Route_Name"
        );
        assert_eq!(q.params, vec![SqlParam::Text("Kerala".into())]);
    }

    #[test]
    fn bus_types_scoped_to_route_and_state() {
        let q = Lookup::BusTypes {
            state: "Kerala",
            route: "Kochi-Kannur",
        }
        .to_query();
        assert!(q.sql.contains("WHERE Route_Name = ?1 AND State = ?2"));
        assert!(q.sql.ends_with("ORDER BY Bus_Type"));
        assert_eq!(
            q.params,
            vec![
                SqlParam::Text("Kochi-Kannur".into()),
                SqlParam::Text("Kerala".into())
            ]
        );
    }

    #[test]
    fn departure_times_normalized() {
        let q = Lookup::DepartureTimes {
            state: "Goa",
            route: "Panaji-Margao",
        }
        .to_query();
        assert!(q.sql.starts_with("SELECT DISTINCT time(Departing_Time)"));
        assert!(q.sql.contains("time(Departing_Time) IS NOT NULL"));
        assert_eq!(q.placeholder_count(), 2);
    }

    #[test]
    fn values_never_inlined() {
        let hostile = "x' OR '1'='1";
        let q = Lookup::BusTypes {
            state: hostile,
            route: hostile,
        }
        .to_query();
        assert!(!q.sql.contains(hostile));
    }

    #[test]
    fn column_names() {
        assert_eq!(Lookup::States.column(), "State");
        assert_eq!(Lookup::Routes { state: "a" }.column(), "Route_Name");
    }
}
