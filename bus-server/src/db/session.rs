//! Database handle and per-run sessions.
//!
//! A [`Database`] is opened once at startup. Each run of the filter pipeline
//! takes a [`Session`], which owns exactly one connection; the connection is
//! released when the session is dropped, whatever way the run ends.

use std::sync::atomic::{AtomicU64, Ordering};

use libsql::Builder;
use tracing::{debug, info};

use crate::domain::{DepartureTime, ListingTable};
use crate::query::{ListingFilter, Lookup, SqlParam, SqlQuery};

use super::config::{DbConfig, DbTarget};
use super::decode::{read_table, read_text_column};
use super::error::DbError;
use super::store::ListingStore;

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Handle to the listings database.
pub struct Database {
    db: libsql::Database,
}

impl Database {
    /// Open the database described by `config`.
    ///
    /// For remote targets this does not contact the server; connection
    /// errors surface on the first query.
    pub async fn open(config: &DbConfig) -> Result<Self, DbError> {
        let db = match &config.target {
            DbTarget::Local { path } => {
                if path.is_empty() {
                    return Err(DbError::Config("database path is empty".into()));
                }
                Builder::new_local(path).build().await?
            }
            DbTarget::Remote { url, auth_token } => {
                Builder::new_remote(url.clone(), auth_token.clone())
                    .build()
                    .await?
            }
        };
        info!(target = %config.target, "database opened");
        Ok(Self { db })
    }

    /// Acquire a connection for one pipeline run.
    pub fn session(&self) -> Result<Session, DbError> {
        let conn = self.db.connect()?;
        let id = NEXT_SESSION.fetch_add(1, Ordering::Relaxed);
        debug!(session = id, "connection acquired");
        Ok(Session { conn, id })
    }
}

/// One connection, held for the duration of one pipeline run.
pub struct Session {
    conn: libsql::Connection,
    id: u64,
}

impl Session {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Run a parameterized statement that returns rows.
    async fn query(&self, q: &SqlQuery) -> Result<libsql::Rows, DbError> {
        debug!(
            session = self.id,
            placeholders = q.placeholder_count(),
            sql = %q.sql,
            "query"
        );
        let params: Vec<libsql::Value> = q.params.iter().map(to_value).collect();
        Ok(self
            .conn
            .query(&q.sql, libsql::params_from_iter(params))
            .await?)
    }

    /// Run a parameterized statement that returns no rows.
    pub(crate) async fn execute(&self, q: &SqlQuery) -> Result<u64, DbError> {
        debug!(session = self.id, placeholders = q.placeholder_count(), "execute");
        let params: Vec<libsql::Value> = q.params.iter().map(to_value).collect();
        Ok(self
            .conn
            .execute(&q.sql, libsql::params_from_iter(params))
            .await?)
    }

    async fn lookup(&self, lookup: Lookup<'_>) -> Result<Vec<String>, DbError> {
        let rows = self.query(&lookup.to_query()).await?;
        let values = read_text_column(rows, lookup.column()).await?;
        debug!(session = self.id, column = lookup.column(), count = values.len(), "lookup");
        Ok(values)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(session = self.id, "connection released");
    }
}

fn to_value(param: &SqlParam) -> libsql::Value {
    match param {
        SqlParam::Text(s) => libsql::Value::Text(s.clone()),
        SqlParam::Integer(i) => libsql::Value::Integer(*i),
        SqlParam::Real(r) => libsql::Value::Real(*r),
    }
}

impl ListingStore for Session {
    async fn states(&self) -> Result<Vec<String>, DbError> {
        self.lookup(Lookup::States).await
    }

    async fn routes(&self, state: &str) -> Result<Vec<String>, DbError> {
        self.lookup(Lookup::Routes { state }).await
    }

    async fn bus_types(&self, state: &str, route: &str) -> Result<Vec<String>, DbError> {
        self.lookup(Lookup::BusTypes { state, route }).await
    }

    async fn departure_times(
        &self,
        state: &str,
        route: &str,
    ) -> Result<Vec<DepartureTime>, DbError> {
        let lookup = Lookup::DepartureTimes { state, route };
        self.lookup(lookup.clone())
            .await?
            .iter()
            .map(|t| {
                DepartureTime::parse(t).map_err(|e| DbError::decode(lookup.column(), e.to_string()))
            })
            .collect()
    }

    async fn listings(&self, filter: &ListingFilter) -> Result<ListingTable, DbError> {
        let q = filter.to_query()?;
        let table = read_table(self.query(&q).await?).await?;
        debug!(session = self.id, rows = table.len(), "listings");
        Ok(table)
    }
}
