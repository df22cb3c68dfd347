//! SQLite-backed [`DataAccess`].
//!
//! # Responsibility
//! - Run each statement on a connection opened for that statement only.
//! - Log every statement outcome as a structured event.
//!
//! # Invariants
//! - Statement and connection handles are dropped on every exit path.
//! - Read failures discard rows already collected.

use super::open::open_connection;
use super::schema::apply_schema;
use super::{DataAccess, DbError, DbResult, Row, Value};
use crate::config::DbConfig;
use log::{debug, error, info};
use rusqlite::params_from_iter;
use std::time::Instant;

/// Connection-per-statement SQLite access handle.
#[derive(Debug, Clone)]
pub struct SqliteDataAccess {
    config: DbConfig,
}

impl SqliteDataAccess {
    /// Creates a handle and makes sure the catalog schema exists.
    ///
    /// # Errors
    /// - Returns connect or bootstrap errors from the first connection.
    pub fn open(config: DbConfig) -> DbResult<Self> {
        let mut conn = open_connection(&config)?;
        apply_schema(&mut conn)?;
        info!(
            "event=data_access_open module=db status=ok path={}",
            config.path.display()
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    fn execute_once(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        let conn = open_connection(&self.config)?;
        let mut stmt = conn.prepare(sql).map_err(DbError::Prepare)?;
        stmt.execute(params_from_iter(params.iter()))
            .map_err(DbError::Execute)
    }

    fn fetch_once(&self, sql: &str) -> DbResult<Vec<Row>> {
        let conn = open_connection(&self.config)?;
        let mut stmt = conn.prepare(sql).map_err(DbError::Prepare)?;
        let column_count = stmt.column_count();
        let mut rows = stmt.query([]).map_err(DbError::Execute)?;

        let mut collected = Vec::new();
        while let Some(row) = rows.next().map_err(DbError::Read)? {
            let mut values = Vec::with_capacity(column_count);
            for index in 0..column_count {
                values.push(row.get::<_, Value>(index).map_err(DbError::Read)?);
            }
            collected.push(values);
        }
        Ok(collected)
    }
}

impl DataAccess for SqliteDataAccess {
    fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        let started_at = Instant::now();
        let result = self.execute_once(sql, params);
        match &result {
            Ok(changed) => debug!(
                "event=stmt_execute module=db status=ok duration_ms={} rows_changed={}",
                started_at.elapsed().as_millis(),
                changed
            ),
            Err(err) => error!(
                "event=stmt_execute module=db status=error duration_ms={} param_count={} error={}",
                started_at.elapsed().as_millis(),
                params.len(),
                err
            ),
        }
        result
    }

    fn fetch_rows(&self, sql: &str) -> DbResult<Vec<Row>> {
        let started_at = Instant::now();
        let result = self.fetch_once(sql);
        match &result {
            Ok(rows) => debug!(
                "event=stmt_query module=db status=ok duration_ms={} row_count={}",
                started_at.elapsed().as_millis(),
                rows.len()
            ),
            Err(err) => error!(
                "event=stmt_query module=db status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}
