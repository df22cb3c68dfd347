//! Connection bootstrap for SQLite.

use super::{DbError, DbResult};
use crate::config::DbConfig;
use log::{debug, error};
use rusqlite::Connection;
use std::time::Instant;

/// Opens one connection configured from `config`.
///
/// The caller owns the connection; dropping it closes the handle.
///
/// # Side effects
/// - Emits `db_open` debug/error events with duration.
pub fn open_connection(config: &DbConfig) -> DbResult<Connection> {
    let started_at = Instant::now();

    let result = Connection::open(&config.path).and_then(|conn| {
        conn.busy_timeout(config.busy_timeout)?;
        Ok(conn)
    });

    match result {
        Ok(conn) => {
            debug!(
                "event=db_open module=db status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_open_failed path={} error={}",
                started_at.elapsed().as_millis(),
                config.path.display(),
                err
            );
            Err(DbError::Connect(err))
        }
    }
}
