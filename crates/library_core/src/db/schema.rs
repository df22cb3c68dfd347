//! Schema bootstrap for the nine catalog tables.
//!
//! # Invariants
//! - Applied version is mirrored to `PRAGMA user_version`.
//! - A database newer than this binary is never touched.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const SCHEMA_VERSION: u32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Returns the schema version this binary creates.
pub fn latest_version() -> u32 {
    SCHEMA_VERSION
}

/// Creates the catalog tables on `conn` unless they are already current.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database reports a newer version.
/// - `Bootstrap` for any SQLite failure; the transaction is rolled back.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    let current = current_user_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: SCHEMA_VERSION,
        });
    }
    if current == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction().map_err(DbError::Bootstrap)?;
    tx.execute_batch(SCHEMA_SQL).map_err(DbError::Bootstrap)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
        .map_err(DbError::Bootstrap)?;
    tx.commit().map_err(DbError::Bootstrap)?;

    info!(
        "event=schema_apply module=db status=ok from_version={} to_version={}",
        current, SCHEMA_VERSION
    );
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(DbError::Bootstrap)
}
