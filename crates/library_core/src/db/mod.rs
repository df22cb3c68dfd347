//! Data access boundary.
//!
//! # Responsibility
//! - Define the statement-level contract the catalog depends on.
//! - Provide the SQLite implementation and the schema bootstrap.
//!
//! # Invariants
//! - One call executes exactly one statement on its own connection.
//! - Every failure is returned to the caller; nothing is swallowed.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
mod sqlite;

pub use open::open_connection;
pub use rusqlite::types::Value;
pub use sqlite::SqliteDataAccess;

pub type DbResult<T> = Result<T, DbError>;

/// One result row, in `SELECT` column order.
pub type Row = Vec<Value>;

#[derive(Debug)]
pub enum DbError {
    /// Connection could not be opened or configured.
    Connect(rusqlite::Error),
    /// Statement text was rejected.
    Prepare(rusqlite::Error),
    /// Statement failed while running (constraints, types, locks).
    Execute(rusqlite::Error),
    /// A result row could not be read.
    Read(rusqlite::Error),
    /// Schema bootstrap failed.
    Bootstrap(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect(err) => write!(f, "failed to connect: {err}"),
            Self::Prepare(err) => write!(f, "failed to prepare statement: {err}"),
            Self::Execute(err) => write!(f, "failed to execute statement: {err}"),
            Self::Read(err) => write!(f, "failed to read result row: {err}"),
            Self::Bootstrap(err) => write!(f, "failed to bootstrap schema: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connect(err)
            | Self::Prepare(err)
            | Self::Execute(err)
            | Self::Read(err)
            | Self::Bootstrap(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

/// Statement-level storage contract.
///
/// Implementations are shared across the refresh fan-out, so they must be
/// `Send + Sync`. Tests substitute an in-memory fake.
pub trait DataAccess: Send + Sync {
    /// Runs one parameterized write statement and returns the affected row count.
    fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize>;

    /// Runs one query and returns every row as positional values.
    fn fetch_rows(&self, sql: &str) -> DbResult<Vec<Row>>;
}
