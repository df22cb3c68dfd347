//! Data core for the library catalog.
//! Maps nine relational tables onto typed records and keeps an in-memory
//! mirror of them synchronized with storage.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, DbConfig, LogConfig};
pub use db::{DataAccess, DbError, DbResult, SqliteDataAccess};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::book::{Book, Publisher};
pub use model::card::{ProfessorCard, StudentCard};
pub use model::issue::BookIssue;
pub use model::people::{Author, LibraryEmployee, Professor, Student};
pub use model::{EntityKind, FieldError, Record, RecordId, RowSummary};
pub use repo::{DecodeError, RepoError, RepoResult, TableMapping, TableRepository};
pub use service::catalog::{Catalog, CatalogError, CatalogResult};
pub use service::snapshot::{CatalogEntity, CatalogSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
