//! Mapping layer between catalog records and their tables.
//!
//! # Responsibility
//! - Describe each entity's table and derive its statement text.
//! - Decode rows positionally and encode parameters in declared order.
//! - Run single-statement CRUD through an injected [`DataAccess`].
//!
//! # Invariants
//! - A read either returns every row or fails; partial results are dropped.
//! - `UPDATE`/`DELETE` that match no row report `NotFound`.
//!
//! [`DataAccess`]: crate::db::DataAccess

use crate::db::DbError;
use crate::model::{EntityKind, RecordId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod decode;
pub mod mapping;
pub mod table;
pub mod table_repo;

pub use decode::{DecodeError, RowReader};
pub use mapping::TableMapping;
pub use table::TableSpec;
pub use table_repo::TableRepository;

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure of one mapped CRUD statement.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Decode(DecodeError),
    /// Record was never persisted, so it has no key to address.
    MissingIdentifier(EntityKind),
    /// Keyed statement matched no row.
    NotFound { kind: EntityKind, id: RecordId },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "invalid stored row: {err}"),
            Self::MissingIdentifier(kind) => {
                write!(f, "{kind} record has no stored identifier yet")
            }
            Self::NotFound { kind, id } => write!(f, "{kind} record {id} not found in storage"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::MissingIdentifier(_) => None,
            Self::NotFound { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<DecodeError> for RepoError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}
