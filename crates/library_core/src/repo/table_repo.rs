//! Single-statement CRUD over any mapped record type.

use super::decode::RowReader;
use super::mapping::TableMapping;
use super::{RepoError, RepoResult};
use crate::db::{DataAccess, Value};
use crate::model::RecordId;

/// Borrowing CRUD front for one [`DataAccess`] handle.
#[derive(Clone, Copy)]
pub struct TableRepository<'a> {
    access: &'a dyn DataAccess,
}

impl<'a> TableRepository<'a> {
    pub fn new(access: &'a dyn DataAccess) -> Self {
        Self { access }
    }

    /// Reads every row of `T`'s table in key order.
    pub fn fetch_all<T: TableMapping>(&self) -> RepoResult<Vec<T>> {
        let rows = self.access.fetch_rows(&T::TABLE.select_sql())?;
        rows.iter()
            .map(|row| -> RepoResult<T> {
                let reader = RowReader::new(&T::TABLE, row)?;
                Ok(T::from_row(&reader)?)
            })
            .collect()
    }

    /// Inserts `record`'s data columns; the key is left to storage.
    pub fn insert<T: TableMapping>(&self, record: &T) -> RepoResult<()> {
        self.access
            .execute(&T::TABLE.insert_sql(), &record.to_params())?;
        Ok(())
    }

    /// Rewrites every data column of the row keyed by `record`'s identifier.
    pub fn update<T: TableMapping>(&self, record: &T) -> RepoResult<()> {
        let id = stored_id(record)?;
        let mut params = record.to_params();
        params.push(Value::Integer(id));

        let changed = self.access.execute(&T::TABLE.update_sql(), &params)?;
        if changed == 0 {
            return Err(RepoError::NotFound { kind: T::KIND, id });
        }
        Ok(())
    }

    /// Deletes the row keyed by `record`'s identifier.
    pub fn delete<T: TableMapping>(&self, record: &T) -> RepoResult<()> {
        let id = stored_id(record)?;
        let changed = self
            .access
            .execute(&T::TABLE.delete_sql(), &[Value::Integer(id)])?;
        if changed == 0 {
            return Err(RepoError::NotFound { kind: T::KIND, id });
        }
        Ok(())
    }
}

fn stored_id<T: TableMapping>(record: &T) -> RepoResult<RecordId> {
    record.id().ok_or(RepoError::MissingIdentifier(T::KIND))
}
