//! Aggregate catalog: in-memory mirror plus write-through persistence.
//!
//! # Responsibility
//! - Own the nine ordered collections shown by the master list.
//! - Apply each mutation locally, then issue exactly one statement for it.
//! - Replace the whole mirror from storage on refresh.
//!
//! # Invariants
//! - Local mutations are never rolled back. A failed write returns
//!   `Diverged` and flags the kind until the next successful refresh.
//! - Added records keep `id = None` in memory; storage-assigned keys only
//!   appear after a refresh.
//! - Refresh is all-or-nothing: on any failure no collection changes.
//! - Bad positions, unknown ids and bad input are rejected before any
//!   mutation.

use super::snapshot::{CatalogEntity, CatalogSnapshot};
use crate::db::DataAccess;
use crate::model::book::{Book, Publisher};
use crate::model::card::{ProfessorCard, StudentCard};
use crate::model::issue::BookIssue;
use crate::model::people::{Author, LibraryEmployee, Professor, Student};
use crate::model::{EntityKind, FieldError, RecordId, RowSummary};
use crate::repo::{RepoError, RepoResult, TableRepository};
use log::{error, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug)]
pub enum CatalogError {
    /// Position does not address an element of the kind's list.
    PositionOutOfRange {
        kind: EntityKind,
        position: usize,
        len: usize,
    },
    /// No in-memory record of the kind carries this identifier.
    RecordNotFound { kind: EntityKind, id: RecordId },
    /// Form input could not be parsed.
    Input(FieldError),
    /// Local mutation applied, storage write failed.
    Diverged { kind: EntityKind, source: RepoError },
    /// A refresh fetch failed; no collection was replaced.
    Refresh { kind: EntityKind, source: RepoError },
    /// A refresh worker panicked or was cancelled.
    RefreshTask { kind: EntityKind, message: String },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PositionOutOfRange {
                kind,
                position,
                len,
            } => write!(f, "{kind}: position {position} is out of range (len {len})"),
            Self::RecordNotFound { kind, id } => write!(f, "{kind}: no record with id {id}"),
            Self::Input(err) => write!(f, "{err}"),
            Self::Diverged { kind, source } => {
                write!(f, "{kind}: changed in memory but not in storage: {source}")
            }
            Self::Refresh { kind, source } => write!(f, "{kind}: refresh failed: {source}"),
            Self::RefreshTask { kind, message } => {
                write!(f, "{kind}: refresh worker failed: {message}")
            }
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Diverged { source, .. } | Self::Refresh { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<FieldError> for CatalogError {
    fn from(value: FieldError) -> Self {
        Self::Input(value)
    }
}

/// In-memory catalog synchronized with storage through a [`DataAccess`].
pub struct Catalog {
    access: Arc<dyn DataAccess>,
    mirror: CatalogSnapshot,
    diverged: BTreeSet<EntityKind>,
}

impl Catalog {
    /// Creates an empty catalog; call [`Catalog::full_refresh`] to load it.
    pub fn new(access: Arc<dyn DataAccess>) -> Self {
        Self::from_snapshot(access, CatalogSnapshot::default())
    }

    /// Creates a catalog whose mirror starts as `snapshot`.
    pub fn from_snapshot(access: Arc<dyn DataAccess>, snapshot: CatalogSnapshot) -> Self {
        Self {
            access,
            mirror: snapshot,
            diverged: BTreeSet::new(),
        }
    }

    /// Creates a catalog and runs the startup refresh.
    pub async fn load(access: Arc<dyn DataAccess>) -> CatalogResult<Self> {
        let mut catalog = Self::new(access);
        catalog.full_refresh().await?;
        Ok(catalog)
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.mirror
    }

    /// Current mirror of `T`, in fetch order then append order.
    pub fn list<T: CatalogEntity>(&self) -> &[T] {
        T::collection(&self.mirror)
    }

    /// Number of rows shown for `kind`.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Author => self.list::<Author>().len(),
            EntityKind::Publisher => self.list::<Publisher>().len(),
            EntityKind::Book => self.list::<Book>().len(),
            EntityKind::Student => self.list::<Student>().len(),
            EntityKind::Professor => self.list::<Professor>().len(),
            EntityKind::StudentCard => self.list::<StudentCard>().len(),
            EntityKind::ProfessorCard => self.list::<ProfessorCard>().len(),
            EntityKind::LibraryEmployee => self.list::<LibraryEmployee>().len(),
            EntityKind::BookIssue => self.list::<BookIssue>().len(),
        }
    }

    /// List rows for `kind`, in list order.
    pub fn row_summaries(&self, kind: EntityKind) -> Vec<RowSummary> {
        match kind {
            EntityKind::Author => self.summaries::<Author>(),
            EntityKind::Publisher => self.summaries::<Publisher>(),
            EntityKind::Book => self.summaries::<Book>(),
            EntityKind::Student => self.summaries::<Student>(),
            EntityKind::Professor => self.summaries::<Professor>(),
            EntityKind::StudentCard => self.summaries::<StudentCard>(),
            EntityKind::ProfessorCard => self.summaries::<ProfessorCard>(),
            EntityKind::LibraryEmployee => self.summaries::<LibraryEmployee>(),
            EntityKind::BookIssue => self.summaries::<BookIssue>(),
        }
    }

    /// Whether a failed write may have left `kind` out of sync with storage.
    pub fn is_diverged(&self, kind: EntityKind) -> bool {
        self.diverged.contains(&kind)
    }

    /// Diverged kinds in presentation order.
    pub fn diverged_kinds(&self) -> Vec<EntityKind> {
        self.diverged.iter().copied().collect()
    }

    /// Appends `record` with its identifier cleared, then inserts it.
    ///
    /// The appended copy keeps `id = None` even after the insert succeeds.
    pub fn add<T: CatalogEntity>(&mut self, mut record: T) -> CatalogResult<()> {
        record.set_id(None);
        T::collection_mut(&mut self.mirror).push(record.clone());
        self.persist::<T>("insert", |repo| repo.insert(&record))
    }

    /// Replaces the record at `position`, keeping its identifier, then
    /// updates the stored row.
    pub fn edit_at<T: CatalogEntity>(&mut self, position: usize, mut record: T) -> CatalogResult<()> {
        let collection = T::collection_mut(&mut self.mirror);
        let len = collection.len();
        let slot = collection
            .get_mut(position)
            .ok_or(CatalogError::PositionOutOfRange {
                kind: T::KIND,
                position,
                len,
            })?;

        record.set_id(slot.id());
        *slot = record.clone();
        self.persist::<T>("update", |repo| repo.update(&record))
    }

    /// Identifier-keyed form of [`Catalog::edit_at`].
    pub fn edit<T: CatalogEntity>(&mut self, id: RecordId, record: T) -> CatalogResult<()> {
        let position = self.position_of::<T>(id)?;
        self.edit_at(position, record)
    }

    /// Removes the record at `position`, then deletes its stored row.
    ///
    /// Later records shift down by one. Returns the removed record. When the
    /// delete fails the record is not returned; the row is still stored and
    /// comes back with the next [`Catalog::full_refresh`].
    pub fn delete_at<T: CatalogEntity>(&mut self, position: usize) -> CatalogResult<T> {
        let collection = T::collection_mut(&mut self.mirror);
        if position >= collection.len() {
            return Err(CatalogError::PositionOutOfRange {
                kind: T::KIND,
                position,
                len: collection.len(),
            });
        }

        let removed = collection.remove(position);
        self.persist::<T>("delete", |repo| repo.delete(&removed))?;
        Ok(removed)
    }

    /// Identifier-keyed form of [`Catalog::delete_at`].
    pub fn delete<T: CatalogEntity>(&mut self, id: RecordId) -> CatalogResult<T> {
        let position = self.position_of::<T>(id)?;
        self.delete_at(position)
    }

    /// Parses form values for `kind` and adds the record.
    pub fn add_from_input(&mut self, kind: EntityKind, values: &[&str]) -> CatalogResult<()> {
        match kind {
            EntityKind::Author => self.add_parsed::<Author>(values),
            EntityKind::Publisher => self.add_parsed::<Publisher>(values),
            EntityKind::Book => self.add_parsed::<Book>(values),
            EntityKind::Student => self.add_parsed::<Student>(values),
            EntityKind::Professor => self.add_parsed::<Professor>(values),
            EntityKind::StudentCard => self.add_parsed::<StudentCard>(values),
            EntityKind::ProfessorCard => self.add_parsed::<ProfessorCard>(values),
            EntityKind::LibraryEmployee => self.add_parsed::<LibraryEmployee>(values),
            EntityKind::BookIssue => self.add_parsed::<BookIssue>(values),
        }
    }

    /// Parses form values for `kind` and replaces the record at `position`.
    pub fn edit_from_input(
        &mut self,
        kind: EntityKind,
        position: usize,
        values: &[&str],
    ) -> CatalogResult<()> {
        match kind {
            EntityKind::Author => self.edit_parsed::<Author>(position, values),
            EntityKind::Publisher => self.edit_parsed::<Publisher>(position, values),
            EntityKind::Book => self.edit_parsed::<Book>(position, values),
            EntityKind::Student => self.edit_parsed::<Student>(position, values),
            EntityKind::Professor => self.edit_parsed::<Professor>(position, values),
            EntityKind::StudentCard => self.edit_parsed::<StudentCard>(position, values),
            EntityKind::ProfessorCard => self.edit_parsed::<ProfessorCard>(position, values),
            EntityKind::LibraryEmployee => self.edit_parsed::<LibraryEmployee>(position, values),
            EntityKind::BookIssue => self.edit_parsed::<BookIssue>(position, values),
        }
    }

    /// Deletes the row at `position` of `kind`.
    pub fn delete_row(&mut self, kind: EntityKind, position: usize) -> CatalogResult<()> {
        match kind {
            EntityKind::Author => self.delete_at::<Author>(position).map(drop),
            EntityKind::Publisher => self.delete_at::<Publisher>(position).map(drop),
            EntityKind::Book => self.delete_at::<Book>(position).map(drop),
            EntityKind::Student => self.delete_at::<Student>(position).map(drop),
            EntityKind::Professor => self.delete_at::<Professor>(position).map(drop),
            EntityKind::StudentCard => self.delete_at::<StudentCard>(position).map(drop),
            EntityKind::ProfessorCard => self.delete_at::<ProfessorCard>(position).map(drop),
            EntityKind::LibraryEmployee => self.delete_at::<LibraryEmployee>(position).map(drop),
            EntityKind::BookIssue => self.delete_at::<BookIssue>(position).map(drop),
        }
    }

    /// Reloads all nine collections from storage.
    ///
    /// The nine reads run concurrently on blocking workers and are joined
    /// before anything is applied. On success every collection is replaced
    /// and divergence flags are cleared; on failure nothing changes and the
    /// error names the first failing kind in `EntityKind::ALL` order.
    pub async fn full_refresh(&mut self) -> CatalogResult<()> {
        let started_at = Instant::now();
        info!("event=catalog_refresh module=catalog status=start");

        match fetch_snapshot(Arc::clone(&self.access)).await {
            Ok(snapshot) => {
                info!(
                    "event=catalog_refresh module=catalog status=ok duration_ms={} row_count={}",
                    started_at.elapsed().as_millis(),
                    snapshot.total_len()
                );
                self.mirror = snapshot;
                self.diverged.clear();
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=catalog_refresh module=catalog status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn summaries<T: CatalogEntity>(&self) -> Vec<RowSummary> {
        self.list::<T>().iter().map(|record| record.summary()).collect()
    }

    fn add_parsed<T: CatalogEntity>(&mut self, values: &[&str]) -> CatalogResult<()> {
        let record = T::from_input(values)?;
        self.add(record)
    }

    fn edit_parsed<T: CatalogEntity>(&mut self, position: usize, values: &[&str]) -> CatalogResult<()> {
        let record = T::from_input(values)?;
        self.edit_at(position, record)
    }

    fn position_of<T: CatalogEntity>(&self, id: RecordId) -> CatalogResult<usize> {
        self.list::<T>()
            .iter()
            .position(|record| record.id() == Some(id))
            .ok_or(CatalogError::RecordNotFound { kind: T::KIND, id })
    }

    fn persist<T: CatalogEntity>(
        &mut self,
        op: &'static str,
        write: impl FnOnce(TableRepository<'_>) -> RepoResult<()>,
    ) -> CatalogResult<()> {
        match write(TableRepository::new(self.access.as_ref())) {
            Ok(()) => {
                info!(
                    "event=catalog_write module=catalog status=ok op={} table={}",
                    op,
                    T::TABLE.table
                );
                Ok(())
            }
            Err(source) => {
                self.diverged.insert(T::KIND);
                warn!(
                    "event=catalog_write module=catalog status=error op={} table={} diverged=true error={}",
                    op,
                    T::TABLE.table,
                    source
                );
                Err(CatalogError::Diverged {
                    kind: T::KIND,
                    source,
                })
            }
        }
    }
}

async fn fetch_snapshot(access: Arc<dyn DataAccess>) -> CatalogResult<CatalogSnapshot> {
    let (
        authors,
        publishers,
        books,
        students,
        professors,
        student_cards,
        professor_cards,
        library_employees,
        book_issues,
    ) = tokio::join!(
        fetch_kind::<Author>(Arc::clone(&access)),
        fetch_kind::<Publisher>(Arc::clone(&access)),
        fetch_kind::<Book>(Arc::clone(&access)),
        fetch_kind::<Student>(Arc::clone(&access)),
        fetch_kind::<Professor>(Arc::clone(&access)),
        fetch_kind::<StudentCard>(Arc::clone(&access)),
        fetch_kind::<ProfessorCard>(Arc::clone(&access)),
        fetch_kind::<LibraryEmployee>(Arc::clone(&access)),
        fetch_kind::<BookIssue>(Arc::clone(&access)),
    );

    // Field order is `EntityKind::ALL` order, so `?` reports the first
    // failing kind deterministically.
    Ok(CatalogSnapshot {
        authors: authors?,
        publishers: publishers?,
        books: books?,
        students: students?,
        professors: professors?,
        student_cards: student_cards?,
        professor_cards: professor_cards?,
        library_employees: library_employees?,
        book_issues: book_issues?,
    })
}

async fn fetch_kind<T: CatalogEntity>(access: Arc<dyn DataAccess>) -> CatalogResult<Vec<T>> {
    let joined =
        tokio::task::spawn_blocking(move || TableRepository::new(access.as_ref()).fetch_all::<T>())
            .await;

    match joined {
        Ok(Ok(records)) => Ok(records),
        Ok(Err(source)) => Err(CatalogError::Refresh {
            kind: T::KIND,
            source,
        }),
        Err(join_err) => Err(CatalogError::RefreshTask {
            kind: T::KIND,
            message: join_err.to_string(),
        }),
    }
}
