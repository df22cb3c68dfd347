//! Entity model for the library catalog.
//!
//! # Responsibility
//! - Define the nine flat record types mirrored between memory and storage.
//! - Describe per-kind presentation metadata (labels, form fields, summaries).
//!
//! # Invariants
//! - A record's identifier is `None` until storage assigns one, and is never
//!   changed by an edit afterwards.
//! - Cross-entity fields are weak references: they hold an identifier but
//!   nothing in this crate checks that the target exists.

pub mod book;
pub mod card;
pub mod fields;
pub mod issue;
pub mod people;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub use fields::FieldError;

/// Storage-assigned numeric identifier shared by every entity kind.
pub type RecordId = i64;

/// Text format used for calendar dates in input and storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The nine entity kinds, in the order the master list presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Author,
    Publisher,
    Book,
    Student,
    Professor,
    StudentCard,
    ProfessorCard,
    LibraryEmployee,
    BookIssue,
}

impl EntityKind {
    /// All kinds in presentation (segment) order.
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Author,
        EntityKind::Publisher,
        EntityKind::Book,
        EntityKind::Student,
        EntityKind::Professor,
        EntityKind::StudentCard,
        EntityKind::ProfessorCard,
        EntityKind::LibraryEmployee,
        EntityKind::BookIssue,
    ];

    /// Zero-based segment index of this kind.
    pub fn index(self) -> usize {
        match self {
            Self::Author => 0,
            Self::Publisher => 1,
            Self::Book => 2,
            Self::Student => 3,
            Self::Professor => 4,
            Self::StudentCard => 5,
            Self::ProfessorCard => 6,
            Self::LibraryEmployee => 7,
            Self::BookIssue => 8,
        }
    }

    /// Resolves a segment index; `None` when out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable category label shown above the list.
    pub fn label(self) -> &'static str {
        match self {
            Self::Author => "Authors",
            Self::Publisher => "Publishers",
            Self::Book => "Books",
            Self::Student => "Students",
            Self::Professor => "Professors",
            Self::StudentCard => "Students' Cards",
            Self::ProfessorCard => "Professors' Cards",
            Self::LibraryEmployee => "Library Employees",
            Self::BookIssue => "Issued Books",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Two-line rendering of one record for the master list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowSummary {
    /// Primary line.
    pub title: String,
    /// Secondary line; empty when the kind has nothing extra to show.
    pub detail: String,
}

impl RowSummary {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn title_only(title: impl Into<String>) -> Self {
        Self::new(title, String::new())
    }
}

/// Behavior shared by every catalog record type.
pub trait Record: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Kind tag of this record type.
    const KIND: EntityKind;

    /// Form field labels, in the order `from_input` expects values.
    const FIELD_LABELS: &'static [&'static str];

    /// Storage-assigned identifier, if already persisted.
    fn id(&self) -> Option<RecordId>;

    /// Replaces the identifier.
    fn set_id(&mut self, id: Option<RecordId>);

    /// Parses positional user input into a record with identifier absent.
    ///
    /// # Errors
    /// - Returns `FieldError` on wrong value count, missing required values,
    ///   or values that do not parse as the field's type.
    fn from_input(values: &[&str]) -> Result<Self, FieldError>;

    /// Renders the list row for this record.
    fn summary(&self) -> RowSummary;
}
