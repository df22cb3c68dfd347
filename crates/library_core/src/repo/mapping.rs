//! Per-entity table mappings.
//!
//! # Invariants
//! - `from_row` reads positions `0..=columns.len()` where 0 is the key.
//! - `to_params` yields exactly `columns.len()` values in declared order.

use super::decode::{self, DecodeError, RowReader};
use super::table::TableSpec;
use crate::db::Value;
use crate::model::book::{Book, Publisher};
use crate::model::card::{ProfessorCard, StudentCard};
use crate::model::issue::BookIssue;
use crate::model::people::{Author, LibraryEmployee, Professor, Student};
use crate::model::Record;

/// Binds a record type to its table.
pub trait TableMapping: Record {
    const TABLE: TableSpec;

    /// Decodes one `SELECT` row.
    fn from_row(row: &RowReader<'_>) -> Result<Self, DecodeError>;

    /// Data column values for `INSERT`/`UPDATE`, excluding the key.
    fn to_params(&self) -> Vec<Value>;
}

impl TableMapping for Author {
    const TABLE: TableSpec = TableSpec {
        table: "Authors",
        id_column: "author_id",
        columns: &["last_name", "first_name"],
    };

    fn from_row(row: &RowReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: row.id()?,
            last_name: row.text(1)?,
            first_name: row.text(2)?,
        })
    }

    fn to_params(&self) -> Vec<Value> {
        vec![decode::text(&self.last_name), decode::text(&self.first_name)]
    }
}

impl TableMapping for Publisher {
    const TABLE: TableSpec = TableSpec {
        table: "Publishers",
        id_column: "publisher_id",
        columns: &["name", "address"],
    };

    fn from_row(row: &RowReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: row.id()?,
            name: row.text(1)?,
            address: row.text(2)?,
        })
    }

    fn to_params(&self) -> Vec<Value> {
        vec![decode::text(&self.name), decode::text(&self.address)]
    }
}

impl TableMapping for Book {
    const TABLE: TableSpec = TableSpec {
        table: "Books",
        id_column: "book_id",
        columns: &[
            "title",
            "publication_year",
            "available_copies",
            "author_id",
            "publisher_id",
        ],
    };

    fn from_row(row: &RowReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: row.id()?,
            title: row.text(1)?,
            publication_year: row.optional_integer(2)?,
            available_copies: row.optional_integer(3)?,
            author_id: row.optional_integer(4)?,
            publisher_id: row.optional_integer(5)?,
        })
    }

    fn to_params(&self) -> Vec<Value> {
        vec![
            decode::text(&self.title),
            decode::optional_integer(self.publication_year),
            decode::optional_integer(self.available_copies),
            decode::optional_integer(self.author_id),
            decode::optional_integer(self.publisher_id),
        ]
    }
}

impl TableMapping for Student {
    const TABLE: TableSpec = TableSpec {
        table: "Students",
        id_column: "student_id",
        columns: &["first_name", "last_name"],
    };

    fn from_row(row: &RowReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: row.id()?,
            first_name: row.text(1)?,
            last_name: row.text(2)?,
        })
    }

    fn to_params(&self) -> Vec<Value> {
        vec![decode::text(&self.first_name), decode::text(&self.last_name)]
    }
}

impl TableMapping for Professor {
    const TABLE: TableSpec = TableSpec {
        table: "Professors",
        id_column: "professor_id",
        columns: &["first_name", "last_name"],
    };

    fn from_row(row: &RowReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: row.id()?,
            first_name: row.text(1)?,
            last_name: row.text(2)?,
        })
    }

    fn to_params(&self) -> Vec<Value> {
        vec![decode::text(&self.first_name), decode::text(&self.last_name)]
    }
}

impl TableMapping for LibraryEmployee {
    const TABLE: TableSpec = TableSpec {
        table: "LibraryStaff",
        id_column: "staff_id",
        columns: &["first_name", "last_name", "library_card_number"],
    };

    fn from_row(row: &RowReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: row.id()?,
            first_name: row.text(1)?,
            last_name: row.text(2)?,
            library_card_number: row.optional_text(3)?,
        })
    }

    fn to_params(&self) -> Vec<Value> {
        vec![
            decode::text(&self.first_name),
            decode::text(&self.last_name),
            decode::optional_text(self.library_card_number.as_deref()),
        ]
    }
}

impl TableMapping for StudentCard {
    const TABLE: TableSpec = TableSpec {
        table: "StudentCards",
        id_column: "card_id",
        columns: &["student_id", "issue_date", "expiration_date"],
    };

    fn from_row(row: &RowReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: row.id()?,
            student_id: row.integer(1)?,
            issued_date: row.date(2)?,
            expiration_date: row.date(3)?,
        })
    }

    fn to_params(&self) -> Vec<Value> {
        vec![
            decode::integer(self.student_id),
            decode::date(self.issued_date),
            decode::date(self.expiration_date),
        ]
    }
}

impl TableMapping for ProfessorCard {
    const TABLE: TableSpec = TableSpec {
        table: "ProfessorCards",
        id_column: "card_id",
        columns: &["professor_id", "issue_date", "expiration_date"],
    };

    fn from_row(row: &RowReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: row.id()?,
            professor_id: row.integer(1)?,
            issued_date: row.date(2)?,
            expiration_date: row.date(3)?,
        })
    }

    fn to_params(&self) -> Vec<Value> {
        vec![
            decode::integer(self.professor_id),
            decode::date(self.issued_date),
            decode::date(self.expiration_date),
        ]
    }
}

impl TableMapping for BookIssue {
    const TABLE: TableSpec = TableSpec {
        table: "BookIssues",
        id_column: "issue_id",
        columns: &[
            "book_id",
            "professor_card_id",
            "student_card_id",
            "issued_by_id",
            "issue_date",
            "return_date",
        ],
    };

    fn from_row(row: &RowReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: row.id()?,
            book_id: row.optional_integer(1)?,
            professor_card_id: row.optional_integer(2)?,
            student_card_id: row.optional_integer(3)?,
            issued_by_id: row.integer(4)?,
            issued_date: row.date(5)?,
            return_date: row.date(6)?,
        })
    }

    fn to_params(&self) -> Vec<Value> {
        vec![
            decode::optional_integer(self.book_id),
            decode::optional_integer(self.professor_card_id),
            decode::optional_integer(self.student_card_id),
            decode::integer(self.issued_by_id),
            decode::date(self.issued_date),
            decode::date(self.return_date),
        ]
    }
}
