//! Books and their publishers.

use super::fields::{FieldError, FieldReader};
use super::{EntityKind, Record, RecordId, RowSummary};
use serde::{Deserialize, Serialize};

/// Publishing house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: Option<RecordId>,
    pub name: String,
    pub address: String,
}

impl Publisher {
    /// Creates an unsaved publisher.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            address: address.into(),
        }
    }
}

impl Record for Publisher {
    const KIND: EntityKind = EntityKind::Publisher;
    const FIELD_LABELS: &'static [&'static str] = &["Name", "Address"];

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: Option<RecordId>) {
        self.id = id;
    }

    fn from_input(values: &[&str]) -> Result<Self, FieldError> {
        let reader = FieldReader::new(Self::KIND, Self::FIELD_LABELS, values)?;
        Ok(Self::new(reader.text(0)?, reader.text(1)?))
    }

    fn summary(&self) -> RowSummary {
        RowSummary::title_only(format!("{}, {}", self.name, self.address))
    }
}

/// Catalog title.
///
/// `author_id` and `publisher_id` are weak references; either may be unset
/// or point at a row that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<RecordId>,
    pub title: String,
    pub publisher_id: Option<RecordId>,
    pub author_id: Option<RecordId>,
    pub publication_year: Option<i64>,
    pub available_copies: Option<i64>,
}

impl Book {
    /// Creates an unsaved book with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            publisher_id: None,
            author_id: None,
            publication_year: None,
            available_copies: None,
        }
    }
}

impl Record for Book {
    const KIND: EntityKind = EntityKind::Book;
    const FIELD_LABELS: &'static [&'static str] = &[
        "Title",
        "Publication Year",
        "Available Copies",
        "Author ID",
        "Publisher ID",
    ];

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: Option<RecordId>) {
        self.id = id;
    }

    fn from_input(values: &[&str]) -> Result<Self, FieldError> {
        let reader = FieldReader::new(Self::KIND, Self::FIELD_LABELS, values)?;
        Ok(Self {
            id: None,
            title: reader.text(0)?,
            publication_year: reader.optional_integer(1)?,
            available_copies: reader.optional_integer(2)?,
            author_id: reader.optional_integer(3)?,
            publisher_id: reader.optional_integer(4)?,
        })
    }

    fn summary(&self) -> RowSummary {
        RowSummary::title_only(self.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::Book;
    use crate::model::{FieldError, Record};

    #[test]
    fn book_input_parses_numeric_fields() {
        let book = Book::from_input(&["Dune", "1965", "3", "7", ""]).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.publication_year, Some(1965));
        assert_eq!(book.available_copies, Some(3));
        assert_eq!(book.author_id, Some(7));
        assert_eq!(book.publisher_id, None);
        assert_eq!(book.id, None);

        let summary = book.summary();
        assert_eq!(summary.title, "Dune");
        assert!(summary.detail.is_empty());
    }

    #[test]
    fn book_input_rejects_text_in_numeric_field() {
        let err = Book::from_input(&["Dune", "sixties", "", "", ""]).unwrap_err();
        assert!(matches!(
            err,
            FieldError::InvalidInteger {
                field: "Publication Year",
                ..
            }
        ));
    }
}
