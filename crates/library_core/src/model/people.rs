//! Person-like records: authors, students, professors and library staff.

use super::fields::{FieldError, FieldReader};
use super::{EntityKind, Record, RecordId, RowSummary};
use serde::{Deserialize, Serialize};

const NAME_LABELS: &[&str] = &["First Name", "Last Name"];

/// Book author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Option<RecordId>,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// Creates an unsaved author.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Record for Author {
    const KIND: EntityKind = EntityKind::Author;
    const FIELD_LABELS: &'static [&'static str] = NAME_LABELS;

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
        RowSummary::title_only(full_name(&self.first_name, &self.last_name))
    }
}

/// Enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Option<RecordId>,
    pub first_name: String,
    pub last_name: String,
}

impl Student {
    /// Creates an unsaved student.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Record for Student {
    const KIND: EntityKind = EntityKind::Student;
    const FIELD_LABELS: &'static [&'static str] = NAME_LABELS;

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
        RowSummary::title_only(full_name(&self.first_name, &self.last_name))
    }
}

/// Teaching staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    pub id: Option<RecordId>,
    pub first_name: String,
    pub last_name: String,
}

impl Professor {
    /// Creates an unsaved professor.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Record for Professor {
    const KIND: EntityKind = EntityKind::Professor;
    const FIELD_LABELS: &'static [&'static str] = NAME_LABELS;

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
        RowSummary::title_only(full_name(&self.first_name, &self.last_name))
    }
}

/// Library staff member; issues books to card holders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEmployee {
    pub id: Option<RecordId>,
    pub first_name: String,
    pub last_name: String,
    pub library_card_number: Option<String>,
}

impl LibraryEmployee {
    /// Creates an unsaved employee.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        library_card_number: Option<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            library_card_number,
        }
    }
}

impl Record for LibraryEmployee {
    const KIND: EntityKind = EntityKind::LibraryEmployee;
    const FIELD_LABELS: &'static [&'static str] = &["First Name", "Last Name", "Card Number"];

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: Option<RecordId>) {
        self.id = id;
    }

    fn from_input(values: &[&str]) -> Result<Self, FieldError> {
        let reader = FieldReader::new(Self::KIND, Self::FIELD_LABELS, values)?;
        Ok(Self::new(
            reader.text(0)?,
            reader.text(1)?,
            reader.optional_text(2),
        ))
    }

    fn summary(&self) -> RowSummary {
        RowSummary::title_only(full_name(&self.first_name, &self.last_name))
    }
}

fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}
