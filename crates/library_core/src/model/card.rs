//! Library cards held by students and professors.

use super::fields::{FieldError, FieldReader};
use super::{EntityKind, Record, RecordId, RowSummary, DATE_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Card issued to a student. `student_id` is a weak reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentCard {
    pub id: Option<RecordId>,
    pub student_id: RecordId,
    pub issued_date: NaiveDate,
    pub expiration_date: NaiveDate,
}

impl StudentCard {
    /// Creates an unsaved card.
    pub fn new(student_id: RecordId, issued_date: NaiveDate, expiration_date: NaiveDate) -> Self {
        Self {
            id: None,
            student_id,
            issued_date,
            expiration_date,
        }
    }
}

impl Record for StudentCard {
    const KIND: EntityKind = EntityKind::StudentCard;
    const FIELD_LABELS: &'static [&'static str] =
        &["Student ID", "Issued Date", "Expiration Date"];

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: Option<RecordId>) {
        self.id = id;
    }

    fn from_input(values: &[&str]) -> Result<Self, FieldError> {
        let reader = FieldReader::new(Self::KIND, Self::FIELD_LABELS, values)?;
        Ok(Self::new(reader.integer(0)?, reader.date(1)?, reader.date(2)?))
    }

    fn summary(&self) -> RowSummary {
        RowSummary::new(
            validity_line(self.issued_date, self.expiration_date),
            format!("Student ID: {}", self.student_id),
        )
    }
}

/// Card issued to a professor. `professor_id` is a weak reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorCard {
    pub id: Option<RecordId>,
    pub professor_id: RecordId,
    pub issued_date: NaiveDate,
    pub expiration_date: NaiveDate,
}

impl ProfessorCard {
    /// Creates an unsaved card.
    pub fn new(
        professor_id: RecordId,
        issued_date: NaiveDate,
        expiration_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            professor_id,
            issued_date,
            expiration_date,
        }
    }
}

impl Record for ProfessorCard {
    const KIND: EntityKind = EntityKind::ProfessorCard;
    const FIELD_LABELS: &'static [&'static str] =
        &["Professor ID", "Issued Date", "Expiration Date"];

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: Option<RecordId>) {
        self.id = id;
    }

    fn from_input(values: &[&str]) -> Result<Self, FieldError> {
        let reader = FieldReader::new(Self::KIND, Self::FIELD_LABELS, values)?;
        Ok(Self::new(reader.integer(0)?, reader.date(1)?, reader.date(2)?))
    }

    fn summary(&self) -> RowSummary {
        RowSummary::new(
            validity_line(self.issued_date, self.expiration_date),
            format!("Professor ID: {}", self.professor_id),
        )
    }
}

fn validity_line(issued: NaiveDate, expires: NaiveDate) -> String {
    format!(
        "Issue date: {}, expiration date: {}",
        issued.format(DATE_FORMAT),
        expires.format(DATE_FORMAT)
    )
}
