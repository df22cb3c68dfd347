//! Book loans.

use super::fields::{FieldError, FieldReader};
use super::{EntityKind, Record, RecordId, RowSummary, DATE_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One book handed out by a librarian against a student or professor card.
///
/// Exactly one of `student_card_id` / `professor_card_id` is expected to be
/// set; the model does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookIssue {
    pub id: Option<RecordId>,
    pub book_id: Option<RecordId>,
    pub professor_card_id: Option<RecordId>,
    pub student_card_id: Option<RecordId>,
    pub issued_by_id: RecordId,
    pub issued_date: NaiveDate,
    pub return_date: NaiveDate,
}

impl Record for BookIssue {
    const KIND: EntityKind = EntityKind::BookIssue;
    const FIELD_LABELS: &'static [&'static str] = &[
        "Book ID",
        "Student Card ID",
        "Professor Card ID",
        "Issued By ID",
        "Issued Date",
        "Return Date",
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
            book_id: reader.optional_integer(0)?,
            student_card_id: reader.optional_integer(1)?,
            professor_card_id: reader.optional_integer(2)?,
            issued_by_id: reader.integer(3)?,
            issued_date: reader.date(4)?,
            return_date: reader.date(5)?,
        })
    }

    fn summary(&self) -> RowSummary {
        let book = self
            .book_id
            .map_or_else(|| "unknown".to_string(), |id| id.to_string());
        let title = format!(
            "Book ID: {book}, issue date: {}, return date: {}",
            self.issued_date.format(DATE_FORMAT),
            self.return_date.format(DATE_FORMAT)
        );

        // A professor card wins when both are set.
        let holder = match (self.student_card_id, self.professor_card_id) {
            (_, Some(card)) => format!("Professor card ID: {card}, "),
            (Some(card), None) => format!("Student Card ID: {card}, "),
            (None, None) => String::new(),
        };
        RowSummary::new(title, format!("{holder}librarian ID: {}", self.issued_by_id))
    }
}

#[cfg(test)]
mod tests {
    use super::BookIssue;
    use crate::model::Record;

    #[test]
    fn issue_input_maps_card_columns_by_label() {
        let issue =
            BookIssue::from_input(&["10", "", "3", "2", "2023-06-01", "2023-06-15"]).unwrap();
        assert_eq!(issue.book_id, Some(10));
        assert_eq!(issue.student_card_id, None);
        assert_eq!(issue.professor_card_id, Some(3));
        assert_eq!(issue.issued_by_id, 2);

        let summary = issue.summary();
        assert_eq!(
            summary.title,
            "Book ID: 10, issue date: 2023-06-01, return date: 2023-06-15"
        );
        assert_eq!(summary.detail, "Professor card ID: 3, librarian ID: 2");
    }

    #[test]
    fn issue_summary_names_the_holding_card() {
        let student = BookIssue::from_input(&["4", "12", "", "1", "2023-06-01", "2023-06-15"])
            .unwrap();
        assert_eq!(
            student.summary().detail,
            "Student Card ID: 12, librarian ID: 1"
        );

        let both = BookIssue::from_input(&["4", "12", "3", "1", "2023-06-01", "2023-06-15"])
            .unwrap();
        assert_eq!(both.summary().detail, "Professor card ID: 3, librarian ID: 1");
    }
}
