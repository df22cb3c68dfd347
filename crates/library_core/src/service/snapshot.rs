//! In-memory mirror of the nine catalog tables.

use crate::model::book::{Book, Publisher};
use crate::model::card::{ProfessorCard, StudentCard};
use crate::model::issue::BookIssue;
use crate::model::people::{Author, LibraryEmployee, Professor, Student};
use crate::repo::TableMapping;
use serde::{Deserialize, Serialize};

/// One ordered collection per entity kind.
///
/// Field order follows `EntityKind::ALL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub authors: Vec<Author>,
    pub publishers: Vec<Publisher>,
    pub books: Vec<Book>,
    pub students: Vec<Student>,
    pub professors: Vec<Professor>,
    pub student_cards: Vec<StudentCard>,
    pub professor_cards: Vec<ProfessorCard>,
    pub library_employees: Vec<LibraryEmployee>,
    pub book_issues: Vec<BookIssue>,
}

impl CatalogSnapshot {
    /// Total number of records across all kinds.
    pub fn total_len(&self) -> usize {
        self.authors.len()
            + self.publishers.len()
            + self.books.len()
            + self.students.len()
            + self.professors.len()
            + self.student_cards.len()
            + self.professor_cards.len()
            + self.library_employees.len()
            + self.book_issues.len()
    }
}

/// Record type that owns one collection of [`CatalogSnapshot`].
pub trait CatalogEntity: TableMapping {
    fn collection(snapshot: &CatalogSnapshot) -> &Vec<Self>;
    fn collection_mut(snapshot: &mut CatalogSnapshot) -> &mut Vec<Self>;
}

impl CatalogEntity for Author {
    fn collection(snapshot: &CatalogSnapshot) -> &Vec<Self> {
        &snapshot.authors
    }

    fn collection_mut(snapshot: &mut CatalogSnapshot) -> &mut Vec<Self> {
        &mut snapshot.authors
    }
}

impl CatalogEntity for Publisher {
    fn collection(snapshot: &CatalogSnapshot) -> &Vec<Self> {
        &snapshot.publishers
    }

    fn collection_mut(snapshot: &mut CatalogSnapshot) -> &mut Vec<Self> {
        &mut snapshot.publishers
    }
}

impl CatalogEntity for Book {
    fn collection(snapshot: &CatalogSnapshot) -> &Vec<Self> {
        &snapshot.books
    }

    fn collection_mut(snapshot: &mut CatalogSnapshot) -> &mut Vec<Self> {
        &mut snapshot.books
    }
}

impl CatalogEntity for Student {
    fn collection(snapshot: &CatalogSnapshot) -> &Vec<Self> {
        &snapshot.students
    }

    fn collection_mut(snapshot: &mut CatalogSnapshot) -> &mut Vec<Self> {
        &mut snapshot.students
    }
}

impl CatalogEntity for Professor {
    fn collection(snapshot: &CatalogSnapshot) -> &Vec<Self> {
        &snapshot.professors
    }

    fn collection_mut(snapshot: &mut CatalogSnapshot) -> &mut Vec<Self> {
        &mut snapshot.professors
    }
}

impl CatalogEntity for StudentCard {
    fn collection(snapshot: &CatalogSnapshot) -> &Vec<Self> {
        &snapshot.student_cards
    }

    fn collection_mut(snapshot: &mut CatalogSnapshot) -> &mut Vec<Self> {
        &mut snapshot.student_cards
    }
}

impl CatalogEntity for ProfessorCard {
    fn collection(snapshot: &CatalogSnapshot) -> &Vec<Self> {
        &snapshot.professor_cards
    }

    fn collection_mut(snapshot: &mut CatalogSnapshot) -> &mut Vec<Self> {
        &mut snapshot.professor_cards
    }
}

impl CatalogEntity for LibraryEmployee {
    fn collection(snapshot: &CatalogSnapshot) -> &Vec<Self> {
        &snapshot.library_employees
    }

    fn collection_mut(snapshot: &mut CatalogSnapshot) -> &mut Vec<Self> {
        &mut snapshot.library_employees
    }
}

impl CatalogEntity for BookIssue {
    fn collection(snapshot: &CatalogSnapshot) -> &Vec<Self> {
        &snapshot.book_issues
    }

    fn collection_mut(snapshot: &mut CatalogSnapshot) -> &mut Vec<Self> {
        &mut snapshot.book_issues
    }
}
