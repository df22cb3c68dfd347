mod common;

use chrono::NaiveDate;
use common::{int, text, RecordingAccess};
use library_core::db::Value;
use library_core::{
    Author, Book, BookIssue, Catalog, CatalogError, CatalogSnapshot, DbConfig, EntityKind,
    LibraryEmployee, ProfessorCard, Publisher, RepoError, SqliteDataAccess, Student,
};
use std::sync::Arc;

fn seeded_access() -> RecordingAccess {
    let access = RecordingAccess::new();
    access.set_rows(
        "Authors",
        vec![vec![int(1), text("Doe"), text("Jane")]],
    );
    access.set_rows(
        "Students",
        vec![
            vec![int(4), text("Lia"), text("Park")],
            vec![int(5), text("Max"), text("Moss")],
        ],
    );
    access.set_rows(
        "Books",
        vec![vec![
            int(2),
            text("Dune"),
            int(1965),
            Value::Null,
            int(1),
            Value::Null,
        ]],
    );
    access
}

#[tokio::test]
async fn full_refresh_replaces_every_collection() {
    let access = Arc::new(seeded_access());
    let mut catalog = Catalog::new(access.clone());

    catalog.full_refresh().await.unwrap();

    assert_eq!(
        catalog.list::<Author>(),
        &[Author {
            id: Some(1),
            ..Author::new("Jane", "Doe")
        }]
    );
    assert_eq!(catalog.count(EntityKind::Student), 2);
    assert_eq!(catalog.list::<Student>()[1].last_name, "Moss");
    assert_eq!(catalog.list::<Book>()[0].publication_year, Some(1965));
    assert_eq!(catalog.list::<Book>()[0].available_copies, None);
    assert_eq!(catalog.count(EntityKind::BookIssue), 0);
    assert!(access.executed().is_empty());
}

#[tokio::test]
async fn failing_students_fetch_leaves_every_collection_unchanged() {
    let access = Arc::new(seeded_access());
    access.fail_reads_of("Students");

    let before = CatalogSnapshot {
        publishers: vec![Publisher::new("Ace", "New York")],
        students: vec![Student::new("Old", "Entry")],
        ..CatalogSnapshot::default()
    };
    let mut catalog = Catalog::from_snapshot(access.clone(), before.clone());

    let err = catalog.full_refresh().await.unwrap_err();

    match err {
        CatalogError::Refresh { kind, source } => {
            assert_eq!(kind, EntityKind::Student);
            assert!(matches!(source, RepoError::Db(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(catalog.snapshot(), &before);
}

#[tokio::test]
async fn first_failing_kind_is_reported_in_presentation_order() {
    let access = Arc::new(RecordingAccess::new());
    access.fail_reads_of("BookIssues");
    access.fail_reads_of("Publishers");
    let mut catalog = Catalog::new(access);

    let err = catalog.full_refresh().await.unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Refresh {
            kind: EntityKind::Publisher,
            ..
        }
    ));
}

#[tokio::test]
async fn undecodable_row_fails_the_whole_refresh() {
    let access = Arc::new(RecordingAccess::new());
    access.set_rows(
        "LibraryStaff",
        vec![
            vec![int(1), text("Ann"), text("Lee"), Value::Null],
            vec![int(2), text("Bo"), int(7), Value::Null],
        ],
    );
    let mut catalog = Catalog::new(access);

    let err = catalog.full_refresh().await.unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Refresh {
            kind: EntityKind::LibraryEmployee,
            source: RepoError::Decode(_)
        }
    ));
    assert!(catalog.list::<LibraryEmployee>().is_empty());
}

#[tokio::test]
async fn successful_refresh_clears_divergence_flags() {
    let access = Arc::new(seeded_access());
    let mut catalog = Catalog::new(access.clone());

    access.fail_writes(true);
    assert!(catalog.add(Author::new("Lost", "Write")).is_err());
    assert!(catalog.is_diverged(EntityKind::Author));

    catalog.full_refresh().await.unwrap();

    assert!(catalog.diverged_kinds().is_empty());
    assert_eq!(catalog.count(EntityKind::Author), 1);
}

#[tokio::test]
async fn record_lost_by_failed_delete_returns_on_refresh() {
    let access = Arc::new(seeded_access());
    let mut catalog = Catalog::load(access.clone()).await.unwrap();

    access.fail_writes(true);
    let err = catalog.delete_at::<Author>(0).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Diverged {
            kind: EntityKind::Author,
            ..
        }
    ));
    assert!(catalog.list::<Author>().is_empty());

    access.fail_writes(false);
    catalog.full_refresh().await.unwrap();

    assert_eq!(catalog.list::<Author>()[0].id, Some(1));
    assert!(!catalog.is_diverged(EntityKind::Author));
}

#[tokio::test]
async fn records_round_trip_through_sqlite_with_assigned_identifiers() {
    let dir = tempfile::tempdir().unwrap();
    let access = SqliteDataAccess::open(DbConfig::new(dir.path().join("library.db"))).unwrap();
    let mut catalog = Catalog::load(Arc::new(access)).await.unwrap();
    assert_eq!(catalog.snapshot().total_len(), 0);

    let issued = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
    let expires = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let card = ProfessorCard::new(9, issued, expires);
    let author = Author::new("Jane", "Doe");
    let issue = BookIssue {
        id: None,
        book_id: Some(1),
        professor_card_id: Some(1),
        student_card_id: None,
        issued_by_id: 2,
        issued_date: issued,
        return_date: NaiveDate::from_ymd_opt(2023, 2, 14).unwrap(),
    };

    catalog.add(author.clone()).unwrap();
    catalog.add(card.clone()).unwrap();
    catalog.add(issue.clone()).unwrap();
    assert_eq!(catalog.list::<Author>()[0].id, None);

    catalog.full_refresh().await.unwrap();

    let stored_author = &catalog.list::<Author>()[0];
    assert_eq!(stored_author.id, Some(1));
    assert_eq!(
        Author {
            id: None,
            ..stored_author.clone()
        },
        author
    );

    let stored_card = &catalog.list::<ProfessorCard>()[0];
    assert_eq!(stored_card.id, Some(1));
    assert_eq!(
        ProfessorCard {
            id: None,
            ..stored_card.clone()
        },
        card
    );

    let stored_issue = &catalog.list::<BookIssue>()[0];
    assert_eq!(stored_issue.id, Some(1));
    assert_eq!(
        BookIssue {
            id: None,
            ..stored_issue.clone()
        },
        issue
    );
}

#[tokio::test]
async fn edit_and_delete_reach_sqlite_rows() {
    let dir = tempfile::tempdir().unwrap();
    let access = SqliteDataAccess::open(DbConfig::new(dir.path().join("library.db"))).unwrap();
    let mut catalog = Catalog::load(Arc::new(access)).await.unwrap();

    catalog
        .add_from_input(EntityKind::Publisher, &["Ace", "New York"])
        .unwrap();
    catalog
        .add_from_input(EntityKind::Publisher, &["Tor", "Boston"])
        .unwrap();
    catalog.full_refresh().await.unwrap();

    catalog
        .edit_from_input(EntityKind::Publisher, 1, &["Tor Books", "New York"])
        .unwrap();
    catalog.delete_row(EntityKind::Publisher, 0).unwrap();
    catalog.full_refresh().await.unwrap();

    let publishers = catalog.list::<Publisher>();
    assert_eq!(publishers.len(), 1);
    assert_eq!(publishers[0].id, Some(2));
    assert_eq!(publishers[0].name, "Tor Books");
    assert_eq!(publishers[0].address, "New York");
}

struct KindCase {
    kind: EntityKind,
    first: &'static [&'static str],
    second: &'static [&'static str],
    edited: &'static [&'static str],
    edited_title: &'static str,
}

const KIND_CASES: [KindCase; 9] = [
    KindCase {
        kind: EntityKind::Author,
        first: &["Jane", "Doe"],
        second: &["John", "Roe"],
        edited: &["Janet", "Roe"],
        edited_title: "Janet Roe",
    },
    KindCase {
        kind: EntityKind::Publisher,
        first: &["Ace", "New York"],
        second: &["Tor", "Boston"],
        edited: &["Tor Books", "New York"],
        edited_title: "Tor Books, New York",
    },
    KindCase {
        kind: EntityKind::Book,
        first: &["Dune", "1965", "3", "1", "1"],
        second: &["Emma", "1815", "", "", ""],
        edited: &["Emma (annotated)", "1816", "4", "2", "3"],
        edited_title: "Emma (annotated)",
    },
    KindCase {
        kind: EntityKind::Student,
        first: &["Lia", "Park"],
        second: &["Max", "Moss"],
        edited: &["Maxine", "Moss"],
        edited_title: "Maxine Moss",
    },
    KindCase {
        kind: EntityKind::Professor,
        first: &["Ada", "Byron"],
        second: &["Alan", "Turing"],
        edited: &["Alan M.", "Turing"],
        edited_title: "Alan M. Turing",
    },
    KindCase {
        kind: EntityKind::StudentCard,
        first: &["1", "2023-09-01", "2024-08-31"],
        second: &["2", "2023-09-02", "2024-09-01"],
        edited: &["5", "2023-10-01", "2024-10-01"],
        edited_title: "Issue date: 2023-10-01, expiration date: 2024-10-01",
    },
    KindCase {
        kind: EntityKind::ProfessorCard,
        first: &["1", "2022-01-10", "2027-01-10"],
        second: &["2", "2022-02-10", "2027-02-10"],
        edited: &["4", "2022-03-10", "2028-03-10"],
        edited_title: "Issue date: 2022-03-10, expiration date: 2028-03-10",
    },
    KindCase {
        kind: EntityKind::LibraryEmployee,
        first: &["Ann", "Lee", "C-1"],
        second: &["Bo", "Moss", ""],
        edited: &["Bo", "Moss", "C-9"],
        edited_title: "Bo Moss",
    },
    KindCase {
        kind: EntityKind::BookIssue,
        first: &["1", "1", "", "1", "2023-10-01", "2023-10-15"],
        second: &["2", "", "1", "1", "2023-10-02", "2023-10-16"],
        edited: &["2", "", "2", "3", "2023-10-02", "2023-10-30"],
        edited_title: "Book ID: 2, issue date: 2023-10-02, return date: 2023-10-30",
    },
];

#[tokio::test]
async fn edit_and_delete_persist_for_every_kind() {
    let dir = tempfile::tempdir().unwrap();
    let access = SqliteDataAccess::open(DbConfig::new(dir.path().join("library.db"))).unwrap();
    let mut catalog = Catalog::load(Arc::new(access)).await.unwrap();

    for case in &KIND_CASES {
        catalog.add_from_input(case.kind, case.first).unwrap();
        catalog.add_from_input(case.kind, case.second).unwrap();
    }
    catalog.full_refresh().await.unwrap();

    for case in &KIND_CASES {
        assert_eq!(catalog.count(case.kind), 2, "{}", case.kind);
        catalog.edit_from_input(case.kind, 1, case.edited).unwrap();
        catalog.delete_row(case.kind, 0).unwrap();
    }
    assert!(catalog.diverged_kinds().is_empty());
    let expected = catalog.snapshot().clone();

    catalog.full_refresh().await.unwrap();

    assert_eq!(catalog.snapshot(), &expected);
    for case in &KIND_CASES {
        let rows = catalog.row_summaries(case.kind);
        assert_eq!(rows.len(), 1, "{}", case.kind);
        assert_eq!(rows[0].title, case.edited_title, "{}", case.kind);
    }
    assert_eq!(catalog.list::<LibraryEmployee>()[0].id, Some(2));
    assert_eq!(
        catalog.list::<LibraryEmployee>()[0].library_card_number.as_deref(),
        Some("C-9")
    );
    assert_eq!(catalog.list::<BookIssue>()[0].student_card_id, None);
    assert_eq!(catalog.list::<BookIssue>()[0].professor_card_id, Some(2));
    assert_eq!(catalog.list::<Book>()[0].publisher_id, Some(3));
}
