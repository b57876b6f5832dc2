//! Tests for the saved book services.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockBookCatalogSource, MockSavedBookRepository};
use crate::domain::{BookAuthor, BookDetail, ErrorCode};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn external_id() -> ExternalBookId {
    ExternalBookId::new("OL1234W").expect("valid id")
}

fn service(
    books: MockSavedBookRepository,
    catalog: MockBookCatalogSource,
    now: DateTime<Utc>,
) -> SavedBooksCommandService<MockSavedBookRepository, MockBookCatalogSource> {
    SavedBooksCommandService::new(
        Arc::new(books),
        Arc::new(catalog),
        Arc::new(FixtureClock { utc_now: now }),
    )
}

fn detail() -> BookDetail {
    BookDetail {
        key: "/works/OL1234W".to_owned(),
        title: Some("The Hobbit".to_owned()),
        authors: vec![BookAuthor {
            name: "J. R. R. Tolkien".to_owned(),
            key: "/authors/OL26320A".to_owned(),
        }],
        cover_urls: vec!["https://covers.example/b/id/7-L.jpg".to_owned()],
        ..BookDetail::default()
    }
}

fn saved(owner: &UserId, external_id: &ExternalBookId, now: DateTime<Utc>) -> SavedBook {
    SavedBook::from_catalog(
        SavedBookId::random(),
        owner.clone(),
        external_id.clone(),
        detail(),
        now,
    )
}

#[rstest]
#[tokio::test]
async fn save_hydrates_from_catalog_and_persists_once(
    external_id: ExternalBookId,
    now: DateTime<Utc>,
) {
    let owner = UserId::random();
    let mut books = MockSavedBookRepository::new();
    books
        .expect_find_by_owner_and_external_id()
        .times(1)
        .return_once(|_, _| Ok(None));
    let expected_owner = owner.clone();
    books
        .expect_insert()
        .times(1)
        .withf(move |book| {
            book.owner() == &expected_owner
                && book.title() == "The Hobbit"
                && book.authors() == ["J. R. R. Tolkien"]
                && book.cover_url() == Some("https://covers.example/b/id/7-L.jpg")
                && book.created_at() == now
                && book.updated_at() == now
        })
        .returning(|book| Ok(book.clone()));
    let mut catalog = MockBookCatalogSource::new();
    catalog
        .expect_work_details()
        .with(eq(external_id.clone()))
        .times(1)
        .return_once(|_| Ok(detail()));

    let outcome = service(books, catalog, now)
        .save(owner, external_id)
        .await
        .expect("save succeeds");

    assert!(matches!(outcome, SaveOutcome::Saved(_)));
    assert_eq!(outcome.book().publish_year(), crate::domain::UNKNOWN_YEAR);
}

#[rstest]
#[tokio::test]
async fn save_returns_existing_record_without_catalog_call(
    external_id: ExternalBookId,
    now: DateTime<Utc>,
) {
    let owner = UserId::random();
    let existing = saved(&owner, &external_id, now);
    let existing_id = existing.id();
    let mut books = MockSavedBookRepository::new();
    books
        .expect_find_by_owner_and_external_id()
        .times(1)
        .return_once(move |_, _| Ok(Some(existing)));
    books.expect_insert().times(0);
    let mut catalog = MockBookCatalogSource::new();
    catalog.expect_work_details().times(0);

    let outcome = service(books, catalog, now)
        .save(owner, external_id)
        .await
        .expect("duplicate is not an error");

    match outcome {
        SaveOutcome::AlreadySaved(book) => assert_eq!(book.id(), existing_id),
        SaveOutcome::Saved(_) => panic!("expected duplicate outcome"),
    }
}

#[rstest]
#[tokio::test]
async fn save_maps_lost_insert_race_to_duplicate(external_id: ExternalBookId, now: DateTime<Utc>) {
    let owner = UserId::random();
    let winner = saved(&owner, &external_id, now);
    let winner_id = winner.id();
    let mut books = MockSavedBookRepository::new();
    let mut lookups = mockall::Sequence::new();
    books
        .expect_find_by_owner_and_external_id()
        .times(1)
        .in_sequence(&mut lookups)
        .return_once(|_, _| Ok(None));
    books
        .expect_insert()
        .times(1)
        .return_once(|_| Err(SavedBookRepositoryError::duplicate()));
    books
        .expect_find_by_owner_and_external_id()
        .times(1)
        .in_sequence(&mut lookups)
        .return_once(move |_, _| Ok(Some(winner)));
    let mut catalog = MockBookCatalogSource::new();
    catalog
        .expect_work_details()
        .times(1)
        .return_once(|_| Ok(detail()));

    let outcome = service(books, catalog, now)
        .save(owner, external_id)
        .await
        .expect("race resolves to duplicate");

    match outcome {
        SaveOutcome::AlreadySaved(book) => assert_eq!(book.id(), winner_id),
        SaveOutcome::Saved(_) => panic!("expected duplicate outcome"),
    }
}

#[rstest]
#[case(BookCatalogSourceError::timeout("deadline elapsed"))]
#[case(BookCatalogSourceError::status(404_u16, "not found"))]
#[case(BookCatalogSourceError::decode("unexpected body"))]
#[tokio::test]
async fn save_reports_catalog_failure_without_writing(
    #[case] failure: BookCatalogSourceError,
    external_id: ExternalBookId,
    now: DateTime<Utc>,
) {
    let mut books = MockSavedBookRepository::new();
    books
        .expect_find_by_owner_and_external_id()
        .return_once(|_, _| Ok(None));
    books.expect_insert().times(0);
    let mut catalog = MockBookCatalogSource::new();
    catalog
        .expect_work_details()
        .times(1)
        .return_once(move |_| Err(failure));

    let err = service(books, catalog, now)
        .save(UserId::random(), external_id)
        .await
        .expect_err("catalog failure surfaces");

    assert_eq!(err.code(), ErrorCode::UpstreamError);
    assert_eq!(err.message(), UPSTREAM_FAILURE);
}

#[rstest]
#[tokio::test]
async fn save_maps_store_outage_to_service_unavailable(
    external_id: ExternalBookId,
    now: DateTime<Utc>,
) {
    let mut books = MockSavedBookRepository::new();
    books
        .expect_find_by_owner_and_external_id()
        .return_once(|_, _| Err(SavedBookRepositoryError::connection("refused")));
    let catalog = MockBookCatalogSource::new();

    let err = service(books, catalog, now)
        .save(UserId::random(), external_id)
        .await
        .expect_err("outage surfaces");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn delete_returns_removed_record(external_id: ExternalBookId, now: DateTime<Utc>) {
    let owner = UserId::random();
    let book = saved(&owner, &external_id, now);
    let id = book.id();
    let mut books = MockSavedBookRepository::new();
    books
        .expect_delete_by_id_and_owner()
        .with(eq(id), eq(owner.clone()))
        .times(1)
        .return_once(move |_, _| Ok(Some(book)));

    let removed = service(books, MockBookCatalogSource::new(), now)
        .delete(owner, id)
        .await
        .expect("delete succeeds");

    assert_eq!(removed.id(), id);
}

#[rstest]
#[tokio::test]
async fn delete_of_foreign_or_missing_record_is_not_found(now: DateTime<Utc>) {
    let mut books = MockSavedBookRepository::new();
    books
        .expect_delete_by_id_and_owner()
        .times(1)
        .return_once(|_, _| Ok(None));

    let err = service(books, MockBookCatalogSource::new(), now)
        .delete(UserId::random(), SavedBookId::random())
        .await
        .expect_err("nothing removed");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_returns_store_order(external_id: ExternalBookId, now: DateTime<Utc>) {
    let owner = UserId::random();
    let newer = saved(&owner, &external_id, now);
    let older = saved(
        &owner,
        &ExternalBookId::new("OL99W").expect("valid id"),
        now - chrono::Duration::minutes(5),
    );
    let expected = vec![newer.id(), older.id()];
    let mut books = MockSavedBookRepository::new();
    books
        .expect_list_by_owner()
        .with(eq(owner.clone()))
        .times(1)
        .return_once(move |_| Ok(vec![newer, older]));

    let listed = SavedBooksQueryService::new(Arc::new(books))
        .list(owner)
        .await
        .expect("list succeeds");

    let ids: Vec<_> = listed.iter().map(SavedBook::id).collect();
    assert_eq!(ids, expected);
}
