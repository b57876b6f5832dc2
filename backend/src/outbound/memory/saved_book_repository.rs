//! In-memory `SavedBookRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{SavedBookRepository, SavedBookRepositoryError};
use crate::domain::{ExternalBookId, SavedBook, SavedBookId, UserId};

use super::lock;

/// Saved books keyed by record id.
#[derive(Debug, Default)]
pub struct InMemorySavedBookRepository {
    books: Mutex<HashMap<SavedBookId, SavedBook>>,
}

impl InMemorySavedBookRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SavedBookRepository for InMemorySavedBookRepository {
    async fn find_by_owner_and_external_id(
        &self,
        owner: &UserId,
        external_id: &ExternalBookId,
    ) -> Result<Option<SavedBook>, SavedBookRepositoryError> {
        Ok(lock(&self.books)
            .values()
            .find(|book| book.owner() == owner && book.external_id() == external_id)
            .cloned())
    }

    async fn insert(&self, book: &SavedBook) -> Result<SavedBook, SavedBookRepositoryError> {
        let mut books = lock(&self.books);
        let taken = books.values().any(|stored| {
            stored.owner() == book.owner() && stored.external_id() == book.external_id()
        });
        if taken || books.contains_key(&book.id()) {
            return Err(SavedBookRepositoryError::duplicate());
        }
        books.insert(book.id(), book.clone());
        Ok(book.clone())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<SavedBook>, SavedBookRepositoryError> {
        let mut owned: Vec<SavedBook> = lock(&self.books)
            .values()
            .filter(|book| book.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_uuid().cmp(a.id().as_uuid()))
        });
        Ok(owned)
    }

    async fn delete_by_id_and_owner(
        &self,
        id: &SavedBookId,
        owner: &UserId,
    ) -> Result<Option<SavedBook>, SavedBookRepositoryError> {
        let mut books = lock(&self.books);
        let owned = books.get(id).is_some_and(|book| book.owner() == owner);
        Ok(if owned { books.remove(id) } else { None })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::BookDetail;

    fn book(owner: &UserId, external_id: &str, age_minutes: i64) -> SavedBook {
        SavedBook::from_catalog(
            SavedBookId::random(),
            owner.clone(),
            ExternalBookId::new(external_id).expect("valid id"),
            BookDetail::default(),
            Utc::now() - Duration::minutes(age_minutes),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_second_record_for_same_pair() {
        let repo = InMemorySavedBookRepository::new();
        let owner = UserId::random();
        repo.insert(&book(&owner, "OL1W", 0)).await.expect("first insert");

        let err = repo
            .insert(&book(&owner, "OL1W", 0))
            .await
            .expect_err("duplicate pair");
        assert_eq!(err, SavedBookRepositoryError::Duplicate);

        repo.insert(&book(&UserId::random(), "OL1W", 0))
            .await
            .expect("other owner may save the same work");
    }

    #[rstest]
    #[tokio::test]
    async fn lists_only_owner_records_newest_first() {
        let repo = InMemorySavedBookRepository::new();
        let owner = UserId::random();
        let older = book(&owner, "OL1W", 10);
        let newer = book(&owner, "OL2W", 1);
        for record in [&older, &newer, &book(&UserId::random(), "OL3W", 0)] {
            repo.insert(record).await.expect("insert");
        }

        let listed = repo.list_by_owner(&owner).await.expect("list");
        let ids: Vec<_> = listed.iter().map(SavedBook::id).collect();
        assert_eq!(ids, vec![newer.id(), older.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_requires_matching_owner() {
        let repo = InMemorySavedBookRepository::new();
        let owner = UserId::random();
        let record = book(&owner, "OL1W", 0);
        repo.insert(&record).await.expect("insert");

        let foreign = repo
            .delete_by_id_and_owner(&record.id(), &UserId::random())
            .await
            .expect("delete");
        assert!(foreign.is_none());

        let removed = repo
            .delete_by_id_and_owner(&record.id(), &owner)
            .await
            .expect("delete");
        assert_eq!(removed.map(|book| book.id()), Some(record.id()));
        assert!(repo.list_by_owner(&owner).await.expect("list").is_empty());
    }
}
