//! Saved book domain services.
//!
//! The command service implements the save and delete flows, consulting the
//! catalog only to hydrate new records. The query service lists an owner's
//! records.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{
    BookCatalogSource, BookCatalogSourceError, SaveOutcome, SavedBookRepository,
    SavedBookRepositoryError, SavedBooksCommand, SavedBooksQuery,
};
use crate::domain::{Error, ExternalBookId, SavedBook, SavedBookId, UserId};

/// Message surfaced for any catalog failure.
pub(crate) const UPSTREAM_FAILURE: &str = "upstream fetch failed";

pub(crate) fn map_repository_error(error: SavedBookRepositoryError) -> Error {
    match error {
        SavedBookRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("saved book repository unavailable: {message}"))
        }
        SavedBookRepositoryError::Query { message } => {
            Error::internal(format!("saved book repository error: {message}"))
        }
        SavedBookRepositoryError::Duplicate => {
            Error::internal("saved book repository reported an unexpected duplicate")
        }
    }
}

pub(crate) fn map_catalog_error(error: BookCatalogSourceError) -> Error {
    warn!(%error, "catalog request failed");
    Error::upstream(UPSTREAM_FAILURE)
}

fn not_found(id: SavedBookId) -> Error {
    Error::not_found(format!("saved book {id} not found or does not belong to you"))
}

/// Saved book service implementing [`SavedBooksCommand`].
pub struct SavedBooksCommandService<R: ?Sized, C: ?Sized> {
    books: Arc<R>,
    catalog: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized, C: ?Sized> SavedBooksCommandService<R, C> {
    /// Create the service from the collection store, catalog gateway and clock.
    pub fn new(books: Arc<R>, catalog: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            books,
            catalog,
            clock,
        }
    }
}

impl<R, C> SavedBooksCommandService<R, C>
where
    R: SavedBookRepository + ?Sized,
    C: BookCatalogSource + ?Sized,
{
    async fn existing(
        &self,
        owner: &UserId,
        external_id: &ExternalBookId,
    ) -> Result<Option<SavedBook>, Error> {
        self.books
            .find_by_owner_and_external_id(owner, external_id)
            .await
            .map_err(map_repository_error)
    }

    /// Re-read the winner after losing an insert race for the same pair.
    async fn resolve_duplicate(
        &self,
        owner: &UserId,
        external_id: &ExternalBookId,
    ) -> Result<SaveOutcome, Error> {
        debug!(%owner, %external_id, "insert lost race to concurrent save");
        self.existing(owner, external_id)
            .await?
            .map(SaveOutcome::AlreadySaved)
            .ok_or_else(|| Error::internal("duplicate reported but no record found"))
    }
}

#[async_trait]
impl<R, C> SavedBooksCommand for SavedBooksCommandService<R, C>
where
    R: SavedBookRepository + ?Sized,
    C: BookCatalogSource + ?Sized,
{
    async fn save(&self, owner: UserId, external_id: ExternalBookId) -> Result<SaveOutcome, Error> {
        if let Some(book) = self.existing(&owner, &external_id).await? {
            return Ok(SaveOutcome::AlreadySaved(book));
        }

        let detail = self
            .catalog
            .work_details(&external_id)
            .await
            .map_err(map_catalog_error)?;
        let book = SavedBook::from_catalog(
            SavedBookId::random(),
            owner.clone(),
            external_id.clone(),
            detail,
            self.clock.utc(),
        );

        match self.books.insert(&book).await {
            Ok(stored) => Ok(SaveOutcome::Saved(stored)),
            Err(SavedBookRepositoryError::Duplicate) => {
                self.resolve_duplicate(&owner, &external_id).await
            }
            Err(error) => Err(map_repository_error(error)),
        }
    }

    async fn delete(&self, owner: UserId, id: SavedBookId) -> Result<SavedBook, Error> {
        self.books
            .delete_by_id_and_owner(&id, &owner)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }
}

/// Saved book service implementing [`SavedBooksQuery`].
pub struct SavedBooksQueryService<R: ?Sized> {
    books: Arc<R>,
}

impl<R: ?Sized> SavedBooksQueryService<R> {
    /// Create the service from the collection store.
    pub fn new(books: Arc<R>) -> Self {
        Self { books }
    }
}

#[async_trait]
impl<R> SavedBooksQuery for SavedBooksQueryService<R>
where
    R: SavedBookRepository + ?Sized,
{
    async fn list(&self, owner: UserId) -> Result<Vec<SavedBook>, Error> {
        self.books
            .list_by_owner(&owner)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "saved_books_service_tests.rs"]
mod tests;
