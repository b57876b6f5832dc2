//! PostgreSQL-backed `SavedBookRepository` implementation using Diesel ORM.
//!
//! Uniqueness of `(owner_id, external_id)` is enforced by a table constraint,
//! so a concurrent insert surfaces as a unique violation rather than a second
//! row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SavedBookRepository, SavedBookRepositoryError};
use crate::domain::{ExternalBookId, SavedBook, SavedBookDraft, SavedBookId, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::SavedBookRow;
use super::pool::{DbPool, PoolError};
use super::schema::saved_books;

/// Diesel-backed implementation of the `SavedBookRepository` port.
#[derive(Clone)]
pub struct DieselSavedBookRepository {
    pool: DbPool,
}

impl DieselSavedBookRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SavedBookRepositoryError {
    map_basic_pool_error(error, SavedBookRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SavedBookRepositoryError {
    if is_unique_violation(&error) {
        return SavedBookRepositoryError::duplicate();
    }
    map_basic_diesel_error(
        error,
        SavedBookRepositoryError::query,
        SavedBookRepositoryError::connection,
    )
}

fn book_to_row(book: &SavedBook) -> SavedBookRow {
    SavedBookRow {
        id: *book.id().as_uuid(),
        owner_id: *book.owner().as_uuid(),
        external_id: book.external_id().as_ref().to_owned(),
        title: book.title().to_owned(),
        authors: book.authors().to_vec(),
        publish_year: book.publish_year().to_owned(),
        isbns: book.isbns().to_vec(),
        cover_url: book.cover_url().map(str::to_owned),
        description: book.description().to_owned(),
        subjects: book.subjects().to_vec(),
        created_at: book.created_at(),
        updated_at: book.updated_at(),
    }
}

fn row_to_book(row: SavedBookRow) -> Result<SavedBook, SavedBookRepositoryError> {
    let external_id = ExternalBookId::new(&row.external_id).map_err(|err| {
        SavedBookRepositoryError::query(format!("invalid stored external id: {err}"))
    })?;
    SavedBook::new(SavedBookDraft {
        id: SavedBookId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        external_id,
        title: row.title,
        authors: row.authors,
        publish_year: row.publish_year,
        isbns: row.isbns,
        cover_url: row.cover_url,
        description: row.description,
        subjects: row.subjects,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| SavedBookRepositoryError::query(format!("invalid stored book: {err}")))
}

#[async_trait]
impl SavedBookRepository for DieselSavedBookRepository {
    async fn find_by_owner_and_external_id(
        &self,
        owner: &UserId,
        external_id: &ExternalBookId,
    ) -> Result<Option<SavedBook>, SavedBookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SavedBookRow> = saved_books::table
            .filter(
                saved_books::owner_id
                    .eq(owner.as_uuid())
                    .and(saved_books::external_id.eq(external_id.as_ref())),
            )
            .select(SavedBookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_book).transpose()
    }

    async fn insert(&self, book: &SavedBook) -> Result<SavedBook, SavedBookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: SavedBookRow = diesel::insert_into(saved_books::table)
            .values(book_to_row(book))
            .returning(SavedBookRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_book(row)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<SavedBook>, SavedBookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SavedBookRow> = saved_books::table
            .filter(saved_books::owner_id.eq(owner.as_uuid()))
            .order((saved_books::created_at.desc(), saved_books::id.desc()))
            .select(SavedBookRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_book).collect()
    }

    async fn delete_by_id_and_owner(
        &self,
        id: &SavedBookId,
        owner: &UserId,
    ) -> Result<Option<SavedBook>, SavedBookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SavedBookRow> = diesel::delete(
            saved_books::table.filter(
                saved_books::id
                    .eq(id.as_uuid())
                    .and(saved_books::owner_id.eq(owner.as_uuid())),
            ),
        )
        .returning(SavedBookRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_book).transpose()
    }
}
