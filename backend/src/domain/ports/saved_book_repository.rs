//! Driven port for saved book persistence.
//!
//! Every read and delete is scoped by owner. Adapters must enforce the
//! `(owner, external_id)` uniqueness atomically at write time and report a
//! violation as [`SavedBookRepositoryError::Duplicate`].

use async_trait::async_trait;

use crate::domain::{ExternalBookId, SavedBook, SavedBookId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by saved book repository adapters.
    pub enum SavedBookRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "saved book repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "saved book repository query failed: {message}",
        /// The owner already saved this catalog entry.
        Duplicate => "book already saved by this owner",
    }
}

/// Collection store for saved books.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedBookRepository: Send + Sync {
    /// Find the owner's record for a catalog entry.
    async fn find_by_owner_and_external_id(
        &self,
        owner: &UserId,
        external_id: &ExternalBookId,
    ) -> Result<Option<SavedBook>, SavedBookRepositoryError>;

    /// Insert a record atomically, returning it as stored.
    async fn insert(&self, book: &SavedBook) -> Result<SavedBook, SavedBookRepositoryError>;

    /// List the owner's records, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<SavedBook>, SavedBookRepositoryError>;

    /// Delete a record only when both id and owner match.
    ///
    /// Returns `None` for an unknown id and for another owner's record alike.
    async fn delete_by_id_and_owner(
        &self,
        id: &SavedBookId,
        owner: &UserId,
    ) -> Result<Option<SavedBook>, SavedBookRepositoryError>;
}
