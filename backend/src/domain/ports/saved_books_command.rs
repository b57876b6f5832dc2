//! Driving port for collection mutations.

use async_trait::async_trait;

use crate::domain::{Error, ExternalBookId, SavedBook, SavedBookId, UserId};

/// Result of a save request.
///
/// Saving an entry the owner already has is not an error: the existing record
/// comes back so callers can present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new record was written.
    Saved(SavedBook),
    /// The owner already had this entry; nothing was written.
    AlreadySaved(SavedBook),
}

impl SaveOutcome {
    /// The record either way.
    pub fn book(&self) -> &SavedBook {
        match self {
            Self::Saved(book) | Self::AlreadySaved(book) => book,
        }
    }
}

/// Save and delete operations on an owner's collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedBooksCommand: Send + Sync {
    /// Save a catalog entry to the owner's collection, hydrating it from the
    /// catalog.
    async fn save(&self, owner: UserId, external_id: ExternalBookId) -> Result<SaveOutcome, Error>;

    /// Delete one of the owner's records and return it.
    ///
    /// Another owner's record fails exactly like a missing one.
    async fn delete(&self, owner: UserId, id: SavedBookId) -> Result<SavedBook, Error>;
}
