//! Driving port for collection reads.

use async_trait::async_trait;

use crate::domain::{Error, SavedBook, UserId};

/// Read access to an owner's collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedBooksQuery: Send + Sync {
    /// Every record the owner has saved, newest first. Empty is not an error.
    async fn list(&self, owner: UserId) -> Result<Vec<SavedBook>, Error>;
}
