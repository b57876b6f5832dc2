//! Driven port for the external book catalog.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{BookDetail, ExternalBookId, SearchPage, SearchQuery};

use super::define_port_error;

define_port_error! {
    /// Failures raised while talking to the external catalog.
    pub enum BookCatalogSourceError {
        /// The request could not be sent or the response not read.
        Transport { message: String } => "catalog transport failed: {message}",
        /// The request timed out.
        Timeout { message: String } => "catalog request timed out: {message}",
        /// The catalog answered with a non-success status.
        Status { status: u16, message: String } => "catalog returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "catalog response could not be decoded: {message}",
    }
}

/// Catalog gateway: searches works and fetches normalised work details.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookCatalogSource: Send + Sync {
    /// Search the catalog, truncating hits to `page.limit()`.
    async fn search(
        &self,
        query: &SearchQuery,
        page: PageRequest,
    ) -> Result<SearchPage, BookCatalogSourceError>;

    /// Fetch one work and resolve its authors.
    ///
    /// Individual author lookups that fail are dropped from the result rather
    /// than failing the call.
    async fn work_details(&self, id: &ExternalBookId) -> Result<BookDetail, BookCatalogSourceError>;
}
