//! Driving port for catalog search and work details.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{BookDetail, Error, ExternalBookId, SearchQuery, SearchResults};

/// Catalog reads exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookCatalogQuery: Send + Sync {
    /// Search the catalog and report pagination.
    async fn search(&self, query: SearchQuery, page: PageRequest) -> Result<SearchResults, Error>;

    /// Fetch one work's normalised details.
    async fn details(&self, id: ExternalBookId) -> Result<BookDetail, Error>;
}
