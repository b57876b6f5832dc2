//! Catalog query service.
//!
//! Wraps the catalog gateway for inbound adapters: attaches the pagination
//! envelope to search hits and collapses every gateway failure into one
//! stable upstream error.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Pagination};

use crate::domain::ports::{BookCatalogQuery, BookCatalogSource};
use crate::domain::saved_books_service::map_catalog_error;
use crate::domain::{BookDetail, Error, ExternalBookId, SearchQuery, SearchResults};

/// Catalog service implementing [`BookCatalogQuery`].
pub struct BookCatalogQueryService<C: ?Sized> {
    catalog: Arc<C>,
}

impl<C: ?Sized> BookCatalogQueryService<C> {
    /// Create the service from a catalog gateway.
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl<C> BookCatalogQuery for BookCatalogQueryService<C>
where
    C: BookCatalogSource + ?Sized,
{
    async fn search(&self, query: SearchQuery, page: PageRequest) -> Result<SearchResults, Error> {
        let found = self
            .catalog
            .search(&query, page)
            .await
            .map_err(map_catalog_error)?;
        Ok(SearchResults {
            books: found.items,
            pagination: Pagination::new(page, found.total),
        })
    }

    async fn details(&self, id: ExternalBookId) -> Result<BookDetail, Error> {
        self.catalog
            .work_details(&id)
            .await
            .map_err(map_catalog_error)
    }
}
