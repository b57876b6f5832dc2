//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, BearerAuthenticator, BookCatalogQuery, SavedBooksCommand, SavedBooksQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Registration and login.
    pub accounts: Arc<dyn AccountCommand>,
    /// Bearer token verification used by the request gate.
    pub authenticator: Arc<dyn BearerAuthenticator>,
    /// Catalog search and work details.
    pub catalog: Arc<dyn BookCatalogQuery>,
    /// Save and delete on an owner's collection.
    pub saved_books: Arc<dyn SavedBooksCommand>,
    /// Reads of an owner's collection.
    pub saved_books_query: Arc<dyn SavedBooksQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login.
    pub accounts: Arc<dyn AccountCommand>,
    /// Bearer token verification used by the request gate.
    pub authenticator: Arc<dyn BearerAuthenticator>,
    /// Catalog search and work details.
    pub catalog: Arc<dyn BookCatalogQuery>,
    /// Save and delete on an owner's collection.
    pub saved_books: Arc<dyn SavedBooksCommand>,
    /// Reads of an owner's collection.
    pub saved_books_query: Arc<dyn SavedBooksQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            authenticator,
            catalog,
            saved_books,
            saved_books_query,
        } = ports;
        Self {
            accounts,
            authenticator,
            catalog,
            saved_books,
            saved_books_query,
        }
    }
}
