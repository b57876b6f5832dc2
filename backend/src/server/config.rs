//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use bookshelf::domain::ports::BookCatalogSource;
use bookshelf::outbound::persistence::DbPool;
use bookshelf::outbound::security::JwtSecret;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: JwtSecret,
    pub(crate) catalog: Arc<dyn BookCatalogSource>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration backed by in-memory stores.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        jwt_secret: JwtSecret,
        catalog: Arc<dyn BookCatalogSource>,
    ) -> Self {
        Self {
            bind_addr,
            jwt_secret,
            catalog,
            db_pool: None,
        }
    }

    /// Attach a database connection pool; the credential and collection
    /// stores then use PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
