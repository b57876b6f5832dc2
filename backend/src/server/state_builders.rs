//! Builders wiring driven adapters into the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::warn;

use bookshelf::domain::ports::{
    BookCatalogSource, PasswordHasher, SavedBookRepository, TokenService, UserRepository,
};
use bookshelf::domain::{
    AccountCommandService, BookCatalogQueryService, SavedBooksCommandService,
    SavedBooksQueryService,
};
use bookshelf::inbound::http::state::{HttpState, HttpStatePorts};
use bookshelf::outbound::memory::{InMemorySavedBookRepository, InMemoryUserRepository};
use bookshelf::outbound::persistence::{DbPool, DieselSavedBookRepository, DieselUserRepository};
use bookshelf::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::ServerConfig;

/// Credential and collection stores picked for this process.
struct Stores {
    users: Arc<dyn UserRepository>,
    saved_books: Arc<dyn SavedBookRepository>,
}

fn build_stores(db_pool: Option<&DbPool>) -> Stores {
    match db_pool {
        Some(pool) => Stores {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            saved_books: Arc::new(DieselSavedBookRepository::new(pool.clone())),
        },
        None => {
            warn!("no database configured; accounts and saved books live in memory only");
            Stores {
                users: Arc::new(InMemoryUserRepository::new()),
                saved_books: Arc::new(InMemorySavedBookRepository::new()),
            }
        }
    }
}

/// Driven adapters the domain services are built from.
struct DrivenPorts {
    stores: Stores,
    catalog: Arc<dyn BookCatalogSource>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

fn build_ports(driven: DrivenPorts) -> HttpStatePorts {
    let DrivenPorts {
        stores,
        catalog,
        hasher,
        tokens,
        clock,
    } = driven;
    let accounts = Arc::new(AccountCommandService::new(stores.users, hasher, tokens));
    HttpStatePorts {
        accounts: accounts.clone(),
        authenticator: accounts,
        catalog: Arc::new(BookCatalogQueryService::new(catalog.clone())),
        saved_books: Arc::new(SavedBooksCommandService::new(
            stores.saved_books.clone(),
            catalog,
            clock,
        )),
        saved_books_query: Arc::new(SavedBooksQueryService::new(stores.saved_books)),
    }
}

/// Build HTTP state from the server configuration.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the password hasher cannot be initialised.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher = Argon2PasswordHasher::new()
        .map_err(|err| std::io::Error::other(format!("password hasher setup failed: {err}")))?;
    let driven = DrivenPorts {
        stores: build_stores(config.db_pool.as_ref()),
        catalog: config.catalog.clone(),
        hasher: Arc::new(hasher),
        tokens: Arc::new(JwtTokenService::new(&config.jwt_secret, clock.clone())),
        clock,
    };
    Ok(HttpState::new(build_ports(driven)))
}
