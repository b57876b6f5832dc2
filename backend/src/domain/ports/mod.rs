//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`AccountCommand`, `BearerAuthenticator`,
//! `SavedBooksCommand`, `SavedBooksQuery`, `BookCatalogQuery`) are called by
//! inbound adapters. Driven ports (`UserRepository`, `SavedBookRepository`,
//! `BookCatalogSource`, `TokenService`, `PasswordHasher`) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod book_catalog_query;
mod book_catalog_source;
mod password_hasher;
mod saved_book_repository;
mod saved_books_command;
mod saved_books_query;
mod token_service;
mod user_repository;

pub use account_command::{AccountCommand, BearerAuthenticator};
#[cfg(test)]
pub use account_command::{MockAccountCommand, MockBearerAuthenticator};
pub use book_catalog_query::BookCatalogQuery;
#[cfg(test)]
pub use book_catalog_query::MockBookCatalogQuery;
#[cfg(test)]
pub use book_catalog_source::MockBookCatalogSource;
pub use book_catalog_source::{BookCatalogSource, BookCatalogSourceError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use saved_book_repository::MockSavedBookRepository;
pub use saved_book_repository::{SavedBookRepository, SavedBookRepositoryError};
#[cfg(test)]
pub use saved_books_command::MockSavedBooksCommand;
pub use saved_books_command::{SaveOutcome, SavedBooksCommand};
#[cfg(test)]
pub use saved_books_query::MockSavedBooksQuery;
pub use saved_books_query::SavedBooksQuery;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenService, TokenServiceError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
