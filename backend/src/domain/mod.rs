//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed entities the HTTP and persistence
//! adapters exchange, the port traits they implement or drive, and the
//! services that orchestrate them. Nothing in here depends on actix, Diesel
//! or reqwest.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User and friends: account identity.
//! - SavedBook: a book in a user's collection.
//! - BookDetail / CatalogBook: normalised catalog records.
//! - Account, saved book and catalog services implementing the driving ports.

pub mod account_service;
pub mod auth;
pub mod book;
pub mod catalog;
pub mod catalog_service;
pub mod error;
pub mod ports;
pub mod saved_books_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountCommandService;
pub use self::auth::{
    AccessToken, AuthSession, CredentialsValidationError, LoginCredentials, Registration, TOKEN_TTL,
};
pub use self::book::{
    NO_DESCRIPTION, SavedBook, SavedBookDraft, SavedBookId, SavedBookValidationError,
    UNKNOWN_AUTHOR, UNKNOWN_YEAR, UNTITLED,
};
pub use self::catalog::{
    BookAuthor, BookDetail, BookLink, CatalogBook, CatalogValidationError, ExternalBookId,
    SearchPage, SearchQuery, SearchResults,
};
pub use self::catalog_service::BookCatalogQueryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::saved_books_service::{SavedBooksCommandService, SavedBooksQueryService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, PasswordHash, User, UserId, UserName, UserValidationError};
