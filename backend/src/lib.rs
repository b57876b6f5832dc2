//! Bookshelf backend library.
//!
//! Accounts with bearer tokens, Open Library search and per-user saved book
//! collections, laid out as domain ports and services with inbound HTTP and
//! outbound persistence and catalog adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
