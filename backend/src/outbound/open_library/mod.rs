//! Open Library outbound adapter.
//!
//! Implements the `BookCatalogSource` port over the public Open Library
//! JSON API.

mod dto;
mod http_source;

pub use http_source::{OpenLibraryEndpoints, OpenLibrarySource};
