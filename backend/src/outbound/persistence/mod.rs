//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows (`models.rs`, `schema.rs`) and
//! domain types; neither leaks past this module. Connections come from a
//! `bb8` pool through `diesel-async`, and every database failure is mapped to
//! the port's error enum.
//!
//! # Example
//!
//! ```no_run
//! use bookshelf::outbound::persistence::{DbPool, DieselSavedBookRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bookshelf")).await?;
//! let books = DieselSavedBookRepository::new(pool);
//! # let _ = books;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_saved_book_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_saved_book_repository::DieselSavedBookRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
