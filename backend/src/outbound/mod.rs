//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: process-local repositories for running without a database
//! - **open_library**: Open Library catalog gateway over reqwest
//! - **security**: JWT bearer tokens and Argon2 password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod open_library;
pub mod persistence;
pub mod security;
