//! Driven port for account persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail => "a user with this email already exists",
    }
}

/// Credential store: looks accounts up by email and creates new ones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the account registered under `email`.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserRepositoryError>;

    /// Persist a new account.
    ///
    /// Fails with [`UserRepositoryError::DuplicateEmail`] when the email is
    /// taken; the existing account is left untouched.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;
}
