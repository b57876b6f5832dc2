//! Driven port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Hashing failures.
    pub enum PasswordHasherError {
        /// The hasher could not derive or parse a digest.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Derives and checks password digests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Derive a salted digest of `password`.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Check `password` against `stored`.
    ///
    /// With no stored digest the check still runs against a decoy and returns
    /// `false`, so an unknown account costs the same as a wrong password.
    async fn verify(
        &self,
        password: &str,
        stored: Option<PasswordHash>,
    ) -> Result<bool, PasswordHasherError>;
}
