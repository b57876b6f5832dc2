//! Driving ports for account registration, login and bearer authentication.
//!
//! Inbound adapters call these without knowing which credential store, hasher
//! or token format sits behind them.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, Registration, UserId};

/// Account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account and sign it in.
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error>;

    /// Check credentials and sign the account in.
    ///
    /// An unknown email and a wrong password fail identically.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;
}

/// Resolves a presented bearer token to the user it was issued for.
///
/// The user is not re-checked against the credential store; ownership checks
/// downstream take care of accounts that no longer exist.
#[cfg_attr(test, mockall::automock)]
pub trait BearerAuthenticator: Send + Sync {
    /// Verify `token` and return its user id.
    fn authenticate(&self, token: &str) -> Result<UserId, Error>;
}
