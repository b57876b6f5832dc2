//! Account domain service.
//!
//! Implements registration, login and bearer authentication on top of the
//! credential store, password hasher and token service ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    AccountCommand, BearerAuthenticator, PasswordHasher, PasswordHasherError, TokenService,
    TokenServiceError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AccessToken, AuthSession, EmailAddress, Error, LoginCredentials, Registration, User, UserId,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const INVALID_TOKEN: &str = "Invalid or expired token";

fn duplicate_email_error() -> Error {
    Error::invalid_request("User already exists").with_details(json!({
        "field": "email",
        "code": "duplicate_email",
    }))
}

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail => duplicate_email_error(),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

fn map_issue_error(error: TokenServiceError) -> Error {
    Error::internal(format!("failed to issue token: {error}"))
}

/// Account service implementing [`AccountCommand`] and [`BearerAuthenticator`].
pub struct AccountCommandService<U: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U: ?Sized, H: ?Sized, T: ?Sized> AccountCommandService<U, H, T> {
    /// Create the service from its ports.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<U, H, T> AccountCommandService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    fn sign_in(&self, user: &User) -> Result<AuthSession, Error> {
        let token: AccessToken = self.tokens.issue(user.id()).map_err(map_issue_error)?;
        Ok(AuthSession {
            token,
            user_id: user.id().clone(),
            name: user.name().clone(),
        })
    }

    async fn find_login_candidate(&self, email: &str) -> Result<Option<User>, Error> {
        let Ok(email) = EmailAddress::new(email) else {
            return Ok(None);
        };
        self.users
            .find_by_email(&email)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<U, H, T> AccountCommand for AccountCommandService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(duplicate_email_error());
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User::new(
            UserId::random(),
            registration.name().clone(),
            registration.email().clone(),
            password_hash,
        );

        self.users
            .insert(&user)
            .await
            .map_err(map_repository_error)?;
        debug!(user_id = %user.id(), "registered account");

        self.sign_in(&user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let candidate = self.find_login_candidate(credentials.email()).await?;
        let stored = candidate.as_ref().map(|user| user.password_hash().clone());
        let verified = self
            .hasher
            .verify(credentials.password(), stored)
            .await
            .map_err(map_hasher_error)?;

        match candidate {
            Some(user) if verified => self.sign_in(&user),
            _ => {
                debug!("login rejected");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }
}

impl<U, H, T> BearerAuthenticator for AccountCommandService<U, H, T>
where
    U: ?Sized + Send + Sync,
    H: ?Sized + Send + Sync,
    T: TokenService + ?Sized,
{
    fn authenticate(&self, token: &str) -> Result<UserId, Error> {
        self.tokens.verify(token).map_err(|error| match error {
            TokenServiceError::Expired | TokenServiceError::Invalid { .. } => {
                debug!(%error, "bearer token rejected");
                Error::unauthorized(INVALID_TOKEN)
            }
            TokenServiceError::Signing { .. } => {
                warn!(%error, "bearer token verification failed");
                Error::internal(error.to_string())
            }
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
