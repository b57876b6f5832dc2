//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, User};

use super::lock;

/// Accounts keyed by normalised email.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.users).get(email.as_ref()).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = lock(&self.users);
        let key = user.email().as_ref().to_owned();
        if users.contains_key(&key) {
            return Err(UserRepositoryError::duplicate_email());
        }
        users.insert(key, user.clone());
        Ok(())
    }
}
