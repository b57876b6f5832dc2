//! Argon2id password hashing.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::Argon2;
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// `PasswordHasher` backed by Argon2id with default parameters.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    decoy: String,
}

impl Argon2PasswordHasher {
    /// Build the hasher, deriving a decoy digest used when no account
    /// matches a login attempt.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError::Hashing`] when the decoy cannot be
    /// derived.
    pub fn new() -> Result<Self, PasswordHasherError> {
        let decoy = hash_blocking("decoy password for unknown accounts")?;
        Ok(Self { decoy })
    }
}

fn hash_blocking(password: &str) -> Result<String, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|error| PasswordHasherError::hashing(error.to_string()))
}

fn verify_blocking(password: &str, encoded: &str) -> Result<bool, PasswordHasherError> {
    let parsed = PhcHash::new(encoded)
        .map_err(|error| PasswordHasherError::hashing(format!("invalid stored hash: {error}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

async fn run_blocking<T, F>(task: F) -> Result<T, PasswordHasherError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordHasherError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|error| PasswordHasherError::hashing(format!("hashing task failed: {error}")))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = run_blocking(move || hash_blocking(&password)).await?;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(
        &self,
        password: &str,
        stored: Option<PasswordHash>,
    ) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        match stored {
            Some(stored) => {
                let encoded = stored.as_str().to_owned();
                run_blocking(move || verify_blocking(&password, &encoded)).await
            }
            None => {
                let decoy = self.decoy.clone();
                run_blocking(move || verify_blocking(&password, &decoy)).await?;
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new().expect("decoy derives")
    }

    #[rstest]
    #[tokio::test]
    async fn hash_then_verify(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("correct horse").await.expect("hash");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", Some(hash.clone())).await.expect("verify"));
        assert!(!hasher.verify("wrong horse", Some(hash)).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_hashes(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("same").await.expect("hash");
        let second = hasher.hash("same").await.expect("hash");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_account_never_verifies(hasher: Argon2PasswordHasher) {
        let verified = hasher
            .verify("decoy password for unknown accounts", None)
            .await
            .expect("decoy check runs");
        assert!(!verified);
    }

    #[rstest]
    #[tokio::test]
    async fn corrupt_stored_hash_is_an_error(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("pw", Some(PasswordHash::new("not-a-phc-string")))
            .await
            .expect_err("corrupt hash");
        assert!(matches!(err, PasswordHasherError::Hashing { .. }));
    }
}
