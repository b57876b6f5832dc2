//! Token secret configuration parsing and validation.
//!
//! The signing secret comes from `JWT_SECRET_FILE` (a path) or `JWT_SECRET`
//! (the value itself). Debug builds tolerate a missing or short secret and
//! fall back to an ephemeral one; release builds refuse to start.

use std::path::PathBuf;

use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

use super::JwtSecret;

const SECRET_FILE_ENV: &str = "JWT_SECRET_FILE";
const SECRET_ENV: &str = "JWT_SECRET";
/// Minimum secret length accepted in release builds.
pub const SECRET_MIN_LEN: usize = 32;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing secrets and emit warnings.
    Debug,
    /// Release builds require an explicit, long enough secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bookshelf::outbound::security::secret_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while loading the token secret.
#[derive(thiserror::Error, Debug)]
pub enum SecretConfigError {
    /// Neither secret variable is set.
    #[error("missing token secret: set {SECRET_FILE_ENV} or {SECRET_ENV}")]
    Missing,
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret is shorter than release builds allow.
    #[error("token secret from {origin} too short: need >= {min_len} bytes, got {length}")]
    TooShort {
        origin: String,
        length: usize,
        min_len: usize,
    },
}

/// Load the token signing secret from the environment.
///
/// # Examples
///
/// ```rust
/// use bookshelf::outbound::security::secret_config::{jwt_secret_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET" => Some("x".repeat(32)),
///     _ => None,
/// });
///
/// let secret = jwt_secret_from_env(&env, BuildMode::Release).expect("valid secret");
/// assert_eq!(secret.len(), 32);
/// ```
pub fn jwt_secret_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<JwtSecret, SecretConfigError> {
    let (origin, bytes) = match env.string(SECRET_FILE_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            match std::fs::read(&path) {
                Ok(bytes) => (path.display().to_string(), trim_trailing_newlines(bytes)),
                Err(source) if mode.is_debug() => {
                    warn!(path = %path.display(), error = %source, "using temporary token secret (dev only)");
                    return Ok(JwtSecret::generate());
                }
                Err(source) => return Err(SecretConfigError::Read { path, source }),
            }
        }
        None => match env.string(SECRET_ENV) {
            Some(value) => (SECRET_ENV.to_owned(), value.into_bytes()),
            None if mode.is_debug() => {
                warn!("{SECRET_FILE_ENV} and {SECRET_ENV} not set; using temporary token secret (dev only)");
                return Ok(JwtSecret::generate());
            }
            None => return Err(SecretConfigError::Missing),
        },
    };

    check_length(origin, bytes, mode)
}

fn check_length(origin: String, mut bytes: Vec<u8>, mode: BuildMode) -> Result<JwtSecret, SecretConfigError> {
    let length = bytes.len();
    if length >= SECRET_MIN_LEN {
        return Ok(JwtSecret::from_bytes(bytes));
    }
    bytes.zeroize();
    if mode.is_debug() {
        warn!(%origin, length, "token secret too short; using temporary token secret (dev only)");
        return Ok(JwtSecret::generate());
    }
    Err(SecretConfigError::TooShort {
        origin,
        length,
        min_len: SECRET_MIN_LEN,
    })
}

fn trim_trailing_newlines(mut bytes: Vec<u8>) -> Vec<u8> {
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }
    bytes
}
