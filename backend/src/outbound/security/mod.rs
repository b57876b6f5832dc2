//! Credential adapters: bearer token signing and password hashing.

mod argon2_hasher;
mod jwt_tokens;
pub mod secret_config;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_tokens::{JwtSecret, JwtTokenService};
