//! Driven port for issuing and verifying bearer tokens.
//!
//! Tokens are opaque outside the implementing adapter.

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Token issuance and verification failures.
    pub enum TokenServiceError {
        /// Signature, format or claims did not verify.
        Invalid { message: String } => "token invalid: {message}",
        /// The token's validity window has passed.
        Expired => "token expired",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Issues one-hour bearer tokens bound to a user id and verifies them.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token for `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, TokenServiceError>;

    /// Verify a token and return the user id it encodes.
    fn verify(&self, token: &str) -> Result<UserId, TokenServiceError>;
}
