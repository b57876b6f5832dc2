//! Authentication primitives: registration and login payloads, issued tokens.
//!
//! Inbound adapters build these through validating constructors before they
//! talk to the account service.

use std::fmt;
use std::time::Duration;

use zeroize::Zeroizing;

use super::{EmailAddress, UserId, UserName, UserValidationError};

/// Validation failures for registration and login payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// A required field was absent or blank.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    /// A field was present but malformed.
    #[error("{source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: UserValidationError,
    },
}

impl CredentialsValidationError {
    /// Name of the offending payload field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::InvalidField { field, .. } => field,
        }
    }
}

fn require<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, CredentialsValidationError> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(CredentialsValidationError::MissingField { field })
}

/// Validated registration request.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `email` is trimmed, lowercased and of the form `local@domain`.
/// - `password` is non-empty and kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: UserName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw payload fields; absent and blank values count as missing.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::Registration;
    ///
    /// let reg = Registration::try_from_parts(Some("Ada"), Some("ADA@example.com"), Some("pw"))
    ///     .expect("valid registration");
    /// assert_eq!(reg.email().as_ref(), "ada@example.com");
    /// ```
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let name = require(name, "name")?;
        let email = require(email, "email")?;
        let password = password
            .filter(|raw| !raw.is_empty())
            .ok_or(CredentialsValidationError::MissingField { field: "password" })?;

        let name = UserName::new(name).map_err(|source| CredentialsValidationError::InvalidField {
            field: "name",
            source,
        })?;
        let email = EmailAddress::new(email).map_err(|source| {
            CredentialsValidationError::InvalidField {
                field: "email",
                source,
            }
        })?;

        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Name to store on the account.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Raw password as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Login credentials.
///
/// The email is only trimmed and lowercased here; a malformed address simply
/// matches no account, so it fails like any other bad credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw login fields.
    pub fn try_from_parts(
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let email = require(email, "email")?;
        let password = password
            .filter(|raw| !raw.is_empty())
            .ok_or(CredentialsValidationError::MissingField { field: "password" })?;
        Ok(Self {
            email: email.trim().to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email as entered, normalised for lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// How long an issued bearer token stays valid.
pub const TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Signed bearer token handed to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Bearer token valid for one hour.
    pub token: AccessToken,
    /// Identifier of the authenticated user.
    pub user_id: UserId,
    /// Name of the authenticated user.
    pub name: UserName,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for credential validation.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("a@b.c"), Some("pw"), "name")]
    #[case(Some("  "), Some("a@b.c"), Some("pw"), "name")]
    #[case(Some("Ada"), None, Some("pw"), "email")]
    #[case(Some("Ada"), Some("a@b.c"), None, "password")]
    #[case(Some("Ada"), Some("a@b.c"), Some(""), "password")]
    fn registration_reports_missing_fields(
        #[case] name: Option<&str>,
        #[case] email: Option<&str>,
        #[case] password: Option<&str>,
        #[case] field: &str,
    ) {
        let err = Registration::try_from_parts(name, email, password).expect_err("must fail");
        assert!(matches!(err, CredentialsValidationError::MissingField { .. }));
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn registration_rejects_malformed_email() {
        let err = Registration::try_from_parts(Some("Ada"), Some("nope"), Some("pw"))
            .expect_err("must fail");
        assert_eq!(
            err,
            CredentialsValidationError::InvalidField {
                field: "email",
                source: UserValidationError::InvalidEmail,
            }
        );
    }

    #[rstest]
    fn registration_keeps_password_whitespace() {
        let reg = Registration::try_from_parts(Some(" Ada "), Some("a@b.c"), Some(" pw "))
            .expect("valid registration");
        assert_eq!(reg.name().as_ref(), "Ada");
        assert_eq!(reg.password(), " pw ");
    }

    #[rstest]
    fn login_normalises_email() {
        let creds = LoginCredentials::try_from_parts(Some(" Ada@Example.com "), Some("pw"))
            .expect("valid credentials");
        assert_eq!(creds.email(), "ada@example.com");
    }

    #[rstest]
    fn access_token_debug_is_redacted() {
        assert_eq!(format!("{:?}", AccessToken::new("abc.def.ghi")), "AccessToken(..)");
    }
}
