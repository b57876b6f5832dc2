//! Bearer token gate for protected routes.
//!
//! Handlers that take an [`AuthenticatedUser`] argument only run once the
//! `Authorization: Bearer <token>` header resolves to a user id. The resolved
//! id is handed to the handler as an explicit argument.

use std::future::{Ready, ready};

use actix_web::http::header::{self, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use tracing::debug;

use crate::domain::{Error, UserId};

use super::state::HttpState;

const NO_TOKEN: &str = "No token provided";
const BEARER_PREFIX: &str = "Bearer ";

/// Identity resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// The user the token was issued for.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }

    /// Consume the wrapper, returning the user id.
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

/// Extract the raw token from an `Authorization: Bearer <token>` header.
///
/// A missing header, a different scheme or an empty token all count as no
/// token at all.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    token.ok_or_else(|| {
        debug!("request rejected: no bearer token");
        Error::unauthorized(NO_TOKEN)
    })
}

fn authenticate_request(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = bearer_token(req.headers())?;
    state.authenticator.authenticate(token).map(AuthenticatedUser)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_request(req))
    }
}
