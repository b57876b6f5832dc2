//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header;

use crate::domain::ports::{
    MockAccountCommand, MockBearerAuthenticator, MockBookCatalogQuery, MockSavedBooksCommand,
    MockSavedBooksQuery,
};
use crate::domain::{Error, UserId};

use super::state::{HttpState, HttpStatePorts};

/// Token accepted by [`MockPorts::authenticated_as`].
pub const TEST_TOKEN: &str = "test-token";

/// One mock per port; unset expectations panic when hit.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountCommand,
    pub authenticator: MockBearerAuthenticator,
    pub catalog: MockBookCatalogQuery,
    pub saved_books: MockSavedBooksCommand,
    pub saved_books_query: MockSavedBooksQuery,
}

impl MockPorts {
    /// Mocks whose authenticator accepts [`TEST_TOKEN`] as `user` and rejects
    /// everything else.
    pub fn authenticated_as(user: UserId) -> Self {
        let mut authenticator = MockBearerAuthenticator::new();
        authenticator.expect_authenticate().returning(move |token| {
            if token == TEST_TOKEN {
                Ok(user.clone())
            } else {
                Err(Error::unauthorized("Invalid or expired token"))
            }
        });
        Self {
            authenticator,
            ..Self::default()
        }
    }

    /// Freeze the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(self.accounts),
            authenticator: Arc::new(self.authenticator),
            catalog: Arc::new(self.catalog),
            saved_books: Arc::new(self.saved_books),
            saved_books_query: Arc::new(self.saved_books_query),
        })
    }
}

/// `Authorization` header carrying `token` as a bearer credential.
pub fn bearer_header(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}
