//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the domain error schema
//! wrappers and the bearer token security scheme. The document backs Swagger
//! UI in debug builds and is exported by `cargo run --bin openapi-dump`.

use crate::inbound::http::accounts::{AuthResponse, LoginRequest, RegisterRequest};
use crate::inbound::http::books::{
    AuthorResponse, BookDetailResponse, LinkResponse, SaveBookRequest, SavedBookResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::search::{BookSummaryResponse, PaginationResponse, SearchResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by protected paths.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token returned by POST /api/auth/register or POST /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bookshelf API",
        description = "Accounts, Open Library search and per-user saved book collections."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::search::search_books,
        crate::inbound::http::books::book_details,
        crate::inbound::http::books::list_saved_books,
        crate::inbound::http::books::save_book,
        crate::inbound::http::books::delete_saved_book,
        crate::inbound::http::health::index,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        SearchResponse,
        BookSummaryResponse,
        PaginationResponse,
        BookDetailResponse,
        AuthorResponse,
        LinkResponse,
        SaveBookRequest,
        SavedBookResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "catalog", description = "Open Library search and work details"),
        (name = "books", description = "The caller's saved book collection"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
