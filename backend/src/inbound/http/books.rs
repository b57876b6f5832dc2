//! Book detail and saved-collection handlers.
//!
//! ```text
//! GET    /api/books/{externalId}
//! GET    /api/books/
//! POST   /api/books/save {"externalId":"OL1234W"}
//! DELETE /api/books/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, routes, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::SaveOutcome;
use crate::domain::{BookDetail, Error, ExternalBookId, SavedBook, SavedBookId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, missing_field_error};

const EXTERNAL_ID_FIELD: FieldName = FieldName::new("externalId");
const ID_FIELD: FieldName = FieldName::new("id");
const ALREADY_SAVED: &str = "Book already exists in your collection";

/// Body of `POST /api/books/save`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveBookRequest {
    /// Catalog work identifier, e.g. `OL1234W`. Also accepted as
    /// `openLibraryId`.
    #[serde(default, alias = "openLibraryId")]
    #[schema(example = "OL1234W")]
    pub external_id: Option<String>,
}

impl SaveBookRequest {
    fn external_id(self) -> Result<ExternalBookId, Error> {
        let raw = self
            .external_id
            .filter(|raw| !raw.trim().is_empty())
            .ok_or_else(|| missing_field_error(EXTERNAL_ID_FIELD))?;
        ExternalBookId::new(&raw)
            .map_err(|err| invalid_value_error(EXTERNAL_ID_FIELD, err.to_string(), &raw))
    }
}

/// Saved book as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedBookResponse {
    #[schema(example = "7d9f4b3e-2c1a-4e5f-9a8b-1c2d3e4f5a6b")]
    pub id: String,
    pub title: String,
    /// At least one entry; `Unknown Author` when none resolved.
    pub authors: Vec<String>,
    pub publish_year: String,
    #[schema(example = "OL1234W")]
    pub external_id: String,
    /// ISBN-10 values, else ISBN-13 values.
    pub isbn: Vec<String>,
    pub cover_url: Option<String>,
    pub description: String,
    pub subjects: Vec<String>,
    /// Owner's user id.
    pub added_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&SavedBook> for SavedBookResponse {
    fn from(book: &SavedBook) -> Self {
        Self {
            id: book.id().to_string(),
            title: book.title().to_owned(),
            authors: book.authors().to_vec(),
            publish_year: book.publish_year().to_owned(),
            external_id: book.external_id().to_string(),
            isbn: book.isbns().to_vec(),
            cover_url: book.cover_url().map(str::to_owned),
            description: book.description().to_owned(),
            subjects: book.subjects().to_vec(),
            added_by: book.owner().to_string(),
            created_at: book.created_at(),
            updated_at: book.updated_at(),
        }
    }
}

/// Author of a work.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorResponse {
    #[schema(example = "Frank Herbert")]
    pub name: String,
    #[schema(example = "/authors/OL79034A")]
    pub key: String,
}

/// External link attached to a work.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkResponse {
    pub url: String,
    pub title: String,
}

/// Normalised work details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailResponse {
    #[schema(example = "/works/OL893415W")]
    pub key: String,
    #[schema(example = "OL893415W")]
    pub external_id: String,
    pub title: Option<String>,
    /// `No description available` when the catalog has none.
    pub description: String,
    pub subjects: Vec<String>,
    /// Large cover image URLs.
    pub covers: Vec<String>,
    /// Authors that resolved; failed lookups are left out.
    pub authors: Vec<AuthorResponse>,
    pub excerpts: Vec<String>,
    pub links: Vec<LinkResponse>,
}

impl BookDetailResponse {
    fn new(external_id: &ExternalBookId, detail: BookDetail) -> Self {
        let description = detail.description_or_default().to_owned();
        let BookDetail {
            key,
            title,
            subjects,
            cover_urls,
            authors,
            excerpts,
            links,
            ..
        } = detail;
        Self {
            key,
            external_id: external_id.to_string(),
            title,
            description,
            subjects,
            covers: cover_urls,
            authors: authors
                .into_iter()
                .map(|author| AuthorResponse {
                    name: author.name,
                    key: author.key,
                })
                .collect(),
            excerpts,
            links: links
                .into_iter()
                .map(|link| LinkResponse {
                    url: link.url,
                    title: link.title,
                })
                .collect(),
        }
    }
}

/// Fetch one catalog work by its external identifier.
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Catalog work identifier", example = "OL893415W")),
    responses(
        (status = 200, description = "Work details", body = BookDetailResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Upstream fetch failed", body = ErrorSchema)
    ),
    tags = ["catalog"],
    operation_id = "getBookDetails",
    security(("BearerAuth" = []))
)]
#[get("/books/{id}")]
pub async fn book_details(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookDetailResponse>> {
    let raw = path.into_inner();
    let external_id = ExternalBookId::new(&raw)
        .map_err(|err| invalid_value_error(ID_FIELD, err.to_string(), &raw))?;
    let detail = state.catalog.details(external_id.clone()).await?;
    Ok(web::Json(BookDetailResponse::new(&external_id, detail)))
}

/// List the caller's saved books, newest first.
#[utoipa::path(
    get,
    path = "/api/books/",
    responses(
        (status = 200, description = "Saved books", body = [SavedBookResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Collection store unavailable", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listSavedBooks",
    security(("BearerAuth" = []))
)]
#[routes]
#[get("/books")]
#[get("/books/")]
pub async fn list_saved_books(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<SavedBookResponse>>> {
    let books = state.saved_books_query.list(user.into_inner()).await?;
    Ok(web::Json(books.iter().map(SavedBookResponse::from).collect()))
}

/// Save a catalog work to the caller's collection.
///
/// Saving a work that is already in the collection answers `409` with the
/// existing record under `details.book`.
#[utoipa::path(
    post,
    path = "/api/books/save",
    request_body = SaveBookRequest,
    responses(
        (status = 201, description = "Book saved", body = SavedBookResponse),
        (status = 400, description = "Missing or malformed externalId", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Already in the collection", body = ErrorSchema),
        (status = 500, description = "Upstream fetch failed", body = ErrorSchema),
        (status = 503, description = "Collection store unavailable", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "saveBook",
    security(("BearerAuth" = []))
)]
#[post("/books/save")]
pub async fn save_book(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<SaveBookRequest>,
) -> ApiResult<HttpResponse> {
    let external_id = payload.into_inner().external_id()?;
    match state.saved_books.save(user.into_inner(), external_id).await? {
        SaveOutcome::Saved(book) => {
            info!(book_id = %book.id(), external_id = %book.external_id(), "book saved");
            Ok(HttpResponse::Created().json(SavedBookResponse::from(&book)))
        }
        SaveOutcome::AlreadySaved(book) => Err(Error::conflict(ALREADY_SAVED)
            .with_details(json!({ "book": SavedBookResponse::from(&book) }))),
    }
}

/// Delete one of the caller's saved books and return it.
///
/// Unknown ids, malformed ids and another owner's ids all answer `404`.
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Saved book identifier")),
    responses(
        (status = 200, description = "Deleted record", body = SavedBookResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "deleteSavedBook",
    security(("BearerAuth" = []))
)]
#[delete("/books/{id}")]
pub async fn delete_saved_book(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SavedBookResponse>> {
    let raw = path.into_inner();
    let id = raw.parse::<SavedBookId>().map_err(|_| {
        Error::not_found(format!("saved book {raw} not found or does not belong to you"))
    })?;
    let book = state.saved_books.delete(user.into_inner(), id).await?;
    Ok(web::Json(SavedBookResponse::from(&book)))
}

#[cfg(test)]
#[path = "books_tests.rs"]
mod tests;
