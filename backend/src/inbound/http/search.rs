//! Catalog search handler.
//!
//! ```text
//! GET /api/search?query=dune&page=1&limit=5
//! ```

use actix_web::{get, web};
use pagination::{PageRequest, PageRequestError, Pagination};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CatalogBook, Error, SearchQuery, SearchResults};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_positive_u32};

const QUERY_FIELD: FieldName = FieldName::new("query");
const PAGE_FIELD: FieldName = FieldName::new("page");
const LIMIT_FIELD: FieldName = FieldName::new("limit");

/// Query string accepted by `GET /api/search`.
///
/// Values arrive as raw strings so malformed numbers surface as validation
/// errors with field details instead of a bare deserialisation failure.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free-text search terms.
    pub query: Option<String>,
    /// One-based page number; defaults to 1.
    pub page: Option<String>,
    /// Maximum hits per page; defaults to 10.
    pub limit: Option<String>,
}

impl SearchParams {
    fn validate(self) -> Result<(SearchQuery, PageRequest), Error> {
        let query = self
            .query
            .as_deref()
            .and_then(|raw| SearchQuery::new(raw).ok())
            .ok_or_else(|| missing_field_error(QUERY_FIELD))?;
        let page = parse_positive_u32(self.page.as_deref(), PAGE_FIELD)?;
        let limit = parse_positive_u32(self.limit.as_deref(), LIMIT_FIELD)?;
        let request = PageRequest::from_optional(page, limit)
            .map_err(|err: PageRequestError| Error::invalid_request(err.to_string()))?;
        Ok((query, request))
    }
}

/// One normalised search hit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookSummaryResponse {
    #[schema(example = "Dune")]
    pub title: String,
    pub authors: Vec<String>,
    /// First publication year, or `Unknown`.
    #[schema(example = "1965")]
    pub publish_year: String,
    pub isbn: Option<String>,
    pub cover_id: Option<i64>,
    pub cover_url: Option<String>,
    pub subjects: Vec<String>,
    #[schema(example = "/works/OL893415W")]
    pub key: String,
    #[schema(example = "OL893415W")]
    pub external_id: String,
}

impl From<CatalogBook> for BookSummaryResponse {
    fn from(book: CatalogBook) -> Self {
        Self {
            title: book.title,
            authors: book.authors,
            publish_year: book.publish_year,
            isbn: book.isbn,
            cover_id: book.cover_id,
            cover_url: book.cover_url,
            subjects: book.subjects,
            key: book.key,
            external_id: book.external_id.to_string(),
        }
    }
}

/// Page and totals echoed with search results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    /// Total matches reported by the catalog.
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    /// `ceil(total / limit)`.
    pub pages: u64,
}

impl From<Pagination> for PaginationResponse {
    fn from(value: Pagination) -> Self {
        Self {
            total: value.total,
            page: value.page,
            limit: value.limit,
            pages: value.pages,
        }
    }
}

/// Search response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub books: Vec<BookSummaryResponse>,
    pub pagination: PaginationResponse,
}

impl From<SearchResults> for SearchResponse {
    fn from(results: SearchResults) -> Self {
        Self {
            books: results.books.into_iter().map(Into::into).collect(),
            pagination: results.pagination.into(),
        }
    }
}

/// Search the external catalog.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Search results", body = SearchResponse),
        (status = 400, description = "Missing query or malformed paging", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Upstream fetch failed", body = ErrorSchema)
    ),
    tags = ["catalog"],
    operation_id = "searchBooks",
    security(("BearerAuth" = []))
)]
#[get("/search")]
pub async fn search_books(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<SearchResponse>> {
    let (query, page) = params.into_inner().validate()?;
    let results = state.catalog.search(query, page).await?;
    Ok(web::Json(results.into()))
}
