//! Reqwest-backed Open Library catalog adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, JSON decoding, and concurrent author resolution.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use pagination::PageRequest;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{AuthorDto, SearchResponseDto, WorkDto};
use crate::domain::ports::{BookCatalogSource, BookCatalogSourceError};
use crate::domain::{BookAuthor, BookDetail, ExternalBookId, SearchPage, SearchQuery};

const DEFAULT_USER_AGENT: &str = concat!("bookshelf/", env!("CARGO_PKG_VERSION"));

/// Base URLs for the catalog API and the cover image host.
#[derive(Debug, Clone)]
pub struct OpenLibraryEndpoints {
    /// Catalog API root, e.g. `https://openlibrary.org`.
    pub catalog: Url,
    /// Cover image root, e.g. `https://covers.openlibrary.org`.
    pub covers: Url,
}

/// Catalog gateway performing HTTP GET requests against Open Library.
pub struct OpenLibrarySource {
    client: Client,
    catalog: Url,
    covers_base: String,
}

impl OpenLibrarySource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoints: OpenLibraryEndpoints, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            catalog: with_trailing_slash(endpoints.catalog),
            covers_base: endpoints.covers.as_str().trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BookCatalogSourceError> {
        self.catalog
            .join(path.trim_start_matches('/'))
            .map_err(|error| BookCatalogSourceError::transport(format!("invalid catalog URL: {error}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, BookCatalogSourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|error| {
            BookCatalogSourceError::decode(format!("invalid catalog JSON payload: {error}"))
        })
    }

    /// Resolve one author reference; any failure drops the author.
    async fn resolve_author(&self, key: String) -> Option<BookAuthor> {
        if !key.starts_with("/authors/") {
            debug!(%key, "skipping author with unexpected key");
            return None;
        }
        let url = match self.endpoint(&format!("{key}.json")) {
            Ok(url) => url,
            Err(error) => {
                debug!(%key, %error, "author lookup failed");
                return None;
            }
        };
        match self.get_json::<AuthorDto>(url).await {
            Ok(author) => {
                let name = author.display_name()?;
                Some(BookAuthor {
                    name,
                    key: author.key.unwrap_or(key),
                })
            }
            Err(error) => {
                debug!(%key, %error, "author lookup failed");
                None
            }
        }
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl BookCatalogSource for OpenLibrarySource {
    async fn search(
        &self,
        query: &SearchQuery,
        page: PageRequest,
    ) -> Result<SearchPage, BookCatalogSourceError> {
        let mut url = self.endpoint("search.json")?;
        url.query_pairs_mut()
            .append_pair("q", query.as_ref())
            .append_pair("page", &page.page().to_string());

        let decoded: SearchResponseDto = self.get_json(url).await?;
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let items = decoded
            .docs
            .into_iter()
            .take(limit)
            .filter_map(|doc| doc.into_domain(&self.covers_base))
            .collect();
        Ok(SearchPage {
            items,
            total: decoded.num_found,
        })
    }

    async fn work_details(&self, id: &ExternalBookId) -> Result<BookDetail, BookCatalogSourceError> {
        let url = self.endpoint(&format!("works/{id}.json"))?;
        let work: WorkDto = self.get_json(url).await?;

        let lookups = work
            .author_keys()
            .into_iter()
            .map(|key| self.resolve_author(key));
        let authors = join_all(lookups).await.into_iter().flatten().collect();

        Ok(BookDetail {
            key: work.key.clone().unwrap_or_else(|| format!("/works/{id}")),
            title: work.title(),
            description: work.description.clone().map(|text| text.into_text()),
            subjects: work.subjects.clone(),
            cover_urls: work.cover_urls(&self.covers_base),
            authors,
            excerpts: work.excerpt_texts(),
            links: work.book_links(),
            publish_year: work.publish_year(),
            isbns: work.isbns(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> BookCatalogSourceError {
    if error.is_timeout() {
        BookCatalogSourceError::timeout(error.to_string())
    } else {
        BookCatalogSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> BookCatalogSourceError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            BookCatalogSourceError::timeout(format!("status {}", status.as_u16()))
        }
        _ => BookCatalogSourceError::status(status.as_u16(), body_preview(body)),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Adapter coverage against a local mock HTTP server.

    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn source(server: &MockServer) -> OpenLibrarySource {
        let catalog = Url::parse(&server.uri()).expect("mock server URL");
        let covers = Url::parse("https://covers.example").expect("covers URL");
        OpenLibrarySource::new(
            OpenLibraryEndpoints { catalog, covers },
            Duration::from_secs(2),
        )
        .expect("client builds")
    }

    async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn search_truncates_to_limit_and_keeps_upstream_total() {
        let server = MockServer::start().await;
        let docs: Vec<_> = (1..=8)
            .map(|n| json!({"key": format!("/works/OL{n}W"), "title": format!("Dune {n}")}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("q", "dune"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"numFound": 42, "docs": docs})),
            )
            .mount(&server)
            .await;

        let page = source(&server)
            .search(
                &SearchQuery::new("dune").expect("valid query"),
                PageRequest::new(1, 5).expect("valid request"),
            )
            .await
            .expect("search succeeds");

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 42);
        assert_eq!(page.items[0].external_id.as_ref(), "OL1W");
    }

    #[tokio::test]
    async fn details_omit_authors_that_fail_to_resolve() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/works/OL1234W.json",
            json!({
                "key": "/works/OL1234W",
                "title": "Good Omens",
                "description": {"type": "/type/text", "value": "The world ends on a Saturday."},
                "covers": [101, 102],
                "authors": [
                    {"author": {"key": "/authors/OL1A"}},
                    {"author": {"key": "/authors/OL2A"}},
                    {"author": {"key": "/authors/OL3A"}}
                ],
                "excerpts": [{"excerpt": "In the beginning."}],
                "links": [{"url": "https://example.org", "title": "Fan site"}]
            }),
        )
        .await;
        mount_json(
            &server,
            "/authors/OL1A.json",
            json!({"key": "/authors/OL1A", "name": "Terry Pratchett"}),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/authors/OL2A.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        mount_json(
            &server,
            "/authors/OL3A.json",
            json!({"key": "/authors/OL3A", "personal_name": "Neil Gaiman"}),
        )
        .await;

        let detail = source(&server)
            .work_details(&ExternalBookId::new("OL1234W").expect("valid id"))
            .await
            .expect("details succeed");

        let names: Vec<_> = detail.authors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Terry Pratchett", "Neil Gaiman"]);
        assert_eq!(detail.description.as_deref(), Some("The world ends on a Saturday."));
        assert_eq!(
            detail.cover_urls,
            [
                "https://covers.example/b/id/101-L.jpg",
                "https://covers.example/b/id/102-L.jpg"
            ]
        );
        assert_eq!(detail.excerpts, ["In the beginning."]);
        assert_eq!(detail.links[0].title, "Fan site");
    }

    #[tokio::test]
    async fn missing_work_maps_to_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/works/OL9W.json"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let err = source(&server)
            .work_details(&ExternalBookId::new("OL9W").expect("valid id"))
            .await
            .expect_err("missing work");

        assert_eq!(err, BookCatalogSourceError::status(404_u16, "not found"));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/works/OL9W.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = source(&server)
            .work_details(&ExternalBookId::new("OL9W").expect("valid id"))
            .await
            .expect_err("bad body");

        assert!(matches!(err, BookCatalogSourceError::Decode { .. }));
    }

    #[rstest]
    #[case(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case(StatusCode::BAD_GATEWAY, false)]
    fn gateway_statuses(#[case] status: StatusCode, #[case] is_timeout: bool) {
        let err = map_status_error(status, b"upstream   down");
        assert_eq!(matches!(err, BookCatalogSourceError::Timeout { .. }), is_timeout);
    }

    #[rstest]
    fn preview_truncates_long_bodies() {
        let body = "x".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }
}
