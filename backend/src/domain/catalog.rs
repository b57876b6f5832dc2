//! Normalised book catalog records.
//!
//! The catalog gateway decodes upstream payloads into these shapes; nothing
//! outside the gateway sees the upstream wire format.

use std::fmt;

use pagination::Pagination;

/// Validation errors for catalog identifiers and queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogValidationError {
    /// The search query was blank.
    #[error("query must not be empty")]
    EmptyQuery,
    /// The external identifier was blank.
    #[error("external id must not be empty")]
    EmptyExternalId,
    /// The external identifier contained characters other than ASCII letters and digits.
    #[error("external id must contain only ASCII letters and digits")]
    InvalidExternalId,
}

/// Free-text catalog search query, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Validate and construct a query.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CatalogValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CatalogValidationError::EmptyQuery);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Stable identifier of a work in the external catalog, such as `OL1234W`.
///
/// # Examples
/// ```
/// use bookshelf::domain::ExternalBookId;
///
/// let id = ExternalBookId::new(" OL1234W ").expect("valid id");
/// assert_eq!(id.as_ref(), "OL1234W");
/// assert!(ExternalBookId::new("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalBookId(String);

impl ExternalBookId {
    /// Validate and construct an identifier.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CatalogValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CatalogValidationError::EmptyExternalId);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CatalogValidationError::InvalidExternalId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Extract the identifier from a catalog key such as `/works/OL1234W`.
    pub fn from_catalog_key(key: &str) -> Result<Self, CatalogValidationError> {
        Self::new(key.rsplit('/').next().unwrap_or_default())
    }
}

impl AsRef<str> for ExternalBookId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ExternalBookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One normalised search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogBook {
    /// Work title.
    pub title: String,
    /// Author names in catalog order; may be empty.
    pub authors: Vec<String>,
    /// First publication year, or [`crate::domain::UNKNOWN_YEAR`].
    pub publish_year: String,
    /// First listed ISBN.
    pub isbn: Option<String>,
    /// Catalog cover identifier.
    pub cover_id: Option<i64>,
    /// Medium-sized cover image URL derived from `cover_id`.
    pub cover_url: Option<String>,
    /// Subject headings.
    pub subjects: Vec<String>,
    /// Catalog key, e.g. `/works/OL1234W`.
    pub key: String,
    /// Identifier extracted from `key`.
    pub external_id: ExternalBookId,
}

/// Page of search hits returned by the catalog gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    /// Hits truncated to the requested limit.
    pub items: Vec<CatalogBook>,
    /// Total match count reported by the catalog, not the truncated count.
    pub total: u64,
}

/// Search response handed to inbound adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// Hits on this page.
    pub books: Vec<CatalogBook>,
    /// Echoed page/limit with totals.
    pub pagination: Pagination,
}

/// Author resolved from a work's author reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookAuthor {
    /// Display name.
    pub name: String,
    /// Catalog key, e.g. `/authors/OL1A`.
    pub key: String,
}

/// External link attached to a work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookLink {
    /// Target URL.
    pub url: String,
    /// Link caption.
    pub title: String,
}

/// Normalised work record.
///
/// Fields the catalog omitted stay empty here; defaulting to sentinels
/// happens when a view or a saved record is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookDetail {
    /// Catalog key, e.g. `/works/OL1234W`.
    pub key: String,
    /// Work title.
    pub title: Option<String>,
    /// Description leaf text, whichever shape it arrived in.
    pub description: Option<String>,
    /// Subject headings.
    pub subjects: Vec<String>,
    /// Large cover image URLs, one per cover identifier.
    pub cover_urls: Vec<String>,
    /// Authors that resolved; failed lookups are omitted.
    pub authors: Vec<BookAuthor>,
    /// Excerpt texts.
    pub excerpts: Vec<String>,
    /// External links.
    pub links: Vec<BookLink>,
    /// Earliest publication date or year the catalog reports.
    pub publish_year: Option<String>,
    /// ISBN-10 values, or ISBN-13 values when no ISBN-10 is listed.
    pub isbns: Vec<String>,
}

impl BookDetail {
    /// Description, or [`crate::domain::NO_DESCRIPTION`] when absent.
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or(super::NO_DESCRIPTION)
    }
}
