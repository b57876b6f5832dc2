//! Saved book records owned by a user.
//!
//! A record is created by the save flow from a catalog [`BookDetail`], read
//! back by the owner, and deleted by the owner. It is never updated.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{BookDetail, ExternalBookId, UserId};

/// Author placeholder used when no author resolves.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Publish year placeholder.
pub const UNKNOWN_YEAR: &str = "Unknown";
/// Description placeholder.
pub const NO_DESCRIPTION: &str = "No description available";
/// Title placeholder.
pub const UNTITLED: &str = "Untitled";

/// Identifier of a saved book record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SavedBookId(Uuid);

impl SavedBookId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SavedBookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SavedBookId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Validation errors raised by [`SavedBook::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SavedBookValidationError {
    /// The title was blank.
    #[error("title must not be empty")]
    EmptyTitle,
    /// No author was supplied.
    #[error("authors must not be empty")]
    NoAuthors,
    /// The update timestamp precedes creation.
    #[error("updated_at must not precede created_at")]
    UpdatedBeforeCreated,
}

/// Unvalidated field bag for constructing a [`SavedBook`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedBookDraft {
    pub id: SavedBookId,
    pub owner: UserId,
    pub external_id: ExternalBookId,
    pub title: String,
    pub authors: Vec<String>,
    pub publish_year: String,
    pub isbns: Vec<String>,
    pub cover_url: Option<String>,
    pub description: String,
    pub subjects: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book saved to a user's collection.
///
/// ## Invariants
/// - `title` is non-empty.
/// - `authors` holds at least one entry.
/// - `(owner, external_id)` is unique across all records; enforced by the
///   repository at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedBook {
    id: SavedBookId,
    owner: UserId,
    external_id: ExternalBookId,
    title: String,
    authors: Vec<String>,
    publish_year: String,
    isbns: Vec<String>,
    cover_url: Option<String>,
    description: String,
    subjects: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SavedBook {
    /// Validate a draft into a record.
    pub fn new(draft: SavedBookDraft) -> Result<Self, SavedBookValidationError> {
        let SavedBookDraft {
            id,
            owner,
            external_id,
            title,
            authors,
            publish_year,
            isbns,
            cover_url,
            description,
            subjects,
            created_at,
            updated_at,
        } = draft;

        if title.trim().is_empty() {
            return Err(SavedBookValidationError::EmptyTitle);
        }
        if authors.is_empty() {
            return Err(SavedBookValidationError::NoAuthors);
        }
        if updated_at < created_at {
            return Err(SavedBookValidationError::UpdatedBeforeCreated);
        }

        Ok(Self {
            id,
            owner,
            external_id,
            title,
            authors,
            publish_year,
            isbns,
            cover_url,
            description,
            subjects,
            created_at,
            updated_at,
        })
    }

    /// Build a new record for `owner` from a catalog work, applying the
    /// placeholder rules for every field the catalog left empty.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::{BookDetail, ExternalBookId, SavedBook, SavedBookId, UserId};
    /// use chrono::Utc;
    ///
    /// let book = SavedBook::from_catalog(
    ///     SavedBookId::random(),
    ///     UserId::random(),
    ///     ExternalBookId::new("OL1W").expect("valid id"),
    ///     BookDetail::default(),
    ///     Utc::now(),
    /// );
    /// assert_eq!(book.title(), "Untitled");
    /// assert_eq!(book.authors(), ["Unknown Author"]);
    /// ```
    pub fn from_catalog(
        id: SavedBookId,
        owner: UserId,
        external_id: ExternalBookId,
        detail: BookDetail,
        now: DateTime<Utc>,
    ) -> Self {
        let BookDetail {
            title,
            description,
            subjects,
            cover_urls,
            authors,
            publish_year,
            isbns,
            ..
        } = detail;

        let title = title
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_owned());
        let mut authors: Vec<String> = authors
            .into_iter()
            .map(|author| author.name)
            .filter(|name| !name.trim().is_empty())
            .collect();
        if authors.is_empty() {
            authors.push(UNKNOWN_AUTHOR.to_owned());
        }

        Self {
            id,
            owner,
            external_id,
            title,
            authors,
            publish_year: publish_year
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_YEAR.to_owned()),
            isbns,
            cover_url: cover_urls.into_iter().next(),
            description: description
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_owned()),
            subjects,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> SavedBookId {
        self.id
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Catalog identifier.
    pub fn external_id(&self) -> &ExternalBookId {
        &self.external_id
    }

    /// Title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Author names, never empty.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Publish year or [`UNKNOWN_YEAR`].
    pub fn publish_year(&self) -> &str {
        self.publish_year.as_str()
    }

    /// ISBNs, possibly empty.
    pub fn isbns(&self) -> &[String] {
        &self.isbns
    }

    /// Cover image URL.
    pub fn cover_url(&self) -> Option<&str> {
        self.cover_url.as_deref()
    }

    /// Description or [`NO_DESCRIPTION`].
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Subject headings.
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for record validation and catalog hydration.

    use chrono::Duration;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::BookAuthor;

    #[fixture]
    fn draft() -> SavedBookDraft {
        let now = Utc::now();
        SavedBookDraft {
            id: SavedBookId::random(),
            owner: UserId::random(),
            external_id: ExternalBookId::new("OL1W").expect("valid id"),
            title: "Dune".to_owned(),
            authors: vec!["Frank Herbert".to_owned()],
            publish_year: "1965".to_owned(),
            isbns: vec![],
            cover_url: None,
            description: NO_DESCRIPTION.to_owned(),
            subjects: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn accepts_valid_draft(draft: SavedBookDraft) {
        let book = SavedBook::new(draft.clone()).expect("valid draft");
        assert_eq!(book.title(), "Dune");
        assert_eq!(book.id(), draft.id);
    }

    #[rstest]
    fn rejects_missing_authors(mut draft: SavedBookDraft) {
        draft.authors.clear();
        assert_eq!(SavedBook::new(draft), Err(SavedBookValidationError::NoAuthors));
    }

    #[rstest]
    fn rejects_blank_title(mut draft: SavedBookDraft) {
        draft.title = " ".to_owned();
        assert_eq!(SavedBook::new(draft), Err(SavedBookValidationError::EmptyTitle));
    }

    #[rstest]
    fn rejects_update_before_creation(mut draft: SavedBookDraft) {
        draft.updated_at = draft.created_at - Duration::seconds(1);
        assert_eq!(
            SavedBook::new(draft),
            Err(SavedBookValidationError::UpdatedBeforeCreated)
        );
    }

    #[rstest]
    fn hydration_applies_placeholders() {
        let book = SavedBook::from_catalog(
            SavedBookId::random(),
            UserId::random(),
            ExternalBookId::new("OL1W").expect("valid id"),
            BookDetail {
                title: Some("  ".to_owned()),
                ..BookDetail::default()
            },
            Utc::now(),
        );

        assert_eq!(book.title(), UNTITLED);
        assert_eq!(book.authors(), [UNKNOWN_AUTHOR]);
        assert_eq!(book.publish_year(), UNKNOWN_YEAR);
        assert_eq!(book.description(), NO_DESCRIPTION);
        assert!(book.isbns().is_empty());
        assert!(book.cover_url().is_none());
    }

    #[rstest]
    fn hydration_keeps_catalog_values() {
        let now = Utc::now();
        let book = SavedBook::from_catalog(
            SavedBookId::random(),
            UserId::random(),
            ExternalBookId::new("OL45804W").expect("valid id"),
            BookDetail {
                key: "/works/OL45804W".to_owned(),
                title: Some("Fantastic Mr Fox".to_owned()),
                description: Some("A fox outwits three farmers.".to_owned()),
                subjects: vec!["Foxes".to_owned()],
                cover_urls: vec![
                    "https://covers.example/b/id/1-L.jpg".to_owned(),
                    "https://covers.example/b/id/2-L.jpg".to_owned(),
                ],
                authors: vec![BookAuthor {
                    name: "Roald Dahl".to_owned(),
                    key: "/authors/OL34184A".to_owned(),
                }],
                publish_year: Some("1970".to_owned()),
                isbns: vec!["0140328726".to_owned()],
                ..BookDetail::default()
            },
            now,
        );

        assert_eq!(book.title(), "Fantastic Mr Fox");
        assert_eq!(book.authors(), ["Roald Dahl"]);
        assert_eq!(book.publish_year(), "1970");
        assert_eq!(book.cover_url(), Some("https://covers.example/b/id/1-L.jpg"));
        assert_eq!(book.isbns(), ["0140328726"]);
        assert_eq!(book.created_at(), now);
        assert_eq!(book.updated_at(), now);
    }
}
