//! DTOs for decoding Open Library JSON responses.
//!
//! Payloads are decoded into these transport types first and then mapped
//! into domain records in one pass. Fields that arrive either as a bare
//! string or as a `{type, value}` object decode through [`TextValueDto`].

use serde::Deserialize;
use tracing::debug;

use crate::domain::{BookLink, CatalogBook, ExternalBookId, UNKNOWN_YEAR, UNTITLED};

/// Text that Open Library encodes either plainly or as a typed object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum TextValueDto {
    Plain(String),
    Typed { value: String },
}

impl TextValueDto {
    pub(super) fn into_text(self) -> String {
        match self {
            Self::Plain(text) | Self::Typed { value: text } => text,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponseDto {
    #[serde(default)]
    pub(super) docs: Vec<SearchDocDto>,
    #[serde(rename = "numFound", alias = "num_found", default)]
    pub(super) num_found: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchDocDto {
    pub(super) key: Option<String>,
    pub(super) title: Option<String>,
    #[serde(default)]
    pub(super) author_name: Vec<String>,
    pub(super) first_publish_year: Option<i64>,
    #[serde(default)]
    pub(super) isbn: Vec<String>,
    pub(super) cover_i: Option<i64>,
    #[serde(default)]
    pub(super) subject: Vec<String>,
}

impl SearchDocDto {
    /// Normalise one hit. Hits without a usable work key are dropped since
    /// they could never be saved.
    pub(super) fn into_domain(self, covers_base: &str) -> Option<CatalogBook> {
        let key = self.key?;
        let external_id = match ExternalBookId::from_catalog_key(&key) {
            Ok(id) => id,
            Err(error) => {
                debug!(%key, %error, "skipping search hit with unusable key");
                return None;
            }
        };
        Some(CatalogBook {
            title: self.title.unwrap_or_else(|| UNTITLED.to_owned()),
            authors: self.author_name,
            publish_year: self
                .first_publish_year
                .map_or_else(|| UNKNOWN_YEAR.to_owned(), |year| year.to_string()),
            isbn: self.isbn.into_iter().next(),
            cover_id: self.cover_i,
            cover_url: self
                .cover_i
                .map(|id| format!("{covers_base}/b/id/{id}-M.jpg")),
            subjects: self.subject,
            key,
            external_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct WorkDto {
    pub(super) key: Option<String>,
    pub(super) title: Option<String>,
    pub(super) work_title: Option<String>,
    pub(super) description: Option<TextValueDto>,
    #[serde(default)]
    pub(super) subjects: Vec<String>,
    #[serde(default)]
    pub(super) covers: Vec<i64>,
    #[serde(default)]
    pub(super) authors: Vec<WorkAuthorDto>,
    #[serde(default)]
    pub(super) excerpts: Vec<ExcerptDto>,
    #[serde(default)]
    pub(super) links: Vec<LinkDto>,
    pub(super) first_publish_date: Option<String>,
    pub(super) publish_date: Option<String>,
    pub(super) created: Option<TextValueDto>,
    #[serde(default)]
    pub(super) isbn_10: Vec<String>,
    #[serde(default)]
    pub(super) isbn_13: Vec<String>,
}

impl WorkDto {
    /// Author keys in listed order; entries without a key are skipped.
    pub(super) fn author_keys(&self) -> Vec<String> {
        self.authors
            .iter()
            .filter_map(|entry| entry.author.as_ref())
            .filter_map(|author| author.key.clone())
            .collect()
    }

    pub(super) fn title(&self) -> Option<String> {
        self.title.clone().or_else(|| self.work_title.clone())
    }

    /// First publication date, falling back to the publish date and then the
    /// year the record was created.
    pub(super) fn publish_year(&self) -> Option<String> {
        self.first_publish_date
            .clone()
            .or_else(|| self.publish_date.clone())
            .or_else(|| {
                self.created
                    .clone()
                    .map(TextValueDto::into_text)
                    .map(|created| created.chars().take(4).collect())
            })
            .filter(|value: &String| !value.trim().is_empty())
    }

    pub(super) fn isbns(&self) -> Vec<String> {
        if self.isbn_10.is_empty() {
            self.isbn_13.clone()
        } else {
            self.isbn_10.clone()
        }
    }

    pub(super) fn cover_urls(&self, covers_base: &str) -> Vec<String> {
        self.covers
            .iter()
            .filter(|id| **id > 0)
            .map(|id| format!("{covers_base}/b/id/{id}-L.jpg"))
            .collect()
    }

    pub(super) fn excerpt_texts(&self) -> Vec<String> {
        self.excerpts
            .iter()
            .filter_map(|excerpt| excerpt.excerpt.clone().or_else(|| excerpt.text.clone()))
            .map(TextValueDto::into_text)
            .collect()
    }

    pub(super) fn book_links(&self) -> Vec<BookLink> {
        self.links
            .iter()
            .map(|link| BookLink {
                url: link.url.clone().unwrap_or_default(),
                title: link.title.clone().unwrap_or_default(),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct WorkAuthorDto {
    pub(super) author: Option<KeyRefDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct KeyRefDto {
    pub(super) key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ExcerptDto {
    pub(super) excerpt: Option<TextValueDto>,
    pub(super) text: Option<TextValueDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LinkDto {
    pub(super) url: Option<String>,
    pub(super) title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorDto {
    pub(super) key: Option<String>,
    pub(super) name: Option<String>,
    pub(super) personal_name: Option<String>,
}

impl AuthorDto {
    /// Display name, preferring `name` over `personal_name`.
    ///
    /// Book details and saved-book hydration both resolve authors through
    /// this method, so they always agree on the same name for an author.
    pub(super) fn display_name(&self) -> Option<String> {
        [&self.name, &self.personal_name]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .cloned()
    }
}
