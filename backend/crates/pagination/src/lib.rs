//! Page-number pagination primitives shared by bookshelf endpoints.
//!
//! Endpoints accept an optional `page` and `limit`, validate them into a
//! [`PageRequest`], and echo the effective values back inside a
//! [`Pagination`] envelope alongside the upstream total.

use serde::{Deserialize, Serialize};

/// Page number used when the caller omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller omits `limit`.
pub const DEFAULT_LIMIT: u32 = 10;

/// Validation failures raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers start at one.
    #[error("page must be a positive integer")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("limit must be a positive integer")]
    ZeroLimit,
}

/// Validated one-based page number and page size.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(2, 5).expect("valid request");
/// assert_eq!(request.page(), 2);
/// assert_eq!(request.limit(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate an explicit page number and page size.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either value is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    /// Validate optional values, substituting [`DEFAULT_PAGE`] and
    /// [`DEFAULT_LIMIT`] for the missing ones.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when a supplied value is zero.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, DEFAULT_LIMIT};
    ///
    /// let request = PageRequest::from_optional(Some(3), None).expect("valid request");
    /// assert_eq!(request.page(), 3);
    /// assert_eq!(request.limit(), DEFAULT_LIMIT);
    /// ```
    pub fn from_optional(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageRequestError> {
        Self::new(page.unwrap_or(DEFAULT_PAGE), limit.unwrap_or(DEFAULT_LIMIT))
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination envelope echoed back to clients.
///
/// `total` is the number of matches reported by the source, not the number
/// of items on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Page number that was served.
    pub page: u32,
    /// Page size that was applied.
    pub limit: u32,
    /// Number of pages needed to cover `total` at `limit` items per page.
    pub pages: u64,
}

impl Pagination {
    /// Build the envelope for a request and the source's total match count.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, Pagination};
    ///
    /// let request = PageRequest::new(1, 5).expect("valid request");
    /// let envelope = Pagination::new(request, 11);
    /// assert_eq!(envelope.pages, 3);
    /// ```
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            total,
            page: request.page,
            limit: request.limit,
            pages: total.div_ceil(u64::from(request.limit)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page validation and envelope arithmetic.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 10, PageRequestError::ZeroPage)]
    #[case(1, 0, PageRequestError::ZeroLimit)]
    #[case(0, 0, PageRequestError::ZeroPage)]
    fn rejects_zero_values(#[case] page: u32, #[case] limit: u32, #[case] expected: PageRequestError) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    fn missing_values_use_defaults() {
        let request = PageRequest::from_optional(None, None).expect("defaults are valid");
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.page(), DEFAULT_PAGE);
        assert_eq!(request.limit(), DEFAULT_LIMIT);
    }

    #[rstest]
    #[case(0, 5, 0)]
    #[case(5, 5, 1)]
    #[case(6, 5, 2)]
    #[case(1234, 5, 247)]
    #[case(9, 10, 1)]
    fn pages_round_up(#[case] total: u64, #[case] limit: u32, #[case] expected: u64) {
        let request = PageRequest::new(1, limit).expect("valid request");
        assert_eq!(Pagination::new(request, total).pages, expected);
    }

    #[rstest]
    fn envelope_serialises_all_fields() {
        let request = PageRequest::new(2, 5).expect("valid request");
        let value = serde_json::to_value(Pagination::new(request, 12)).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({ "total": 12, "page": 2, "limit": 5, "pages": 3 })
        );
    }
}
