//! Resolution of page-number query parameters into bounded requests.

use thiserror::Error;

/// Page size used when a request does not name one.
pub const DEFAULT_PAGE_SIZE: u64 = 6;
/// Largest page size a client may request.
pub const DEFAULT_MAX_PAGE_SIZE: u64 = 100;

/// Errors raised while resolving or applying pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    /// The page number was zero.
    #[error("page must be a positive integer")]
    InvalidPage,
    /// The page size was zero.
    #[error("limit must be a positive integer")]
    InvalidLimit,
    /// The requested page lies past the last populated page.
    #[error("page {page} is out of range")]
    OutOfRange {
        /// Requested page number.
        page: u64,
    },
}

/// Default and maximum page sizes applied to list endpoints.
///
/// # Examples
/// ```
/// use pagination::PageLimits;
///
/// let limits = PageLimits::new(6, 50);
/// let request = limits.resolve(Some(2), Some(500)).expect("valid request");
/// assert_eq!(request.limit(), 50);
/// assert_eq!(request.offset(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    default_size: u64,
    max_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGE_SIZE)
    }
}

impl PageLimits {
    /// Build limits, keeping the default within `1..=max_size`.
    #[must_use]
    pub const fn new(default_size: u64, max_size: u64) -> Self {
        let max = if max_size == 0 { 1 } else { max_size };
        let default = if default_size == 0 {
            1
        } else if default_size > max {
            max
        } else {
            default_size
        };
        Self {
            default_size: default,
            max_size: max,
        }
    }

    /// Page size applied when the client omits `limit`.
    #[must_use]
    pub const fn default_size(&self) -> u64 {
        self.default_size
    }

    /// Upper bound applied to client-supplied `limit` values.
    #[must_use]
    pub const fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Resolve optional `page` and `limit` parameters.
    ///
    /// A missing page means the first page. A missing limit means the default
    /// size, and a limit above the maximum is clamped to the maximum.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::InvalidPage`] or [`PageError::InvalidLimit`] when
    /// either value is zero.
    pub const fn resolve(
        &self,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<PageRequest, PageError> {
        let page_number = match page {
            None => 1,
            Some(0) => return Err(PageError::InvalidPage),
            Some(value) => value,
        };
        let size = match limit {
            None => self.default_size,
            Some(0) => return Err(PageError::InvalidLimit),
            Some(value) if value > self.max_size => self.max_size,
            Some(value) => value,
        };
        Ok(PageRequest {
            page: page_number,
            limit: size,
        })
    }
}

/// A validated 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Request the first page with the given size (at least one item).
    #[must_use]
    pub const fn first(limit: u64) -> Self {
        Self {
            page: 1,
            limit: if limit == 0 { 1 } else { limit },
        }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of items preceding this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Whether another page follows this one for a collection of `total` items.
    #[must_use]
    pub const fn has_next(&self, total: u64) -> bool {
        self.offset().saturating_add(self.limit) < total
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Reject pages that start past the end of the collection.
    ///
    /// The first page is always in range, even for an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] when the page is empty and is not the
    /// first page.
    pub const fn ensure_in_range(&self, total: u64) -> Result<(), PageError> {
        if self.page > 1 && self.offset() >= total {
            return Err(PageError::OutOfRange { page: self.page });
        }
        Ok(())
    }
}
