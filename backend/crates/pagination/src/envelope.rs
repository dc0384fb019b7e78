//! Paginated response envelope.

use serde::Serialize;
use url::Url;

use crate::{PageError, PageRequest};

/// One window of a collection together with the collection's total size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<T> {
    /// Total number of items across all pages.
    pub total: u64,
    /// Items on the requested page.
    pub items: Vec<T>,
}

impl<T> PageSlice<T> {
    /// Build a slice from its parts.
    #[must_use]
    pub const fn new(total: u64, items: Vec<T>) -> Self {
        Self { total, items }
    }

    /// Transform each item, keeping the total.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageSlice<U> {
        PageSlice {
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// `{count, next, previous, results}` envelope returned by list endpoints.
///
/// # Examples
/// ```
/// use pagination::{Page, PageRequest, PageSlice};
/// use url::Url;
///
/// let base = Url::parse("https://larder.example/api/tags").expect("valid URL");
/// let page = Page::from_slice(PageRequest::first(2), PageSlice::new(3, vec![1, 2]), &base)
///     .expect("first page is in range");
/// assert_eq!(page.count, 3);
/// assert!(page.previous.is_none());
/// assert_eq!(
///     page.next.as_deref(),
///     Some("https://larder.example/api/tags?page=2&limit=2")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Total number of items across all pages.
    pub count: u64,
    /// Absolute link to the following page, if any.
    pub next: Option<String>,
    /// Absolute link to the preceding page, if any.
    pub previous: Option<String>,
    /// Items on this page.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Render a slice for `request`, deriving links from `base`.
    ///
    /// Query parameters on `base` other than `page` and `limit` are preserved
    /// so filters carry over to neighbouring pages.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] when `request` starts past the end of
    /// the collection.
    pub fn from_slice(
        request: PageRequest,
        slice: PageSlice<T>,
        base: &Url,
    ) -> Result<Self, PageError> {
        request.ensure_in_range(slice.total)?;
        let next = request
            .has_next(slice.total)
            .then(|| page_link(base, request.page().saturating_add(1), request.limit()));
        let previous = request
            .has_previous()
            .then(|| page_link(base, request.page().saturating_sub(1), request.limit()));
        Ok(Self {
            count: slice.total,
            next,
            previous,
            results: slice.items,
        })
    }
}

fn page_link(base: &Url, page: u64, limit: u64) -> String {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != "page" && key != "limit")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("page", &page.to_string())
        .append_pair("limit", &limit.to_string());
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageLimits;
    use rstest::{fixture, rstest};

    #[fixture]
    fn base() -> Url {
        Url::parse("http://localhost/api/recipes?tags=lunch&page=2&tags=dinner")
            .expect("fixture URL")
    }

    #[rstest]
    fn middle_page_links_both_neighbours_and_keeps_filters(base: Url) {
        let request = PageLimits::new(2, 10)
            .resolve(Some(2), None)
            .expect("valid request");
        let page = Page::from_slice(request, PageSlice::new(5, vec!["c", "d"]), &base)
            .expect("page in range");

        assert_eq!(
            page.next.as_deref(),
            Some("http://localhost/api/recipes?tags=lunch&tags=dinner&page=3&limit=2")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("http://localhost/api/recipes?tags=lunch&tags=dinner&page=1&limit=2")
        );
        assert_eq!(page.results, vec!["c", "d"]);
    }

    #[rstest]
    fn last_page_has_no_next_link(base: Url) {
        let request = PageLimits::new(2, 10)
            .resolve(Some(3), None)
            .expect("valid request");
        let page = Page::from_slice(request, PageSlice::new(5, vec!["e"]), &base)
            .expect("page in range");
        assert!(page.next.is_none());
        assert!(page.previous.is_some());
    }

    #[rstest]
    fn page_past_the_end_is_rejected(base: Url) {
        let request = PageLimits::new(2, 10)
            .resolve(Some(4), None)
            .expect("valid request");
        let error = Page::<&str>::from_slice(request, PageSlice::new(5, Vec::new()), &base)
            .expect_err("out of range");
        assert_eq!(error, PageError::OutOfRange { page: 4 });
    }

    #[rstest]
    fn envelope_serialises_with_expected_keys(base: Url) {
        let page = Page::from_slice(PageRequest::first(6), PageSlice::new(0, Vec::<u8>::new()), &base)
            .expect("empty first page");
        let value = serde_json::to_value(&page).expect("serialise envelope");
        assert_eq!(
            value,
            serde_json::json!({"count": 0, "next": null, "previous": null, "results": []})
        );
    }

    #[rstest]
    fn slice_map_keeps_total() {
        let slice = PageSlice::new(9, vec![1, 2]).map(|value| value * 10);
        assert_eq!(slice, PageSlice::new(9, vec![10, 20]));
    }
}
