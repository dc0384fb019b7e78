//! Query-string access for list endpoints.
//!
//! `serde_urlencoded` cannot collect repeated keys such as `tags=a&tags=b`,
//! so list handlers read the raw pairs through [`QueryParams`] instead of
//! `web::Query`.

use actix_web::HttpRequest;
use pagination::{Page, PageLimits, PageRequest, PageSlice};
use url::{Url, form_urlencoded};

use super::validation::{FieldName, page_error, parse_count, parse_flag};
use crate::domain::Error;

const PAGE: FieldName = FieldName::new("page");
const LIMIT: FieldName = FieldName::new("limit");

/// Decoded query pairs in request order.
#[derive(Debug, Clone, Default)]
pub(crate) struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub(crate) fn from_request(req: &HttpRequest) -> Self {
        Self::parse(req.query_string())
    }

    pub(crate) fn parse(query: &str) -> Self {
        Self(form_urlencoded::parse(query.as_bytes()).into_owned().collect())
    }

    /// First value for `name`.
    pub(crate) fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value for `name`, in order.
    pub(crate) fn all(&self, name: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Boolean flag; absent means `false`.
    pub(crate) fn flag(&self, field: FieldName, name: &str) -> Result<bool, Error> {
        self.first(name)
            .map_or(Ok(false), |value| parse_flag(field, value))
    }

    /// Optional non-negative integer.
    pub(crate) fn count(&self, field: FieldName, name: &str) -> Result<Option<u64>, Error> {
        self.first(name)
            .map(|value| parse_count(field, value))
            .transpose()
    }

    /// Resolve `page` and `limit` against the configured limits.
    pub(crate) fn page_request(&self, limits: PageLimits) -> Result<PageRequest, Error> {
        let page = self.count(PAGE, "page")?;
        let limit = self.count(LIMIT, "limit")?;
        limits.resolve(page, limit).map_err(page_error)
    }
}

/// Absolute URL of the current request, used to build page links.
pub(crate) fn request_url(req: &HttpRequest) -> Result<Url, Error> {
    let info = req.connection_info();
    let raw = format!("{}://{}{}", info.scheme(), info.host(), req.uri());
    Url::parse(&raw).map_err(|err| Error::internal(format!("invalid request URL {raw}: {err}")))
}

/// Render a page envelope, converting items with `render`.
pub(crate) fn page_envelope<T, U>(
    req: &HttpRequest,
    request: PageRequest,
    slice: PageSlice<T>,
    render: impl FnMut(T) -> U,
) -> Result<Page<U>, Error> {
    let base = request_url(req)?;
    Page::from_slice(request, slice.map(render), &base).map_err(page_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    fn repeated_keys_are_kept_in_order() {
        let params = QueryParams::parse("tags=lunch&author=x&tags=dinner%20party");
        assert_eq!(params.all("tags"), vec!["lunch", "dinner party"]);
        assert_eq!(params.first("author"), Some("x"));
        assert!(params.first("limit").is_none());
    }

    #[rstest]
    #[case("", 1, 6)]
    #[case("page=3", 3, 6)]
    #[case("page=2&limit=500", 2, 100)]
    fn page_parameters_resolve_with_defaults_and_clamp(
        #[case] query: &str,
        #[case] page: u64,
        #[case] limit: u64,
    ) {
        let request = QueryParams::parse(query)
            .page_request(PageLimits::default())
            .expect("valid page");
        assert_eq!((request.page(), request.limit()), (page, limit));
    }

    #[rstest]
    #[case("page=0")]
    #[case("limit=0")]
    #[case("page=first")]
    #[case("limit=-3")]
    fn bad_page_parameters_are_invalid_requests(#[case] query: &str) {
        let err = QueryParams::parse(query)
            .page_request(PageLimits::default())
            .expect_err("invalid page");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn envelope_links_are_absolute_and_keep_filters() {
        let req = TestRequest::get()
            .uri("/api/recipes?tags=lunch&page=1&limit=2")
            .insert_header(("host", "larder.test"))
            .to_http_request();
        let request = QueryParams::from_request(&req)
            .page_request(PageLimits::default())
            .expect("valid page");

        let page = page_envelope(&req, request, PageSlice::new(3, vec![1, 2]), |n| n * 10)
            .expect("in range");

        assert_eq!(page.results, vec![10, 20]);
        assert_eq!(
            page.next.as_deref(),
            Some("http://larder.test/api/recipes?tags=lunch&page=2&limit=2")
        );
    }

    #[rstest]
    fn page_past_the_end_is_not_found() {
        let req = TestRequest::get()
            .uri("/api/users?page=4&limit=2")
            .to_http_request();
        let request = QueryParams::from_request(&req)
            .page_request(PageLimits::default())
            .expect("valid page");

        let err = page_envelope(&req, request, PageSlice::new(3, Vec::<u8>::new()), |n| n)
            .expect_err("out of range");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
