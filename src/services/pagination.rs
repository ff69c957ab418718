//! Page-number pagination
//!
//! Translates a 1-based page number and page size into the upstream
//! offset/limit window and computes the adjacent-page links.

use url::Url;

/// Query parameter carrying the page number.
pub const PAGE_QUERY_PARAM: &str = "page";

/// A page request resolved against a known total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number, clamped to `1..=num_pages`
    pub page: u64,
    pub page_size: u64,
    pub count: u64,
}

impl Pagination {
    /// Clamps `requested_page` into the range implied by `count` and `page_size`.
    pub fn new(requested_page: u64, page_size: u64, count: u64) -> Self {
        let page_size = page_size.max(1);
        let num_pages = num_pages(count, page_size);

        Self {
            page: requested_page.clamp(1, num_pages),
            page_size,
            count,
        }
    }

    /// Number of pages; an empty collection still has one (empty) page.
    pub fn num_pages(&self) -> u64 {
        num_pages(self.count, self.page_size)
    }

    /// Upstream offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size
    }

    /// Upstream limit for this page.
    pub fn limit(&self) -> u64 {
        self.page_size
    }

    pub fn has_next(&self) -> bool {
        self.page < self.num_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// `request_url` with `page` bumped by one, or `None` on the last page.
    pub fn next_link(&self, request_url: &Url) -> Option<String> {
        if !self.has_next() {
            return None;
        }
        let next = (self.page + 1).to_string();
        Some(with_query_param(request_url, PAGE_QUERY_PARAM, Some(&next)))
    }

    /// `request_url` pointing one page back, or `None` on the first page.
    ///
    /// The link to page 1 drops the `page` parameter altogether.
    pub fn previous_link(&self, request_url: &Url) -> Option<String> {
        if !self.has_previous() {
            return None;
        }
        let previous = self.page - 1;
        if previous == 1 {
            Some(with_query_param(request_url, PAGE_QUERY_PARAM, None))
        } else {
            let previous = previous.to_string();
            Some(with_query_param(request_url, PAGE_QUERY_PARAM, Some(&previous)))
        }
    }
}

fn num_pages(count: u64, page_size: u64) -> u64 {
    count.div_ceil(page_size).max(1)
}

/// Rewrites `key` in the query string (removing it when `value` is `None`).
/// Remaining parameters are re-emitted sorted by name.
fn with_query_param(url: &Url, key: &str, value: Option<&str>) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = url.clone();
    out.set_query(None);
    if !pairs.is_empty() {
        out.query_pairs_mut().extend_pairs(pairs);
    }
    out.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn test_offset_and_limit() {
        let p = Pagination::new(3, 20, 1302);
        assert_eq!(p.offset(), 40);
        assert_eq!(p.limit(), 20);
        assert_eq!(p.num_pages(), 66);
    }

    #[test]
    fn test_page_is_clamped_to_last_page() {
        let p = Pagination::new(500, 20, 1302);
        assert_eq!(p.page, 66);
        assert_eq!(p.offset(), 1300);
        assert!(!p.has_next());
    }

    #[test]
    fn test_page_is_clamped_to_first_page() {
        let p = Pagination::new(0, 20, 1302);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let p = Pagination::new(7, 20, 0);
        assert_eq!(p.num_pages(), 1);
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_first_page_links() {
        let request = url("http://localhost:8000/api/pokemon/");
        let p = Pagination::new(1, 20, 1302);

        assert_eq!(
            p.next_link(&request).as_deref(),
            Some("http://localhost:8000/api/pokemon/?page=2")
        );
        assert_eq!(p.previous_link(&request), None);
    }

    #[test]
    fn test_links_keep_other_params_sorted() {
        let request = url("http://localhost:8000/api/pokemon/?page_size=50&page=3");
        let p = Pagination::new(3, 50, 1302);

        assert_eq!(
            p.next_link(&request).as_deref(),
            Some("http://localhost:8000/api/pokemon/?page=4&page_size=50")
        );
        assert_eq!(
            p.previous_link(&request).as_deref(),
            Some("http://localhost:8000/api/pokemon/?page=2&page_size=50")
        );
    }

    #[test]
    fn test_previous_link_to_first_page_drops_page_param() {
        let request = url("http://localhost:8000/api/pokemon/?page=2&page_size=10");
        let p = Pagination::new(2, 10, 1302);

        assert_eq!(
            p.previous_link(&request).as_deref(),
            Some("http://localhost:8000/api/pokemon/?page_size=10")
        );

        let bare = url("http://localhost:8000/api/pokemon/?page=2");
        assert_eq!(
            p.previous_link(&bare).as_deref(),
            Some("http://localhost:8000/api/pokemon/")
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let request = url("http://localhost:8000/api/pokemon/?page=66");
        let p = Pagination::new(66, 20, 1302);

        assert_eq!(p.next_link(&request), None);
        assert!(p.previous_link(&request).is_some());
    }
}
