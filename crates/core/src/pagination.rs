//! Page arithmetic for favorites listings and catalog searches.
//!
//! Everything here is pure; callers do the I/O and logging.

use std::ops::Range;

use serde::Serialize;

use crate::error::ServiceError;

/// A resolved page of a collection of `total_items` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PageWindow {
    /// Index range of this page, clipped to the collection bounds.
    ///
    /// Pages past the end yield an empty range rather than an error.
    pub fn range(&self) -> Range<usize> {
        let total = usize::try_from(self.total_items).unwrap_or(usize::MAX);
        let page_index = (self.current_page as usize).saturating_sub(1);
        let start = page_index
            .saturating_mul(self.page_size as usize)
            .min(total);
        let end = start.saturating_add(self.page_size as usize).min(total);
        start..end
    }

    pub fn has_next_page(&self) -> bool {
        u64::from(self.current_page) < self.total_pages
    }
}

/// `ceil(total_items / page_size)`, 0 for an empty collection.
pub fn total_pages(total_items: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(u64::from(page_size))
}

/// Compute the window for `page` of a favorites listing.
///
/// `page` and `page_size` must both be at least 1. `page` has no upper
/// bound.
pub fn favorites_page_window(
    total_items: u64,
    page: u32,
    page_size: u32,
) -> Result<PageWindow, ServiceError> {
    if page < 1 {
        return Err(ServiceError::invalid_argument("page must be at least 1"));
    }
    if page_size < 1 {
        return Err(ServiceError::invalid_argument(
            "page size must be at least 1",
        ));
    }

    Ok(PageWindow {
        current_page: page,
        page_size,
        total_items,
        total_pages: total_pages(total_items, page_size),
    })
}

/// Parse the provider's text-typed result count.
///
/// Returns `None` for missing or non-numeric input.
pub fn parse_total_results(text: Option<&str>) -> Option<u64> {
    text.and_then(|t| t.trim().parse::<u64>().ok())
}

/// Whether the catalog has pages beyond the `pages_fetched` already seen.
///
/// A missing or non-numeric total counts as 0, so there is no next page.
pub fn catalog_has_next_page(
    total_results_text: Option<&str>,
    page_size: u32,
    pages_fetched: u32,
) -> bool {
    let total = parse_total_results(total_results_text).unwrap_or(0);
    has_pages_after(total, page_size, pages_fetched)
}

/// Whether `total_items` split into pages of `page_size` extends past `page`.
pub fn has_pages_after(total_items: u64, page_size: u32, page: u32) -> bool {
    u64::from(page) < total_pages(total_items, page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_window_for_25_items() {
        let sizes: Vec<usize> = (1..=4)
            .map(|page| favorites_page_window(25, page, 10).unwrap().range().len())
            .collect();
        assert_eq!(sizes, vec![10, 10, 5, 0]);
        assert_eq!(favorites_page_window(25, 1, 10).unwrap().total_pages, 3);
    }

    #[test]
    fn test_window_ranges() {
        assert_eq!(favorites_page_window(25, 3, 10).unwrap().range(), 20..25);
        assert_eq!(favorites_page_window(25, 4, 10).unwrap().range(), 25..25);
        assert_eq!(favorites_page_window(25, 1, 100).unwrap().range(), 0..25);
    }

    #[test]
    fn test_empty_collection() {
        let window = favorites_page_window(0, 1, 10).unwrap();
        assert_eq!(window.total_pages, 0);
        assert_eq!(window.range(), 0..0);
        assert!(!window.has_next_page());
    }

    #[test]
    fn test_far_page_does_not_overflow() {
        let window = favorites_page_window(5, u32::MAX, u32::MAX).unwrap();
        assert!(window.range().is_empty());
    }

    #[test]
    fn test_rejects_zero_page_and_size() {
        let err = favorites_page_window(10, 0, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = favorites_page_window(10, 1, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_total_pages_exact_multiple() {
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(31, 10), 4);
        assert_eq!(total_pages(1, 10), 1);
    }

    #[test]
    fn test_has_pages_after() {
        assert!(has_pages_after(25, 10, 2));
        assert!(!has_pages_after(25, 10, 3));
        assert!(!has_pages_after(0, 10, 1));
        assert!(!has_pages_after(25, 0, 1));
    }

    #[test]
    fn test_catalog_has_next_page() {
        assert!(catalog_has_next_page(Some("25"), 10, 1));
        assert!(catalog_has_next_page(Some("25"), 10, 2));
        assert!(!catalog_has_next_page(Some("25"), 10, 3));
        assert!(!catalog_has_next_page(Some("10"), 10, 1));
    }

    #[test]
    fn test_catalog_malformed_total_means_no_next_page() {
        assert!(!catalog_has_next_page(None, 10, 0));
        assert!(!catalog_has_next_page(Some("N/A"), 10, 0));
        assert!(!catalog_has_next_page(Some(""), 10, 0));
        assert_eq!(parse_total_results(Some(" 42 ")), Some(42));
    }
}
