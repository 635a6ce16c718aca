//! Pages and pagination metadata.

use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub current_page: usize,
    /// Items per page.
    pub page_size: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages, zero for an empty list.
    pub total_pages: usize,
    /// `(page - 1) * page_size + 1`. Past the end this exceeds `to`.
    pub from: usize,
    /// `min(page * page_size, total)`.
    pub to: usize,
    /// Whether there's a next page.
    pub has_more: bool,
}

impl Pagination {
    /// Create pagination info. Zero page or page size is treated as 1.
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size);

        let start = (page - 1).saturating_mul(page_size);
        let from = start.saturating_add(1);
        let to = start.saturating_add(page_size).min(total);

        Self {
            current_page: page,
            page_size,
            total,
            total_pages,
            from,
            to,
            has_more: page < total_pages,
        }
    }

    /// Index range of this page within the full list.
    /// Empty when the page is past the end.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        start.min(self.total)..self.to
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.current_page == 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// Page number strip for navigation.
    ///
    /// Shows `window` pages on each side of the current one, plus the first
    /// and last pages, with gaps where numbers are skipped. A single page
    /// needs no strip.
    pub fn page_links(&self, window: usize) -> Vec<PageLink> {
        if self.total_pages <= 1 {
            return Vec::new();
        }

        let current = self.current_page.min(self.total_pages);
        let start = current.saturating_sub(window).max(1);
        let end = current.saturating_add(window).min(self.total_pages);

        let mut links = Vec::new();
        if start > 1 {
            links.push(PageLink::Page(1));
            if start > 2 {
                links.push(PageLink::Gap);
            }
        }
        links.extend((start..=end).map(PageLink::Page));
        if end < self.total_pages {
            if end + 1 < self.total_pages {
                links.push(PageLink::Gap);
            }
            links.push(PageLink::Page(self.total_pages));
        }
        links
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, crate::search::DEFAULT_PAGE_SIZE, 0)
    }
}

/// One entry of a page number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLink {
    Page(usize),
    Gap,
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// The items on this page.
    pub data: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        Self { data, pagination }
    }

    /// Create an empty first page.
    pub fn empty(page_size: usize) -> Self {
        Self::new(Vec::new(), Pagination::new(1, page_size, 0))
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// Slice `items` into the requested 1-indexed page.
///
/// Pages past the end are empty rather than an error.
pub fn paginate_products<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let pagination = Pagination::new(page, page_size, items.len());
    let range = pagination.range();
    let data = items
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect();
    Page::new(data, pagination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert_eq!((p.from, p.to), (11, 20));
        assert!(p.has_more);
        assert!(!p.is_first());
    }

    #[test]
    fn test_pagination_last_page() {
        let p = Pagination::new(5, 10, 45);
        assert_eq!((p.from, p.to), (41, 45));
        assert!(!p.has_more);
        assert!(p.is_last());
    }

    #[test]
    fn test_pagination_empty_list() {
        let p = Pagination::new(1, 8, 0);
        assert_eq!(p.total_pages, 0);
        assert_eq!((p.from, p.to), (1, 0));
        assert!(p.range().is_empty());
        assert!(!p.has_more);
    }

    #[test]
    fn test_zero_inputs_are_raised() {
        let p = Pagination::new(0, 0, 3);
        assert_eq!(p.current_page, 1);
        assert_eq!(p.page_size, 1);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_paginate_slices() {
        let page = paginate_products((1..=10).collect::<Vec<_>>(), 2, 4);
        assert_eq!(page.data, vec![5, 6, 7, 8]);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn test_paginate_beyond_end_is_empty() {
        let page = paginate_products(vec!['a', 'b'], 7, 2);
        assert!(page.is_empty());
        assert_eq!(page.pagination.total, 2);
        assert_eq!((page.pagination.from, page.pagination.to), (13, 2));
        assert!(!page.pagination.has_more);

        let page = paginate_products(vec![1, 2], 3, 2);
        assert!(page.is_empty());
        assert_eq!((page.pagination.from, page.pagination.to), (5, 2));
    }

    #[test]
    fn test_page_links_with_gaps() {
        use PageLink::{Gap, Page};

        let p = Pagination::new(6, 1, 12);
        assert_eq!(
            p.page_links(2),
            vec![Page(1), Gap, Page(4), Page(5), Page(6), Page(7), Page(8), Gap, Page(12)]
        );

        let p = Pagination::new(1, 1, 4);
        assert_eq!(p.page_links(2), vec![Page(1), Page(2), Page(3), Page(4)]);

        let p = Pagination::new(4, 1, 7);
        assert_eq!(
            p.page_links(1),
            vec![Page(1), Gap, Page(3), Page(4), Page(5), Gap, Page(7)]
        );
    }

    #[test]
    fn test_page_links_single_page() {
        assert!(Pagination::new(1, 8, 5).page_links(2).is_empty());
    }
}
