//! The product listing state: server pages vs. local re-pagination.

use crate::catalog::{unique_brands, unique_categories, Product};
use crate::search::{filter_products, paginate_products, FilterSpec, Page};
use tracing::debug;

/// Listing state for one product grid.
///
/// The backend serves pre-paginated pages. While no client-side filter is
/// active the fetched page is shown as-is with the server's pagination.
/// Once any filter or sort is active, the fetched products are filtered
/// and paginated locally instead. Filtering only sees what was fetched:
/// with a single server page loaded, matches on other pages are not found.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    spec: FilterSpec,
    fetched: Option<Page<Product>>,
}

impl CatalogView {
    pub fn new(spec: FilterSpec) -> Self {
        Self {
            spec,
            fetched: None,
        }
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Store a page returned by the backend.
    pub fn load(&mut self, page: Page<Product>) {
        debug!(
            products = page.len(),
            page = page.pagination.current_page,
            total = page.pagination.total,
            "loaded catalog page"
        );
        self.fetched = Some(page);
    }

    /// The last page loaded from the backend.
    pub fn fetched(&self) -> Option<&Page<Product>> {
        self.fetched.as_ref()
    }

    /// Replace the filters. Always returns to the first page; the page size
    /// is kept.
    pub fn set_filters(&mut self, spec: FilterSpec) {
        let page_size = self.spec.page_size;
        self.spec = FilterSpec {
            page: 1,
            page_size,
            ..spec
        };
    }

    /// Reset every filter to its default, including the page size.
    pub fn clear_filters(&mut self) {
        self.spec = FilterSpec::default();
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.spec.page_size = page_size.max(1);
        self.spec.page = 1;
    }

    /// Navigate to `page` without touching the filters.
    pub fn go_to_page(&mut self, page: usize) {
        self.spec.page = page.max(1);
    }

    /// Whether the listing is re-paginated locally.
    pub fn is_filtering(&self) -> bool {
        self.spec.is_active()
    }

    /// Check if the backend page must be (re)fetched before rendering.
    ///
    /// Only server mode fetches on navigation; while filtering, navigation
    /// pages through what is already loaded.
    pub fn needs_fetch(&self) -> bool {
        match &self.fetched {
            None => true,
            Some(_) if self.is_filtering() => false,
            Some(page) => {
                page.pagination.current_page != self.spec.page
                    || page.pagination.page_size != self.spec.page_size
            }
        }
    }

    /// The `(page, page_size)` to request from the backend.
    pub fn fetch_request(&self) -> (usize, usize) {
        (self.spec.page, self.spec.page_size)
    }

    /// The page to render.
    pub fn visible(&self) -> Page<Product> {
        let Some(fetched) = &self.fetched else {
            return Page::empty(self.spec.page_size);
        };

        if !self.is_filtering() {
            return fetched.clone();
        }

        let matched = filter_products(&fetched.data, &self.spec);
        paginate_products(matched, self.spec.page, self.spec.page_size)
    }

    /// Category facet values from the loaded products.
    pub fn categories(&self) -> Vec<String> {
        self.fetched
            .as_ref()
            .map(|p| unique_categories(&p.data))
            .unwrap_or_default()
    }

    /// Brand facet values from the loaded products.
    pub fn brands(&self) -> Vec<String> {
        self.fetched
            .as_ref()
            .map(|p| unique_brands(&p.data))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};
    use crate::search::{Pagination, SortOption};

    fn product(id: u64, price: i64, featured: bool) -> Product {
        Product::simple(id, format!("p{id}"), Money::from_major(price, Currency::SYP))
            .with_featured(featured)
            .with_category(if id % 2 == 0 { "Even" } else { "Odd" })
    }

    fn server_page() -> Page<Product> {
        let data = (1..=4).map(|id| product(id, id as i64 * 100, id > 2)).collect();
        Page::new(data, Pagination::new(1, 4, 10))
    }

    #[test]
    fn test_server_mode_shows_fetched_page() {
        let mut view = CatalogView::new(FilterSpec::new().with_pagination(1, 4));
        assert!(view.needs_fetch());

        view.load(server_page());
        assert!(!view.needs_fetch());

        let visible = view.visible();
        assert_eq!(visible.len(), 4);
        assert_eq!(visible.pagination.total, 10);
    }

    #[test]
    fn test_navigation_in_server_mode_refetches() {
        let mut view = CatalogView::new(FilterSpec::new().with_pagination(1, 4));
        view.load(server_page());

        view.go_to_page(2);
        assert!(view.needs_fetch());
        assert_eq!(view.fetch_request(), (2, 4));
    }

    #[test]
    fn test_filtering_repaginates_locally() {
        let mut view = CatalogView::new(FilterSpec::new().with_pagination(1, 4));
        view.load(server_page());
        view.go_to_page(3);

        view.set_filters(FilterSpec::new().with_featured_only(true).with_pagination(5, 99));
        assert_eq!(view.spec().page, 1);
        assert_eq!(view.spec().page_size, 4);
        assert!(!view.needs_fetch());

        let visible = view.visible();
        let ids: Vec<u64> = visible.data.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(visible.pagination.total, 2);
        assert_eq!(visible.pagination.total_pages, 1);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut view = CatalogView::new(
            FilterSpec::new()
                .with_sort(Some(SortOption::PriceDesc))
                .with_pagination(1, 1),
        );
        view.load(server_page());
        view.go_to_page(2);
        assert_eq!(view.visible().data[0].id.get(), 3);

        view.set_page_size(2);
        assert_eq!(view.spec().page, 1);
        assert_eq!(view.visible().len(), 2);
    }

    #[test]
    fn test_facets_from_loaded_products() {
        let mut view = CatalogView::default();
        assert!(view.categories().is_empty());

        view.load(server_page());
        assert_eq!(view.categories(), vec!["Odd", "Even"]);
    }

    #[test]
    fn test_clear_filters() {
        let mut view = CatalogView::new(FilterSpec::new().with_search("x").with_pagination(3, 12));
        view.clear_filters();
        assert_eq!(view.spec(), &FilterSpec::default());
    }
}
