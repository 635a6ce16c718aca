//! Filter spec for catalog browsing.

use crate::catalog::Product;
use crate::money::{Currency, Money};
use crate::search::SortOption;
use serde::{Deserialize, Serialize};

/// Storefront default page size.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Page sizes offered to shoppers.
pub const PAGE_SIZE_CHOICES: [usize; 4] = [8, 12, 16, 24];

/// Everything the shopper has chosen on the product listing.
///
/// Price bounds are kept as the raw text the shopper typed; they are parsed
/// leniently when the filter runs and an unparseable bound counts as absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilterSpec {
    pub search_text: String,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub featured_only: bool,
    pub sort: Option<SortOption>,
    /// Current page (1-indexed).
    pub page: usize,
    pub page_size: usize,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            categories: Vec::new(),
            brands: Vec::new(),
            price_min: None,
            price_max: None,
            featured_only: false,
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Add a category to the selection.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    /// Add a brand to the selection.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        let brand = brand.into();
        if !self.brands.contains(&brand) {
            self.brands.push(brand);
        }
        self
    }

    /// Set the price bounds as typed.
    pub fn with_price_range(mut self, min: Option<String>, max: Option<String>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_featured_only(mut self, featured_only: bool) -> Self {
        self.featured_only = featured_only;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortOption>) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination. Zero values are raised to 1.
    pub fn with_pagination(mut self, page: usize, page_size: usize) -> Self {
        self.page = page.max(1);
        self.page_size = page_size.max(1);
        self
    }

    /// Trimmed, case-folded search text, or None when blank.
    pub fn search_term(&self) -> Option<String> {
        let term = self.search_text.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    /// Check if the shopper typed any price bound.
    pub fn has_price_filter(&self) -> bool {
        is_given(&self.price_min) || is_given(&self.price_max)
    }

    /// Parsed price bounds in `currency`. Unparseable text is None.
    pub fn price_range(&self, currency: Currency) -> PriceRange {
        PriceRange {
            min: parse_bound(&self.price_min, currency),
            max: parse_bound(&self.price_max, currency),
        }
    }

    /// Check if any client-side narrowing or ordering is requested.
    ///
    /// Page and page size are not filters.
    pub fn is_active(&self) -> bool {
        self.search_term().is_some()
            || !self.categories.is_empty()
            || !self.brands.is_empty()
            || self.has_price_filter()
            || self.featured_only
            || self.sort.is_some()
    }

    /// Same filters, ignoring pagination.
    pub fn same_filters(&self, other: &FilterSpec) -> bool {
        self.search_text == other.search_text
            && self.categories == other.categories
            && self.brands == other.brands
            && self.price_min == other.price_min
            && self.price_max == other.price_max
            && self.featured_only == other.featured_only
            && self.sort == other.sort
    }

    /// Check if `product` passes every filter (sorting aside).
    pub fn matches(&self, product: &Product, range: &PriceRange) -> bool {
        if let Some(term) = self.search_term() {
            let hit = [&product.name, &product.description, &product.brand]
                .iter()
                .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        if !self.categories.is_empty()
            && !product.categories.iter().any(|c| self.categories.contains(c))
        {
            return false;
        }

        if !self.brands.is_empty() && !self.brands.contains(&product.brand) {
            return false;
        }

        if self.has_price_filter() && !range.contains(product.representative_price()) {
            return false;
        }

        !self.featured_only || product.featured
    }
}

fn is_given(bound: &Option<String>) -> bool {
    bound.as_deref().is_some_and(|b| !b.trim().is_empty())
}

fn parse_bound(bound: &Option<String>, currency: Currency) -> Option<Money> {
    bound
        .as_deref()
        .and_then(|text| Money::parse_lenient(text, currency))
}

/// Inclusive price bounds. A missing minimum is zero, a missing maximum is
/// unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceRange {
    pub min: Option<Money>,
    pub max: Option<Money>,
}

impl PriceRange {
    /// Check if `price` falls within the bounds. No price never does.
    pub fn contains(&self, price: Option<Money>) -> bool {
        let Some(price) = price else {
            return false;
        };
        let above_min = match self.min {
            Some(min) => min.currency == price.currency && price.amount_minor >= min.amount_minor,
            None => price.amount_minor >= 0,
        };
        let below_max = match self.max {
            Some(max) => max.currency == price.currency && price.amount_minor <= max.amount_minor,
            None => true,
        };
        above_min && below_max
    }
}
