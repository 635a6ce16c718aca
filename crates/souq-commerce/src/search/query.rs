//! Filtering and ordering of a product list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::money::Currency;
use crate::search::{collation, FilterSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// Higher ids first.
    Newest,
    /// Featured products first.
    Featured,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::Newest,
        SortOption::Featured,
    ];

    /// Parse a sort key. Unknown or empty keys mean "no sort".
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "price_asc" => Some(SortOption::PriceAsc),
            "price_desc" => Some(SortOption::PriceDesc),
            "name_asc" => Some(SortOption::NameAsc),
            "name_desc" => Some(SortOption::NameDesc),
            "newest" => Some(SortOption::Newest),
            "featured" => Some(SortOption::Featured),
            _ => None,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::NameAsc => "name_asc",
            SortOption::NameDesc => "name_desc",
            SortOption::Newest => "newest",
            SortOption::Featured => "featured",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
            SortOption::Newest => "Newest",
            SortOption::Featured => "Featured",
        }
    }

    /// Ordering of two products under this option.
    ///
    /// Products without a price sort after priced ones in both price
    /// directions.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::PriceAsc => by_price(a, b, false),
            SortOption::PriceDesc => by_price(a, b, true),
            SortOption::NameAsc => collation::compare(&a.name, &b.name),
            SortOption::NameDesc => collation::compare(&b.name, &a.name),
            SortOption::Newest => b.id.cmp(&a.id),
            SortOption::Featured => b.featured.cmp(&a.featured),
        }
    }
}

fn by_price(a: &Product, b: &Product, descending: bool) -> Ordering {
    let a = a.representative_price().map(|m| m.amount_minor);
    let b = b.representative_price().map(|m| m.amount_minor);
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::from_key(s).ok_or_else(|| {
            let keys: Vec<_> = SortOption::ALL.iter().map(SortOption::as_key).collect();
            format!("unknown sort '{s}', expected one of: {}", keys.join(", "))
        })
    }
}

/// Apply `spec`'s filters to `products`, then order the survivors.
///
/// Pure and deterministic. The sort is stable, so ties keep input order;
/// without a sort option the input order is preserved. Pagination fields of
/// `spec` are ignored.
pub fn filter_products(products: &[Product], spec: &FilterSpec) -> Vec<Product> {
    let currency = products
        .iter()
        .find_map(Product::representative_price)
        .map(|m| m.currency)
        .unwrap_or(Currency::default());
    let range = spec.price_range(currency);

    let mut matched: Vec<Product> = products
        .iter()
        .filter(|p| spec.matches(p, &range))
        .cloned()
        .collect();

    if let Some(sort) = spec.sort {
        matched.sort_by(|a, b| sort.compare(a, b));
    }

    debug!(
        input = products.len(),
        matched = matched.len(),
        sort = spec.sort.map(|s| s.as_key()),
        "filtered products"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn syp(amount: i64) -> Money {
        Money::from_major(amount, Currency::SYP)
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::simple(1u64, "Tea", syp(300)),
            Product::simple(2u64, "Coffee", syp(500)).with_featured(true),
            Product::simple(3u64, "Honey", syp(200)).with_featured(true),
        ]
    }

    #[test]
    fn test_sort_keys_roundtrip() {
        for sort in SortOption::ALL {
            assert_eq!(SortOption::from_key(sort.as_key()), Some(sort));
        }
        assert_eq!(SortOption::from_key(""), None);
        assert_eq!(SortOption::from_key("rating"), None);
        assert!("rating".parse::<SortOption>().is_err());
    }

    #[test]
    fn test_featured_price_asc() {
        let spec = FilterSpec::new()
            .with_featured_only(true)
            .with_sort(Some(SortOption::PriceAsc));

        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![3, 2]);
    }

    #[test]
    fn test_no_sort_preserves_order() {
        let spec = FilterSpec::new();
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![1, 2, 3]);
    }

    #[test]
    fn test_price_desc_and_newest() {
        let spec = FilterSpec::new().with_sort(Some(SortOption::PriceDesc));
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![2, 1, 3]);

        let spec = FilterSpec::new().with_sort(Some(SortOption::Newest));
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![3, 2, 1]);
    }

    #[test]
    fn test_featured_sort_is_stable() {
        let spec = FilterSpec::new().with_sort(Some(SortOption::Featured));
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![2, 3, 1]);
    }

    #[test]
    fn test_name_sort() {
        let spec = FilterSpec::new().with_sort(Some(SortOption::NameAsc));
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![2, 3, 1]);

        let spec = FilterSpec::new().with_sort(Some(SortOption::NameDesc));
        assert_eq!(ids(&filter_products(&catalog(), &spec)), vec![1, 3, 2]);
    }

    #[test]
    fn test_unpriced_sort_last() {
        let mut products = catalog();
        products[0].kind = crate::catalog::ProductKind::Simple { price: None };

        for sort in [SortOption::PriceAsc, SortOption::PriceDesc] {
            let spec = FilterSpec::new().with_sort(Some(sort));
            assert_eq!(ids(&filter_products(&products, &spec)).last(), Some(&1));
        }
    }

    #[test]
    fn test_empty_input() {
        let spec = FilterSpec::new().with_search("anything");
        assert!(filter_products(&[], &spec).is_empty());
    }
}
