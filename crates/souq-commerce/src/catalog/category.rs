//! Category and brand types, plus facet extraction.

use std::collections::HashSet;

use crate::catalog::Product;
use crate::ids::{BrandId, CategoryId};
use serde::{Deserialize, Serialize};

/// A product category as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name, the value products reference.
    pub name: String,
    /// URL-friendly slug.
    #[serde(default)]
    pub slug: String,
    /// Category image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Number of products in this category.
    #[serde(default)]
    pub products_count: Option<u64>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: crate::catalog::slugify(&name),
            name,
            image: None,
            products_count: None,
        }
    }

    /// Check if any products are listed under this category.
    ///
    /// Unknown counts are treated as non-empty.
    pub fn has_products(&self) -> bool {
        self.products_count.map_or(true, |n| n > 0)
    }
}

/// A brand as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    /// Unique brand identifier.
    pub id: BrandId,
    /// Brand name, the value products reference.
    pub name: String,
    /// URL-friendly slug.
    #[serde(default)]
    pub slug: String,
    /// Logo URL.
    #[serde(default)]
    pub logo: Option<String>,
}

impl Brand {
    pub fn new(id: impl Into<BrandId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: crate::catalog::slugify(&name),
            name,
            logo: None,
        }
    }
}

/// Distinct category names across `products`, in first-seen order.
pub fn unique_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .flat_map(|p| p.categories.iter())
        .filter(|c| seen.insert(c.as_str()))
        .cloned()
        .collect()
}

/// Distinct non-empty brand names across `products`, in first-seen order.
pub fn unique_brands(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .map(|p| p.brand.as_str())
        .filter(|b| !b.is_empty() && seen.insert(*b))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: u64, brand: &str, categories: &[&str]) -> Product {
        categories.iter().fold(
            Product::simple(id, format!("p{id}"), Money::from_major(1, Currency::SYP))
                .with_brand(brand),
            |p, c| p.with_category(*c),
        )
    }

    #[test]
    fn test_unique_categories_first_seen_order() {
        let products = vec![
            product(1, "A", &["Oils", "Food"]),
            product(2, "B", &["Soap"]),
            product(3, "A", &["Food", "Soap"]),
        ];

        assert_eq!(unique_categories(&products), vec!["Oils", "Food", "Soap"]);
    }

    #[test]
    fn test_unique_brands_skips_empty() {
        let products = vec![product(1, "A", &[]), product(2, "", &[]), product(3, "A", &[])];
        assert_eq!(unique_brands(&products), vec!["A"]);
    }

    #[test]
    fn test_category_defaults_from_json() {
        let category: Category = serde_json::from_str(r#"{"id": 3, "name": "Oils"}"#).unwrap();
        assert_eq!(category.id, CategoryId::new(3));
        assert!(category.slug.is_empty());
        assert!(category.has_products());
    }

    #[test]
    fn test_brand_new_builds_slug() {
        let brand = Brand::new(1, "Aleppo Soap");
        assert_eq!(brand.slug, "aleppo-soap");
    }
}
