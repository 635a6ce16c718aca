//! Backend wire shapes.
//!
//! The storefront backend is loose about types: prices arrive as formatted
//! strings (`"86,000.00"`) or plain numbers, arrays and text fields may be
//! missing or null. These DTOs accept all of that and convert into the
//! strict domain types.

use crate::catalog::{Product, ProductKind, ProductOption};
use crate::ids::{OptionId, ProductId};
use crate::money::{Currency, Money};
use crate::search::{Page, Pagination};
use serde::{Deserialize, Serialize};

/// `{ "data": ... }` wrapper used by single-object responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
}

/// A server-paginated list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<ApiPagination>,
}

impl<T> Paginated<T> {
    /// Pagination as the domain type. A response without pagination is a
    /// single page holding everything.
    pub fn domain_pagination(&self) -> Pagination {
        match &self.pagination {
            Some(p) => p.to_domain(),
            None => Pagination::new(1, self.data.len(), self.data.len()),
        }
    }

    /// Convert items, keeping the server's pagination.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        let pagination = self.domain_pagination();
        Page::new(self.data.into_iter().map(f).collect(), pagination)
    }
}

impl Paginated<ApiProduct> {
    pub fn into_page(self, currency: Currency) -> Page<Product> {
        self.map(|p| p.into_product(currency))
    }
}

/// Backend pagination block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiPagination {
    pub current_page: usize,
    pub per_page: usize,
    pub total: usize,
    pub last_page: usize,
    #[serde(default)]
    pub from: Option<usize>,
    #[serde(default)]
    pub to: Option<usize>,
}

impl ApiPagination {
    pub fn to_domain(&self) -> Pagination {
        let current_page = self.current_page.max(1);
        Pagination {
            current_page,
            page_size: self.per_page.max(1),
            total: self.total,
            total_pages: self.last_page,
            from: self.from.unwrap_or(0),
            to: self.to.unwrap_or(0),
            has_more: current_page < self.last_page,
        }
    }
}

/// A product listing file or response: either paginated or a bare array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProductFeed {
    Paged(Paginated<ApiProduct>),
    Bare(Vec<ApiProduct>),
}

impl ProductFeed {
    pub fn into_page(self, currency: Currency) -> Page<Product> {
        match self {
            ProductFeed::Paged(paged) => paged.into_page(currency),
            ProductFeed::Bare(items) => Paginated {
                data: items,
                pagination: None,
            }
            .into_page(currency),
        }
    }
}

/// A price as the backend sends it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ApiPrice {
    Number(f64),
    Text(String),
}

impl ApiPrice {
    /// Lenient conversion. Text without digits or non-finite numbers give
    /// None.
    pub fn to_money(&self, currency: Currency) -> Option<Money> {
        match self {
            ApiPrice::Number(n) if n.is_finite() => Some(Money::from_decimal(*n, currency)),
            ApiPrice::Number(_) => None,
            ApiPrice::Text(text) => Money::parse_lenient(text, currency),
        }
    }
}

fn price(value: &Option<ApiPrice>, currency: Currency) -> Option<Money> {
    value.as_ref().and_then(|p| p.to_money(currency))
}

/// Backend product record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiProduct {
    pub id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub price: Option<ApiPrice>,
    #[serde(default)]
    pub old_price: Option<ApiPrice>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(rename = "type", default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<ApiOption>>,
}

impl ApiProduct {
    /// Convert into a domain product, pricing everything in `currency`.
    ///
    /// Only `type: "variable"` builds a variable product; anything else is
    /// simple. A missing slug is derived from the name.
    pub fn into_product(self, currency: Currency) -> Product {
        let kind = match self.product_type.as_deref() {
            Some("variable") => ProductKind::Variable {
                options: self
                    .options
                    .unwrap_or_default()
                    .into_iter()
                    .map(|o| o.into_option(currency))
                    .collect(),
            },
            _ => ProductKind::Simple {
                price: price(&self.price, currency),
            },
        };

        let name = self.name.unwrap_or_default();
        let slug = self
            .slug
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| crate::catalog::slugify(&name));

        Product {
            id: self.id,
            slug,
            name,
            description: self.description.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            categories: self.categories.unwrap_or_default(),
            images: self.images.unwrap_or_default(),
            old_price: price(&self.old_price, currency),
            featured: self.featured.unwrap_or(false),
            kind,
        }
    }
}

/// Backend option record of a variable product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiOption {
    pub id: OptionId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<ApiPrice>,
    #[serde(default)]
    pub old_price: Option<ApiPrice>,
}

impl ApiOption {
    pub fn into_option(self, currency: Currency) -> ProductOption {
        ProductOption {
            id: self.id,
            name: self.name.unwrap_or_default(),
            price: price(&self.price, currency),
            old_price: price(&self.old_price, currency),
        }
    }
}
