//! Product catalog module.
//!
//! Contains types for products, options, brands and categories.

mod category;
mod product;

pub use category::{unique_brands, unique_categories, Brand, Category};
pub use product::{find_by_slug, find_product, slugify, Product, ProductKind, ProductOption};
