//! Storefront domain types and logic for Souq.
//!
//! This crate is the storefront core, with no UI or transport:
//!
//! - **Catalog**: Products (simple or with options), brands, categories
//! - **Cart**: Persisted cart with a pure transition function and pricing
//! - **Search**: Filtering, sorting, pagination and the listing view state
//! - **Checkout**: Customer details, order payloads, placing and tracking
//!
//! # Example
//!
//! ```rust
//! use souq_cache::{Cache, MemoryStore};
//! use souq_commerce::prelude::*;
//!
//! let oil = Product::simple(12u64, "Olive Oil", Money::from_major(86_000, Currency::SYP))
//!     .with_featured(true);
//!
//! let mut cart = CartStore::open(Cache::new(MemoryStore::new()), Currency::SYP);
//! cart.add_to_cart(&oil, 2, None);
//! assert_eq!(cart.cart_total().display(), "172,000 ل.س");
//!
//! let spec = FilterSpec::new().with_featured_only(true);
//! let visible = paginate_products(filter_products(&[oil], &spec), 1, spec.page_size);
//! assert_eq!(visible.pagination.total, 1);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod api;
pub mod backend;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Brand, Category, Product, ProductKind, ProductOption};

    // Cart
    pub use crate::cart::{
        Cart, CartAction, CartPricing, CartStore, ItemSelector, LineItem, LineKey,
    };

    // Search
    pub use crate::search::{
        filter_products, paginate_products, CatalogView, FilterSpec, Page, Pagination,
        SortOption,
    };

    // Checkout
    pub use crate::backend::StorefrontBackend;
    pub use crate::checkout::{
        place_order, CheckoutError, CustomerDetails, OrderConfirmation, OrderRequest,
        OrderStatus,
    };
}
