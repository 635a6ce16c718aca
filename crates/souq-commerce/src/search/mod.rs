//! Catalog query engine.
//!
//! Filtering, sorting and pagination over an in-memory product list, plus
//! the listing state that switches between server and local pagination.

pub mod collation;
mod filter;
mod query;
mod results;
mod view;

pub use filter::{FilterSpec, PriceRange, DEFAULT_PAGE_SIZE, PAGE_SIZE_CHOICES};
pub use query::{filter_products, SortOption};
pub use results::{paginate_products, Page, PageLink, Pagination};
pub use view::CatalogView;
