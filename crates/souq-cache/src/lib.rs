//! Type-safe durable Key-Value storage for the Souq storefront.
//!
//! Provides a small, ergonomic API for keeping client-side state (such as
//! the shopping cart) in a key-value store with automatic JSON
//! serialization. Two stores ship with the crate: [`MemoryStore`] and the
//! directory-backed [`FileStore`].
//!
//! # Example
//!
//! ```rust
//! use souq_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("souq_cart", &vec![1, 2, 3]).unwrap();
//!
//! // Retrieve a value
//! let items: Option<Vec<i32>> = cache.get("souq_cart").unwrap();
//! assert_eq!(items, Some(vec![1, 2, 3]));
//!
//! // Delete a value
//! cache.delete("souq_cart").unwrap();
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
