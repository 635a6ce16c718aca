//! Shopping cart module.
//!
//! Contains the cart state and its transition function, pricing, the
//! persistence format and the store that ties them to a key-value backend.

mod cart;
pub mod persistence;
mod pricing;
mod store;

pub use cart::{Cart, CartAction, ItemSelector, LineItem, LineKey, MAX_QUANTITY_PER_ITEM};
pub use persistence::{load_cart, save_cart, PersistenceError, StoredLineItem, DEFAULT_CART_KEY};
pub use pricing::{CartPricing, LineItemPricing};
pub use store::CartStore;
