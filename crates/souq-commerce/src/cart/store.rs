//! The persisted cart store.

use souq_cache::{Cache, KeyValueStore};
use tracing::{debug, error, warn};

use crate::cart::persistence::{load_cart, save_cart, DEFAULT_CART_KEY};
use crate::cart::{Cart, CartAction, CartPricing, ItemSelector, LineItem};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{OptionId, ProductId};
use crate::money::{Currency, Money};

/// A cart bound to a key-value store.
///
/// Every mutation goes through [`Cart::apply`] and then writes the whole
/// cart back under the store key. Writes that fail are logged and the
/// in-memory cart stays authoritative.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    cache: Cache<S>,
    key: String,
    cart: Cart,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open the cart stored under the default key.
    pub fn open(cache: Cache<S>, currency: Currency) -> Self {
        Self::open_at(cache, DEFAULT_CART_KEY, currency)
    }

    /// Open the cart stored under `key`.
    ///
    /// Missing, unreadable or corrupt state starts an empty cart.
    pub fn open_at(cache: Cache<S>, key: impl Into<String>, currency: Currency) -> Self {
        let key = key.into();
        let cart = match load_cart(&cache, &key, currency) {
            Ok(cart) => {
                debug!(key = %key, lines = cart.line_count(), "restored cart");
                cart
            }
            Err(err) => {
                warn!(key = %key, error = %err, "discarding stored cart");
                Cart::new(currency)
            }
        };
        Self { cache, key, cart }
    }

    /// Add `quantity` of `product`, optionally for one of its options.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64, option_id: Option<OptionId>) {
        if let Some(option) = option_id {
            if product.option(option).is_none() {
                debug!(product = %product.id, option = %option, "option not listed on product");
            }
        }
        let line = LineItem::from_product(product, quantity, option_id, self.cart.currency);
        self.add_line(line);
    }

    /// Add an already built line snapshot.
    pub fn add_line(&mut self, line: LineItem) {
        debug!(
            product = %line.product_id,
            option = ?line.option_id.map(OptionId::get),
            quantity = line.quantity,
            "add to cart"
        );
        self.dispatch(CartAction::Add(line));
    }

    /// Remove the selected lines. Removing something absent does nothing.
    pub fn remove_from_cart(&mut self, selector: impl Into<ItemSelector>) {
        let selector = selector.into();
        debug!(?selector, "remove from cart");
        self.dispatch(CartAction::Remove(selector));
    }

    /// Set the quantity of the selected lines; zero or less removes them.
    pub fn update_quantity(&mut self, selector: impl Into<ItemSelector>, quantity: i64) {
        let selector = selector.into();
        debug!(?selector, quantity, "update quantity");
        self.dispatch(CartAction::UpdateQuantity(selector, quantity));
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        debug!("clear cart");
        self.dispatch(CartAction::Clear);
    }

    /// Sum of `unit_price * quantity` over all lines.
    ///
    /// Lines in another currency never enter the cart, so this falls back to
    /// zero only if the arithmetic overflows.
    pub fn cart_total(&self) -> Money {
        self.cart.total().unwrap_or_else(|err| {
            error!(key = %self.key, error = %err, "cart total unavailable");
            Money::zero(self.cart.currency)
        })
    }

    /// Sum of quantities.
    pub fn cart_items_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn is_in_cart(&self, product_id: ProductId, option_id: Option<OptionId>) -> bool {
        self.cart.contains(product_id, option_id)
    }

    pub fn cart_item(&self, product_id: ProductId, option_id: Option<OptionId>) -> Option<&LineItem> {
        self.cart.get(product_id, option_id)
    }

    /// Full pricing breakdown.
    pub fn pricing(&self) -> Result<CartPricing, CommerceError> {
        CartPricing::for_cart(&self.cart)
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Storage key this cart is written under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying cache.
    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }

    fn dispatch(&mut self, action: CartAction) {
        let cart = std::mem::take(&mut self.cart);
        self.cart = cart.apply(action);
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = save_cart(&self.cache, &self.key, &self.cart) {
            error!(key = %self.key, error = %err, "failed to persist cart");
        }
    }
}
