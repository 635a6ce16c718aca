//! Durable cart format.
//!
//! The cart is stored as a JSON array of line records under a single key:
//!
//! ```json
//! [{"id": 12, "name": "...", "price": 86000.0, "oldPrice": 96000.0,
//!   "image": "https://...", "brand": "...", "categories": ["..."],
//!   "slug": "...", "quantity": 2, "option_id": null}]
//! ```

use souq_cache::{Cache, CacheError, KeyValueStore};
use thiserror::Error;

use crate::cart::{Cart, LineItem};
use crate::ids::{OptionId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Default key the cart is stored under.
pub const DEFAULT_CART_KEY: &str = "souq_cart";

/// Why a persisted cart could not be restored.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The store itself failed.
    #[error("cart storage unavailable: {0}")]
    Storage(#[from] CacheError),

    /// The stored value is not a valid cart.
    #[error("stored cart is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

/// One line record as it appears in storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredLineItem {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(rename = "oldPrice", default)]
    pub old_price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub slug: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub option_id: Option<OptionId>,
}

impl StoredLineItem {
    /// Encode a line item.
    pub fn from_line(item: &LineItem) -> Self {
        Self {
            id: item.product_id,
            name: item.name.clone(),
            price: item.unit_price.to_decimal(),
            old_price: item.previous_unit_price.map(|m| m.to_decimal()),
            image: Some(item.image.clone()),
            brand: Some(item.brand.clone()),
            categories: Some(item.categories.clone()),
            slug: Some(item.slug.clone()),
            quantity: item.quantity,
            option_id: item.option_id,
        }
    }

    /// Decode into a line item priced in `currency`.
    pub fn into_line(self, currency: Currency) -> LineItem {
        LineItem {
            product_id: self.id,
            name: self.name,
            brand: self.brand.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            categories: self.categories.unwrap_or_default(),
            slug: self.slug.unwrap_or_default(),
            unit_price: Money::from_decimal(self.price, currency),
            previous_unit_price: self.old_price.map(|p| Money::from_decimal(p, currency)),
            option_id: self.option_id,
            quantity: self.quantity,
        }
    }
}

/// Encode a cart to its stored JSON form.
pub fn encode_cart(cart: &Cart) -> Result<String, serde_json::Error> {
    let records: Vec<StoredLineItem> = cart.items().iter().map(StoredLineItem::from_line).collect();
    serde_json::to_string(&records)
}

/// Decode a cart from its stored JSON form.
///
/// Lines that break the cart invariants (duplicates, non-positive
/// quantities) are normalised rather than rejected.
pub fn decode_cart(json: &str, currency: Currency) -> Result<Cart, PersistenceError> {
    let records: Vec<StoredLineItem> =
        serde_json::from_str(json).map_err(PersistenceError::Corrupt)?;
    Ok(Cart::with_items(
        records.into_iter().map(|r| r.into_line(currency)).collect(),
        currency,
    ))
}

/// Read the cart stored under `key`. A missing key is an empty cart.
pub fn load_cart<S: KeyValueStore>(
    cache: &Cache<S>,
    key: &str,
    currency: Currency,
) -> Result<Cart, PersistenceError> {
    match cache.get_raw(key)? {
        Some(json) => decode_cart(&json, currency),
        None => Ok(Cart::new(currency)),
    }
}

/// Overwrite the cart stored under `key`.
pub fn save_cart<S: KeyValueStore>(
    cache: &Cache<S>,
    key: &str,
    cart: &Cart,
) -> Result<(), PersistenceError> {
    let records: Vec<StoredLineItem> = cart.items().iter().map(StoredLineItem::from_line).collect();
    cache.set(key, &records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartAction;
    use souq_cache::MemoryStore;

    fn sample_cart() -> Cart {
        let mut first = LineItem {
            product_id: ProductId::new(12),
            name: "زيت زيتون".into(),
            brand: "Jullanar".into(),
            image: "https://img/oil.jpg".into(),
            categories: vec!["Oils".into()],
            slug: "olive-oil".into(),
            unit_price: Money::from_major(86_000, Currency::SYP),
            previous_unit_price: Some(Money::from_major(96_000, Currency::SYP)),
            option_id: None,
            quantity: 2,
        };
        let mut second = first.clone();
        second.option_id = Some(OptionId::new(4));
        second.unit_price = Money::new(12_050, Currency::SYP);
        second.previous_unit_price = None;
        first.quantity = 3;

        Cart::new(Currency::SYP)
            .apply(CartAction::Add(first))
            .apply(CartAction::Add(second))
    }

    #[test]
    fn test_encode_uses_storage_field_names() {
        let json = encode_cart(&sample_cart()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value[0];
        assert_eq!(first["id"], 12);
        assert_eq!(first["price"], 86000.0);
        assert_eq!(first["oldPrice"], 96000.0);
        assert_eq!(first["quantity"], 3);
        assert!(first["option_id"].is_null());
        assert_eq!(value[1]["option_id"], 4);
    }

    #[test]
    fn test_roundtrip_preserves_cart() {
        let cart = sample_cart();
        let json = encode_cart(&cart).unwrap();
        assert_eq!(decode_cart(&json, Currency::SYP).unwrap(), cart);
    }

    #[test]
    fn test_decode_tolerates_missing_display_fields() {
        let json = r#"[{"id": 1, "name": "Tea", "price": 5, "quantity": 1, "brand": null}]"#;
        let cart = decode_cart(json, Currency::SYP).unwrap();
        let item = &cart.items()[0];

        assert_eq!(item.brand, "");
        assert!(item.categories.is_empty());
        assert_eq!(item.option_id, None);
        assert_eq!(item.unit_price, Money::from_major(5, Currency::SYP));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_cart("{oops", Currency::SYP),
            Err(PersistenceError::Corrupt(_))
        ));
        assert!(matches!(
            decode_cart(r#"{"id": 1}"#, Currency::SYP),
            Err(PersistenceError::Corrupt(_))
        ));
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let cache = Cache::new(MemoryStore::new());
        let cart = load_cart(&cache, DEFAULT_CART_KEY, Currency::SYP).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let cache = Cache::new(MemoryStore::new());
        let cart = sample_cart();

        save_cart(&cache, DEFAULT_CART_KEY, &cart).unwrap();
        assert_eq!(load_cart(&cache, DEFAULT_CART_KEY, Currency::SYP).unwrap(), cart);
    }
}
