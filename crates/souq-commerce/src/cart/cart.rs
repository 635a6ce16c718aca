//! Cart state, line items and the pure transition function.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{OptionId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Identity of a line item: a product plus an optional option.
///
/// `option_id = None` is its own bucket, distinct from every concrete option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub option_id: Option<OptionId>,
}

impl LineKey {
    pub fn new(product_id: impl Into<ProductId>, option_id: Option<OptionId>) -> Self {
        Self {
            product_id: product_id.into(),
            option_id,
        }
    }
}

/// Which line items a removal or quantity update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSelector {
    /// Every line of the product, across all options.
    Product(ProductId),
    /// Exactly one line identity.
    Line(LineKey),
}

impl ItemSelector {
    /// Check if the selector targets `item`.
    pub fn matches(&self, item: &LineItem) -> bool {
        match self {
            ItemSelector::Product(id) => item.product_id == *id,
            ItemSelector::Line(key) => item.key() == *key,
        }
    }
}

impl From<ProductId> for ItemSelector {
    fn from(id: ProductId) -> Self {
        ItemSelector::Product(id)
    }
}

impl From<LineKey> for ItemSelector {
    fn from(key: LineKey) -> Self {
        ItemSelector::Line(key)
    }
}

/// A line item in the cart.
///
/// Display fields are snapshotted when the product is added and never
/// re-fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Cover image URL, empty when the product had none.
    pub image: String,
    /// Category names.
    pub categories: Vec<String>,
    /// Product slug, for linking back to the product page.
    pub slug: String,
    /// Unit price at add time.
    pub unit_price: Money,
    /// Original unit price, for struck-through display.
    pub previous_unit_price: Option<Money>,
    /// Selected option of a variable product.
    pub option_id: Option<OptionId>,
    /// Quantity, always at least 1 while stored in a cart.
    pub quantity: i64,
}

impl LineItem {
    /// Snapshot `product` into a line item.
    ///
    /// The price is the selected option's price when `option_id` is given,
    /// otherwise the product's representative price. An unpriced product is
    /// snapshotted at zero in `currency`.
    pub fn from_product(
        product: &Product,
        quantity: i64,
        option_id: Option<OptionId>,
        currency: Currency,
    ) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: product.cover_image().unwrap_or_default().to_string(),
            categories: product.categories.clone(),
            slug: product.slug.clone(),
            unit_price: product
                .price_for(option_id)
                .unwrap_or_else(|| Money::zero(currency)),
            previous_unit_price: product.old_price_for(option_id),
            option_id,
            quantity,
        }
    }

    /// The identity of this line.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id,
            option_id: self.option_id,
        }
    }

    /// `unit_price * quantity`, or None on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }
}

/// A cart mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Replace the contents with previously persisted items.
    Load(Vec<LineItem>),
    /// Add a snapshot, merging with an existing line of the same identity.
    Add(LineItem),
    /// Remove every matching line.
    Remove(ItemSelector),
    /// Set the quantity of every matching line; zero or less removes it.
    UpdateQuantity(ItemSelector, i64),
    /// Remove everything.
    Clear,
}

/// A shopping cart: an insertion-ordered list of line items.
///
/// No two items share a [`LineKey`], every quantity is in
/// `1..=MAX_QUANTITY_PER_ITEM` and every unit price is in the cart currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Build a cart from raw items, restoring the invariants.
    pub fn with_items(items: Vec<LineItem>, currency: Currency) -> Self {
        Self::new(currency).apply(CartAction::Load(items))
    }

    /// Pure transition: consume the current state and return the next one.
    pub fn apply(mut self, action: CartAction) -> Self {
        match action {
            CartAction::Load(items) => {
                self.items.clear();
                for item in items {
                    self.merge(item);
                }
            }
            CartAction::Add(item) => self.merge(item),
            CartAction::Remove(selector) => self.items.retain(|i| !selector.matches(i)),
            CartAction::UpdateQuantity(selector, quantity) => {
                let quantity = quantity.clamp(0, MAX_QUANTITY_PER_ITEM);
                for item in self.items.iter_mut().filter(|i| selector.matches(i)) {
                    item.quantity = quantity;
                }
                self.items.retain(|i| i.quantity > 0);
            }
            CartAction::Clear => self.items.clear(),
        }
        self
    }

    fn merge(&mut self, mut item: LineItem) {
        if item.unit_price.currency != self.currency {
            warn!(
                product = %item.product_id,
                expected = self.currency.code(),
                got = item.unit_price.currency.code(),
                "dropping line priced in another currency"
            );
            return;
        }
        if item
            .previous_unit_price
            .is_some_and(|prev| prev.currency != self.currency)
        {
            item.previous_unit_price = None;
        }

        let key = item.key();
        if let Some(pos) = self.items.iter().position(|i| i.key() == key) {
            let existing = &mut self.items[pos];
            existing.quantity = existing
                .quantity
                .saturating_add(item.quantity)
                .min(MAX_QUANTITY_PER_ITEM);
            if existing.quantity <= 0 {
                self.items.remove(pos);
            }
        } else if item.quantity > 0 {
            item.quantity = item.quantity.min(MAX_QUANTITY_PER_ITEM);
            self.items.push(item);
        }
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart, returning its items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the line with the given identity.
    pub fn get(&self, product_id: ProductId, option_id: Option<OptionId>) -> Option<&LineItem> {
        let key = LineKey::new(product_id, option_id);
        self.items.iter().find(|i| i.key() == key)
    }

    /// Check if the line with the given identity exists.
    pub fn contains(&self, product_id: ProductId, option_id: Option<OptionId>) -> bool {
        self.get(product_id, option_id).is_some()
    }

    /// Sum of `unit_price * quantity`, recomputed on every call.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.items.iter().try_fold(Money::zero(self.currency), |acc, item| {
            if item.unit_price.currency != self.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: item.unit_price.currency.code().to_string(),
                });
            }
            item.line_total()
                .and_then(|line| acc.try_add(&line))
                .ok_or(CommerceError::Overflow)
        })
    }
}
