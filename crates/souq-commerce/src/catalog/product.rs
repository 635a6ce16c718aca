//! Product and option types.

use crate::error::CommerceError;
use crate::ids::{OptionId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products are read-only to the storefront core: they come from the
/// backend and are only filtered, sorted and snapshotted into the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Backend identifier. Higher ids are newer products.
    pub id: ProductId,
    /// URL-friendly slug.
    pub slug: String,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Brand name.
    pub brand: String,
    /// Category names this product belongs to.
    pub categories: Vec<String>,
    /// Image URLs, first one is the cover.
    pub images: Vec<String>,
    /// Original price, shown struck through when higher than the price.
    pub old_price: Option<Money>,
    /// Whether the product is featured.
    pub featured: bool,
    /// Pricing shape of the product.
    pub kind: ProductKind,
}

/// Pricing shape of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProductKind {
    /// Single fixed price. `None` when the backend price was unreadable.
    Simple { price: Option<Money> },
    /// A set of named options, each with its own price.
    Variable { options: Vec<ProductOption> },
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Simple { .. } => "simple",
            ProductKind::Variable { .. } => "variable",
        }
    }
}

/// One purchasable option of a variable product (e.g., a size).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductOption {
    /// Option identifier.
    pub id: OptionId,
    /// Display name (e.g., "500 ml").
    pub name: String,
    /// Price of this option.
    pub price: Option<Money>,
    /// Original price of this option.
    pub old_price: Option<Money>,
}

impl ProductOption {
    pub fn new(id: impl Into<OptionId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: Some(price),
            old_price: None,
        }
    }
}

impl Product {
    /// Create a simple product with the given price.
    pub fn simple(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self::with_kind(id, name, ProductKind::Simple { price: Some(price) })
    }

    /// Create a variable product from its options.
    pub fn variable(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        options: Vec<ProductOption>,
    ) -> Self {
        Self::with_kind(id, name, ProductKind::Variable { options })
    }

    fn with_kind(id: impl Into<ProductId>, name: impl Into<String>, kind: ProductKind) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            description: String::new(),
            brand: String::new(),
            categories: Vec::new(),
            images: Vec::new(),
            old_price: None,
            featured: false,
            kind,
        }
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a category, ignoring duplicates.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    /// Add an image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Set the original (pre-discount) price.
    pub fn with_old_price(mut self, old_price: Money) -> Self {
        self.old_price = Some(old_price);
        self
    }

    /// Mark the product as featured.
    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// Check if this is a variable product (has options).
    pub fn has_options(&self) -> bool {
        matches!(self.kind, ProductKind::Variable { .. })
    }

    /// Options of a variable product, empty for simple products.
    pub fn options(&self) -> &[ProductOption] {
        match &self.kind {
            ProductKind::Simple { .. } => &[],
            ProductKind::Variable { options } => options,
        }
    }

    /// Find an option by id.
    pub fn option(&self, option_id: OptionId) -> Option<&ProductOption> {
        self.options().iter().find(|o| o.id == option_id)
    }

    /// Find an option by id, failing when the product does not list it.
    pub fn require_option(&self, option_id: OptionId) -> Result<&ProductOption, CommerceError> {
        self.option(option_id)
            .ok_or_else(|| CommerceError::OptionNotFound {
                product: self.id.to_string(),
                option: option_id.to_string(),
            })
    }

    /// The price used for filtering and sorting.
    ///
    /// Simple products use their own price; variable products use the
    /// cheapest priced option.
    pub fn representative_price(&self) -> Option<Money> {
        match &self.kind {
            ProductKind::Simple { price } => *price,
            ProductKind::Variable { options } => options
                .iter()
                .filter_map(|o| o.price)
                .min_by_key(|p| p.amount_minor),
        }
    }

    /// The price that flows into the cart for the given option.
    ///
    /// Falls back to the representative price when no option is given or
    /// the option is unknown or unpriced.
    pub fn price_for(&self, option_id: Option<OptionId>) -> Option<Money> {
        option_id
            .and_then(|id| self.option(id))
            .and_then(|o| o.price)
            .or_else(|| self.representative_price())
    }

    /// The original price that accompanies [`Product::price_for`].
    pub fn old_price_for(&self, option_id: Option<OptionId>) -> Option<Money> {
        option_id
            .and_then(|id| self.option(id))
            .and_then(|o| o.old_price)
            .or(self.old_price)
    }

    /// Cover image URL.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Check if this product is on sale (old price above the price).
    pub fn is_on_sale(&self) -> bool {
        self.discount_percentage().is_some()
    }

    /// Rounded discount percentage when the old price exceeds the price.
    pub fn discount_percentage(&self) -> Option<i64> {
        let price = self.representative_price()?;
        let old = self.old_price?;
        if old.currency != price.currency || old.amount_minor <= price.amount_minor {
            return None;
        }
        let savings = (old.amount_minor - price.amount_minor) as f64;
        Some((savings / old.amount_minor as f64 * 100.0).round() as i64)
    }
}

/// Build a URL-safe slug: lowercase, alphanumerics kept (any script),
/// everything else collapsed into single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Find a product by id.
pub fn find_product(products: &[Product], id: ProductId) -> Result<&Product, CommerceError> {
    products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
}

/// Find a product by slug.
pub fn find_by_slug<'a>(products: &'a [Product], slug: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.slug == slug)
}
