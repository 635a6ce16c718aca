//! The storefront backend seam.
//!
//! Transport, retries and timeouts belong to implementations. The core only
//! sees decoded responses.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::api::{ApiProduct, Paginated};
use crate::catalog::{Brand, Category};
use crate::checkout::{OrderConfirmation, OrderDetails, OrderRequest};
use crate::money::Currency;
use crate::search::CatalogView;

/// A backend call that did not produce a usable answer.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend could not be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The backend answered with something that could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::InvalidResponse(err.to_string())
    }
}

/// Remote catalog and order service.
#[async_trait]
pub trait StorefrontBackend: Send + Sync {
    /// One page of products.
    async fn fetch_products(
        &self,
        page: usize,
        page_size: usize,
    ) -> Result<Paginated<ApiProduct>, BackendError>;

    /// Every brand.
    async fn fetch_brands(&self) -> Result<Vec<Brand>, BackendError>;

    /// One page of categories.
    async fn fetch_categories(
        &self,
        page: usize,
        page_size: usize,
    ) -> Result<Paginated<Category>, BackendError>;

    /// Submit an order.
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, BackendError>;

    /// Look an order up by number and the phone it was placed with.
    async fn track_order(&self, number: &str, phone: &str) -> Result<OrderDetails, BackendError>;
}

/// Fetch the page `view` asks for, if it asks for one.
///
/// Returns whether a fetch happened.
pub async fn refresh_view<B: StorefrontBackend + ?Sized>(
    backend: &B,
    view: &mut CatalogView,
    currency: Currency,
) -> Result<bool, BackendError> {
    if !view.needs_fetch() {
        return Ok(false);
    }
    let (page, page_size) = view.fetch_request();
    debug!(page, page_size, "fetching products");
    let fetched = backend.fetch_products(page, page_size).await?;
    view.load(fetched.into_page(currency));
    Ok(true)
}
