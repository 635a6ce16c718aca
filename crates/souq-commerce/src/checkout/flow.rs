//! Placing and tracking orders.

use souq_cache::KeyValueStore;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::{BackendError, StorefrontBackend};
use crate::cart::CartStore;
use crate::checkout::{CustomerDetails, FieldError, OrderConfirmation, OrderDetails, OrderRequest};
use crate::error::CommerceError;

/// Why checkout did not complete.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid customer details: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("order tracking needs an order number and phone")]
    MissingTrackingKey,

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate, submit the cart as an order, and clear the cart.
///
/// The cart is only cleared once the backend accepts the order; any failure
/// leaves it untouched.
pub async fn place_order<B, S>(
    backend: &B,
    cart: &mut CartStore<S>,
    customer: CustomerDetails,
) -> Result<OrderConfirmation, CheckoutError>
where
    B: StorefrontBackend + ?Sized,
    S: KeyValueStore,
{
    customer.validate()?;
    let request = OrderRequest::from_cart(customer, cart.cart())?;
    debug!(items = request.items.len(), "submitting order");

    let confirmation = backend.submit_order(&request).await.map_err(|err| {
        warn!(error = %err, "order submission failed");
        err
    })?;

    info!(number = %confirmation.number, status = %confirmation.status, "order placed");
    cart.clear_cart();
    Ok(confirmation)
}

/// Look up an order. Both keys are trimmed and must be non-empty.
pub async fn track_order<B: StorefrontBackend + ?Sized>(
    backend: &B,
    number: &str,
    phone: &str,
) -> Result<OrderDetails, CheckoutError> {
    let (number, phone) = (number.trim(), phone.trim());
    if number.is_empty() || phone.is_empty() {
        return Err(CheckoutError::MissingTrackingKey);
    }
    Ok(backend.track_order(number, phone).await?)
}
