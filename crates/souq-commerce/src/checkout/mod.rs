//! Checkout module.
//!
//! Contains customer details, order payloads and the place/track flow.

mod customer;
mod flow;
mod order;

pub use customer::{is_valid_phone, CustomerDetails, FieldError, FieldProblem, SYRIAN_CITIES};
pub use flow::{place_order, track_order, CheckoutError};
pub use order::{
    OrderConfirmation, OrderDetails, OrderItem, OrderRequest, OrderStatus, TrackedStatus,
};
