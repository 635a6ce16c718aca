//! Order payloads and order status.

use std::fmt;

use crate::api::ApiPrice;
use crate::cart::{Cart, LineItem};
use crate::checkout::{CheckoutError, CustomerDetails};
use crate::ids::{OptionId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Order status as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "RawStatus", into = "String")]
pub enum OrderStatus {
    /// Order placed, not yet looked at.
    #[default]
    New,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    /// A status this client does not know.
    Other(String),
}

impl OrderStatus {
    /// Statuses shown on the tracking timeline, in order.
    pub const TIMELINE: [OrderStatus; 5] = [
        OrderStatus::New,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => OrderStatus::New,
            "confirmed" => OrderStatus::Confirmed,
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(value) => value,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(value) => value,
        }
    }

    /// Position on the tracking timeline, None for statuses off it.
    pub fn progress_index(&self) -> Option<usize> {
        Self::TIMELINE.iter().position(|s| s == self)
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Status on the wire: a bare string or `{ "value": ..., "label": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Plain(String),
    Detailed { value: String },
}

impl From<RawStatus> for OrderStatus {
    fn from(raw: RawStatus) -> Self {
        match raw {
            RawStatus::Plain(value) | RawStatus::Detailed { value } => OrderStatus::parse(&value),
        }
    }
}

/// One item of an order submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub shop_product_id: ProductId,
    pub qty: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_id: Option<OptionId>,
}

impl From<&LineItem> for OrderItem {
    fn from(item: &LineItem) -> Self {
        Self {
            shop_product_id: item.product_id,
            qty: item.quantity,
            option_id: item.option_id,
        }
    }
}

/// Order submission payload: customer fields plus items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRequest {
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub items: Vec<OrderItem>,
}

impl OrderRequest {
    /// Build the payload from the cart's lines, in cart order.
    pub fn from_cart(customer: CustomerDetails, cart: &Cart) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self {
            customer,
            items: cart.items().iter().map(OrderItem::from).collect(),
        })
    }
}

/// What the backend answers to a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Order number used for tracking.
    pub number: String,
    #[serde(default)]
    pub status: OrderStatus,
}

/// Status plus its backend-provided label, as shown on tracking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TrackedStatus {
    Labelled {
        value: OrderStatus,
        #[serde(default)]
        label: Option<String>,
    },
    Plain(OrderStatus),
}

impl TrackedStatus {
    pub fn status(&self) -> &OrderStatus {
        match self {
            TrackedStatus::Labelled { value, .. } | TrackedStatus::Plain(value) => value,
        }
    }

    /// Backend label if any, else the status display name.
    pub fn label(&self) -> &str {
        match self {
            TrackedStatus::Labelled {
                label: Some(label), ..
            } => label,
            _ => self.status().display_name(),
        }
    }
}

/// An order as returned by tracking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDetails {
    pub number: String,
    pub status: TrackedStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub total_price: Option<ApiPrice>,
}

impl OrderDetails {
    pub fn total(&self, currency: Currency) -> Option<Money> {
        self.total_price.as_ref().and_then(|p| p.to_money(currency))
    }
}
